use crate::{
    Config,
    config::CredentialError,
    model::{CurrentConditions, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the upstream weather service.
///
/// Both operations resolve the city query with the same upstream
/// semantics, so a name accepted by one is accepted by the other.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city query.
    async fn current(&self, city: &str) -> anyhow::Result<CurrentConditions>;

    /// Multi-step forecast for a city query, in the order returned by the
    /// upstream service.
    async fn forecast(&self, city: &str) -> anyhow::Result<Vec<ForecastEntry>>;
}

/// Construct the provider from resolved configuration.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, CredentialError> {
    let api_key = config.resolve_api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        if std::env::var(crate::config::API_KEY_ENV).is_ok() {
            // Can't observe the missing-key path with a key in the environment.
            return;
        }
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
