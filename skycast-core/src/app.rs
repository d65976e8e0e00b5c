//! The search/fetch/history-update flow and its state holder.

use anyhow::Result;
use tracing::debug;

use crate::history::SearchHistory;
use crate::model::{CurrentConditions, ForecastEntry, QueryStatus, Theme};
use crate::provider::WeatherProvider;

/// Number of forecast steps kept for display.
pub const FORECAST_STEPS: usize = 5;

/// The one user-visible failure message: every query failure cause
/// collapses into it.
pub const QUERY_FAILED: &str = "City not found or API error.";

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<ForecastEntry>,
    pub status: QueryStatus,
    pub theme: Theme,
}

/// Top-level controller: owns the state holder and the search history and
/// runs queries against the provider.
#[derive(Debug)]
pub struct App {
    provider: Box<dyn WeatherProvider>,
    history: SearchHistory,
    state: AppState,
}

impl App {
    pub fn new(provider: Box<dyn WeatherProvider>, history: SearchHistory) -> Self {
        Self {
            provider,
            history,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Recent successful search terms, most recent first.
    pub fn history(&self) -> &[String] {
        self.history.list()
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggle();
    }

    /// Run the full query flow for a city name.
    ///
    /// Blank input is a no-op. Otherwise both upstream requests must
    /// succeed before any displayed state changes; on any failure the
    /// display is cleared, the error message is set and the history is left
    /// untouched. The status always leaves `Loading` by the time this
    /// returns.
    pub async fn fetch(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        self.state.status = QueryStatus::Loading;
        let outcome = self.query(name).await;
        self.finish(name, outcome);
    }

    /// Re-fetch the currently displayed location. No-op when nothing is
    /// displayed.
    pub async fn refresh(&mut self) {
        let Some(name) = self.state.current.as_ref().map(|c| c.location.clone()) else {
            return;
        };
        self.fetch(&name).await;
    }

    async fn query(&self, city: &str) -> Result<(CurrentConditions, Vec<ForecastEntry>)> {
        let current = self.provider.current(city).await?;
        let mut forecast = self.provider.forecast(city).await?;
        forecast.truncate(FORECAST_STEPS);
        Ok((current, forecast))
    }

    fn finish(&mut self, name: &str, outcome: Result<(CurrentConditions, Vec<ForecastEntry>)>) {
        match outcome {
            Ok((current, forecast)) => {
                // The canonical name resolved upstream, not the raw input.
                self.history.record(&current.location);
                self.state.current = Some(current);
                self.state.forecast = forecast;
                self.state.status = QueryStatus::Success;
            }
            Err(err) => {
                debug!("query for {name:?} failed: {err:#}");
                self.state.current = None;
                self.state.forecast.clear();
                self.state.status = QueryStatus::Error(QUERY_FAILED.to_string());
            }
        }
    }
}
