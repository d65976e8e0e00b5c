use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current weather for a resolved location, as reported by the upstream API.
///
/// Replaced wholesale on every successful query, cleared entirely on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Canonical location name resolved by the API; may differ in
    /// case/spelling from what the user typed.
    pub location: String,
    /// Upstream icon code, e.g. "04d".
    pub icon: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// One step of the short-range forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub icon: String,
    pub description: String,
    pub temperature_c: f64,
}

/// Outcome of the most recent query; drives what the renderer shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl QueryStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Display theme preference. Cosmetic only: it selects output styling and
/// carries no data implication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_back_and_forth() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn status_accessors() {
        assert!(QueryStatus::Loading.is_loading());
        assert!(!QueryStatus::Idle.is_loading());
        assert_eq!(QueryStatus::Error("nope".into()).error(), Some("nope"));
        assert_eq!(QueryStatus::Success.error(), None);
    }
}
