use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{CurrentConditions, ForecastEntry};

use super::WeatherProvider;

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Timestamp format of the forecast `dt_txt` field.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get_body(&self, url: &str, city: &str, what: &str) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentConditions> {
        debug!(city, "requesting current conditions");
        let body = self.get_body(CURRENT_URL, city, "current weather").await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        Ok(current_from_response(parsed))
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>> {
        debug!(city, "requesting forecast");
        let body = self.get_body(FORECAST_URL, city, "forecast").await?;

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        parsed.list.into_iter().map(entry_from_response).collect()
    }
}

fn current_from_response(res: OwCurrentResponse) -> CurrentConditions {
    let (icon, description) = primary_weather(&res.weather);

    CurrentConditions {
        location: res.name,
        icon,
        description,
        temperature_c: res.main.temp,
        feels_like_c: res.main.feels_like,
        humidity_pct: res.main.humidity,
        wind_speed_mps: res.wind.speed,
    }
}

fn entry_from_response(entry: OwForecastEntry) -> Result<ForecastEntry> {
    let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
        .with_context(|| format!("Unexpected forecast timestamp format: {:?}", entry.dt_txt))?;

    let (icon, description) = primary_weather(&entry.weather);

    Ok(ForecastEntry {
        timestamp,
        icon,
        description,
        temperature_c: entry.main.temp,
    })
}

fn primary_weather(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.icon.clone(), w.description.clone()))
        .unwrap_or_else(|| (String::new(), "Unknown".to_string()))
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
