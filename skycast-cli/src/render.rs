//! Human-friendly output formatting for the widget state.

use crossterm::style::Stylize;
use skycast_core::{AppState, CurrentConditions, ForecastEntry, QueryStatus, Theme};

/// Print the state according to its status: nothing while idle, the single
/// error message on failure, conditions plus forecast on success.
pub fn state(state: &AppState) {
    match &state.status {
        QueryStatus::Idle => {}
        QueryStatus::Loading => println!("Loading..."),
        QueryStatus::Error(msg) => println!("{msg}"),
        QueryStatus::Success => {
            if let Some(current) = &state.current {
                print_current(current, state.theme);
            }
            if !state.forecast.is_empty() {
                print_forecast(&state.forecast, state.theme);
            }
        }
    }
}

fn print_current(current: &CurrentConditions, theme: Theme) {
    let header = format!("{} {}", icon_glyph(&current.icon), current.location);

    println!();
    println!("  {}", heading(&header, theme));
    println!("  {}", format_temperature(current));
    println!("  {}", current.description);
    println!(
        "  Humidity: {}%   Wind: {:.1} m/s",
        current.humidity_pct, current.wind_speed_mps
    );
    println!();
}

fn print_forecast(forecast: &[ForecastEntry], theme: Theme) {
    println!("  {}", heading("Forecast", theme));
    for entry in forecast {
        println!("    {}", format_forecast_row(entry));
    }
    println!();
}

fn format_temperature(current: &CurrentConditions) -> String {
    format!(
        "{:.1}°C  (feels like {:.1}°C)",
        current.temperature_c, current.feels_like_c
    )
}

fn format_forecast_row(entry: &ForecastEntry) -> String {
    format!(
        "{}  {}  {:>5.1}°C  {}",
        entry.timestamp.format("%a %H:%M"),
        icon_glyph(&entry.icon),
        entry.temperature_c,
        entry.description,
    )
}

/// Theme-dependent heading style. Styling is the only thing the theme
/// changes.
fn heading(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Light => text.bold().to_string(),
        Theme::Dark => text.bold().dark_cyan().to_string(),
    }
}

/// Map an OpenWeather icon code to a console glyph. The trailing
/// day/night marker of the code is irrelevant here.
fn icon_glyph(code: &str) -> &'static str {
    match code.trim_end_matches(['d', 'n']) {
        "01" => "☀",
        "02" => "⛅",
        "03" | "04" => "☁",
        "09" | "10" => "🌧",
        "11" => "⛈",
        "13" => "❄",
        "50" => "🌫",
        _ => "·",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn glyphs_cover_the_openweather_icon_set() {
        assert_eq!(icon_glyph("01d"), "☀");
        assert_eq!(icon_glyph("01n"), "☀");
        assert_eq!(icon_glyph("04n"), "☁");
        assert_eq!(icon_glyph("10d"), "🌧");
        assert_eq!(icon_glyph("13d"), "❄");
        assert_eq!(icon_glyph("unknown"), "·");
    }

    #[test]
    fn forecast_row_shows_weekday_glyph_and_temperature() {
        let entry = ForecastEntry {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            icon: "03d".into(),
            description: "scattered clouds".into(),
            temperature_c: 9.8,
        };

        assert_eq!(
            format_forecast_row(&entry),
            "Fri 12:00  ☁    9.8°C  scattered clouds"
        );
    }

    #[test]
    fn temperature_line_includes_feels_like() {
        let current = CurrentConditions {
            location: "London".into(),
            icon: "10d".into(),
            description: "light rain".into(),
            temperature_c: 11.25,
            feels_like_c: 10.6,
            humidity_pct: 82,
            wind_speed_mps: 4.6,
        };

        assert_eq!(format_temperature(&current), "11.2°C  (feels like 10.6°C)");
    }

    #[test]
    fn headings_keep_the_text_in_both_themes() {
        for theme in [Theme::Light, Theme::Dark] {
            assert!(heading("Forecast", theme).contains("Forecast"));
        }
    }
}
