use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use skycast_core::{App, Config, SearchHistory, provider_from_config};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a city once and print the result.
    Show {
        /// City name, e.g. "london" or "New York".
        city: String,
    },

    /// Print the recently searched cities, most recent first.
    Recent,

    /// Store the OpenWeather API key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Show { city }) => show(&city).await,
            Some(Command::Recent) => recent(),
            Some(Command::Configure) => configure(),
            None => interactive::run(build_app()?).await,
        }
    }
}

fn build_app() -> Result<App> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let history = SearchHistory::open()?;
    Ok(App::new(provider, history))
}

async fn show(city: &str) -> Result<()> {
    let mut app = build_app()?;

    println!("Fetching weather for {city}...");
    app.fetch(city).await;

    if let Some(msg) = app.state().status.error() {
        bail!("{msg}");
    }

    render::state(app.state());
    Ok(())
}

fn recent() -> Result<()> {
    let history = SearchHistory::open()?;

    if history.list().is_empty() {
        println!("No recent searches.");
    } else {
        for name in history.list() {
            println!("{name}");
        }
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_api_key(key.trim().to_string());
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}
