//! The interactive widget loop: a search prompt, recent-city shortcuts, a
//! refresh control and a theme toggle.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use skycast_core::{App, Theme};

use crate::render;

const SEARCH: &str = "Search for a city";
const REFRESH: &str = "Refresh";
const TOGGLE_THEME: &str = "Toggle theme";
const QUIT: &str = "Quit";

pub async fn run(mut app: App) -> Result<()> {
    loop {
        let mut options: Vec<String> = vec![SEARCH.to_string()];
        options.extend(app.history().iter().cloned());
        if app.state().current.is_some() {
            options.push(REFRESH.to_string());
        }
        options.push(TOGGLE_THEME.to_string());
        options.push(QUIT.to_string());

        let choice = match Select::new(menu_title(app.state().theme), options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match choice.as_str() {
            SEARCH => {
                let city = match Text::new("City:").prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                fetch_and_render(&mut app, &city).await;
            }
            REFRESH => {
                println!("Loading...");
                app.refresh().await;
                render::state(app.state());
            }
            TOGGLE_THEME => app.toggle_theme(),
            QUIT => break,
            // Anything else on the menu is a recent-city shortcut.
            city => fetch_and_render(&mut app, city).await,
        }
    }

    Ok(())
}

async fn fetch_and_render(app: &mut App, city: &str) {
    if city.trim().is_empty() {
        return;
    }
    println!("Loading...");
    app.fetch(city).await;
    render::state(app.state());
}

fn menu_title(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "☀ skycast",
        Theme::Dark => "🌙 skycast",
    }
}
