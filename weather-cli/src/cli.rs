use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use weather_core::{
    Config, DEFAULT_FORECAST_DAYS, FORECAST_DAYS_RANGE, HistoryCache, provider_from_config,
};

use crate::{action::Action, display, repl, session::Session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI with request history")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Without a subcommand an interactive prompt is started.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and language.
    Configure,

    /// Show current weather for a city and add it to the history.
    Current {
        /// City name, may contain spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show a per-day forecast.
    Forecast {
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Number of days, 1 to 10.
        #[arg(long, short, default_value_t = DEFAULT_FORECAST_DAYS, value_parser = days_in_range)]
        days: u8,
    },

    /// Show the recent lookups, newest first.
    History,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&config_path)?;

        let action = match self.command {
            Some(Command::Configure) => return configure(&mut config, &config_path),
            Some(Command::History) => {
                let history = HistoryCache::load(config.history_file_path()?);
                display::history(&mut io::stdout(), &history)?;
                return Ok(());
            }
            Some(Command::Current { city }) => Some(Action::Current { city: city.join(" ") }),
            Some(Command::Forecast { city, days }) => {
                Some(Action::Forecast { city: city.join(" "), days })
            }
            None => None,
        };

        let provider = provider_from_config(&config)?;
        let history = HistoryCache::load(config.history_file_path()?);
        tracing::debug!(path = %history.path().display(), "history loaded");

        let mut session = Session::new(provider, history);

        match action {
            Some(action) => {
                session.handle(action, &mut io::stdout()).await?;
            }
            None => repl::run(&mut session).await?,
        }

        Ok(())
    }
}

fn configure(config: &mut Config, path: &Path) -> Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let lang = Text::new("Language for weather descriptions:")
        .with_default(config.lang())
        .prompt()
        .context("Failed to read language")?;
    config.lang = Some(lang.trim().to_string());

    config.save_to(path)?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn days_in_range(s: &str) -> Result<u8, String> {
    let days: u8 = s.parse().map_err(|_| format!("`{s}` is not a number of days"))?;

    if FORECAST_DAYS_RANGE.contains(&days) {
        Ok(days)
    } else {
        Err(format!(
            "days must be between {} and {}",
            FORECAST_DAYS_RANGE.start(),
            FORECAST_DAYS_RANGE.end()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["weather"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn current_joins_city_words() {
        let cli = Cli::parse_from(["weather", "current", "New", "York"]);
        match cli.command {
            Some(Command::Current { city }) => assert_eq!(city.join(" "), "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn forecast_days_default_and_bounds() {
        let cli = Cli::parse_from(["weather", "forecast", "Omsk"]);
        assert!(matches!(cli.command, Some(Command::Forecast { days: 5, .. })));

        let cli = Cli::parse_from(["weather", "forecast", "Omsk", "--days", "10"]);
        assert!(matches!(cli.command, Some(Command::Forecast { days: 10, .. })));

        assert!(Cli::try_parse_from(["weather", "forecast", "Omsk", "-d", "11"]).is_err());
        assert!(Cli::try_parse_from(["weather", "forecast", "Omsk", "-d", "0"]).is_err());
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::parse_from(["weather", "history", "--config", "/tmp/w.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
        assert!(matches!(cli.command, Some(Command::History)));
    }
}
