use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use skywatch_core::{Config, DashboardOutcome, OpenWeatherClient, dashboard};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "City weather & air-quality dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default city.
    Configure,

    /// Show the weather and air-quality dashboard for a city.
    Show {
        /// City name; defaults to the last searched city.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let city = Text::new("Default city:")
        .with_help_message("Press Enter to skip")
        .with_default("")
        .prompt()
        .context("Failed to read default city")?;
    if !city.trim().is_empty() {
        config.set_last_city(city.trim().to_string());
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(city: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let city = city
        .or_else(|| config.last_city().map(str::to_string))
        .context(
            "No city given and no previous search stored.\n\
             Hint: run `skywatch show <city>`, or set a default via `skywatch configure`.",
        )?;

    let api_key = config.resolved_api_key().unwrap_or_default();
    if api_key.is_empty() {
        // Missing key is not fatal here; the request simply fails upstream.
        eprintln!(
            "Warning: no OpenWeather API key configured; requests will be rejected.\n\
             Hint: run `skywatch configure` or set OPENWEATHER_API_KEY."
        );
    }

    debug!("running dashboard pass for '{city}'");

    let client = OpenWeatherClient::new(api_key);
    match dashboard::run(&client, &city).await? {
        DashboardOutcome::CityNotFound => {
            println!("City not found: '{city}'. Please try a different search.");
        }
        DashboardOutcome::Report(report) => {
            print!("{}", render::report(&report));

            config.set_last_city(city);
            config.save()?;
        }
    }

    Ok(())
}
