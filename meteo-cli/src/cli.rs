use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use meteo_core::{
    Config, GeocodeResult, LocationSession, PermissionStatus, Position, SavedLocation,
    TemperatureUnit, WeatherClient, WeatherError, WeatherSnapshot, WindSpeedUnit, location,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Weather forecasts from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions for a place.
    Current {
        /// Place name, e.g. "Milano". Omit to use the configured default location.
        place: Option<String>,
    },

    /// Show the 7-day forecast for a place.
    Forecast {
        /// Place name, e.g. "Milano". Omit to use the configured default location.
        place: Option<String>,
    },

    /// List geocoding matches for a place name.
    Search {
        /// Free-text place name.
        place: String,
    },

    /// Pick a default location and display units interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let client = WeatherClient::new();

        match self.command {
            Command::Current { place } => {
                let config = Config::load()?;
                let resolved = resolve_place(&client, &config, place.as_deref()).await?;
                let snapshot = fetch_snapshot(&client, &resolved).await?;
                render::current_screen(&resolved.name, &snapshot, config.units);
            }
            Command::Forecast { place } => {
                let config = Config::load()?;
                let resolved = resolve_place(&client, &config, place.as_deref()).await?;
                let snapshot = fetch_snapshot(&client, &resolved).await?;
                render::forecast_screen(&resolved.name, &snapshot, config.units);
            }
            Command::Search { place } => {
                let matches = client
                    .geocode(&place)
                    .await
                    .map_err(|err| anyhow!(render::error_message(&err)))?;

                if matches.is_empty() {
                    println!("Nessun risultato per '{place}'.");
                } else {
                    render::search_results(&matches);
                }
            }
            Command::Configure => {
                configure(&client).await?;
            }
        }

        Ok(())
    }
}

/// A place resolved to coordinates, ready to fetch weather for.
struct ResolvedPlace {
    name: String,
    position: Position,
}

/// Location session backed by an already-resolved position: the CLI's
/// stand-in for device geolocation, with permission always granted.
struct ResolvedLocationSession {
    position: Position,
}

#[async_trait]
impl LocationSession for ResolvedLocationSession {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, WeatherError> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<Position, WeatherError> {
        Ok(self.position)
    }
}

async fn fetch_snapshot(
    client: &WeatherClient,
    resolved: &ResolvedPlace,
) -> Result<WeatherSnapshot> {
    let session = ResolvedLocationSession { position: resolved.position };

    location::snapshot_at_current_location(&session, client)
        .await
        .map_err(|err| anyhow!(render::error_message(&err)))
}

/// Resolve the place argument, falling back to the configured default.
async fn resolve_place(
    client: &WeatherClient,
    config: &Config,
    place: Option<&str>,
) -> Result<ResolvedPlace> {
    match place {
        Some(query) => {
            let chosen = geocode_and_pick(client, query).await?;
            Ok(ResolvedPlace {
                name: place_label(&chosen),
                position: Position {
                    latitude: chosen.latitude,
                    longitude: chosen.longitude,
                },
            })
        }
        None => {
            let saved = config.require_default_location()?;
            Ok(ResolvedPlace {
                name: saved.name.clone(),
                position: Position {
                    latitude: saved.latitude,
                    longitude: saved.longitude,
                },
            })
        }
    }
}

async fn geocode_and_pick(client: &WeatherClient, query: &str) -> Result<GeocodeResult> {
    let mut matches = client
        .geocode(query)
        .await
        .map_err(|err| anyhow!(render::error_message(&err)))?;

    if matches.is_empty() {
        bail!("Nessun risultato per '{query}'.");
    }

    if matches.len() == 1 {
        return Ok(matches.remove(0));
    }

    pick_match(matches)
}

fn pick_match(matches: Vec<GeocodeResult>) -> Result<GeocodeResult> {
    let options: Vec<PlaceOption> = matches.into_iter().map(PlaceOption).collect();

    let picked = Select::new("Quale località intendevi?", options)
        .prompt()
        .context("Place selection aborted")?;

    Ok(picked.0)
}

fn place_label(result: &GeocodeResult) -> String {
    if result.country.is_empty() {
        result.name.clone()
    } else {
        format!("{}, {}", result.name, result.country)
    }
}

struct PlaceOption(GeocodeResult);

impl std::fmt::Display for PlaceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&place_label(&self.0))
    }
}

async fn configure(client: &WeatherClient) -> Result<()> {
    let mut config = Config::load()?;

    let query = Text::new("Località predefinita:")
        .with_help_message("e.g. Milano, Roma, Napoli")
        .prompt()
        .context("Configuration aborted")?;

    let chosen = geocode_and_pick(client, &query).await?;

    let temperature = Select::new("Unità di temperatura:", TemperatureUnit::all().to_vec())
        .prompt()
        .context("Configuration aborted")?;

    let wind_speed = Select::new("Unità del vento:", WindSpeedUnit::all().to_vec())
        .prompt()
        .context("Configuration aborted")?;

    let label = place_label(&chosen);
    config.set_default_location(SavedLocation {
        name: label.clone(),
        latitude: chosen.latitude,
        longitude: chosen.longitude,
    });
    config.units.temperature = temperature;
    config.units.wind_speed = wind_speed;
    config.save()?;

    println!("Località predefinita salvata: {label}");
    Ok(())
}
