//! Core library for the `meteo` weather app.
//!
//! This crate defines:
//! - An HTTP client for the Open-Meteo forecast and geocoding APIs
//! - Shared domain models (snapshots, geocoding matches)
//! - Pure presentation helpers (weather descriptions, units, weekday names)
//! - The location-session seam frontends use to supply coordinates
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod location;
pub mod model;

pub use client::WeatherClient;
pub use config::{Config, SavedLocation, Units};
pub use error::WeatherError;
pub use format::{TemperatureUnit, WeatherCodeInfo, WindSpeedUnit};
pub use location::{LocationSession, PermissionStatus, Position};
pub use model::{CurrentConditions, DailyForecast, GeocodeResult, WeatherSnapshot};
