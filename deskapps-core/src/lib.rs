//! Core library for the `deskapps` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The OpenWeather provider, IP geolocation and forecast aggregation
//! - SQLite storage for the contact book and the login check
//! - Themes and search history used by the weather front end
//!
//! It is used by `deskapps-cli`, but can also be reused by other binaries or services.

pub mod auth;
pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod forecast;
pub mod geolocate;
pub mod history;
pub mod model;
pub mod provider;
pub mod theme;

pub use config::Config;
pub use contacts::{Contact, ContactDraft, ContactStore};
pub use error::{StoreError, StoreResult};
pub use model::{DailyForecast, ForecastEntry, WeatherReport, WeatherSnapshot};
pub use provider::{WeatherProvider, fetch_report};
pub use theme::{Palette, Theme};
