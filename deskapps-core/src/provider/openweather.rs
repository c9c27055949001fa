use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::instrument;

use crate::model::{ForecastEntry, WeatherSnapshot};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str, what: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, city, "requesting {what}");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            tracing::warn!(%status, city, "OpenWeather {what} request failed");
            return Err(match status {
                StatusCode::NOT_FOUND => anyhow!("City '{city}' not found"),
                StatusCode::UNAUTHORIZED => anyhow!("Invalid OpenWeather API key"),
                _ => anyhow!(
                    "OpenWeather {} request failed with status {}: {}",
                    what,
                    status,
                    truncate_body(&body),
                ),
            });
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    clouds: OwClouds,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

/// Description and icon of the first `weather` element.
fn first_condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "info")]
    async fn current(&self, city: &str) -> Result<WeatherSnapshot> {
        let parsed: OwCurrentResponse = self.get_json("weather", city, "current weather").await?;
        let (description, icon) = first_condition(parsed.weather);

        Ok(WeatherSnapshot {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            cloudiness_pct: parsed.clouds.all,
            description,
            icon,
            wind_speed_mps: parsed.wind.speed,
        })
    }

    #[instrument(skip(self), level = "info")]
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>> {
        let parsed: OwForecastResponse = self.get_json("forecast", city, "5-day forecast").await?;

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastEntry> {
                let timestamp = DateTime::<Utc>::from_timestamp(entry.dt, 0)
                    .ok_or_else(|| anyhow!("OpenWeather forecast timestamp out of range: {}", entry.dt))?;
                let (condition, icon) = first_condition(entry.weather);

                Ok(ForecastEntry { timestamp, temperature_c: entry.main.temp, condition, icon })
            })
            .collect()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
