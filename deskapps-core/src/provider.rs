use crate::{
    Config, WeatherReport,
    forecast::aggregate_daily,
    model::{ForecastEntry, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current(&self, city: &str) -> anyhow::Result<WeatherSnapshot>;

    /// 3-hour samples covering the next five days.
    async fn forecast(&self, city: &str) -> anyhow::Result<Vec<ForecastEntry>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::new(api_key, config.weather_url(), config.timeout())?;
    Ok(Box::new(provider))
}

/// Fetch current conditions and the forecast together.
///
/// Both requests run concurrently; if either fails the whole lookup fails
/// with that error.
pub async fn fetch_report(provider: &dyn WeatherProvider, city: &str) -> anyhow::Result<WeatherReport> {
    let city = city.trim();
    if city.is_empty() {
        anyhow::bail!("Please enter a city name");
    }

    let (current, samples) = tokio::try_join!(provider.current(city), provider.forecast(city))?;
    tracing::debug!(city, samples = samples.len(), "weather fetched");

    Ok(WeatherReport { current, daily: aggregate_daily(&samples) })
}
