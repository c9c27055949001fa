//! City lookup from the caller's public IP address.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    http: Client,
}

impl IpLocator {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { url: url.to_string(), http })
    }

    /// City name of the current IP address.
    #[instrument(skip(self), level = "info")]
    pub async fn locate_city(&self) -> Result<String> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("request to geolocation service failed")?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("geolocation service returned status {status}"));
        }

        let parsed: IpApiResponse = res.json().await.context("invalid geolocation response")?;

        parsed
            .city
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty())
            .ok_or_else(|| anyhow!("no city in geolocation response"))
    }
}
