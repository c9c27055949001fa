use anyhow::{Result, anyhow, bail};
use deskapps_core::{
    Config, Theme, fetch_report, geolocate::IpLocator, history::SearchHistory,
    provider::provider_from_config,
};

use crate::{cli::WeatherCommand, render};

pub async fn run(cmd: WeatherCommand, config: &mut Config) -> Result<()> {
    match cmd {
        WeatherCommand::Show { city } => show(&city, config).await,
        WeatherCommand::Here => here(config).await,
        WeatherCommand::History { filter } => {
            let history = SearchHistory::load(&Config::history_file_path()?)?;
            let palette = config.ui.theme.palette();
            let matches = history.suggestions(filter.as_deref().unwrap_or(""));
            if matches.is_empty() {
                println!("{}", render::dialog("History", "No matching cities", palette));
            }
            for city in matches {
                println!("{city}");
            }
            Ok(())
        }
        WeatherCommand::Theme { name } => {
            let theme = match name {
                Some(name) => name.parse::<Theme>()?,
                None => config.ui.theme.next(),
            };
            config.ui.theme = theme;
            config.save()?;
            println!("{}", render::heading(&format!("Theme: {theme}"), theme.palette()));
            Ok(())
        }
        WeatherCommand::Configure => {
            let api_key = inquire::Password::new("OpenWeather API key:")
                .without_confirmation()
                .with_display_mode(inquire::PasswordDisplayMode::Masked)
                .prompt()?;
            config.set_api_key(api_key.trim().to_string());
            config.save()?;
            println!("Saved to {}", Config::config_file_path()?.display());
            Ok(())
        }
    }
}

/// Locate the caller, then show that city. Any failure along the way is a location failure.
async fn here(config: &Config) -> Result<()> {
    let located = async {
        let locator = IpLocator::new(config.geo_url(), config.timeout())?;
        let city = locator.locate_city().await?;
        show(&city, config).await
    };

    located.await.map_err(|e| anyhow!("Could not get your location: {e:#}"))
}

async fn show(city: &str, config: &Config) -> Result<()> {
    if city.trim().is_empty() {
        bail!("Please enter a city name");
    }

    let provider = provider_from_config(config)?;
    let report = fetch_report(provider.as_ref(), city).await?;

    let history_path = Config::history_file_path()?;
    let mut history = SearchHistory::load(&history_path).unwrap_or_else(|e| {
        tracing::warn!("starting a fresh search history: {e:#}");
        SearchHistory::default()
    });
    history.record(city.trim());
    if let Err(e) = history.save(&history_path) {
        tracing::warn!("could not save search history: {e:#}");
    }

    let palette = config.ui.theme.palette();
    println!("{}", render::current_weather(&report.current, palette));
    print!("{}", render::forecast(&report.daily, palette));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_city_is_reported_before_the_api_key() {
        let err = show("   ", &Config::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a city name");
    }

    #[tokio::test]
    async fn location_prefix_covers_the_whole_lookup() {
        let mut config = Config::default();
        // Nothing listens on the discard port.
        config.weather.geo_url = Some("http://127.0.0.1:9/json/".into());

        let err = here(&config).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Could not get your location: "));
        assert_eq!(msg.matches("Could not get your location").count(), 1);
    }
}
