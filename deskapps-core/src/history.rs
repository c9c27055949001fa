use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Number of cities remembered.
pub const MAX_HISTORY: usize = 10;

/// Recently searched cities, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    cities: Vec<String>,
}

impl SearchHistory {
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Put `city` at the front unless it is already remembered.
    pub fn record(&mut self, city: &str) {
        if self.cities.iter().any(|c| c == city) {
            return;
        }
        self.cities.insert(0, city.to_string());
        self.cities.truncate(MAX_HISTORY);
    }

    /// Remembered cities containing `input`, ignoring case. Blank input returns all of them.
    pub fn suggestions(&self, input: &str) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        self.cities
            .iter()
            .filter(|c| needle.is_empty() || c.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Load from `path`; a missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize history")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write history file: {}", path.display()))
    }
}
