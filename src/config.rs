//! Board Configuration
//! Year bounds, defaults and data locations, read from an optional JSON file.

use crate::data::YearRange;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};
use thiserror::Error;
use tracing::info;

pub const CONFIG_ENV: &str = "HAPPINESS_BOARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "happiness_board.json";
pub const WORLD_BANK_COUNTRIES_URL: &str =
    "https://api.worldbank.org/v2/country?format=json&per_page=400";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{view}: min_year {min} is after max_year {max}")]
    InvertedBounds { view: &'static str, min: i32, max: i32 },
    #[error("{view}: default range {start}-{end} is inverted")]
    InvertedDefault {
        view: &'static str,
        start: i32,
        end: i32,
    },
    #[error("country_directory_url must not be empty")]
    MissingDirectoryUrl,
}

/// Year bounds and default selection of one view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewYears {
    pub min_year: i32,
    pub max_year: i32,
    pub default_start: i32,
    pub default_end: i32,
}

impl ViewYears {
    pub fn bounds(&self) -> YearRange {
        YearRange::new(self.min_year, self.max_year)
    }

    pub fn default_range(&self) -> YearRange {
        YearRange::new(self.default_start, self.default_end)
    }

    fn validate(&self, view: &'static str) -> Result<(), ConfigError> {
        if self.min_year > self.max_year {
            return Err(ConfigError::InvertedBounds {
                view,
                min: self.min_year,
                max: self.max_year,
            });
        }
        if self.default_start > self.default_end {
            return Err(ConfigError::InvertedDefault {
                view,
                start: self.default_start,
                end: self.default_end,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub country_view: ViewYears,
    pub india_view: ViewYears,
    pub default_country: String,
    pub country_directory_url: String,
    /// Directory or http(s) base URL holding the indicator JSON files.
    pub indicator_data: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            country_view: ViewYears {
                min_year: 2000,
                max_year: 2024,
                default_start: 2018,
                default_end: 2022,
            },
            india_view: ViewYears {
                min_year: 2022,
                max_year: 2024,
                default_start: 2022,
                default_end: 2024,
            },
            default_country: "India".to_string(),
            country_directory_url: WORLD_BANK_COUNTRIES_URL.to_string(),
            indicator_data: "Indicator_data".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl BoardConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.country_view.validate("country_view")?;
        self.india_view.validate("india_view")?;
        if self.country_directory_url.trim().is_empty() {
            return Err(ConfigError::MissingDirectoryUrl);
        }
        Ok(())
    }

    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str::<BoardConfig>(&text)
                .with_context(|| format!("invalid config file {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                BoardConfig::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }
}

pub fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_both_views() {
        let config = BoardConfig::default();
        assert_eq!(config.country_view.bounds(), YearRange::new(2000, 2024));
        assert_eq!(config.country_view.default_range(), YearRange::new(2018, 2022));
        assert_eq!(config.india_view.bounds(), YearRange::new(2022, 2024));
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BoardConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(
            &path,
            r#"{"default_country":"Brazil","request_timeout_secs":5}"#,
        )
        .unwrap();

        let config = BoardConfig::load(&path).unwrap();
        assert_eq!(config.default_country, "Brazil");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.country_view, BoardConfig::default().country_view);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut config = BoardConfig::default();
        config.country_view.min_year = 2030;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                view: "country_view",
                min: 2030,
                max: 2024
            })
        );
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{not json").unwrap();
        assert!(BoardConfig::load(&path).is_err());
    }
}
