//! Configuration loading.
//!
//! Layers, later ones winning: built-in defaults, the platform config
//! file (`~/.config/punchclock/config.toml` on Linux), an explicit
//! `--config` file, then `PUNCHCLOCK_*` environment variables
//! (`PUNCHCLOCK_PROFILE__VISA_TYPE=regular` for nested keys).

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use punchclock_core::models::{DEFAULT_OVERTIME_THRESHOLD_HOURS, DEFAULT_TIMEZONE};
use punchclock_core::{AggregateOptions, Profile};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;
use crate::shared::parse_tz_or_input_error;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone used for dates and hour windows.
    pub timezone: String,
    /// Daily hours beyond which time counts as overtime.
    pub overtime_threshold_hours: f64,
    #[serde(default)]
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            overtime_threshold_hours: DEFAULT_OVERTIME_THRESHOLD_HOURS,
            profile: Profile::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally merging a specific file.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PUNCHCLOCK_").split("__"));

        let config: Config = figment
            .extract()
            .context("Failed to load configuration")?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Aggregation parameters, with an optional timezone override.
    pub fn aggregate_options(&self, tz_override: Option<&str>) -> CliResult<AggregateOptions> {
        let tz = parse_tz_or_input_error(tz_override.unwrap_or(&self.timezone))?;
        Ok(AggregateOptions {
            tz,
            overtime_threshold_hours: self.overtime_threshold_hours,
        })
    }
}

/// Returns the platform-specific config directory for punchclock.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punchclock"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchclock_core::VisaType;

    #[test]
    fn default_config_matches_core_defaults() {
        let config = Config::default();
        assert_eq!(config.timezone, "Asia/Tokyo");
        assert_eq!(config.overtime_threshold_hours, 8.0);
        assert_eq!(config.profile.visa_type, VisaType::Student);
    }

    #[test]
    fn aggregate_options_use_override() {
        let config = Config::default();
        let options = config.aggregate_options(Some("Europe/Berlin")).unwrap();
        assert_eq!(options.tz.to_string(), "Europe/Berlin");
        assert_eq!(options.overtime_threshold_hours, 8.0);
    }

    #[test]
    fn aggregate_options_reject_bad_zone() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Config::default()
        };
        assert!(config.aggregate_options(None).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/punchclock.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn toml_layer_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(
            r#"
            overtime_threshold_hours = 7.5

            [profile]
            name = "Aiko"
            visa_type = "regular"
            "#,
        ));
        let config: Config = figment.extract().unwrap();

        assert_eq!(config.timezone, "Asia/Tokyo");
        assert_eq!(config.overtime_threshold_hours, 7.5);
        assert_eq!(config.profile.name, "Aiko");
        assert_eq!(config.profile.visa_type, VisaType::Regular);
    }
}
