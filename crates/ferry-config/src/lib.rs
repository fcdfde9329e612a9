//! # ferry-config
//!
//! Layered configuration loading for Ferry using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Namespaced environment variables (`FERRY_*` prefix, `__` as separator)
//! 2. Short environment variables: `LINEAR_API_KEY`, `TELEGRAM_KEY`, `TELEGRAM_OWNER`
//! 3. Working-directory `ferry.toml`
//! 4. User-level `~/.config/ferry/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FERRY_TELEGRAM__OWNER_ID` -> `telegram.owner_id`,
//! `FERRY_GOOGLE__TASK_LIST` -> `google.task_list`, etc. The short names map
//! to `linear.api_key`, `telegram.token` and `telegram.owner_id`.
//!
//! # Usage
//!
//! ```no_run
//! use ferry_config::FerryConfig;
//!
//! let config = FerryConfig::load_with_dotenv().expect("config");
//! config.validate().expect("required settings present");
//! println!("mirroring into list {}", config.google.task_list);
//! ```

mod error;
mod general;
mod google;
mod linear;
mod telegram;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use google::GoogleConfig;
pub use linear::LinearConfig;
pub use telegram::TelegramConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Short environment names and the config keys they fill.
const SHORT_ENV_KEYS: [(&str, &str); 3] = [
    ("LINEAR_API_KEY", "linear.api_key"),
    ("TELEGRAM_KEY", "telegram.token"),
    ("TELEGRAM_OWNER", "telegram.owner_id"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FerryConfig {
    #[serde(default)]
    pub linear: LinearConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FerryConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type (e.g. a non-numeric `TELEGRAM_OWNER`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("ferry.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Self::short_env())
            .merge(Env::prefixed("FERRY_").split("__"))
    }

    /// Check that every setting without a usable default is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` naming the first missing section,
    /// or `ConfigError::InvalidValue` for zero intervals and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.linear.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "linear".into(),
                missing: "LINEAR_API_KEY".into(),
            });
        }
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "telegram".into(),
                missing: "TELEGRAM_KEY".into(),
            });
        }
        if self.telegram.owner_id == 0 {
            return Err(ConfigError::NotConfigured {
                section: "telegram".into(),
                missing: "TELEGRAM_OWNER".into(),
            });
        }
        if self.general.sync_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.sync_interval_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.general.max_concurrent_creates == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.max_concurrent_creates".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn short_env() -> Env {
        let names: Vec<&str> = SHORT_ENV_KEYS.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            SHORT_ENV_KEYS
                .iter()
                .find(|(name, _)| key == *name)
                .map_or_else(|| key.as_str().into(), |(_, path)| (*path).into())
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ferry").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_valid() {
        let config = FerryConfig::default();
        assert!(!config.linear.is_configured());
        assert!(!config.telegram.is_configured());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: FerryConfig = FerryConfig::figment().extract()?;
            assert_eq!(config.general.sync_interval_secs, 600);
            assert_eq!(config.google.task_list, "General");
            Ok(())
        });
    }
}
