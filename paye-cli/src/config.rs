//! `paye.toml` configuration.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "paye.log"
//!
//! [defaults]
//! law = "2026"
//! annual_rent = 600000
//! payment_plan = "quarterly"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use paye_core::{Money, calculations::PaymentPlan};
use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "paye.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub defaults: DefaultsConfig,
    /// The file this configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// A bare level or any `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Policy code, e.g. `2026` or `old`.
    pub law: String,
    pub annual_rent: Money,
    pub payment_plan: PaymentPlan,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            law: "2026".to_string(),
            annual_rent: Money::ZERO,
            payment_plan: PaymentPlan::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing file
    /// that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents, path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            ..config
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(contents: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.law, "2026");
        assert_eq!(config.defaults.payment_plan, PaymentPlan::Monthly);
    }

    #[test]
    fn full_file_overrides_every_default() {
        let config = parse(
            r#"
            [logging]
            level = "debug"
            file = "paye.log"

            [defaults]
            law = "old"
            annual_rent = 600000
            payment_plan = "one-time"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                logging: LoggingConfig {
                    level: "debug".to_string(),
                    file: Some(PathBuf::from("paye.log")),
                },
                defaults: DefaultsConfig {
                    law: "old".to_string(),
                    annual_rent: Money::new(dec!(600000)),
                    payment_plan: PaymentPlan::Annual,
                },
                source: None,
            }
        );
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse("[defaults]\npayment_plan = \"quarterly\"\n").unwrap();

        assert_eq!(config.defaults.payment_plan, PaymentPlan::Quarterly);
        assert_eq!(config.defaults.law, "2026");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse("[defaults]\ncurrency = \"NGN\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file 'test.toml'"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/paye.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn loaded_file_records_its_source() {
        let path = std::env::temp_dir().join(format!("paye-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[defaults]\nlaw = \"old\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.source, Some(path));
        assert_eq!(config.defaults.law, "old");
    }
}
