//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::{domain::property::Policies, infra::storage::Compression};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Storage configuration.
    #[serde(default)]
    pub storage: Storage,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Service configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// [`Policies`] filling the blank ones on submit.
    ///
    /// Blank fields fall back to the standard boilerplate text.
    pub policies: Policies,

    /// Image uploads configuration.
    pub upload: Upload,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            policies,
            upload: Upload {
                folder,
                compression,
            },
        } = value;
        Self {
            policies: policies.or(&Policies::boilerplate()),
            upload: service::UploadConfig {
                folder,
                compression,
            },
        }
    }
}

/// Image uploads configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Upload {
    /// Storage folder to upload images into.
    #[default("properties".to_owned())]
    pub folder: String,

    /// [`Compression`] applied to images before their transfer.
    #[default(Compression::Balanced)]
    pub compression: Compression,
}

/// Storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// URL prefix of the stored images.
    #[default("https://storage.example.com".to_owned())]
    pub base_url: String,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::property::Policies;

    use super::{Config, Service};

    #[test]
    fn fills_blank_policies_with_boilerplate() {
        let mut service = Service::default();
        service.policies.check_out = " Check-out until 10:00. ".into();

        let config = service::Config::from(service);

        let defaults = Policies::boilerplate();
        assert_eq!(config.policies.check_out, "Check-out until 10:00.");
        assert_eq!(config.policies.check_in, defaults.check_in);
        assert_eq!(
            config.policies.cancellation_prepayment,
            defaults.cancellation_prepayment,
        );
        assert_eq!(config.upload.folder, "properties");
    }

    #[test]
    fn loads_defaults_without_file() {
        let config = Config::new("does-not-exist").unwrap();

        assert_eq!(config.storage.base_url, "https://storage.example.com");
        assert!(config.service.upload.compression.is_enabled());
    }
}
