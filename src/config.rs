//! Configuration loading
//!
//! Layers an optional config file under `GENESIS_`-prefixed environment
//! variables (env wins). All sections have serde defaults, so an absent
//! file yields a usable default configuration.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::provider::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file plus the environment.
    ///
    /// Env vars use double-underscore section separators, e.g.
    /// `GENESIS_PROVIDER__MODEL=gemini-3-flash-preview`.
    pub fn load(file: Option<&Path>) -> Result<Self, ApiError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("GENESIS").separator("__"),
        );

        let settings = builder
            .build()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        settings
            .try_deserialize()
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderType;
    use std::io::Write;

    #[test]
    fn load_without_file_yields_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Gemini);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_reads_provider_section_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[provider]\nprovider_type = \"gemini\"\nmodel = \"gemini-3-pro\"\n"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.provider.model, "gemini-3-pro");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/genesis.toml"))).is_err());
    }
}
