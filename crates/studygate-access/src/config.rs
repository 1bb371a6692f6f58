//! Gate configuration.
//!
//! Configuration is a small TOML file plus two environment overrides for
//! operational toggles. Both toggles default to off; a deployment with no
//! config file at all runs fully gated against the released catalog.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use studygate_core::CatalogOptions;
use tracing::warn;

/// Environment variable forcing every restriction check to allow.
pub const RESTRICTION_OVERRIDE_ENV: &str = "STUDYGATE_RESTRICTION_OVERRIDE";

/// Environment variable admitting unreleased studies into the catalog.
pub const INCLUDE_UNRELEASED_ENV: &str = "STUDYGATE_INCLUDE_UNRELEASED";

/// Settings for a [`RestrictionGate`](crate::RestrictionGate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Allow every action regardless of permissions. Development toggle;
    /// enabling it is logged loudly at gate construction.
    pub restriction_override: bool,

    /// Catalog construction options.
    pub catalog: CatalogOptions,
}

impl GateConfig {
    /// Read configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is not valid TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply the environment overrides on top of this configuration.
    ///
    /// Unset variables leave the corresponding setting untouched;
    /// unrecognized values are logged and ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(value) = env_flag(RESTRICTION_OVERRIDE_ENV) {
            self.restriction_override = value;
        }
        if let Some(value) = env_flag(INCLUDE_UNRELEASED_ENV) {
            self.catalog.include_unreleased = value;
        }
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    let parsed = parse_flag(&value);
    if parsed.is_none() {
        warn!(name, %value, "ignoring unrecognized boolean override");
    }
    parsed
}

fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if ["1", "true", "yes", "on"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
    {
        Some(true)
    } else if ["0", "false", "no", "off"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
    {
        Some(false)
    } else {
        None
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {}", path.display())]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid TOML.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
