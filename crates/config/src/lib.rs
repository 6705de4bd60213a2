// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Zonation Engine Configuration
//!
//! One TOML document configures every builder:
//!
//! ```toml
//! [tolerance]
//! epsilon = 1e-6
//!
//! [ring_buffer]
//! field_name = "distance"
//! unit = "feet"
//!
//! [microzones]
//! thresholds = [5000.0, 15000.0]
//! enclosed_zones = "preserve_enclosed"
//!
//! [microzones.road_filter]
//! op = "max_length"
//! field = "route"
//! max = 5
//! ```
//!
//! Missing sections and fields take their defaults.  The configuration is a
//! plain value handed to each builder; nothing here is global.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod errors;
mod settings;

pub use errors::{ConfigError, ConfigResult};
pub use geometry::{BufferOptions, Tolerance};
pub use settings::{EnclosedZonePolicy, IdentitySettings, MicrozoneSettings, RingBufferOptions};

/// File name of the configuration inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "zonation.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tolerance: Tolerance,
    pub buffer: BufferOptions,
    pub ring_buffer: RingBufferOptions,
    pub microzones: MicrozoneSettings,
    pub identity: IdentitySettings,
}

impl EngineConfig {
    /// `<platform config dir>/zonation.toml`.
    pub fn default_path() -> ConfigResult<PathBuf> {
        directories::ProjectDirs::from("org", "zonation", "zonation")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDirectory)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path`, falling back to the defaults when it is missing or
    /// malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!("Failed to load configuration: {}", err);
                warn!("Continuing with the default configuration.");
                Self::default()
            },
        }
    }

    /// Write the configuration, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let io_error = |source| ConfigError::Io {
            path: path.to_owned(),
            source,
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir).map_err(io_error)?;
            }
        }
        std::fs::write(path, self.to_toml_string()?).map_err(io_error)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::{AttributeValue, LinearUnit, Predicate};

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [ring_buffer]
            unit = "feet"

            [microzones]
            thresholds = [1000.0]
            enclosed_zones = "absorb"

            [microzones.road_filter]
            op = "in"
            field = "county"
            values = ["49035", "49049"]
            "#,
        )
        .unwrap();

        assert_eq!(config.ring_buffer.unit, LinearUnit::Feet);
        assert_eq!(config.ring_buffer.field_name, "distance");
        assert_eq!(config.microzones.thresholds, vec![1000.0]);
        assert_eq!(config.microzones.enclosed_zones, EnclosedZonePolicy::Absorb);
        assert_eq!(config.microzones.max_sweeps, None);
        assert_eq!(
            config.microzones.road_filter,
            Some(Predicate::In {
                field: "county".into(),
                values: vec![AttributeValue::from("49035"), AttributeValue::from("49049")],
            })
        );
        assert_eq!(config.identity, IdentitySettings::default());
    }

    #[test]
    fn unknown_unit_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[ring_buffer]\nunit = \"furlongs\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn default_path_names_the_config_file() {
        if let Ok(path) = EngineConfig::default_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = EngineConfig::default();
        config.tolerance = Tolerance::new(1e-4);
        config.identity.first_id = 1;
        config.microzones.road_filter = Some(Predicate::Not {
            predicate: Box::new(Predicate::EndsWith {
                field: "route".into(),
                suffix: "N".into(),
            }),
        });
        config.save(&path).unwrap();

        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "thresholds = ").unwrap();
        assert_eq!(EngineConfig::load_or_default(&path), EngineConfig::default());
        assert_eq!(
            EngineConfig::load_or_default(&dir.path().join("missing.toml")),
            EngineConfig::default()
        );
    }
}

// End of File
