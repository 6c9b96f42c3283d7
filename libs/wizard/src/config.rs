// Configuration for the firmware update wizard
//
// Stored as pretty JSON in the XDG config directory. A missing file means
// defaults; a file from a newer schema is rejected rather than guessed at.

use crate::device::HwType;
use crate::error::{WizardError, WizardResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_VERSION: u32 = 1;
const CONFIG_DIR_NAME: &str = "hwwallet-wizard";
const CONFIG_FILE_NAME: &str = "config.json";

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_enabled_hw_types() -> Vec<HwType> {
    HwType::ALL.to_vec()
}

fn default_show_hw_panel() -> bool {
    true
}

/// Application settings shared by every wizard page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration schema version for future migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Hardware wallet families the wizard offers to update
    #[serde(default = "default_enabled_hw_types")]
    pub enabled_hw_types: Vec<HwType>,

    /// Whether the device panel starts out visible when a step opens
    #[serde(default = "default_show_hw_panel")]
    pub show_hw_panel: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            enabled_hw_types: default_enabled_hw_types(),
            show_hw_panel: default_show_hw_panel(),
        }
    }
}

impl AppConfig {
    /// Load from the XDG config path, falling back to defaults if no file exists
    pub fn load() -> WizardResult<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn load_from_file(path: &Path) -> WizardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration, creating parent directories as needed
    pub fn save_to_file(&self, path: &Path) -> WizardResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> WizardResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(WizardError::NoConfigDir)?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> WizardResult<()> {
        if self.version > CONFIG_VERSION {
            return Err(WizardError::UnsupportedConfigVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }
        Ok(())
    }

    pub fn is_hw_type_enabled(&self, hw_type: HwType) -> bool {
        self.enabled_hw_types.contains(&hw_type)
    }
}
