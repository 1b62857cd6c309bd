//! JSON file config adapter.
//!
//! Implements [`ConfigPort`] on a single JSON document.
//!
//! - Config validation: every field is range-checked before persistence
//!   and again after loading.
//! - Atomic writes: the document is written to a sibling temp file and
//!   renamed over the target.  A failed rename removes the temp file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Load the stored config, or store and return the defaults on first
    /// run.
    pub fn load_or_init(&self) -> Result<SystemConfig, ConfigError> {
        match self.load() {
            Err(ConfigError::NotFound) => {
                let config = SystemConfig::default();
                self.save(&config)?;
                info!("No config at {}, wrote defaults", self.path.display());
                Ok(config)
            }
            other => other,
        }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config: SystemConfig =
            serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        config.validate().map_err(ConfigError::ValidationFailed)?;
        info!("Config loaded from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;

        let tmp = self.tmp_path();
        std::fs::write(&tmp, text).map_err(|_| ConfigError::IoError)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            warn!("Config rename to {} failed: {}", self.path.display(), e);
            let _ = std::fs::remove_file(&tmp);
            return Err(ConfigError::IoError);
        }
        Ok(())
    }
}
