use std::path::{Path, PathBuf};

use crate::{
    domain::{Config, ConfigError},
    storage::CONFIG_DIR,
};

/// Persistence for the configuration.
pub trait ConfigStore {
    /// Loads the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if nothing has been stored yet, or
    /// another error if the stored configuration can't be read.
    fn load(&self) -> Result<Config, ConfigError>;

    /// Stores the configuration, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration can't be written.
    fn save(&mut self, config: &Config) -> Result<(), ConfigError>;

    /// Loads the stored configuration, falling back to the defaults when
    /// nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored configuration exists but can't be read.
    fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::NotFound) => {
                tracing::debug!("No configuration stored, using defaults");
                Ok(Config::default())
            }
            result => result,
        }
    }
}

/// A configuration stored as TOML in `<vault>/.tstat/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    /// The configuration store for the vault at `root`.
    #[must_use]
    pub fn for_vault(root: &Path) -> Self {
        Self {
            path: root.join(CONFIG_DIR).join("config.toml"),
        }
    }

    /// The path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks whether a configuration file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        Config::load(&self.path)
    }

    fn save(&mut self, config: &Config) -> Result<(), ConfigError> {
        config.save(&self.path)
    }
}
