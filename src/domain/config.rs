use std::{io, path::Path};

use serde::{Deserialize, Serialize};

use crate::domain::{
    filter::SectionFilter,
    path::{InvalidPathError, MarkdownPath},
};

/// Settings for summarising a vault's tasks.
///
/// A configuration is loaded once per invocation and read through shared
/// references; the setters exist for the commands that edit and save it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The vault-relative path of the document to scan.
    source: Option<String>,

    /// The vault-relative path of the summary document.
    target: Option<String>,

    /// The sections whose tasks are summarised.
    ///
    /// If this is empty, all sections are summarised.
    allowed_sections: Vec<String>,

    /// Whether to open the summary after it is written.
    pub auto_open: bool,

    /// Whether to copy the summary to the clipboard after it is written.
    pub auto_copy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            allowed_sections: Vec::new(),
            auto_open: true,
            auto_copy: true,
        }
    }
}

/// The validated source and target documents of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// The document to scan.
    pub source: MarkdownPath,
    /// The document to write the summary to.
    pub target: MarkdownPath,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::Read(e),
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// Parent directories are created if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns a default configuration that allows the given sections.
    ///
    /// Resetting keeps the headings of the current source selected so that
    /// the next run after choosing a source summarises everything it sees.
    #[must_use]
    pub fn reset(allowed_sections: Vec<String>) -> Self {
        Self {
            allowed_sections,
            ..Self::default()
        }
    }

    /// The configured source path, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The configured target path, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Sets the source document.
    pub fn set_source(&mut self, path: MarkdownPath) {
        self.source = Some(path.to_string());
    }

    /// Sets the target document.
    pub fn set_target(&mut self, path: MarkdownPath) {
        self.target = Some(path.to_string());
    }

    /// Validates and returns the source and target paths.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is unset or doesn't end with `.md`.
    /// The source is checked before the target.
    pub fn paths(&self) -> Result<Paths, ConfigurationInvalid> {
        let source = self
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigurationInvalid::MissingSource)?;
        let target = self
            .target
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigurationInvalid::MissingTarget)?;

        Ok(Paths {
            source: source.parse()?,
            target: target.parse()?,
        })
    }

    /// Validates and returns the target path alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is unset or doesn't end with `.md`.
    pub fn target_path(&self) -> Result<MarkdownPath, ConfigurationInvalid> {
        let target = self
            .target
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigurationInvalid::MissingTarget)?;
        Ok(target.parse()?)
    }

    /// Returns the allowed sections, in the order they were enabled.
    #[must_use]
    pub fn allowed_sections(&self) -> &[String] {
        &self.allowed_sections
    }

    /// Returns the section filter for an extraction pass.
    #[must_use]
    pub fn section_filter(&self) -> SectionFilter {
        self.allowed_sections.iter().cloned().collect()
    }

    /// Checks if a section is summarised by the configuration.
    ///
    /// If `allowed_sections` is empty, all sections are summarised.
    #[must_use]
    pub fn is_section_allowed(&self, section: &str) -> bool {
        self.allowed_sections.is_empty() || self.allowed_sections.iter().any(|s| s == section)
    }

    /// Adds a section to the allowed list.
    ///
    /// Returns `true` if the section was added, `false` if it already existed.
    pub fn enable_section(&mut self, section: &str) -> bool {
        if self.allowed_sections.iter().any(|s| s == section) {
            false
        } else {
            self.allowed_sections.push(section.to_string());
            true
        }
    }

    /// Removes a section from the allowed list.
    ///
    /// Returns `true` if the section was removed, `false` if it wasn't there.
    pub fn disable_section(&mut self, section: &str) -> bool {
        let before = self.allowed_sections.len();
        self.allowed_sections.retain(|s| s != section);
        self.allowed_sections.len() != before
    }

    /// Removes every section from the allowed list, lifting the restriction.
    pub fn clear_sections(&mut self) {
        self.allowed_sections.clear();
    }
}

/// A configuration that can't be used to run an update.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationInvalid {
    /// No source document has been configured.
    #[error("Source file not specified")]
    MissingSource,

    /// No target document has been configured.
    #[error("Target file not specified")]
    MissingTarget,

    /// A configured path isn't a markdown document.
    #[error(transparent)]
    NotMarkdown(#[from] InvalidPathError),
}

/// Errors that can occur when loading or saving the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file doesn't exist.
    #[error("Configuration file not found")]
    NotFound,

    /// The configuration file couldn't be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The configuration file isn't valid.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration couldn't be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file couldn't be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
}

const fn default_true() -> bool {
    true
}

/// Converts the legacy comma-separated section list into a list.
///
/// Entries are trimmed and empty entries dropped, so `"Active, ,Done"`
/// becomes `["Active", "Done"]`.
#[must_use]
pub fn migrate_allowed_sections(legacy: &str) -> Vec<String> {
    legacy
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    /// Allowed sections were stored as one comma-separated string.
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        source: Option<String>,

        #[serde(default)]
        target: Option<String>,

        #[serde(default)]
        allowed_sections: String,

        #[serde(default = "default_true")]
        auto_open: bool,

        #[serde(default = "default_true")]
        auto_copy: bool,
    },

    #[serde(rename = "2")]
    V2 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allowed_sections: Vec<String>,

        #[serde(default = "default_true")]
        auto_open: bool,

        #[serde(default = "default_true")]
        auto_copy: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                source,
                target,
                allowed_sections,
                auto_open,
                auto_copy,
            } => Self {
                source,
                target,
                allowed_sections: migrate_allowed_sections(&allowed_sections),
                auto_open,
                auto_copy,
            },
            Versions::V2 {
                source,
                target,
                allowed_sections,
                auto_open,
                auto_copy,
            } => Self {
                source,
                target,
                allowed_sections,
                auto_open,
                auto_copy,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        let Config {
            source,
            target,
            allowed_sections,
            auto_open,
            auto_copy,
        } = config;
        Self::V2 {
            source,
            target,
            allowed_sections,
            auto_open,
            auto_copy,
        }
    }
}
