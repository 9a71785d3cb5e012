use std::path::Path;

use anyhow::Context;
use task_status::{ConfigStore, DocumentStore, TomlConfigStore, domain::MarkdownPath};
use tracing::instrument;

use super::{load_config, system_host, terminal::Colorize};

const KEYS: &str = "source\n  target\n  auto_open\n  auto_copy\n  allowed_sections";

#[derive(Debug, clap::Parser)]
/// Show or modify vault configuration
///
/// Configuration is stored in .tstat/config.toml.
///
/// Available configuration keys:
///   source             Document to scan for tasks (must end in .md)
///   target             Document the summary is written to (must end in .md)
///   `auto_open`          Open the summary after updating (default: true)
///   `auto_copy`          Copy the summary after updating (default: true)
///
/// Note: Use 'tstat sections' commands to manage `allowed_sections`.
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        ///
        /// Available keys: source, target, `auto_open`, `auto_copy`,
        /// `allowed_sections`
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   tstat config set source Projects/Tasks.md
    ///   tstat config set `auto_copy` false
    Set {
        /// Configuration key to set
        ///
        /// Settable keys: source, target, `auto_open`, `auto_copy`
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = TomlConfigStore::for_vault(root);

        match self.command {
            ConfigCommand::Show => Self::show_config(&store),
            ConfigCommand::Get { key } => Self::get_config(&store, &key),
            ConfigCommand::Set { key, value } => Self::set_config(store, root, &key, &value),
        }
    }

    fn show_config(store: &TomlConfigStore) -> anyhow::Result<()> {
        let config = load_config(store)?;

        println!("Configuration:");
        let unset = || "(not set)".dim();
        println!(
            "  source: {}",
            config.source().map_or_else(unset, ToString::to_string)
        );
        println!(
            "  target: {}",
            config.target().map_or_else(unset, ToString::to_string)
        );
        if config.allowed_sections().is_empty() {
            println!("  allowed_sections: {} (all sections)", "[]".dim());
        } else {
            println!("  allowed_sections: {:?}", config.allowed_sections());
        }
        println!("  auto_open: {}", config.auto_open);
        println!("  auto_copy: {}", config.auto_copy);
        Ok(())
    }

    fn get_config(store: &TomlConfigStore, key: &str) -> anyhow::Result<()> {
        let config = load_config(store)?;

        match key {
            "source" => println!("{}", config.source().unwrap_or_default()),
            "target" => println!("{}", config.target().unwrap_or_default()),
            "auto_open" => println!("{}", config.auto_open),
            "auto_copy" => println!("{}", config.auto_copy),
            "allowed_sections" => {
                if config.allowed_sections().is_empty() {
                    println!("[]");
                } else {
                    for section in config.allowed_sections() {
                        println!("{section}");
                    }
                }
            }
            _ => {
                anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys:\n  {KEYS}");
            }
        }
        Ok(())
    }

    fn set_config(
        mut store: TomlConfigStore,
        root: &Path,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()> {
        let mut config = load_config(&store)?;

        match key {
            "source" => {
                let path: MarkdownPath = value.parse()?;
                config.set_source(path);
            }
            "target" => {
                let path: MarkdownPath = value.parse()?;
                config.set_target(path);
            }
            "auto_open" => config.auto_open = parse_bool(value)?,
            "auto_copy" => config.auto_copy = parse_bool(value)?,
            _ => {
                anyhow::bail!(
                    "Unknown configuration key: '{key}'\nSupported keys: source, target, \
                     auto_open, auto_copy",
                );
            }
        }

        store
            .save(&config)
            .with_context(|| format!("Failed to save {}", store.path().display()))?;
        println!("{}", format!("✅ {key} = {value}").success());

        if key == "source" {
            let host = system_host(root);
            if host.store().exists(value) {
                let sections = host.source_headings(&config);
                if sections.is_empty() {
                    println!("{}", "No sections found in the source".dim());
                } else {
                    println!(
                        "{}",
                        format!("Sections found: {}", sections.join(", ")).dim()
                    );
                }
            } else {
                println!("{}", format!("⚠️  {value} does not exist yet").warning());
            }
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    value
        .parse::<bool>()
        .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))
}
