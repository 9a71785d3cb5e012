use std::path::{Path, PathBuf};

mod config;
mod files;
mod sections;
mod show;
mod terminal;
mod update;

use anyhow::Context;
use clap::ArgAction;
use files::{Files, Select};
use sections::Sections;
use show::Show;
use task_status::{
    Config, ConfigStore, Host, SystemClipboard, SystemOpener, TomlConfigStore, Vault,
};
pub use terminal::notify_failure;
use terminal::Colorize;
use tracing::instrument;
use update::Update;

/// The host used by every command: the vault on disk, the system clipboard
/// and the system opener.
type SystemHost = Host<Vault, SystemClipboard, SystemOpener>;

fn system_host(root: &Path) -> SystemHost {
    Host::new(
        Vault::new(root.to_path_buf()),
        SystemClipboard,
        SystemOpener::new(root.to_path_buf()),
    )
}

fn load_config(store: &TomlConfigStore) -> anyhow::Result<Config> {
    store
        .load_or_default()
        .with_context(|| format!("Failed to load {}", store.path().display()))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the vault
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Update(Update::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Regenerate the summary document from the source (default)
    Update(Update),

    /// Initialize a vault with a default configuration
    Init,

    /// Show or modify configuration settings
    Config(config::Command),

    /// List the source's sections and choose which are summarised
    Sections(Sections),

    /// List the documents in the vault
    Files(Files),

    /// Interactively choose the source or target document
    Select(Select),

    /// Copy the current summary document to the clipboard
    Copy,

    /// Show the task records in the current summary document
    Show(Show),

    /// Reset all settings to their defaults
    ///
    /// Every section of the current source stays selected.
    Reset,
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Update(command) => command.run(root)?,
            Self::Init => Init::run(root)?,
            Self::Config(command) => command.run(root)?,
            Self::Sections(command) => command.run(root)?,
            Self::Files(command) => command.run(root),
            Self::Select(command) => command.run(root)?,
            Self::Copy => CopySummary::run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Reset => Reset::run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let mut store = TomlConfigStore::for_vault(root);
        if store.exists() {
            anyhow::bail!(
                "Vault already initialized (found existing {})",
                store.path().display()
            );
        }

        store
            .save(&Config::default())
            .context("Failed to create config.toml")?;

        println!("Initialized task summaries in {}", root.display());
        println!("  Created: {}", store.path().display());
        println!();
        println!("Next steps:");
        println!("  tstat config set source Tasks.md");
        println!("  tstat config set target Status.md");
        println!("  tstat update");

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct CopySummary {}

impl CopySummary {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let config = load_config(&TomlConfigStore::for_vault(root))?;
        let mut host = system_host(root);

        host.copy_summary(&config)?;
        println!("{}", "📋 Task status copied to clipboard".success());

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Reset {}

impl Reset {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let mut store = TomlConfigStore::for_vault(root);
        let config = load_config(&store)?;

        // the source is forgotten by the reset, so read its headings first
        let sections = system_host(root).source_headings(&config);
        let reset = Config::reset(sections);
        store.save(&reset)?;

        println!("{}", "✅ Settings reset to defaults".success());
        if !reset.allowed_sections().is_empty() {
            println!(
                "{}",
                format!("Allowed sections: {}", reset.allowed_sections().join(", ")).dim()
            );
        }

        Ok(())
    }
}
