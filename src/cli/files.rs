use std::path::Path;

use clap::Parser;
use dialoguer::Select as Picker;
use task_status::{ConfigStore, TomlConfigStore, domain::MarkdownPath};
use tracing::instrument;

use super::{load_config, system_host, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Files {
    /// Only list paths containing this text (case-insensitive)
    query: Option<String>,
}

impl Files {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) {
        let documents = system_host(root).documents(self.query.as_deref());

        if documents.is_empty() {
            println!("{}", "No files found".dim());
            return;
        }

        for document in documents {
            println!("{document}");
        }
    }
}

/// Which configured document to choose.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Slot {
    /// The document scanned for tasks
    Source,
    /// The document the summary is written to
    Target,
}

#[derive(Debug, Parser)]
pub struct Select {
    /// The setting to choose a document for
    slot: Slot,

    /// Only offer paths containing this text (case-insensitive)
    query: Option<String>,
}

impl Select {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = TomlConfigStore::for_vault(root);
        let mut config = load_config(&store)?;

        let candidates: Vec<MarkdownPath> = system_host(root)
            .documents(self.query.as_deref())
            .into_iter()
            .filter_map(|path| MarkdownPath::new(path).ok())
            .collect();

        if candidates.is_empty() {
            println!("{}", "No files found".dim());
            return Ok(());
        }

        let prompt = match self.slot {
            Slot::Source => "Source tasks file",
            Slot::Target => "Target status file",
        };
        let Some(index) = Picker::new()
            .with_prompt(prompt)
            .items(&candidates)
            .default(0)
            .interact_opt()?
        else {
            println!("Cancelled");
            return Ok(());
        };

        let chosen = candidates[index].clone();
        println!("{}", format!("✅ {prompt}: {chosen}").success());
        match self.slot {
            Slot::Source => config.set_source(chosen),
            Slot::Target => config.set_target(chosen),
        }
        store.save(&config)?;

        Ok(())
    }
}
