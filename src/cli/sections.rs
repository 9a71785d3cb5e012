use std::path::Path;

use clap::Parser;
use task_status::{Config, ConfigStore, TomlConfigStore};
use tracing::instrument;

use super::{load_config, system_host, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Sections {
    #[command(subcommand)]
    command: SectionsCommand,
}

#[derive(Debug, Parser)]
enum SectionsCommand {
    /// List the sections of the source and whether each is summarised
    List,

    /// Summarise tasks from these sections
    ///
    /// Once any section is enabled, tasks from other sections are skipped.
    Enable {
        /// Section names, as written after '## '
        #[arg(num_args = 1.., required = true)]
        sections: Vec<String>,
    },

    /// Stop summarising tasks from these sections
    Disable {
        /// Section names, as written after '## '
        #[arg(num_args = 1.., required = true)]
        sections: Vec<String>,
    },

    /// Summarise tasks from every section
    Clear,
}

impl Sections {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = TomlConfigStore::for_vault(root);
        let mut config = load_config(&store)?;

        match self.command {
            SectionsCommand::List => {
                let headings = system_host(root).source_headings(&config);
                list(&config, &headings);
                return Ok(());
            }
            SectionsCommand::Enable { sections } => {
                let headings = system_host(root).source_headings(&config);
                let (added, already): (Vec<_>, Vec<_>) = sections
                    .into_iter()
                    .partition(|section| config.enable_section(section));

                report("✅ Enabled", &added, "ℹ️  Already enabled", &already);
                for section in added.iter().filter(|s| !headings.contains(*s)) {
                    println!(
                        "{}",
                        format!("⚠️  '{section}' is not a section of the source").warning()
                    );
                }
            }
            SectionsCommand::Disable { sections } => {
                let (removed, missing): (Vec<_>, Vec<_>) = sections
                    .into_iter()
                    .partition(|section| config.disable_section(section));

                report("✅ Disabled", &removed, "ℹ️  Not enabled", &missing);
            }
            SectionsCommand::Clear => {
                config.clear_sections();
                println!("{}", "✅ All sections will be summarised".success());
            }
        }

        store.save(&config)?;
        Ok(())
    }
}

fn list(config: &Config, headings: &[String]) {
    if headings.is_empty() {
        println!(
            "{}",
            "⚠️  Sections not found. Specify a source file with 'tstat config set source'"
                .warning()
        );
    }

    for heading in headings {
        if config.is_section_allowed(heading) {
            println!("{} {heading}", "[x]".success());
        } else {
            println!("{} {heading}", "[ ]".dim());
        }
    }

    let stale: Vec<_> = config
        .allowed_sections()
        .iter()
        .filter(|s| !headings.contains(*s))
        .collect();
    for section in stale {
        println!("{} {section} {}", "[x]".success(), "(not in source)".dim());
    }

    if config.allowed_sections().is_empty() && !headings.is_empty() {
        println!("{}", "No sections enabled: every section is summarised".dim());
    }
}

fn report(done_label: &str, done: &[String], skipped_label: &str, skipped: &[String]) {
    if !done.is_empty() {
        println!(
            "{}",
            format!("{done_label} {} section(s): {}", done.len(), done.join(", ")).success()
        );
    }
    if !skipped.is_empty() {
        println!("{}", format!("{skipped_label}: {}", skipped.join(", ")).dim());
    }
}
