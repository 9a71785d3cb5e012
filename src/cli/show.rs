use std::{collections::BTreeMap, path::Path};

use clap::Parser;
use task_status::{TaskRecord, TomlConfigStore};
use tracing::instrument;

use super::{
    load_config, system_host,
    terminal::{is_narrow, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Show the task records in the current summary document")]
pub struct Show {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = load_config(&TomlConfigStore::for_vault(root))?;
        let records = system_host(root).read_summary(&config)?;

        match self.output {
            OutputFormat::Json => output_json(&records)?,
            OutputFormat::Table => output_table(&records),
        }

        Ok(())
    }
}

fn output_json(records: &[TaskRecord]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn output_table(records: &[TaskRecord]) {
    if records.is_empty() {
        println!("{}", "The summary is empty".dim());
        return;
    }

    if is_narrow() {
        for record in records {
            println!("{record}");
        }
    } else {
        println!("{:<10} Section", "Task");
        println!("{}", "──────────────────".dim());
        for record in records {
            let section = if record.section().is_empty() {
                "–".dim()
            } else {
                record.section().to_string()
            };
            println!("{:<10} {section}", record.identifier().as_str());
        }
    }

    let mut per_section: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *per_section.entry(record.section()).or_insert(0) += 1;
    }

    println!();
    println!("Total: {}", records.len());
    for (section, count) in per_section {
        let section = if section.is_empty() { "(no section)" } else { section };
        println!("  {section}: {count}");
    }
}
