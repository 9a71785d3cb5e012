use std::path::Path;

use clap::Parser;
use task_status::{Outcome, Report, Step, TomlConfigStore};
use tracing::instrument;

use super::{
    load_config, system_host,
    terminal::{error_chain, Colorize},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Regenerate the summary document from the source")]
pub struct Update {
    /// Don't open the summary document, whatever the configuration says
    #[arg(long)]
    no_open: bool,

    /// Don't copy the summary to the clipboard, whatever the configuration
    /// says
    #[arg(long)]
    no_copy: bool,

    /// Also print the summary to stdout
    #[arg(long)]
    print: bool,
}

impl Update {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut config = load_config(&TomlConfigStore::for_vault(root))?;
        if self.no_open {
            config.auto_open = false;
        }
        if self.no_copy {
            config.auto_copy = false;
        }

        let mut host = system_host(root);
        match host.update(&config)? {
            Outcome::NoTasksFound => {
                println!("{}", "ℹ️  No tasks found for processing".info());
            }
            Outcome::Updated(report) => self.print_report(&report),
        }

        Ok(())
    }

    fn print_report(&self, report: &Report) {
        println!(
            "{}",
            format!(
                "✅ Updated {} tasks in {}",
                report.summary.len(),
                report.target
            )
            .success()
        );

        if self.print {
            println!("{}", report.summary);
        }

        if let Step::Failed(e) = &report.opened {
            eprintln!("{}", format!("❌ {}", error_chain(e)).error());
        }

        match &report.copied {
            Step::Done => println!("{}", "📋 Status copied to clipboard".success()),
            Step::Failed(e) => eprintln!("{}", format!("❌ {}", error_chain(e)).error()),
            Step::Skipped => {}
        }
    }
}
