// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;
mod panel;
mod test;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "EVE driver development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the driver for the embedded target and every feature set
    Check,
    /// Run all tests (unit, integration and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Print the registers initialization programs for a panel
    #[command(group(ArgGroup::new("source").required(true).args(["name", "config"])))]
    Panel {
        /// Shipped panel, by name or part number (e.g. cfa800480)
        #[arg(long)]
        name: Option<String>,
        /// JSON panel configuration file
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
        Commands::Panel { name, config, json } => {
            let source = match (&name, &config) {
                (Some(name), _) => panel::Source::Name(name),
                (None, Some(path)) => panel::Source::Config(path),
                (None, None) => anyhow::bail!("pass --name or --config"),
            };
            panel::run(&source, json)
        }
    }
}
