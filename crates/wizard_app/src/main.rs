use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use wizard_core::{WizardRole, DEFAULT_PAGE_SIZE};

mod config;
mod logging;
mod terminal;

use logging::LogDestination;

#[derive(Parser)]
#[command(name = "wizard")]
#[command(about = "Two-step employee onboarding wizard", long_about = None)]
struct Cli {
    /// RON config file; defaults apply when it does not exist
    #[arg(long, default_value = "wizard.ron")]
    config: PathBuf,

    /// Wizard role: "ops" starts at step 2, anything else is admin
    #[arg(long)]
    role: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Log debug output as well
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in and submit the wizard (default)
    Wizard,
    /// Print the joined employee listing
    Employees {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log, level);

    let config = config::load_config(&cli.config)?;

    match cli.command.unwrap_or(Commands::Wizard) {
        Commands::Wizard => {
            let role = WizardRole::from_param(cli.role.as_deref());
            terminal::run_wizard(&config, role).await?;
        }
        Commands::Employees { page, page_size } => {
            let api = terminal::connect(&config)?;
            terminal::print_employees(api.as_ref(), page, page_size).await?;
        }
    }

    Ok(())
}
