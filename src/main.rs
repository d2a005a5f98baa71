use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use curconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for curconv::AppCommand {
    fn from(cmd: Commands) -> curconv::AppCommand {
        match cmd {
            Commands::Rates => curconv::AppCommand::Rates,
            Commands::Convert { amount, from, to } => {
                curconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Interactive => curconv::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display current exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert, e.g. 100 or 12.50
        amount: String,
        /// Currency to convert from (defaults to the configured one)
        #[arg(short, long)]
        from: Option<String>,
        /// Currency to convert to (defaults to the configured one)
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Start an interactive conversion session
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => curconv::cli::setup::setup(),
        Some(cmd) => curconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
