pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::ConvertArgs;
use crate::core::Converter;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Rates,
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::from_config(&config);
    let reference = config.reference_currency.as_str();
    let timeout = config.timeout();

    match command {
        AppCommand::Rates => cli::rates::run(provider.as_ref(), reference, timeout).await,
        AppCommand::Convert { amount, from, to } => {
            let args = ConvertArgs {
                amount: &amount,
                from: from.as_deref().unwrap_or(&config.default_from),
                to: to.as_deref().unwrap_or(&config.default_to),
            };
            cli::convert::run(args, provider.as_ref(), reference, timeout).await?;
            Ok(())
        }
        AppCommand::Interactive => {
            let converter = Converter::new(&config.default_from, &config.default_to)?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            cli::interactive::run(input, converter, provider.as_ref(), reference, timeout).await?;
            Ok(())
        }
    }
}
