use super::ui;
use crate::core::{Converter, CurrencyRateProvider};
use anyhow::{Result, bail};
use std::time::Duration;
use tracing::debug;

pub struct ConvertArgs<'a> {
    pub amount: &'a str,
    pub from: &'a str,
    pub to: &'a str,
}

/// Loads rates once and prints the converter card for a single conversion.
pub async fn run(
    args: ConvertArgs<'_>,
    provider: &dyn CurrencyRateProvider,
    reference: &str,
    timeout: Duration,
) -> Result<Converter> {
    let mut converter = Converter::new(args.from, args.to)?;
    if !converter.edit_amount(args.amount.trim()) {
        bail!("Invalid amount: {}", args.amount);
    }
    debug!(
        amount = args.amount,
        from = converter.source(),
        to = converter.target(),
        "Converting"
    );

    ui::with_spinner(
        "Fetching exchange rates...",
        converter.refresh(provider, reference, timeout),
    )
    .await;

    println!("{}", converter.view().display_as_card());
    Ok(converter)
}
