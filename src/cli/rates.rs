use super::ui;
use crate::core::{CURRENCIES, CurrencyRateProvider, RateState, RateTable};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color};
use std::time::Duration;

/// Tabulates the supported currencies against the reference currency.
pub fn rates_table(rates: &RateTable, reference: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {reference}")),
    ]);

    for currency in &CURRENCIES {
        let rate = match rates.get(currency.code) {
            Some(r) => ui::amount_cell(&format!("{}{r:.4}", currency.symbol)),
            None => Cell::new("N/A")
                .fg(Color::DarkGrey)
                .set_alignment(CellAlignment::Right),
        };
        table.add_row(vec![
            Cell::new(currency.flag),
            Cell::new(currency.code),
            Cell::new(currency.name),
            rate,
        ]);
    }
    table.to_string()
}

pub async fn run(
    provider: &dyn CurrencyRateProvider,
    reference: &str,
    timeout: Duration,
) -> Result<()> {
    let mut state = RateState::new();
    ui::with_spinner(
        "Fetching exchange rates...",
        state.refresh(provider, reference, timeout),
    )
    .await;

    if let Some(error) = state.error() {
        println!("{}", ui::style_text(error, ui::StyleType::Error));
    }
    println!("{}", rates_table(state.rates(), reference));
    if let Some(updated) = state.last_updated() {
        println!(
            "{}",
            ui::style_text(
                &format!("Rates last updated: {}", updated.format("%H:%M:%S")),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
