use super::ui;
use crate::core::refresh::fetch_rates;
use crate::core::{CURRENCIES, Converter, CurrencyRateProvider, RateTable};
use anyhow::Result;
use futures::future::BoxFuture;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  <amount> | amount [AMOUNT]   set the amount to convert (empty clears it)
  from CODE                    choose the currency to convert from
  to CODE                      choose the currency to convert to
  refresh                      reload exchange rates
  continue                     proceed with the current conversion
  list                         show supported currencies
  help                         show this message
  quit | exit                  leave";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show,
    Amount(String),
    From(String),
    To(String),
    Refresh,
    Continue,
    List,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Show;
    }
    if line.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Command::Amount(line.to_string());
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match (word.to_ascii_lowercase().as_str(), rest) {
        ("amount", amount) => Command::Amount(amount.to_string()),
        ("from", code) if !code.is_empty() => Command::From(code.to_string()),
        ("to", code) if !code.is_empty() => Command::To(code.to_string()),
        ("refresh" | "r", "") => Command::Refresh,
        ("continue", "") => Command::Continue,
        ("list", "") => Command::List,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

type PendingFetch<'a> = Option<BoxFuture<'a, Result<RateTable>>>;

async fn wait_pending(pending: &mut PendingFetch<'_>) -> Result<RateTable> {
    match pending {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

fn render(converter: &Converter) {
    ui::print_separator();
    println!("{}", converter.view().display_as_card());
}

fn print_currencies() {
    for currency in &CURRENCIES {
        println!("  {} {}", currency.flag, currency.label());
    }
}

fn continue_message(converter: &Converter) -> String {
    let view = converter.view();
    if view.can_continue {
        format!(
            "Converting {} {} to {} {}",
            view.amount_to_convert_display().trim_start_matches('='),
            view.source.code,
            view.converted_display(),
            view.target.code
        )
    } else if view.loading {
        "Continue is unavailable while rates are loading".to_string()
    } else {
        "Enter an amount greater than zero to continue".to_string()
    }
}

/// Drives the converter from line-based input until `quit` or end of input.
///
/// Rates are loaded on start. A refresh runs alongside input handling, so
/// edits stay responsive while it is pending; asking for another refresh
/// meanwhile is ignored. At end of input any pending refresh is awaited.
pub async fn run<R>(
    input: R,
    mut converter: Converter,
    provider: &dyn CurrencyRateProvider,
    reference: &str,
    timeout: Duration,
) -> Result<Converter>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut pending: PendingFetch<'_> = None;

    if converter.begin_refresh() {
        pending = Some(Box::pin(fetch_rates(provider, reference, timeout)));
    }
    println!("{}", ui::style_text("Type 'help' for commands", ui::StyleType::Subtle));
    render(&converter);

    loop {
        tokio::select! {
            result = wait_pending(&mut pending), if pending.is_some() => {
                pending = None;
                converter.finish_refresh(result);
                render(&converter);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    if let Some(fetch) = pending.take() {
                        converter.finish_refresh(fetch.await);
                        render(&converter);
                    }
                    break;
                };

                match parse_command(&line) {
                    Command::Show => render(&converter),
                    Command::Amount(amount) => {
                        converter.edit_amount(&amount);
                        render(&converter);
                    }
                    Command::From(code) => match converter.select_source(&code) {
                        Ok(()) => render(&converter),
                        Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
                    },
                    Command::To(code) => match converter.select_target(&code) {
                        Ok(()) => render(&converter),
                        Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
                    },
                    Command::Refresh => {
                        if converter.begin_refresh() {
                            info!("Refreshing exchange rates");
                            pending = Some(Box::pin(fetch_rates(provider, reference, timeout)));
                            render(&converter);
                        } else {
                            println!("{}", ui::style_text("Refresh already in progress", ui::StyleType::Subtle));
                        }
                    }
                    Command::Continue => println!("{}", continue_message(&converter)),
                    Command::List => print_currencies(),
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                    Command::Unknown(input) => println!(
                        "{}",
                        ui::style_text(&format!("Unknown command: {input} (try 'help')"), ui::StyleType::Error)
                    ),
                }
            }
        }
    }

    Ok(converter)
}
