use super::ui;
use crate::core::ConversionView;
use comfy_table::Cell;

impl ConversionView {
    /// Renders the converter as a card: error banner, the two currency rows
    /// with fee and rate details between them, and the footer.
    pub fn display_as_card(&self) -> String {
        let mut output = format!(
            "{}\n",
            ui::style_text("Currency Conversion", ui::StyleType::Title)
        );

        if let Some(error) = &self.error {
            output.push_str(&format!("{}\n", ui::style_text(error, ui::StyleType::Error)));
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell(""),
            ui::header_cell("Currency"),
            ui::header_cell("Amount"),
        ]);

        let amount = if self.amount_text.is_empty() {
            "0"
        } else {
            self.amount_text.as_str()
        };
        table.add_row(vec![
            Cell::new("Amount to Convert"),
            Cell::new(format!("{} {}", self.source.flag, self.source.code)),
            ui::amount_cell(amount),
        ]);
        table.add_row(vec![
            ui::label_cell("Conversion Fee"),
            Cell::new(""),
            ui::amount_cell(&self.fee_display()),
        ]);
        table.add_row(vec![
            ui::label_cell("Amount we'll convert"),
            Cell::new(""),
            ui::amount_cell(&self.amount_to_convert_display()),
        ]);

        let rate = if !self.can_refresh {
            format!("{} (refreshing)", self.rate_display())
        } else {
            self.rate_display()
        };
        table.add_row(vec![
            ui::label_cell("Rate"),
            Cell::new(""),
            ui::amount_cell(&rate),
        ]);
        table.add_row(vec![
            Cell::new("Amount you'll receive"),
            Cell::new(format!("{} {}", self.target.flag, self.target.code)),
            ui::result_cell(&self.converted_display()),
        ]);

        output.push_str(&table.to_string());

        let continue_state = if self.can_continue {
            ui::style_text("enabled", ui::StyleType::Value)
        } else {
            ui::style_text("disabled", ui::StyleType::Subtle)
        };
        output.push_str(&format!(
            "\n{} {}",
            ui::style_text("Continue:", ui::StyleType::Label),
            continue_state
        ));

        if let Some(updated) = self.last_updated_display() {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(&updated, ui::StyleType::Subtle)
            ));
        }

        output
    }
}
