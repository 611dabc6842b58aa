use anyhow::Result;
use comfy_table::Cell;

use crate::cli::ui::{self, StyleType};
use crate::history::HistoryStore;

/// Renders the saved conversions, most recent first.
pub fn show(history: &HistoryStore) -> Result<()> {
    let records = history.read();
    if records.is_empty() {
        println!(
            "{}",
            ui::style_text("No conversions saved yet.", StyleType::Subtle)
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Amount"),
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
        ui::header_cell("Result"),
    ]);
    for record in &records {
        table.add_row(vec![
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ui::amount_cell(record.amount),
            Cell::new(&record.from),
            Cell::new(&record.to),
            ui::rate_cell(record.rate),
            ui::amount_cell(record.result),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Deletes the saved conversions, asking first unless `assume_yes`.
pub fn clear(history: &HistoryStore, assume_yes: bool) -> Result<()> {
    if !assume_yes && !ui::confirm("Delete all saved conversions?")? {
        println!("Nothing deleted.");
        return Ok(());
    }

    history.clear()?;
    println!("History cleared.");
    Ok(())
}
