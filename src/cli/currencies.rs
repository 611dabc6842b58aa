use anyhow::Result;
use comfy_table::Cell;

use crate::cli::ui;
use crate::core::currency::RateProvider;

/// Lists the currencies the provider can convert between.
pub async fn run(provider: &dyn RateProvider) -> Result<()> {
    let spinner = ui::new_spinner("Loading currencies...");
    let currencies = provider.currencies().await;
    spinner.finish_and_clear();
    let currencies = currencies?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for (code, name) in &currencies {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }

    println!("{table}");
    Ok(())
}
