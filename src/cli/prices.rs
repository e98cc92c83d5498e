use super::ui;
use crate::core::{PriceLoader, PriceSnapshot};
use anyhow::{Context, Result};

pub fn display_prices(snapshot: &PriceSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Price (USD)"),
        ui::header_cell("Updated"),
        ui::header_cell("Icon"),
    ]);

    for record in snapshot.sorted_records() {
        table.add_row(vec![
            comfy_table::Cell::new(&record.currency),
            ui::number_cell(ui::format_amount(record.price)),
            comfy_table::Cell::new(record.date.format("%Y-%m-%d %H:%M:%S").to_string()),
            ui::format_optional_cell(record.symbol_ref.as_deref(), str::to_string),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Token Prices", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            &format!(
                "{} currencies, loaded {}",
                snapshot.len(),
                snapshot.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
            ),
            ui::StyleType::Subtle
        )
    ));
    output
}

pub async fn run(loader: &PriceLoader) -> Result<()> {
    let pb = ui::new_spinner("Fetching prices...");
    let result = loader.refresh().await;
    pb.finish_and_clear();
    result?;

    let snapshot = loader
        .store()
        .snapshot()
        .await
        .context("Price store is empty after refresh")?;
    println!("{}", display_prices(&snapshot));
    Ok(())
}
