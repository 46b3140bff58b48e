//! Terminal table rendering for result sets.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use securecheck_core::rows::TableResult;

pub fn render(result: &TableResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(&result.columns);
    for row in &result.rows {
        table.add_row(row.iter().map(|v| v.to_string()));
    }
    table.to_string()
}
