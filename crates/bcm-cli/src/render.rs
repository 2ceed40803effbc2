//! Table rendering for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bcm_model::{SourceHeader, TargetSchema};

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Render the target schema grouped by category.
pub fn fields_table(schema: &TargetSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
    ]);
    apply_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Center);
    }
    for category in schema.categories() {
        for field in &category.fields {
            let required = if field.required {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                Cell::new(&category.name),
                Cell::new(field.id.as_str()),
                Cell::new(&field.label),
                required,
            ]);
        }
    }
    table
}

/// Render discovered CSV columns.
pub fn headers_table(headers: &[SourceHeader]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Label"),
        header_cell("Preview"),
    ]);
    apply_style(&mut table);
    for header in headers {
        table.add_row(vec![
            Cell::new(header.id.as_str()),
            Cell::new(&header.label),
            Cell::new(header.preview.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcm_model::HeaderId;

    #[test]
    fn fields_table_lists_every_schema_field() {
        let schema = TargetSchema::bigcommerce();
        let rendered = fields_table(&schema).to_string();
        for field in schema.fields() {
            assert!(
                rendered.contains(field.id.as_str()),
                "missing field {}",
                field.id
            );
        }
        assert!(rendered.contains("Product Information"));
        assert!(rendered.contains("Categories & Images"));
    }

    #[test]
    fn headers_table_shows_dash_for_missing_preview() {
        let headers = vec![SourceHeader::new(
            HeaderId::new("header_0").unwrap(),
            "SKU",
        )];
        let rendered = headers_table(&headers).to_string();
        assert!(rendered.contains("header_0"));
        assert!(rendered.contains('-'));
    }
}
