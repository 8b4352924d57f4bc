use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use seller_cli::{ImportReceipt, Preview};
use seller_model::{ImportKind, ValidationResult};

pub fn print_preview(preview: &Preview) {
    let rows = preview.rows();
    println!(
        "Preview: {} ({} of {} rows)",
        preview.file_name,
        rows.len(),
        preview.total_rows()
    );
    let mut table = Table::new();
    table.set_header(
        preview
            .dataset
            .headers
            .iter()
            .map(|header| header_cell(header))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(
            preview
                .dataset
                .headers
                .iter()
                .map(|header| match row.get(header) {
                    Some(value) if !value.is_empty() => Cell::new(value),
                    _ => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
}

pub fn print_receipt(kind: ImportKind, receipt: &ImportReceipt, records: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Kind"),
        header_cell("Time frame"),
        header_cell("Rows"),
        header_cell("Records"),
        header_cell("Skipped"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&receipt.file_name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(kind.label()),
        Cell::new(receipt.time_frame.to_string()),
        Cell::new(receipt.rows),
        Cell::new(records),
        count_cell(receipt.skipped_lines.len(), Color::Yellow),
        count_cell(receipt.warnings.len(), Color::Yellow),
    ]);
    println!("{table}");
    if !receipt.skipped_lines.is_empty() {
        let lines: Vec<String> = receipt.skipped_lines.iter().map(usize::to_string).collect();
        println!("Skipped lines: {}", lines.join(", "));
    }
}

/// Errors first, then warnings.
pub fn print_issues(file_name: &str, result: &ValidationResult) {
    let status = if result.is_valid() { "valid" } else { "invalid" };
    println!("{file_name}: {status}");
    if result.errors().is_empty() && result.warnings().is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Severity"), header_cell("Message")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for error in result.errors() {
        table.add_row(vec![Cell::new("ERROR").fg(Color::Red), Cell::new(error)]);
    }
    for warning in result.warnings() {
        table.add_row(vec![Cell::new("WARN").fg(Color::Yellow), Cell::new(warning)]);
    }
    println!("{table}");
}

pub fn print_messages(title: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    eprintln!("{title}:");
    for message in messages {
        eprintln!("- {message}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
