use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hotel_cli::types::{RenderOutcome, RenderResult, RenderedSummary};

pub fn print_summary(result: &RenderResult) {
    let RenderOutcome::Rendered(summary) = &result.outcome else {
        return;
    };
    println!("Data: {}", result.data_path.display());
    println!("Page: {}", result.output_path.display());
    if let Some(path) = &result.json_path {
        println!("JSON: {}", path.display());
    }
    if summary.cache_hit {
        println!("Data unchanged, reused cached dashboard");
    }
    println!("{}", cleaning_table(summary));
    println!("{}", panel_table(summary));
}

fn cleaning_table(summary: &RenderedSummary) -> Table {
    let cleaning = &summary.cleaning;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Cleaning step"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let dropped = if cleaning.dropped_columns.is_empty() {
        "-".to_string()
    } else {
        cleaning.dropped_columns.join(", ")
    };
    table.add_row(vec![Cell::new("Rows read"), Cell::new(cleaning.input_rows)]);
    table.add_row(vec![
        Cell::new("Unparseable status dates"),
        count_cell(cleaning.unparseable_dates, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Dropped columns"), dim_cell(dropped)]);
    table.add_row(vec![
        Cell::new("Rows with missing values"),
        count_cell(cleaning.rows_with_missing, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows with rate outliers"),
        count_cell(cleaning.rows_over_rate_limit, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows retained")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.row_count).add_attribute(Attribute::Bold),
    ]);
    table
}

fn panel_table(summary: &RenderedSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Panel"),
        header_cell("Chart"),
        header_cell("Points"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for panel in &summary.panels {
        table.add_row(vec![
            Cell::new(&panel.heading),
            dim_cell(panel.chart),
            Cell::new(panel.points),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
