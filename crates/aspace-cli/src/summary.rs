use chrono::{DateTime, Local};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::{DaoResult, HandleResult};

pub fn print_dao_summary(result: &DaoResult) {
    let report = &result.report;
    if result.dry_run {
        println!("Dry run: nothing was written to the repository");
    }
    if let Some(paths) = &result.paths {
        println!("Row report: {}", paths.log.display());
        println!("New identifiers: {}", paths.ids.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows"), Cell::new(report.rows.len())]);
    if result.dry_run {
        table.add_row(vec![
            Cell::new("Resolved"),
            count_cell(report.planned_count(), Color::Green),
        ]);
    } else {
        table.add_row(vec![
            Cell::new("Digital objects created"),
            count_cell(report.created_count(), Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("Components created"),
            count_cell(report.components_created(), Color::Green),
        ]);
    }
    table.add_row(vec![
        Cell::new("Skipped"),
        count_cell(report.skipped().count(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Bad records"),
        count_cell(report.bad_records().count(), Color::Red),
    ]);
    println!("{table}");
    print_problem_table(result);
    print_timing(result.started, result.finished);
}

fn print_problem_table(result: &DaoResult) {
    let report = &result.report;
    if !report.has_failures() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Component"),
        header_cell("Kind"),
        header_cell("Target"),
        header_cell("Reason"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (row, reason) in report.skipped() {
        table.add_row(vec![
            Cell::new(row.line),
            Cell::new(&row.component_id),
            Cell::new("SKIP").fg(Color::Yellow),
            dim_cell("-"),
            Cell::new(reason),
        ]);
    }
    for (row, bad) in report.bad_records() {
        table.add_row(vec![
            Cell::new(row.line),
            Cell::new(&row.component_id),
            Cell::new("FAILED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(&bad.target),
            Cell::new(&bad.reason),
        ]);
    }
    println!();
    println!("Problems:");
    println!("{table}");
}

pub fn print_handle_summary(result: &HandleResult) {
    println!("Handle batch: {}", result.path.display());
    println!("Handles written: {} of {} rows", result.written, result.rows);
    print_timing(result.started, result.finished);
}

fn print_timing(started: DateTime<Local>, finished: DateTime<Local>) {
    println!("Start time: {}", started.format("%Y-%m-%d, %H:%M:%S"));
    println!("Stop time: {}", finished.format("%Y-%m-%d, %H:%M:%S"));
    let elapsed = finished - started;
    println!(
        "Elapsed time: {}.{:03}s",
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000
    );
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
