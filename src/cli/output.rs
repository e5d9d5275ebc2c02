//! Output formatting for CLI commands

use crate::{grid::Grid, value_table::ValueTable};

/// Render the value table: one header line, then one line per grid row of
/// space-separated values in row-major order.
pub fn format_value_table(grid: &Grid, table: &ValueTable) -> String {
    let mut out = String::from("Value table:\n");
    for row in 0..grid.size() {
        let line: Vec<String> = (0..grid.size())
            .map(|col| format!("{:.4}", table.get(grid.encode(row, col))))
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Print the value table to stdout.
pub fn print_value_table(grid: &Grid, table: &ValueTable) {
    print!("{}", format_value_table(grid, table));
}

/// Render the greedy policy as one arrow glyph per cell, `G` at the goal.
pub fn format_policy(grid: &Grid, table: &ValueTable) -> String {
    let mut out = String::from("Greedy policy:\n");
    for row in 0..grid.size() {
        let line: Vec<String> = (0..grid.size())
            .map(|col| {
                let state = grid.encode(row, col);
                if grid.is_terminal(state) {
                    "G".to_string()
                } else {
                    table.best_action(grid, state).glyph().to_string()
                }
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Print the greedy policy to stdout.
pub fn print_policy(grid: &Grid, table: &ValueTable) {
    print!("{}", format_policy(grid, table));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{key}:"), value);
}
