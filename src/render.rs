use std::io::{self, Write};

use tabled::Table;

use crate::models::Record;

/// Record rows as an ASCII table: columns Time, Count, Capacity, one row per
/// record in response order. With no records only the header renders.
pub fn table(rows: &[Record]) -> String {
    Table::new(rows).to_string()
}

// full repaint, watch(1) style: clear screen, table, status line underneath
pub fn draw(rows: &[Record], status: &str) {
    let mut out = io::stdout();
    let _ = write!(out, "\x1b[2J\x1b[H{}\n\n{status}\n", table(rows));
    let _ = out.flush();
}
