// Fixed-width table of all users for people to read. Never parsed back.

use std::fmt::Write as _;

use crate::codec::{self, RecordBlock};

/// (header, width) in column order. Passwords are left out.
pub const COLUMNS: [(&str, usize); 7] = [
    ("Name", 15),
    ("Age", 10),
    ("Height", 10),
    ("Weight", 10),
    ("Username", 15),
    ("Subscribed", 12),
    ("CustomPlan", 30),
];

pub const SEPARATOR_WIDTH: usize = 102;

/// One table row, values as written in the user file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadableRow<'a> {
    pub cells: [&'a str; 7],
}

impl<'a> ReadableRow<'a> {
    /// Row for a block whose fields can be located. Numbers are not parsed,
    /// so a record with a garbled value still shows up as written.
    pub fn from_block(block: &'a RecordBlock) -> Option<Self> {
        let [name, age, height, weight, username, _password, subscribed, custom_plan] =
            codec::raw_values(block.record, &block.body()).ok()?;
        Some(Self {
            cells: [name, age, height, weight, username, subscribed, custom_plan],
        })
    }
}

/// Render the header, separator and one line per row. Cells are
/// left-aligned and padded to their column width but never truncated.
pub fn render_table<'a>(rows: impl IntoIterator<Item = ReadableRow<'a>>) -> String {
    let mut out = String::new();
    push_line(&mut out, COLUMNS.map(|(header, _)| header));
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');
    for row in rows {
        push_line(&mut out, row.cells);
    }
    out
}

fn push_line(out: &mut String, cells: [&str; 7]) {
    for (&(_, width), cell) in COLUMNS.iter().zip(cells) {
        // Writing into a String cannot fail.
        let _ = write!(out, "{cell:<width$}");
    }
    out.push('\n');
}
