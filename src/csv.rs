// src/csv.rs
use std::io::{self, Write};

use serde_json::Value;

use crate::record::EventRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    pub fn sep(self) -> char {
        match self {
            Delim::Csv => ',',
            Delim::Tsv => '\t',
        }
    }
    pub fn ext(self) -> &'static str {
        match self {
            Delim::Csv => "csv",
            Delim::Tsv => "tsv",
        }
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
/// Fields needing quotes are wrapped, embedded quotes doubled.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Cell text for one JSON value. Strings render bare (no JSON quotes),
/// null renders empty, everything else in its JSON form.
fn cell_text(v: Option<Value>) -> String {
    match v {
        None | Some(Value::Null) => s!(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

/// Render the whole record set as delimited text.
/// Header row comes from the first record's field names; records missing a
/// header field render an empty cell there. Empty input → empty string.
pub fn records_to_string(rows: &[EventRecord], delim: Delim) -> String {
    let Some(first) = rows.first() else {
        return s!();
    };
    let headers = first.field_names();

    let mut buf: Vec<u8> = Vec::new();
    let _ = write_row(&mut buf, &headers, delim.sep());
    for rec in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| cell_text(rec.value_of(h)))
            .collect();
        let _ = write_row(&mut buf, &cells, delim.sep());
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
