//! Loads the two tabular datasets from disk into [`RawTable`] values.
//!
//! Delimited text follows the original upload format (header row, comma
//! separated, double-quote quoting). JSON datasets are arrays of flat
//! objects. Either way the output is an untyped table; schema validation
//! belongs to the catalog.

use std::{fs, path::Path};

use serde_json::Value;

use crate::{
    catalog::RawTable,
    errors::{EstimatorError, Result},
};

/// Reads a dataset file, picking the format from the extension.
pub fn load_table_from_path(path: &Path) -> Result<RawTable> {
    let data = fs::read_to_string(path)
        .map_err(|err| EstimatorError::Storage(format!("{}: {err}", path.display())))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => table_from_json(&data),
        _ => table_from_delimited(&data),
    }
}

/// Parses an array of flat JSON objects into a table.
///
/// Column order is first-appearance order across all records; missing fields
/// become empty cells.
pub fn table_from_json(data: &str) -> Result<RawTable> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_str(data)?;
    let mut columns: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.clone());
            }
        }
    }
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(render_cell).unwrap_or_default())
                .collect()
        })
        .collect();
    Ok(RawTable::new(columns, rows))
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Parses delimited text with a header row into a table.
pub fn table_from_delimited(data: &str) -> Result<RawTable> {
    let mut lines = data.lines().enumerate();
    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line,
            None => {
                return Err(EstimatorError::Storage(
                    "dataset is empty: expected a header row".into(),
                ))
            }
        }
    };
    let columns = split_record(header)?;

    let mut rows = Vec::new();
    for (line_number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_record(line)?;
        if cells.len() != columns.len() {
            return Err(EstimatorError::Storage(format!(
                "line {}: expected {} fields, found {}",
                line_number + 1,
                columns.len(),
                cells.len()
            )));
        }
        rows.push(cells);
    }
    Ok(RawTable::new(columns, rows))
}

fn split_record(line: &str) -> Result<Vec<String>> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if cell.is_empty() => quoted = true,
            ',' if !quoted => {
                cells.push(std::mem::take(&mut cell));
            }
            _ => cell.push(ch),
        }
    }
    if quoted {
        return Err(EstimatorError::Storage(format!(
            "unterminated quoted field in record: `{line}`"
        )));
    }
    cells.push(cell);
    Ok(cells)
}
