// src/import/csv.rs

use crate::errors::ServerError;

/// Parsed CSV content: first non-blank line becomes the headers, the rest
/// become rows. Rows may be ragged; the normalizer treats missing cells as
/// absent fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Split raw CSV text on newlines, then commas, stripping one leading and
/// one trailing double-quote per cell.
///
/// This is a deliberately naive split: embedded commas inside quoted
/// fields are not handled. The exported template quotes whole cells and
/// never emits embedded commas, so the round trip stays lossless.
pub fn parse_csv(text: &str) -> Result<CsvTable, ServerError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let Some(header_line) = lines.next() else {
        return Err(ServerError::Validation("CSV file is empty".into()));
    };

    let headers = split_line(header_line);
    let rows: Vec<Vec<String>> = lines.map(split_line).collect();

    if rows.is_empty() {
        return Err(ServerError::Validation(
            "CSV file has no data rows (only a header line)".into(),
        ));
    }

    Ok(CsvTable { headers, rows })
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

fn clean_cell(cell: &str) -> String {
    let cell = cell.trim();
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    let cell = cell.strip_suffix('"').unwrap_or(cell);
    cell.to_string()
}
