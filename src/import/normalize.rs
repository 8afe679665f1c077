// src/import/normalize.rs

use crate::domain::lead::NewLead;
use crate::import::csv::CsvTable;
use crate::import::mapping::ImportField;

pub const UNKNOWN_OWNER: &str = "Unknown Owner";
pub const UNKNOWN_ADDRESS: &str = "Unknown Address";

/// Parse a currency-ish cell into an arrears amount. Strips everything
/// that isn't a digit, dot, or minus sign before parsing, so values like
/// "$1,234.56 (est.)" come through. Unparseable or negative amounts are
/// discarded (left unset).
pub fn parse_arrears(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value: f64 = cleaned.parse().ok()?;
    if value < 0.0 || !value.is_finite() {
        return None;
    }
    Some(value)
}

fn assign(draft: &mut NewLead, field: ImportField, cell: &str) {
    let cell = cell.trim();
    match field {
        ImportField::OwnerName => draft.owner_name = cell.to_string(),
        ImportField::PropertyAddress => draft.property_address = cell.to_string(),
        ImportField::TaxId => draft.tax_id = Some(cell.to_string()),
        ImportField::LawsuitNo => draft.lawsuit_no = Some(cell.to_string()),
        ImportField::Arrears => draft.arrears = parse_arrears(cell),
        ImportField::Phone => draft.phone = Some(cell.to_string()),
        ImportField::Email => draft.email = Some(cell.to_string()),
        ImportField::Notes => draft.notes = cell.to_string(),
    }
}

/// Convert one parsed row into a lead draft using the column mapping.
/// Empty cells and unmapped columns are skipped; missing trailing cells in
/// ragged rows are treated the same as empty ones.
pub fn normalize_row(row: &[String], mapping: &[Option<ImportField>]) -> NewLead {
    let mut draft = NewLead::default();

    for (col, field) in mapping.iter().enumerate() {
        let Some(field) = field else { continue };
        let Some(cell) = row.get(col) else { continue };
        if cell.trim().is_empty() {
            continue;
        }
        assign(&mut draft, *field, cell);
    }

    // Required-field invariant: drafts never leave here with a blank owner
    // or address.
    if draft.owner_name.trim().is_empty() {
        draft.owner_name = UNKNOWN_OWNER.to_string();
    }
    if draft.property_address.trim().is_empty() {
        draft.property_address = UNKNOWN_ADDRESS.to_string();
    }

    draft
}

/// Pure transform of the whole table. Submission to the database is the
/// caller's job, as is surfacing per-row insert failures.
pub fn normalize_table(table: &CsvTable, mapping: &[Option<ImportField>]) -> Vec<NewLead> {
    table.rows.iter().map(|row| normalize_row(row, mapping)).collect()
}
