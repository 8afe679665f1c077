// src/import/template.rs

use crate::domain::lead::Lead;
use crate::import::mapping::ImportField;

/// Column order of the downloadable template, matched by the importer's
/// auto-mapping.
pub const TEMPLATE_COLUMNS: [ImportField; 8] = [
    ImportField::TaxId,
    ImportField::OwnerName,
    ImportField::PropertyAddress,
    ImportField::LawsuitNo,
    ImportField::Arrears,
    ImportField::Phone,
    ImportField::Email,
    ImportField::Notes,
];

/// Quote a cell for the naive comma-split parser: the parser strips one
/// surrounding quote pair and never looks inside, so embedded commas and
/// line breaks are replaced rather than escaped.
fn quote_cell(value: &str) -> String {
    let flat: String = value
        .chars()
        .map(|c| match c {
            ',' => ';',
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect();
    format!("\"{flat}\"")
}

fn header_line() -> String {
    TEMPLATE_COLUMNS
        .iter()
        .map(|f| quote_cell(f.label()))
        .collect::<Vec<_>>()
        .join(",")
}

/// The empty import template: header row plus one illustrative row.
pub fn template_csv() -> String {
    let mut out = String::new();
    out.push_str(&header_line());
    out.push('\n');
    out.push_str(
        &[
            "TX-00000", "Jane Roe", "12 Elm St", "2024-CV-0001", "1500.00", "", "", "",
        ]
        .iter()
        .map(|c| quote_cell(c))
        .collect::<Vec<_>>()
        .join(","),
    );
    out.push('\n');
    out
}

fn lead_cells(lead: &Lead) -> [String; 8] {
    [
        lead.tax_id.clone().unwrap_or_default(),
        lead.owner_name.clone(),
        lead.property_address.clone(),
        lead.lawsuit_no.clone().unwrap_or_default(),
        lead.arrears.map(|a| format!("{a:.2}")).unwrap_or_default(),
        lead.phone.clone().unwrap_or_default(),
        lead.email.clone().unwrap_or_default(),
        lead.notes.clone(),
    ]
}

/// Export leads in the template column order, one row per lead.
pub fn leads_csv(leads: &[Lead]) -> String {
    let mut out = String::new();
    out.push_str(&header_line());
    out.push('\n');
    for lead in leads {
        let line = lead_cells(lead)
            .iter()
            .map(|c| quote_cell(c))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
