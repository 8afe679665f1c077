use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::import::csv::CsvTable;
use crate::import::mapping::{has_required_fields, ImportField};
use crate::templates::desktop_layout;

/// Step 1: paste or upload CSV text.
pub fn import_upload_page(user: &AuthedUser, campaign_id: Option<i64>) -> Markup {
    let action = match campaign_id {
        Some(id) => format!("/campaigns/{id}/import/preview"),
        None => "/leads/import/preview".to_string(),
    };

    desktop_layout(
        "Import leads",
        Some(user),
        html! {
            main class="container narrow" {
                h1 { "Import leads" }
                p {
                    "Paste the contents of a CSV file. The first line must be "
                    "the header row. " a href="/leads/template.csv" { "Download the template" } "."
                }
                form action=(action) method="post" class="card" {
                    textarea name="csv" rows="12" placeholder="Owner Name,Property Address,..." required {}
                    button type="submit" { "Preview mapping" }
                }
            }
        },
    )
}

/// Step 2: review/override the column mapping, then import. The import
/// button only renders once the mapping covers both required fields; the
/// handler enforces the same gate.
pub fn import_mapping_page(
    user: &AuthedUser,
    table: &CsvTable,
    mapping: &[Option<ImportField>],
    csv_text: &str,
    campaign_id: Option<i64>,
) -> Markup {
    let action = match campaign_id {
        Some(id) => format!("/campaigns/{id}/import"),
        None => "/leads/import".to_string(),
    };
    let ready = has_required_fields(mapping);

    desktop_layout(
        "Map columns",
        Some(user),
        html! {
            main class="container" {
                h1 { "Map columns" }
                p { (table.rows.len()) " data rows detected." }

                form action=(action) method="post" {
                    textarea name="csv" class="hidden" { (csv_text) }

                    table class="mapping-table" {
                        thead {
                            tr { th { "CSV column" } th { "Sample" } th { "Maps to" } }
                        }
                        tbody {
                            @for (i, header) in table.headers.iter().enumerate() {
                                tr {
                                    td { (header) }
                                    td class="sample" {
                                        (table.rows.first().and_then(|r| r.get(i)).map(String::as_str).unwrap_or(""))
                                    }
                                    td {
                                        select name=(format!("map{i}")) {
                                            option value="" selected[mapping.get(i).copied().flatten().is_none()] {
                                                "— skip —"
                                            }
                                            @for field in ImportField::all() {
                                                option value=(field.as_str())
                                                    selected[mapping.get(i).copied().flatten() == Some(field)] {
                                                    (field.label())
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    @if ready {
                        button type="submit" { "Import " (table.rows.len()) " rows" }
                    } @else {
                        p class="notice" {
                            "Map at least one column to Owner Name and one to "
                            "Property Address to enable the import."
                        }
                        button type="submit" disabled { "Import" }
                    }
                }
            }
        },
    )
}

/// Step 3: per-row outcome.
pub fn import_result_page(
    user: &AuthedUser,
    imported: usize,
    failures: &[(usize, String)],
    back_href: &str,
) -> Markup {
    desktop_layout(
        "Import finished",
        Some(user),
        html! {
            main class="container narrow" {
                h1 { "Import finished" }
                p { strong { (imported) } " rows imported." }

                @if !failures.is_empty() {
                    section class="card error" {
                        h3 { (failures.len()) " rows failed" }
                        ul {
                            @for (row, reason) in failures {
                                li { "Row " (row + 1) ": " (reason) }
                            }
                        }
                    }
                }

                p { a href=(back_href) { "Back to list" } }
            }
        },
    )
}
