// src/import/mapping.rs

use serde::{Deserialize, Serialize};

/// Canonical lead fields a CSV column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportField {
    OwnerName,
    PropertyAddress,
    TaxId,
    LawsuitNo,
    Arrears,
    Phone,
    Email,
    Notes,
}

impl ImportField {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportField::OwnerName => "owner_name",
            ImportField::PropertyAddress => "property_address",
            ImportField::TaxId => "tax_id",
            ImportField::LawsuitNo => "lawsuit_no",
            ImportField::Arrears => "arrears",
            ImportField::Phone => "phone",
            ImportField::Email => "email",
            ImportField::Notes => "notes",
        }
    }

    /// Header label used in the exported template.
    pub fn label(self) -> &'static str {
        match self {
            ImportField::OwnerName => "Owner Name",
            ImportField::PropertyAddress => "Property Address",
            ImportField::TaxId => "Tax ID",
            ImportField::LawsuitNo => "Tax Lawsuit Number",
            ImportField::Arrears => "Current Arrears",
            ImportField::Phone => "Phone",
            ImportField::Email => "Email",
            ImportField::Notes => "Notes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "owner_name" => Some(ImportField::OwnerName),
            "property_address" => Some(ImportField::PropertyAddress),
            "tax_id" => Some(ImportField::TaxId),
            "lawsuit_no" => Some(ImportField::LawsuitNo),
            "arrears" => Some(ImportField::Arrears),
            "phone" => Some(ImportField::Phone),
            "email" => Some(ImportField::Email),
            "notes" => Some(ImportField::Notes),
            _ => None,
        }
    }

    pub fn all() -> [ImportField; 8] {
        [
            ImportField::OwnerName,
            ImportField::PropertyAddress,
            ImportField::TaxId,
            ImportField::LawsuitNo,
            ImportField::Arrears,
            ImportField::Phone,
            ImportField::Email,
            ImportField::Notes,
        ]
    }
}

/// Aliases matched against incoming headers, per field. The field's own
/// template label is always considered too.
const ALIASES: &[(ImportField, &[&str])] = &[
    (ImportField::OwnerName, &["owner", "name", "taxpayer name"]),
    (ImportField::PropertyAddress, &["address", "property", "situs address"]),
    (ImportField::TaxId, &["parcel id", "account number"]),
    (ImportField::LawsuitNo, &["lawsuit", "cause number", "suit number"]),
    (ImportField::Arrears, &["amount due", "delinquent amount", "taxes due"]),
    (ImportField::Phone, &["phone number", "telephone"]),
    (ImportField::Email, &["email address", "e-mail"]),
    (ImportField::Notes, &["comments", "remarks"]),
];

/// Lowercase and strip everything that isn't alphanumeric.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Map one header to a canonical field: a candidate matches when either
/// normalized string contains the other. Among multiple matches the
/// longest normalized candidate wins; remaining ties go to the earlier
/// dictionary entry. This keeps e.g. "Tax Lawsuit Number" from landing on
/// "Tax ID" just because both contain "tax".
pub fn auto_map_header(header: &str) -> Option<ImportField> {
    let norm = normalize(header);
    if norm.is_empty() {
        return None;
    }

    let mut best: Option<(ImportField, usize)> = None;

    let mut consider = |field: ImportField, candidate: &str| {
        let cand = normalize(candidate);
        if cand.is_empty() {
            return;
        }
        if norm.contains(&cand) || cand.contains(&norm) {
            let better = match best {
                Some((_, len)) => cand.len() > len,
                None => true,
            };
            if better {
                best = Some((field, cand.len()));
            }
        }
    };

    for field in ImportField::all() {
        consider(field, field.label());
    }
    for (field, aliases) in ALIASES {
        for alias in *aliases {
            consider(*field, alias);
        }
    }

    best.map(|(field, _)| field)
}

/// Column-indexed mapping produced from the header row. The user may
/// override any entry before import; None skips the column.
pub fn auto_map(headers: &[String]) -> Vec<Option<ImportField>> {
    headers.iter().map(|h| auto_map_header(h)).collect()
}

/// Import is only allowed once the mapping resolves both required fields.
pub fn has_required_fields(mapping: &[Option<ImportField>]) -> bool {
    mapping.iter().flatten().any(|f| *f == ImportField::OwnerName)
        && mapping.iter().flatten().any(|f| *f == ImportField::PropertyAddress)
}
