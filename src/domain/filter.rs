// src/domain/filter.rs

use serde::{Deserialize, Serialize};

use crate::domain::lead::{Lead, Status};

/// Fields a filter condition or sort key may address. Field access goes
/// through this enum's typed getters instead of name-indexed lookup, so a
/// condition can never reference a field the engine doesn't know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    OwnerName,
    PropertyAddress,
    TaxId,
    LawsuitNo,
    Arrears,
    Email,
    Phone,
    Notes,
    Status,
}

impl LeadField {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::OwnerName => "owner_name",
            LeadField::PropertyAddress => "property_address",
            LeadField::TaxId => "tax_id",
            LeadField::LawsuitNo => "lawsuit_no",
            LeadField::Arrears => "arrears",
            LeadField::Email => "email",
            LeadField::Phone => "phone",
            LeadField::Notes => "notes",
            LeadField::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadField::OwnerName => "Owner Name",
            LeadField::PropertyAddress => "Property Address",
            LeadField::TaxId => "Tax ID",
            LeadField::LawsuitNo => "Lawsuit Number",
            LeadField::Arrears => "Current Arrears",
            LeadField::Email => "Email",
            LeadField::Phone => "Phone",
            LeadField::Notes => "Notes",
            LeadField::Status => "Status",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "owner_name" => Some(LeadField::OwnerName),
            "property_address" => Some(LeadField::PropertyAddress),
            "tax_id" => Some(LeadField::TaxId),
            "lawsuit_no" => Some(LeadField::LawsuitNo),
            "arrears" => Some(LeadField::Arrears),
            "email" => Some(LeadField::Email),
            "phone" => Some(LeadField::Phone),
            "notes" => Some(LeadField::Notes),
            "status" => Some(LeadField::Status),
            _ => None,
        }
    }

    pub fn all() -> [LeadField; 9] {
        [
            LeadField::OwnerName,
            LeadField::PropertyAddress,
            LeadField::TaxId,
            LeadField::LawsuitNo,
            LeadField::Arrears,
            LeadField::Email,
            LeadField::Phone,
            LeadField::Notes,
            LeadField::Status,
        ]
    }

    /// Text value of the field on a lead. None means "absent", which the
    /// operators below treat differently from the empty string only where
    /// the contract says so.
    pub fn text_value(self, lead: &Lead) -> Option<String> {
        match self {
            LeadField::OwnerName => Some(lead.owner_name.clone()),
            LeadField::PropertyAddress => Some(lead.property_address.clone()),
            LeadField::TaxId => lead.tax_id.clone(),
            LeadField::LawsuitNo => lead.lawsuit_no.clone(),
            LeadField::Arrears => lead.arrears.map(|a| a.to_string()),
            LeadField::Email => lead.email.clone(),
            LeadField::Phone => lead.phone.clone(),
            LeadField::Notes => Some(lead.notes.clone()),
            LeadField::Status => Some(lead.status.as_str().to_string()),
        }
    }

    /// Numeric value of the field, parsing text fields as floats so that
    /// range operators behave uniformly across fields.
    pub fn numeric_value(self, lead: &Lead) -> Option<f64> {
        match self {
            LeadField::Arrears => lead.arrears,
            other => other.text_value(lead).and_then(|s| s.trim().parse().ok()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Equals => "equals",
            FilterOp::Contains => "contains",
            FilterOp::StartsWith => "starts_with",
            FilterOp::EndsWith => "ends_with",
            FilterOp::GreaterThan => "greater_than",
            FilterOp::LessThan => "less_than",
            FilterOp::IsEmpty => "is_empty",
            FilterOp::IsNotEmpty => "is_not_empty",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterOp::Equals => "equals",
            FilterOp::Contains => "contains",
            FilterOp::StartsWith => "starts with",
            FilterOp::EndsWith => "ends with",
            FilterOp::GreaterThan => "greater than",
            FilterOp::LessThan => "less than",
            FilterOp::IsEmpty => "is empty",
            FilterOp::IsNotEmpty => "is not empty",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "equals" => Some(FilterOp::Equals),
            "contains" => Some(FilterOp::Contains),
            "starts_with" => Some(FilterOp::StartsWith),
            "ends_with" => Some(FilterOp::EndsWith),
            "greater_than" => Some(FilterOp::GreaterThan),
            "less_than" => Some(FilterOp::LessThan),
            "is_empty" => Some(FilterOp::IsEmpty),
            "is_not_empty" => Some(FilterOp::IsNotEmpty),
            _ => None,
        }
    }

    pub fn all() -> [FilterOp; 8] {
        [
            FilterOp::Equals,
            FilterOp::Contains,
            FilterOp::StartsWith,
            FilterOp::EndsWith,
            FilterOp::GreaterThan,
            FilterOp::LessThan,
            FilterOp::IsEmpty,
            FilterOp::IsNotEmpty,
        ]
    }
}

/// A single user-authored predicate. A list of these is ANDed together in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: LeadField,
    pub op: FilterOp,
    pub value: String,
}

impl FilterCondition {
    /// A condition with an empty value is inert unless its operator is one
    /// of the emptiness checks.
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
            || matches!(self.op, FilterOp::IsEmpty | FilterOp::IsNotEmpty)
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        if !self.is_active() {
            return true;
        }

        let text = self.field.text_value(lead);

        match self.op {
            FilterOp::Equals => text.as_deref() == Some(self.value.as_str()),
            FilterOp::Contains => match text {
                Some(t) => t.to_lowercase().contains(&self.value.to_lowercase()),
                None => false,
            },
            FilterOp::StartsWith => match text {
                Some(t) => t.to_lowercase().starts_with(&self.value.to_lowercase()),
                None => false,
            },
            FilterOp::EndsWith => match text {
                Some(t) => t.to_lowercase().ends_with(&self.value.to_lowercase()),
                None => false,
            },
            FilterOp::GreaterThan => match (self.field.numeric_value(lead), self.value.trim().parse::<f64>()) {
                (Some(lhs), Ok(rhs)) => lhs > rhs,
                _ => false,
            },
            FilterOp::LessThan => match (self.field.numeric_value(lead), self.value.trim().parse::<f64>()) {
                (Some(lhs), Ok(rhs)) => lhs < rhs,
                _ => false,
            },
            FilterOp::IsEmpty => text.map(|t| t.is_empty()).unwrap_or(true),
            FilterOp::IsNotEmpty => text.map(|t| !t.is_empty()).unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(Status),
}

impl StatusFilter {
    /// "all" (or anything unrecognized) passes everything through.
    pub fn parse(s: &str) -> Self {
        match Status::parse(s) {
            Some(status) => StatusFilter::Only(status),
            None => StatusFilter::All,
        }
    }

    fn matches(self, lead: &Lead) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => lead.status == status,
        }
    }
}

/// Keys the list view can be sorted by, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    OwnerName,
    PropertyAddress,
    Arrears,
    TaxId,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::OwnerName => "owner_name",
            SortKey::PropertyAddress => "property_address",
            SortKey::Arrears => "arrears",
            SortKey::TaxId => "tax_id",
        }
    }

    /// Unrecognized keys yield None and leave the incoming order alone.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "owner_name" => Some(SortKey::OwnerName),
            "property_address" => Some(SortKey::PropertyAddress),
            "arrears" => Some(SortKey::Arrears),
            "tax_id" => Some(SortKey::TaxId),
            _ => None,
        }
    }

    pub fn all() -> [SortKey; 4] {
        [
            SortKey::OwnerName,
            SortKey::PropertyAddress,
            SortKey::Arrears,
            SortKey::TaxId,
        ]
    }
}

/// Everything the list view derives its rows from. Pure input to
/// `apply_query`; holds no state of its own.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub search: String,
    pub status: Option<Status>,
    pub conditions: Vec<FilterCondition>,
    pub sort: Option<SortKey>,
}

fn matches_search(lead: &Lead, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();

    let hit = |v: &str| v.to_lowercase().contains(&needle);

    hit(&lead.owner_name)
        || hit(&lead.property_address)
        || lead.tax_id.as_deref().map(hit).unwrap_or(false)
        || lead.email.as_deref().map(hit).unwrap_or(false)
}

fn compare(a: &Lead, b: &Lead, key: SortKey) -> std::cmp::Ordering {
    match key {
        SortKey::Arrears => {
            let lhs = a.arrears.unwrap_or(0.0);
            let rhs = b.arrears.unwrap_or(0.0);
            lhs.partial_cmp(&rhs).unwrap_or(std::cmp::Ordering::Equal)
        }
        SortKey::OwnerName => a.owner_name.to_lowercase().cmp(&b.owner_name.to_lowercase()),
        SortKey::PropertyAddress => a
            .property_address
            .to_lowercase()
            .cmp(&b.property_address.to_lowercase()),
        SortKey::TaxId => a
            .tax_id
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .cmp(&b.tax_id.as_deref().unwrap_or("").to_lowercase()),
    }
}

/// Apply search, status filter, advanced conditions, and sort to the full
/// lead collection, producing the view list. Pure function of its inputs;
/// the caller's slice is never reordered.
pub fn apply_query(leads: &[Lead], q: &LeadQuery) -> Vec<Lead> {
    let status = match q.status {
        Some(s) => StatusFilter::Only(s),
        None => StatusFilter::All,
    };

    let mut out: Vec<Lead> = leads
        .iter()
        .filter(|lead| {
            matches_search(lead, q.search.trim())
                && status.matches(lead)
                && q.conditions.iter().all(|c| c.matches(lead))
        })
        .cloned()
        .collect();

    if let Some(key) = q.sort {
        // Stable sort on a copy; shared state elsewhere keeps its order.
        out.sort_by(|a, b| compare(a, b, key));
    }

    out
}
