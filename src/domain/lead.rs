// src/domain/lead.rs

use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

pub const NOTES_MAX_LEN: usize = 4000;

/// Qualification pipeline status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Hot,
    Warm,
    Cold,
    Pass,
    Keep,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Hot => "hot",
            Status::Warm => "warm",
            Status::Cold => "cold",
            Status::Pass => "pass",
            Status::Keep => "keep",
        }
    }

    /// Case-insensitive parse. Unknown strings yield None so callers can
    /// decide on a fallback.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Some(Status::Hot),
            "warm" => Some(Status::Warm),
            "cold" => Some(Status::Cold),
            "pass" => Some(Status::Pass),
            "keep" => Some(Status::Keep),
            _ => None,
        }
    }

    pub fn all() -> [Status; 5] {
        [
            Status::Hot,
            Status::Warm,
            Status::Cold,
            Status::Pass,
            Status::Keep,
        ]
    }
}

/// Coarse priority signal, separate from pipeline status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

impl Temperature {
    pub fn as_str(self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Warm => "warm",
            Temperature::Cold => "cold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Some(Temperature::Hot),
            "warm" => Some(Temperature::Warm),
            "cold" => Some(Temperature::Cold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    OwnerOccupied,
    TenantOccupied,
    Vacant,
    Occupied,
    Unknown,
}

impl Occupancy {
    pub fn as_str(self) -> &'static str {
        match self {
            Occupancy::OwnerOccupied => "owner_occupied",
            Occupancy::TenantOccupied => "tenant_occupied",
            Occupancy::Vacant => "vacant",
            Occupancy::Occupied => "occupied",
            Occupancy::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "owner_occupied" => Some(Occupancy::OwnerOccupied),
            "tenant_occupied" => Some(Occupancy::TenantOccupied),
            "vacant" => Some(Occupancy::Vacant),
            "occupied" => Some(Occupancy::Occupied),
            "unknown" => Some(Occupancy::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Undecided,
    Qualified,
    Disqualified,
}

impl Disposition {
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Undecided => "undecided",
            Disposition::Qualified => "qualified",
            Disposition::Disqualified => "disqualified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "undecided" => Some(Disposition::Undecided),
            "qualified" => Some(Disposition::Qualified),
            "disqualified" => Some(Disposition::Disqualified),
            _ => None,
        }
    }
}

/// A tax-delinquent property lead as stored in the `leads` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: i64,
    pub owner_name: String,
    pub property_address: String,
    pub tax_id: Option<String>,
    pub lawsuit_no: Option<String>,
    pub arrears: Option<f64>,
    pub status: Status,
    pub temperature: Temperature,
    pub occupancy: Occupancy,
    pub disposition: Disposition,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Field values for a lead about to be inserted. Produced by manual entry
/// or by the import normalizer; both paths guarantee owner_name and
/// property_address are non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub owner_name: String,
    pub property_address: String,
    pub tax_id: Option<String>,
    pub lawsuit_no: Option<String>,
    pub arrears: Option<f64>,
    pub status: Status,
    pub temperature: Temperature,
    pub occupancy: Occupancy,
    pub disposition: Disposition,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: String,
}

impl Default for NewLead {
    fn default() -> Self {
        Self {
            owner_name: String::new(),
            property_address: String::new(),
            tax_id: None,
            lawsuit_no: None,
            arrears: None,
            // Freshly created leads enter the pipeline cold.
            status: Status::Cold,
            temperature: Temperature::Cold,
            occupancy: Occupancy::Unknown,
            disposition: Disposition::Undecided,
            email: None,
            phone: None,
            notes: String::new(),
        }
    }
}

impl NewLead {
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.owner_name.trim().is_empty() {
            return Err(ServerError::Validation("owner name must not be empty".into()));
        }
        if self.property_address.trim().is_empty() {
            return Err(ServerError::Validation(
                "property address must not be empty".into(),
            ));
        }
        if self.notes.len() > NOTES_MAX_LEN {
            return Err(ServerError::Validation(format!(
                "notes exceed {NOTES_MAX_LEN} characters"
            )));
        }
        if let Some(a) = self.arrears {
            if a < 0.0 {
                return Err(ServerError::Validation("arrears must not be negative".into()));
            }
        }
        Ok(())
    }
}

/// An heir attached to a lead.
#[derive(Debug, Clone, PartialEq)]
pub struct Heir {
    pub id: i64,
    pub lead_id: i64,
    pub name: String,
    pub relationship: String,
    pub percentage: f64,
    pub contact: Option<String>,
}

/// File metadata attached to a lead. Blobs live elsewhere; we only track
/// the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadFile {
    pub id: i64,
    pub lead_id: i64,
    pub name: String,
    pub url: String,
    pub file_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub uploaded_at: i64,
}

/// A lead scoped to a marketing campaign. Same descriptive shape as Lead
/// minus classification and heirs; campaign_id is set at creation and
/// never reassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignLead {
    pub id: i64,
    pub campaign_id: i64,
    pub owner_name: String,
    pub property_address: String,
    pub tax_id: Option<String>,
    pub lawsuit_no: Option<String>,
    pub arrears: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(Status::parse("HOT"), Some(Status::Hot));
        assert_eq!(Status::parse(" keep "), Some(Status::Keep));
        assert_eq!(Status::parse("lukewarm"), None);
    }

    #[test]
    fn new_lead_rejects_blank_required_fields() {
        let mut lead = NewLead {
            owner_name: "Jane Roe".into(),
            property_address: "12 Elm St".into(),
            ..NewLead::default()
        };
        assert!(lead.validate().is_ok());

        lead.owner_name = "   ".into();
        assert!(matches!(lead.validate(), Err(ServerError::Validation(_))));
    }

    #[test]
    fn new_lead_rejects_negative_arrears_and_oversized_notes() {
        let mut lead = NewLead {
            owner_name: "Jane Roe".into(),
            property_address: "12 Elm St".into(),
            arrears: Some(-1.0),
            ..NewLead::default()
        };
        assert!(lead.validate().is_err());

        lead.arrears = Some(100.0);
        lead.notes = "x".repeat(NOTES_MAX_LEN + 1);
        assert!(lead.validate().is_err());
    }

    #[test]
    fn defaults_enter_pipeline_cold_and_undecided() {
        let lead = NewLead::default();
        assert_eq!(lead.status, Status::Cold);
        assert_eq!(lead.temperature, Temperature::Cold);
        assert_eq!(lead.occupancy, Occupancy::Unknown);
        assert_eq!(lead.disposition, Disposition::Undecided);
    }
}
