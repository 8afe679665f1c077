// src/domain/activity.rs

use serde_json::Value;

/// Audit record written on virtually every mutating action. Immutable once
/// created; consumed only for display (notifications feed, analytics).
#[derive(Debug, Clone)]
pub struct ActivityItem {
    pub id: i64,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub actor_user_id: Option<i64>,
    pub metadata: Option<Value>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    LeadCreated,
    LeadUpdated,
    LeadDeleted,
    LeadImported,
    CampaignCreated,
    CampaignImported,
    CallPlaced,
    SmsSent,
    UserRoleChanged,
    Other,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::LeadCreated => "lead_created",
            ActivityKind::LeadUpdated => "lead_updated",
            ActivityKind::LeadDeleted => "lead_deleted",
            ActivityKind::LeadImported => "lead_imported",
            ActivityKind::CampaignCreated => "campaign_created",
            ActivityKind::CampaignImported => "campaign_imported",
            ActivityKind::CallPlaced => "call_placed",
            ActivityKind::SmsSent => "sms_sent",
            ActivityKind::UserRoleChanged => "user_role_changed",
            ActivityKind::Other => "other",
        }
    }

    /// Rows written before a kind was introduced still render: anything
    /// unrecognized comes back as Other.
    pub fn parse(s: &str) -> Self {
        match s {
            "lead_created" => ActivityKind::LeadCreated,
            "lead_updated" => ActivityKind::LeadUpdated,
            "lead_deleted" => ActivityKind::LeadDeleted,
            "lead_imported" => ActivityKind::LeadImported,
            "campaign_created" => ActivityKind::CampaignCreated,
            "campaign_imported" => ActivityKind::CampaignImported,
            "call_placed" => ActivityKind::CallPlaced,
            "sms_sent" => ActivityKind::SmsSent,
            "user_role_changed" => ActivityKind::UserRoleChanged,
            _ => ActivityKind::Other,
        }
    }
}

/// Fields for an activity row about to be written.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub actor_user_id: Option<i64>,
    pub metadata: Option<Value>,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: String::new(),
            actor_user_id: None,
            metadata: None,
        }
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.description = d.into();
        self
    }

    pub fn actor(mut self, user_id: i64) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn metadata(mut self, m: Value) -> Self {
        self.metadata = Some(m);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_parses_to_other() {
        assert_eq!(ActivityKind::parse("lead_created"), ActivityKind::LeadCreated);
        assert_eq!(ActivityKind::parse("??"), ActivityKind::Other);
    }
}
