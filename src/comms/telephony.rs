// src/comms/telephony.rs
//
// Click-to-call and SMS are a documented mock boundary: the panel in the
// UI is real, the wire to a telephony provider is not. Actions validate
// their inputs, log the intent, and leave an audit record; no network I/O
// happens here. Swapping in a real provider means replacing the bodies of
// `place_call` and `send_sms` without touching their contracts.

use rusqlite::Connection;
use serde_json::json;

use crate::auth::guard::AuthedUser;
use crate::db::activities;
use crate::domain::activity::{ActivityKind, NewActivity};
use crate::domain::lead::Lead;
use crate::errors::ServerError;

pub const SMS_MAX_LEN: usize = 640;

fn require_phone(lead: &Lead) -> Result<&str, ServerError> {
    lead.phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ServerError::Validation("lead has no phone number on file".into()))
}

/// Record the intent to call a lead.
pub fn place_call(
    conn: &Connection,
    lead: &Lead,
    actor: &AuthedUser,
    now: i64,
) -> Result<(), ServerError> {
    let phone = require_phone(lead)?;

    log::info!(
        "call intent: user {} -> lead {} ({phone})",
        actor.id,
        lead.id
    );

    activities::record(
        conn,
        NewActivity::new(ActivityKind::CallPlaced, format!("Called {}", lead.owner_name))
            .actor(actor.id)
            .metadata(json!({ "lead_id": lead.id, "phone": phone })),
        now,
    );

    Ok(())
}

/// Record the intent to text a lead.
pub fn send_sms(
    conn: &Connection,
    lead: &Lead,
    actor: &AuthedUser,
    body: &str,
    now: i64,
) -> Result<(), ServerError> {
    let phone = require_phone(lead)?;

    let body = body.trim();
    if body.is_empty() {
        return Err(ServerError::Validation("message must not be empty".into()));
    }
    if body.len() > SMS_MAX_LEN {
        return Err(ServerError::Validation(format!(
            "message exceeds {SMS_MAX_LEN} characters"
        )));
    }

    log::info!(
        "sms intent: user {} -> lead {} ({phone}), {} chars",
        actor.id,
        lead.id,
        body.len()
    );

    activities::record(
        conn,
        NewActivity::new(ActivityKind::SmsSent, format!("Texted {}", lead.owner_name))
            .actor(actor.id)
            .description(body)
            .metadata(json!({ "lead_id": lead.id, "phone": phone })),
        now,
    );

    Ok(())
}
