// src/prefs/mod.rs
//
// Per-device display preferences. These live in cookies, not in the
// database: they are best-effort, device-scoped, and never
// correctness-critical. Reads fall back to defaults on anything
// unrecognized; failures are logged and swallowed.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::filter::FilterCondition;

pub const VIEW_MODE_COOKIE: &str = "view_mode";
pub const SAVED_FILTERS_COOKIE: &str = "saved_filters";

// Roughly a year; preferences should outlive the session cookie.
const PREF_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
    Kanban,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Cards => "cards",
            ViewMode::Kanban => "kanban",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Cards => "Cards",
            ViewMode::Kanban => "Kanban",
        }
    }

    pub fn all() -> [ViewMode; 3] {
        [ViewMode::Table, ViewMode::Cards, ViewMode::Kanban]
    }
}

/// Read the view mode from the request cookies, defaulting on anything
/// missing or unrecognized.
pub fn view_mode(cookies: &HashMap<String, String>) -> ViewMode {
    match cookies.get(VIEW_MODE_COOKIE).map(String::as_str) {
        Some("table") => ViewMode::Table,
        Some("cards") => ViewMode::Cards,
        Some("kanban") => ViewMode::Kanban,
        Some(other) => {
            log::warn!("unrecognized view mode {other:?}; falling back to default");
            ViewMode::default()
        }
        None => ViewMode::default(),
    }
}

/// Set-Cookie header value persisting the view mode.
pub fn view_mode_cookie(mode: ViewMode) -> String {
    format!(
        "{VIEW_MODE_COOKIE}={}; Path=/; Max-Age={PREF_COOKIE_MAX_AGE}; SameSite=Lax",
        mode.as_str()
    )
}

/// A named, ordered set of filter conditions the user saved for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilterSet {
    pub id: String,
    pub name: String,
    pub filters: Vec<FilterCondition>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Decode the saved filter sets cookie. Unparseable payloads count as
/// empty; the preference store never errors at the caller.
pub fn saved_filters(cookies: &HashMap<String, String>) -> Vec<SavedFilterSet> {
    let Some(raw) = cookies.get(SAVED_FILTERS_COOKIE) else {
        return Vec::new();
    };

    let decoded = match base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(raw.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("saved filters cookie is not valid base64: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_slice(&decoded) {
        Ok(sets) => sets,
        Err(e) => {
            log::warn!("saved filters cookie is not valid JSON: {e}");
            Vec::new()
        }
    }
}

/// Set-Cookie header value persisting the saved filter sets. None when
/// serialization fails (logged, primary action unaffected).
pub fn saved_filters_cookie(sets: &[SavedFilterSet]) -> Option<String> {
    let json = match serde_json::to_vec(sets) {
        Ok(j) => j,
        Err(e) => {
            log::warn!("failed to serialize saved filters: {e}");
            return None;
        }
    };
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
    Some(format!(
        "{SAVED_FILTERS_COOKIE}={encoded}; Path=/; Max-Age={PREF_COOKIE_MAX_AGE}; SameSite=Lax"
    ))
}
