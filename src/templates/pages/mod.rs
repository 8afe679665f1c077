pub mod admin;
pub mod calendar;
pub mod campaigns;
pub mod dashboard;
pub mod home;
pub mod import;
pub mod lead_detail;
pub mod lead_form;
pub mod leads;
pub mod login;
pub mod notifications;
pub mod reset;
pub mod settings;

/// Unix seconds -> "YYYY-MM-DD HH:MM" for display.
pub fn fmt_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
