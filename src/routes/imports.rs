// src/routes/imports.rs
//
// The CSV import pipeline: upload -> mapping preview -> import. Shared
// between the main lead list and campaign-scoped imports; only the final
// insert differs.

use std::collections::HashMap;

use astra::Request;
use serde_json::json;

use crate::db::{activities, campaigns as db_campaigns, leads as db_leads};
use crate::domain::activity::{ActivityKind, NewActivity};
use crate::errors::{ResultResp, ServerError};
use crate::import::csv::parse_csv;
use crate::import::mapping::{auto_map, has_required_fields, ImportField};
use crate::import::normalize::normalize_table;
use crate::responses::html_response;
use crate::routes::{gate, now_unix, parse_cookies, parse_form, App, Gate};
use crate::templates::pages::import::{import_mapping_page, import_result_page, import_upload_page};

pub fn upload_form(req: Request, app: &App, campaign_id: Option<i64>) -> ResultResp {
    let cookies = parse_cookies(&req);
    let path = guard_path(campaign_id);
    let user = match gate(app, &cookies, path, None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };
    html_response(import_upload_page(&user, campaign_id))
}

fn guard_path(campaign_id: Option<i64>) -> &'static str {
    match campaign_id {
        Some(_) => "/campaigns",
        None => "/leads",
    }
}

/// Parse the pasted CSV and render the mapping table, auto-mapped.
pub fn preview(req: Request, app: &App, campaign_id: Option<i64>) -> ResultResp {
    let cookies = parse_cookies(&req);
    let path = guard_path(campaign_id);
    let user = match gate(app, &cookies, path, None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let form = parse_form(req)?;
    let csv_text = form.get("csv").map(String::as_str).unwrap_or("");

    let table = parse_csv(csv_text)?;
    let mapping = auto_map(&table.headers);

    html_response(import_mapping_page(&user, &table, &mapping, csv_text, campaign_id))
}

/// Read the user's (possibly overridden) mapping out of the form.
fn mapping_from_form(form: &HashMap<String, String>, columns: usize) -> Vec<Option<ImportField>> {
    (0..columns)
        .map(|i| form.get(&format!("map{i}")).and_then(|v| ImportField::parse(v)))
        .collect()
}

/// Run the import. Row failures are collected, not fatal; a batch where
/// every row fails is surfaced as an error state.
pub fn run(req: Request, app: &App, campaign_id: Option<i64>) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let path = guard_path(campaign_id);
    let user = match gate(app, &cookies, path, None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let form = parse_form(req)?;
    let csv_text = form.get("csv").map(String::as_str).unwrap_or("");

    let table = parse_csv(csv_text)?;
    let mapping = mapping_from_form(&form, table.headers.len());

    if !has_required_fields(&mapping) {
        return Err(ServerError::Validation(
            "map at least one column to Owner Name and one to Property Address".into(),
        ));
    }

    if let Some(id) = campaign_id {
        // The campaign must exist before anything is written.
        app.db
            .with_conn(|conn| db_campaigns::get_campaign(conn, id))?
            .ok_or(ServerError::NotFound)?;
    }

    let drafts = normalize_table(&table, &mapping);
    let mut imported = 0usize;
    let mut failures: Vec<(usize, String)> = Vec::new();

    for (row, draft) in drafts.iter().enumerate() {
        let result = app.db.with_conn(|conn| match campaign_id {
            Some(cid) => db_campaigns::insert_campaign_lead(conn, cid, draft, now).map(|_| ()),
            None => db_leads::insert_lead(conn, draft, now).map(|_| ()),
        });

        match result {
            Ok(()) => imported += 1,
            Err(e) => {
                log::warn!("import row {row} failed: {e}");
                failures.push((row, e.to_string()));
            }
        }
    }

    // A batch where nothing landed is an error, not a quiet success.
    if imported == 0 {
        return Err(ServerError::Validation(format!(
            "import failed: all {} rows were rejected",
            drafts.len()
        )));
    }

    let (kind, title, back_href) = match campaign_id {
        Some(cid) => (
            ActivityKind::CampaignImported,
            format!("Imported {imported} leads into campaign {cid}"),
            format!("/campaigns/{cid}"),
        ),
        None => (
            ActivityKind::LeadImported,
            format!("Imported {imported} leads"),
            "/leads".to_string(),
        ),
    };

    app.db.with_conn(|conn| {
        activities::record(
            conn,
            NewActivity::new(kind, title)
                .actor(user.id)
                .metadata(json!({ "imported": imported, "failed": failures.len() })),
            now,
        );
        Ok(())
    })?;

    html_response(import_result_page(&user, imported, &failures, &back_href))
}
