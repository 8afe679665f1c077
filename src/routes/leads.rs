// src/routes/leads.rs

use std::collections::HashMap;

use astra::Request;
use serde_json::json;

use crate::db::{activities, leads as db_leads};
use crate::domain::activity::{ActivityKind, NewActivity};
use crate::domain::filter::{apply_query, FilterCondition, FilterOp, LeadField, LeadQuery, SortKey};
use crate::domain::lead::{Disposition, Lead, NewLead, Occupancy, Status, Temperature};
use crate::errors::{ResultResp, ServerError};
use crate::import::normalize::parse_arrears;
use crate::import::template::{leads_csv, template_csv};
use crate::prefs;
use crate::responses::{csv_response, html_response, redirect};
use crate::routes::{gate, now_unix, parse_cookies, parse_form, parse_query, App, Gate};
use crate::spreadsheets::export_leads_xlsx;
use crate::templates::pages::lead_detail::{lead_detail_page, LeadDetailVm};
use crate::templates::pages::lead_form::{edit_lead_page, new_lead_page};
use crate::templates::pages::leads::{leads_page, LeadsVm};

/// Up to this many advanced-filter rows are read from the query string.
const MAX_CONDITIONS: usize = 10;

/// Reconstruct the ordered condition list from cf0/co0/cv0... parameters.
pub fn parse_conditions(params: &HashMap<String, String>) -> Vec<FilterCondition> {
    let mut out = Vec::new();
    for i in 0..MAX_CONDITIONS {
        let Some(field) = params.get(&format!("cf{i}")).and_then(|v| LeadField::parse(v)) else {
            continue;
        };
        let op = params
            .get(&format!("co{i}"))
            .and_then(|v| FilterOp::parse(v))
            .unwrap_or(FilterOp::Equals);
        let value = params.get(&format!("cv{i}")).cloned().unwrap_or_default();
        out.push(FilterCondition { field, op, value });
    }
    out
}

/// Build the engine query from request parameters, resolving a saved
/// filter set when `saved=<id>` is present.
pub fn parse_lead_query(
    params: &HashMap<String, String>,
    saved: &[prefs::SavedFilterSet],
) -> LeadQuery {
    let conditions = match params.get("saved") {
        Some(id) => saved
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.filters.clone())
            .unwrap_or_default(),
        None => parse_conditions(params),
    };

    LeadQuery {
        search: params.get("q").cloned().unwrap_or_default(),
        status: params.get("status").and_then(|s| Status::parse(s)),
        conditions,
        sort: params.get("sort").and_then(|s| SortKey::parse(s)),
    }
}

pub fn list(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/leads", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let params = parse_query(&req);
    let saved = prefs::saved_filters(&cookies);
    let query = parse_lead_query(&params, &saved);

    let all = app.db.with_conn(|conn| db_leads::list_leads(conn))?;
    let view = apply_query(&all, &query);

    html_response(leads_page(&LeadsVm {
        user,
        total: all.len(),
        leads: view,
        search: query.search,
        status: query.status,
        sort: query.sort,
        conditions: query.conditions,
        saved,
        view_mode: prefs::view_mode(&cookies),
    }))
}

fn draft_from_form(form: &HashMap<String, String>) -> NewLead {
    let opt = |key: &str| {
        form.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    NewLead {
        owner_name: form.get("owner_name").map(|v| v.trim()).unwrap_or("").to_string(),
        property_address: form
            .get("property_address")
            .map(|v| v.trim())
            .unwrap_or("")
            .to_string(),
        tax_id: opt("tax_id"),
        lawsuit_no: opt("lawsuit_no"),
        arrears: form.get("arrears").and_then(|v| parse_arrears(v)),
        status: form
            .get("status")
            .and_then(|v| Status::parse(v))
            .unwrap_or(Status::Cold),
        temperature: form
            .get("temperature")
            .and_then(|v| Temperature::parse(v))
            .unwrap_or(Temperature::Cold),
        occupancy: form
            .get("occupancy")
            .and_then(|v| Occupancy::parse(v))
            .unwrap_or(Occupancy::Unknown),
        disposition: form
            .get("disposition")
            .and_then(|v| Disposition::parse(v))
            .unwrap_or(Disposition::Undecided),
        email: opt("email"),
        phone: opt("phone"),
        notes: form.get("notes").map(|v| v.trim()).unwrap_or("").to_string(),
    }
}

pub fn new_form(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/leads", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };
    html_response(new_lead_page(&user))
}

pub fn create(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/leads", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let form = parse_form(req)?;
    let draft = draft_from_form(&form);

    let id = app.db.with_conn(|conn| {
        let id = db_leads::insert_lead(conn, &draft, now)?;
        activities::record(
            conn,
            NewActivity::new(ActivityKind::LeadCreated, format!("Created lead {}", draft.owner_name))
                .actor(user.id)
                .metadata(json!({ "lead_id": id })),
            now,
        );
        Ok(id)
    })?;

    redirect(&format!("/leads/{id}"))
}

fn load_lead(app: &App, id: i64) -> Result<Lead, ServerError> {
    app.db
        .with_conn(|conn| db_leads::get_lead(conn, id))?
        .ok_or(ServerError::NotFound)
}

pub fn detail(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/leads", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let params = parse_query(&req);
    let lead = load_lead(app, id)?;
    let (heirs, files, tags) = app.db.with_conn(|conn| {
        Ok((
            db_leads::list_heirs(conn, id)?,
            db_leads::list_files(conn, id)?,
            db_leads::list_tags(conn, id)?,
        ))
    })?;

    html_response(lead_detail_page(&LeadDetailVm {
        user,
        lead,
        heirs,
        files,
        tags,
        notice: params.get("notice").cloned(),
    }))
}

pub fn edit_form(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/leads", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };
    let lead = load_lead(app, id)?;
    html_response(edit_lead_page(&user, &lead))
}

pub fn edit(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/leads", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let form = parse_form(req)?;
    let draft = draft_from_form(&form);
    draft.validate()?;

    let existing = load_lead(app, id)?;
    let updated = Lead {
        id: existing.id,
        owner_name: draft.owner_name,
        property_address: draft.property_address,
        tax_id: draft.tax_id,
        lawsuit_no: draft.lawsuit_no,
        arrears: draft.arrears,
        status: draft.status,
        temperature: draft.temperature,
        occupancy: draft.occupancy,
        disposition: draft.disposition,
        email: draft.email,
        phone: draft.phone,
        notes: draft.notes,
        created_at: existing.created_at,
        updated_at: now,
    };

    app.db.with_conn(|conn| {
        db_leads::update_lead(conn, &updated, now)?;
        activities::record(
            conn,
            NewActivity::new(ActivityKind::LeadUpdated, format!("Updated lead {}", updated.owner_name))
                .actor(user.id)
                .metadata(json!({ "lead_id": id })),
            now,
        );
        Ok(())
    })?;

    redirect(&format!("/leads/{id}"))
}

pub fn delete(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/leads", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let lead = load_lead(app, id)?;

    app.db.with_conn(|conn| {
        db_leads::delete_lead(conn, id)?;
        activities::record(
            conn,
            NewActivity::new(ActivityKind::LeadDeleted, format!("Deleted lead {}", lead.owner_name))
                .actor(user.id)
                .metadata(json!({ "lead_id": id })),
            now,
        );
        Ok(())
    })?;

    redirect("/leads")
}

pub fn add_heir(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now)? {
        return Ok(r);
    }

    load_lead(app, id)?;
    let form = parse_form(req)?;

    let name = form.get("name").map(String::as_str).unwrap_or("");
    let relationship = form.get("relationship").map(String::as_str).unwrap_or("");
    let percentage: f64 = form
        .get("percentage")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse())
        .transpose()
        .map_err(|_| ServerError::Validation("heir percentage must be a number".into()))?
        .unwrap_or(0.0);
    let contact = form.get("contact").map(|v| v.trim()).filter(|v| !v.is_empty());

    app.db
        .with_conn(|conn| db_leads::add_heir(conn, id, name, relationship, percentage, contact))?;

    redirect(&format!("/leads/{id}"))
}

pub fn delete_heir(req: Request, app: &App, lead_id: i64, heir_id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    app.db.with_conn(|conn| db_leads::delete_heir(conn, lead_id, heir_id))?;
    redirect(&format!("/leads/{lead_id}"))
}

pub fn add_file(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now)? {
        return Ok(r);
    }

    load_lead(app, id)?;
    let form = parse_form(req)?;
    let name = form.get("name").map(String::as_str).unwrap_or("");
    let url = form.get("url").map(String::as_str).unwrap_or("");
    let file_type = form.get("file_type").map(|v| v.trim()).filter(|v| !v.is_empty());
    let size_bytes = form.get("size_bytes").and_then(|v| v.trim().parse().ok());

    app.db
        .with_conn(|conn| db_leads::add_file(conn, id, name, url, file_type, size_bytes, now))?;

    redirect(&format!("/leads/{id}"))
}

pub fn delete_file(req: Request, app: &App, lead_id: i64, file_id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    app.db.with_conn(|conn| db_leads::delete_file(conn, lead_id, file_id))?;
    redirect(&format!("/leads/{lead_id}"))
}

pub fn add_tag(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    load_lead(app, id)?;
    let form = parse_form(req)?;
    let tag = form.get("tag").map(String::as_str).unwrap_or("");
    app.db.with_conn(|conn| db_leads::add_tag(conn, id, tag))?;
    redirect(&format!("/leads/{id}"))
}

pub fn remove_tag(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    let form = parse_form(req)?;
    let tag = form.get("tag").map(String::as_str).unwrap_or("");
    app.db.with_conn(|conn| db_leads::remove_tag(conn, id, tag))?;
    redirect(&format!("/leads/{id}"))
}

pub fn call(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/leads", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let lead = load_lead(app, id)?;
    app.db
        .with_conn(|conn| crate::comms::telephony::place_call(conn, &lead, &user, now))?;

    redirect(&format!("/leads/{id}?notice=Call+logged"))
}

pub fn sms(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/leads", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let lead = load_lead(app, id)?;
    let form = parse_form(req)?;
    let body = form.get("body").map(String::as_str).unwrap_or("");

    app.db
        .with_conn(|conn| crate::comms::telephony::send_sms(conn, &lead, &user, body, now))?;

    redirect(&format!("/leads/{id}?notice=Message+logged"))
}

/// The exports run the same query as the list view, so the download is
/// exactly what's on screen.
fn filtered_view(req: &Request, app: &App) -> Result<Vec<Lead>, ServerError> {
    let cookies = parse_cookies(req);
    let params = parse_query(req);
    let saved = prefs::saved_filters(&cookies);
    let query = parse_lead_query(&params, &saved);

    let all = app.db.with_conn(|conn| db_leads::list_leads(conn))?;
    Ok(apply_query(&all, &query))
}

pub fn export_csv(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    let view = filtered_view(&req, app)?;
    csv_response(leads_csv(&view), "leads.csv")
}

pub fn export_xlsx(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    let view = filtered_view(&req, app)?;
    export_leads_xlsx(&view)
}

pub fn template(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/leads", None, now_unix())? {
        return Ok(r);
    }
    csv_response(template_csv(), "lead_import_template.csv")
}
