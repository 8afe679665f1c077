// src/routes/pages.rs
//
// Dashboard, settings, notifications, calendar, home, and the preference
// endpoints.

use astra::Request;

use crate::db::{activities, campaigns as db_campaigns, leads as db_leads};
use crate::errors::{ResultResp, ServerError};
use crate::prefs::{self, SavedFilterSet, ViewMode};
use crate::responses::{html_response, redirect, redirect_with_cookie};
use crate::routes::{gate, leads, now_unix, parse_cookies, parse_form, App, Gate};
use crate::templates::pages::calendar::calendar_page;
use crate::templates::pages::dashboard::{dashboard_page, DashboardVm};
use crate::templates::pages::home::home_page;
use crate::templates::pages::notifications::notifications_page;
use crate::templates::pages::settings::{settings_page, SettingsVm};

pub fn home(_req: Request, _app: &App) -> ResultResp {
    html_response(home_page())
}

pub fn stylesheet(_req: Request, _app: &App) -> ResultResp {
    astra::ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/css; charset=utf-8")
        .body(astra::Body::from(include_str!("../../static/main.css").to_string()))
        .map_err(|_| ServerError::InternalError)
}

pub fn dashboard(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/dashboard", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let (status_counts, campaign_count, recent) = app.db.with_conn(|conn| {
        Ok((
            db_leads::count_by_status(conn)?,
            db_campaigns::list_campaigns(conn)?.len() as i64,
            activities::list_recent(conn, 10)?,
        ))
    })?;

    html_response(dashboard_page(&DashboardVm {
        user,
        status_counts,
        campaign_count,
        recent,
    }))
}

pub fn notifications(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/notifications", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let items = app.db.with_conn(|conn| activities::list_recent(conn, 100))?;
    html_response(notifications_page(&user, &items))
}

pub fn calendar(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/calendar", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let items = app.db.with_conn(|conn| activities::list_recent(conn, 50))?;
    html_response(calendar_page(&user, &items))
}

pub fn settings(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/settings", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let params = crate::routes::parse_query(&req);
    html_response(settings_page(&SettingsVm {
        user,
        view_mode: prefs::view_mode(&cookies),
        saved: prefs::saved_filters(&cookies),
        notice: params.get("notice").cloned(),
    }))
}

/// Persist the view mode to its cookie and bounce back to the leads list.
pub fn set_view_mode(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/prefs", None, now_unix())? {
        return Ok(r);
    }

    let form = parse_form(req)?;
    let mode = match form.get("mode").map(String::as_str) {
        Some("cards") => ViewMode::Cards,
        Some("kanban") => ViewMode::Kanban,
        Some("table") => ViewMode::Table,
        other => {
            log::warn!("ignoring unrecognized view mode {other:?}");
            ViewMode::default()
        }
    };

    redirect_with_cookie("/leads", &prefs::view_mode_cookie(mode))
}

/// Save the currently-applied advanced filters under a name. The filter
/// rows travel in the form (cf0/co0/cv0…), same wire format the list view
/// uses.
pub fn save_filter_set(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    if let Gate::Resp(r) = gate(app, &cookies, "/settings", None, now)? {
        return Ok(r);
    }

    let form = parse_form(req)?;
    let name = form.get("name").map(|v| v.trim()).unwrap_or("");
    if name.is_empty() {
        return Err(ServerError::Validation("filter set needs a name".into()));
    }

    let filters = leads::parse_conditions(&form);
    if filters.is_empty() {
        return Err(ServerError::Validation(
            "apply at least one advanced filter before saving".into(),
        ));
    }

    let mut sets = prefs::saved_filters(&cookies);
    let id = crate::auth::token::generate_token_default()[..8].to_string();
    sets.push(SavedFilterSet {
        id,
        name: name.to_string(),
        filters,
        created_at: now,
        updated_at: now,
    });

    match prefs::saved_filters_cookie(&sets) {
        Some(cookie) => redirect_with_cookie("/settings?notice=Filter+set+saved", &cookie),
        // Best-effort store: losing the write is logged, never fatal.
        None => redirect("/settings?notice=Could+not+save+filter+set"),
    }
}

pub fn delete_filter_set(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    if let Gate::Resp(r) = gate(app, &cookies, "/settings", None, now_unix())? {
        return Ok(r);
    }

    let form = parse_form(req)?;
    let id = form.get("id").map(String::as_str).unwrap_or("");

    let mut sets = prefs::saved_filters(&cookies);
    sets.retain(|s| s.id != id);

    match prefs::saved_filters_cookie(&sets) {
        Some(cookie) => redirect_with_cookie("/settings", &cookie),
        None => redirect("/settings"),
    }
}
