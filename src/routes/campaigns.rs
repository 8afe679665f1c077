// src/routes/campaigns.rs

use astra::Request;
use serde_json::json;

use crate::db::{activities, campaigns as db_campaigns};
use crate::domain::activity::{ActivityKind, NewActivity};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, redirect};
use crate::routes::{gate, now_unix, parse_cookies, parse_form, App, Gate};
use crate::templates::pages::campaigns::{campaign_detail_page, campaigns_page};

pub fn list(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/campaigns", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let campaigns = app.db.with_conn(|conn| {
        let list = db_campaigns::list_campaigns(conn)?;
        let mut out = Vec::with_capacity(list.len());
        for campaign in list {
            let count = db_campaigns::count_campaign_leads(conn, campaign.id)?;
            out.push((campaign, count));
        }
        Ok(out)
    })?;

    html_response(campaigns_page(&user, &campaigns))
}

pub fn create(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/campaigns", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let form = parse_form(req)?;
    let name = form.get("name").map(String::as_str).unwrap_or("");
    let description = form
        .get("description")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty());

    let id = app.db.with_conn(|conn| {
        let id = db_campaigns::create_campaign(conn, name, description, now)?;
        activities::record(
            conn,
            NewActivity::new(ActivityKind::CampaignCreated, format!("Created campaign {}", name.trim()))
                .actor(user.id)
                .metadata(json!({ "campaign_id": id })),
            now,
        );
        Ok(id)
    })?;

    redirect(&format!("/campaigns/{id}"))
}

pub fn detail(req: Request, app: &App, id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/campaigns", None, now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let (campaign, leads) = app.db.with_conn(|conn| {
        let campaign = db_campaigns::get_campaign(conn, id)?.ok_or(ServerError::NotFound)?;
        let leads = db_campaigns::list_campaign_leads(conn, id)?;
        Ok((campaign, leads))
    })?;

    html_response(campaign_detail_page(&user, &campaign, &leads))
}
