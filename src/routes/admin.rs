// src/routes/admin.rs

use astra::Request;
use serde_json::json;

use crate::auth::guard::Role;
use crate::db::{activities, leads as db_leads, users};
use crate::domain::activity::{ActivityKind, NewActivity};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, redirect};
use crate::routes::{gate, now_unix, parse_cookies, parse_form, App, Gate};
use crate::templates::pages::admin::{
    admin_analytics_page, admin_settings_page, admin_users_page, AnalyticsVm,
};

const ADMIN_ONLY: &[Role] = &[Role::Admin];

pub fn users_page(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/admin/users", Some(ADMIN_ONLY), now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let all = app.db.with_conn(|conn| users::list_users(conn))?;
    html_response(admin_users_page(&user, &all))
}

pub fn set_role(req: Request, app: &App, target_id: i64) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/admin/users", Some(ADMIN_ONLY), now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    if target_id == user.id {
        return Err(ServerError::Validation(
            "you cannot change your own role".into(),
        ));
    }

    let form = parse_form(req)?;
    let role = form
        .get("role")
        .and_then(|v| Role::parse(v))
        .ok_or_else(|| ServerError::Validation("unknown role".into()))?;

    app.db.with_conn(|conn| {
        users::set_role(conn, target_id, role)?;
        activities::record(
            conn,
            NewActivity::new(
                ActivityKind::UserRoleChanged,
                format!("Changed user {target_id} role to {}", role.label()),
            )
            .actor(user.id)
            .metadata(json!({ "user_id": target_id, "role": role.as_str() })),
            now,
        );
        Ok(())
    })?;

    redirect("/admin/users")
}

pub fn settings(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let user = match gate(app, &cookies, "/admin/settings", Some(ADMIN_ONLY), now_unix())? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };
    html_response(admin_settings_page(&user, &app.cfg))
}

pub fn analytics(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/admin/analytics", Some(ADMIN_ONLY), now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let vm = app.db.with_conn(|conn| {
        Ok(AnalyticsVm {
            status_counts: db_leads::count_by_status(conn)?,
            users_total: users::list_users(conn)?.len() as i64,
            activities_7d: activities::count_since(conn, now - 7 * 24 * 3600)?,
            activities_30d: activities::count_since(conn, now - 30 * 24 * 3600)?,
        })
    })?;

    html_response(admin_analytics_page(&user, &vm))
}

pub fn reset_activity(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/admin/settings", Some(ADMIN_ONLY), now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let deleted = app.db.with_conn(|conn| activities::reset_activity_logs(conn))?;
    log::info!("admin {} cleared {deleted} activity rows", user.id);

    redirect("/admin/settings")
}
