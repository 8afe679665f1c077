// src/routes/auth.rs

use astra::Request;

use crate::auth::guard::Role;
use crate::auth::password::{hash_password, validate_policy, verify_password};
use crate::auth::reset::{ResetConfig, ResetService};
use crate::auth::sessions;
use crate::comms::mailer::deliver_reset_link;
use crate::db::users;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, redirect, redirect_with_cookie};
use crate::routes::{
    clear_session_cookie, gate, now_unix, parse_cookies, parse_form, parse_query, session_cookie,
    App, Gate, SESSION_COOKIE,
};
use crate::templates::pages::login::login_page;
use crate::templates::pages::reset::reset_password_page;

pub fn login_form(req: Request, app: &App) -> ResultResp {
    // Already signed in? Straight to the landing page.
    let cookies = parse_cookies(&req);
    if let Gate::User(user) = gate(app, &cookies, "/dashboard", None, now_unix())? {
        return redirect(user.role.default_landing());
    }

    let params = parse_query(&req);
    html_response(login_page(params.get("notice").map(String::as_str)))
}

pub fn login(req: Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let email = users::normalize_email(form.get("email").map(String::as_str).unwrap_or(""))?;
    let password = form.get("password").map(String::as_str).unwrap_or("");
    let now = now_unix();

    let found = app.db.with_conn(|conn| users::get_password_hash_by_email(conn, &email))?;

    let Some((user_id, stored_hash)) = found else {
        return redirect("/login?notice=Invalid+email+or+password");
    };

    if !verify_password(&stored_hash, password)? {
        return redirect("/login?notice=Invalid+email+or+password");
    }

    let (token, landing) = app.db.with_conn(|conn| {
        let token = sessions::create_session(conn, user_id, now)?;
        users::touch_last_login(conn, user_id, now)?;
        let profile = users::get_profile(conn, user_id)?.ok_or(ServerError::InternalError)?;
        Ok((token, profile.role.default_landing()))
    })?;

    redirect_with_cookie(landing, &session_cookie(&token))
}

pub fn signup(req: Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let email = users::normalize_email(form.get("email").map(String::as_str).unwrap_or(""))?;
    let password = form.get("password").map(String::as_str).unwrap_or("");
    validate_policy(password)?;

    let now = now_unix();
    let password_hash = hash_password(password)?;

    // New accounts start as employees; an admin promotes from there.
    let token = app.db.with_conn(|conn| {
        let user_id = users::create_user(conn, &email, &password_hash, Role::Employee, now)?;
        sessions::create_session(conn, user_id, now)
    })?;

    redirect_with_cookie(Role::Employee.default_landing(), &session_cookie(&token))
}

pub fn logout(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();

    if let Some(token) = cookies.get(SESSION_COOKIE) {
        app.db.with_conn(|conn| sessions::revoke_session(conn, token, now))?;
    }

    redirect_with_cookie("/login", &clear_session_cookie())
}

pub fn reset_request(req: Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let email = form.get("email").map(String::as_str).unwrap_or("");
    let now = now_unix();

    let svc = ResetService::new(ResetConfig::default());
    let issued = app.db.with_conn(|conn| svc.request(conn, email, now));

    match issued {
        Ok(issued) => {
            let link = format!("{}{}", app.cfg.base_url, issued.link);
            deliver_reset_link(&app.cfg.mailer, &issued.email, &link)?;
        }
        // Whether the account exists is not the requester's business;
        // the same message goes back either way.
        Err(ServerError::Validation(_)) => {
            log::info!("password reset requested for unknown email");
        }
        Err(e) => return Err(e),
    }

    redirect("/login?notice=If+that+account+exists,+a+reset+link+is+on+its+way")
}

/// Landing for the emailed link:
/// /auth/reset?access_token=…&refresh_token=…
/// Redemption is single-use; success binds a fresh session and shows the
/// new-password form.
pub fn reset_redeem(req: Request, app: &App) -> ResultResp {
    let params = parse_query(&req);
    let access = params.get("access_token").map(String::as_str).unwrap_or("");
    let refresh = params.get("refresh_token").map(String::as_str).unwrap_or("");
    let now = now_unix();

    let svc = ResetService::new(ResetConfig::default());
    let (redeemed, token) = app.db.with_conn(|conn| {
        let redeemed = svc.redeem(conn, access, refresh, now)?;
        let token = sessions::create_session(conn, redeemed.user_id, now)?;
        Ok((redeemed, token))
    })?;

    let markup = reset_password_page(&redeemed.email);
    crate::responses::html::html_response_with_cookie(markup, &session_cookie(&token))
}

/// Password change. The settings form sends current_password; the
/// post-reset form (running on a session freshly minted from the emailed
/// link) does not.
pub fn change_password(req: Request, app: &App) -> ResultResp {
    let cookies = parse_cookies(&req);
    let now = now_unix();
    let user = match gate(app, &cookies, "/settings", None, now)? {
        Gate::User(u) => u,
        Gate::Resp(r) => return Ok(r),
    };

    let form = parse_form(req)?;
    let new_password = form.get("new_password").map(String::as_str).unwrap_or("");
    validate_policy(new_password)?;

    if let Some(current) = form.get("current_password") {
        let stored = app.db.with_conn(|conn| users::get_password_hash(conn, user.id))?;
        if !verify_password(&stored, current)? {
            return Err(ServerError::Validation("current password is incorrect".into()));
        }
    }

    let new_hash = hash_password(new_password)?;
    app.db.with_conn(|conn| users::set_password_hash(conn, user.id, &new_hash))?;

    redirect(user.role.default_landing())
}
