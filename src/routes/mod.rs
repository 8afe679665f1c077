// src/routes/mod.rs
//
// Route handlers, grouped by area. Everything protected goes through
// `gate` (the navigation guard) before touching the database.

pub mod admin;
pub mod auth;
pub mod campaigns;
pub mod imports;
pub mod leads;
pub mod pages;

use std::collections::HashMap;
use std::io::Read;

use astra::{Request, Response};

use crate::auth::guard::{guard, AuthedUser, Guarded, Role};
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::errors::ServerError;
use crate::responses::redirect;

/// Everything a handler needs: the database handle plus the startup
/// configuration.
#[derive(Clone)]
pub struct App {
    pub db: Database,
    pub cfg: AppConfig,
}

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => HashMap::new(),
    }
}

/// Consume the request and parse its body as a URL-encoded form.
pub fn parse_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read request body: {e}")))?;

    Ok(url::form_urlencoded::parse(&buf)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

pub fn parse_cookies(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(header) = req.headers().get("Cookie").and_then(|v| v.to_str().ok()) {
        for pair in header.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
                map.insert(k.to_string(), v.to_string());
            }
        }
    }

    map
}

pub const SESSION_COOKIE: &str = "session";

pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        crate::auth::sessions::SESSION_TTL_SECS
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Guard outcome for a handler: either the authenticated user, or the
/// redirect response to return as-is.
pub enum Gate {
    User(AuthedUser),
    Resp(Response),
}

pub fn gate(
    app: &App,
    cookies: &HashMap<String, String>,
    path: &str,
    allowed_roles: Option<&[Role]>,
    now: i64,
) -> Result<Gate, ServerError> {
    let token = cookies.get(SESSION_COOKIE).map(String::as_str);

    let outcome = app
        .db
        .with_conn(|conn| guard(conn, token, path, allowed_roles, now))?;

    match outcome {
        Guarded::Allow(user) => Ok(Gate::User(user)),
        Guarded::Redirect(to) => Ok(Gate::Resp(redirect(to)?)),
    }
}
