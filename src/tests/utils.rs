// src/tests/utils.rs

use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use astra::{Body, Request, Response};
use http::Method;

use crate::auth::guard::Role;
use crate::auth::password::hash_password;
use crate::auth::sessions::create_session;
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::db::users::create_user;
use crate::errors::ServerError;
use crate::routes::App;

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Fresh app over a unique temp-file database with the production schema
/// applied. One per test: the connection slot is thread-local.
pub fn test_app() -> App {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("leadledger_test_{nanos}.sqlite"));

    let db = Database::new(path.to_string_lossy().to_string());
    db.with_conn(|conn| {
        conn.execute_batch(include_str!("../../sql/schema.sql"))
            .map_err(|e| ServerError::DbError(e.to_string()))
    })
    .expect("schema init failed");

    App {
        db,
        cfg: AppConfig::default(),
    }
}

/// Create a user with the given role and hand back (user_id, session
/// cookie token).
pub fn signed_in_user(app: &App, email: &str, role: Role) -> (i64, String) {
    let now = now_unix();
    let password_hash = hash_password("testpass1").expect("hash failed");

    app.db
        .with_conn(|conn| {
            let user_id = create_user(conn, email, &password_hash, role, now)?;
            let token = create_session(conn, user_id, now)?;
            Ok((user_id, token))
        })
        .expect("failed to create signed-in user")
}

pub fn get(uri: &str, session: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(uri: &str, session: Option<&str>, form: &[(&str, &str)]) -> Request {
    let body: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form.iter().copied())
        .finish();

    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut out = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut out)
        .expect("failed to read response body");
    out
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
