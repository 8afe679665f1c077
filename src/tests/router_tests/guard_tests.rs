// src/tests/router_tests/guard_tests.rs

use rusqlite::params;

use crate::auth::guard::Role;
use crate::router::handle;
use crate::tests::utils::{get, location, signed_in_user, test_app};

#[test]
fn unauthenticated_requests_redirect_to_login() {
    let app = test_app();

    for path in ["/dashboard", "/leads", "/campaigns", "/admin/users", "/settings"] {
        let resp = handle(get(path, None), &app).expect("handler failed");
        assert_eq!(resp.status(), 302, "{path}");
        assert_eq!(location(&resp), "/login", "{path}");
    }
}

#[test]
fn employee_navigating_to_admin_lands_on_leads() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "emp@example.com", Role::Employee);

    let resp = handle(get("/admin/users", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/leads");
}

#[test]
fn guest_cannot_reach_leads_but_sees_dashboard() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "guest@example.com", Role::Guest);

    let resp = handle(get("/leads", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/dashboard");

    let resp = handle(get("/dashboard", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn manager_reaches_campaigns_but_not_admin() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "mgr@example.com", Role::Manager);

    let resp = handle(get("/campaigns", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let resp = handle(get("/admin/analytics", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/dashboard");
}

#[test]
fn session_without_profile_is_force_logged_out() {
    let app = test_app();
    let (user_id, token) = signed_in_user(&app, "ghost@example.com", Role::Employee);

    // Orphan the session: profile row gone, session row still live.
    app.db
        .with_conn(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = OFF;")
                .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))?;
            conn.execute(
                "update sessions set user_id = 999999 where user_id = ?",
                params![user_id],
            )
            .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))?;
            Ok(())
        })
        .unwrap();

    let resp = handle(get("/leads", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    // The guard revoked the orphaned session.
    let revoked: i64 = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select count(*) from sessions where revoked_at is not null",
                [],
                |r| r.get(0),
            )
            .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(revoked, 1);
}
