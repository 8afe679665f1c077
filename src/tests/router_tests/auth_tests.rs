// src/tests/router_tests/auth_tests.rs

use crate::auth::guard::Role;
use crate::auth::reset::{ResetConfig, ResetService};
use crate::db::users;
use crate::router::handle;
use crate::tests::utils::{get, location, now_unix, post, signed_in_user, test_app};

#[test]
fn signup_creates_employee_and_signs_in() {
    let app = test_app();

    let resp = handle(
        post("/signup", None, &[("email", "new@example.com"), ("password", "secret99")]),
        &app,
    )
    .expect("handler failed");

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/leads"); // employee landing
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(cookie.starts_with("session="), "session cookie missing: {cookie}");

    let profile = app
        .db
        .with_conn(|conn| users::find_by_email(conn, "new@example.com"))
        .unwrap()
        .expect("user not created");
    assert_eq!(profile.role, Role::Employee);
}

#[test]
fn signup_rejects_weak_passwords() {
    let app = test_app();
    let result = handle(
        post("/signup", None, &[("email", "weak@example.com"), ("password", "short")]),
        &app,
    );
    assert!(result.is_err(), "weak password must be rejected");
}

#[test]
fn login_round_trip_and_bad_password() {
    let app = test_app();

    handle(
        post("/signup", None, &[("email", "u@example.com"), ("password", "secret99")]),
        &app,
    )
    .unwrap();

    // Wrong password bounces back with a notice, not an error page.
    let resp = handle(
        post("/login", None, &[("email", "u@example.com"), ("password", "nope12345")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert!(location(&resp).starts_with("/login"));

    let resp = handle(
        post("/login", None, &[("email", "u@example.com"), ("password", "secret99")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/leads");
}

#[test]
fn logout_revokes_the_session() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "bye@example.com", Role::Employee);

    let resp = handle(post("/logout", Some(&token), &[]), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    // The old session no longer opens protected pages.
    let resp = handle(get("/leads", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn reset_link_redeems_via_query_params() {
    let app = test_app();
    signed_in_user(&app, "forgot@example.com", Role::Employee);

    let issued = app
        .db
        .with_conn(|conn| ResetService::new(ResetConfig::default()).request(conn, "forgot@example.com", now_unix()))
        .unwrap();

    let uri = format!(
        "/auth/reset?access_token={}&refresh_token={}",
        issued.access_token, issued.refresh_token
    );
    let resp = handle(get(&uri, None), &app).unwrap();
    assert_eq!(resp.status(), 200);

    // Token pair is single-use.
    let again = handle(get(&uri, None), &app);
    assert!(again.is_err(), "second redemption must fail");
}
