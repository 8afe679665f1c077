// src/tests/router_tests/prefs_tests.rs

use astra::Body;
use http::Method;

use crate::auth::guard::Role;
use crate::prefs::{SAVED_FILTERS_COOKIE, VIEW_MODE_COOKIE};
use crate::router::handle;
use crate::tests::utils::{body_string, location, post, signed_in_user, test_app};

fn set_cookie_header(resp: &astra::Response) -> String {
    resp.headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[test]
fn view_mode_choice_persists_in_a_cookie() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    let resp = handle(
        post("/prefs/view-mode", Some(&token), &[("mode", "cards")]),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/leads");

    let cookie = set_cookie_header(&resp);
    assert!(cookie.starts_with(&format!("{VIEW_MODE_COOKIE}=cards")), "{cookie}");
}

#[test]
fn list_view_honors_the_view_mode_cookie() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    // Request the leads page with the kanban preference attached.
    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/leads")
        .header(
            "Cookie",
            format!("session={token}; {VIEW_MODE_COOKIE}=kanban"),
        )
        .body(Body::empty())
        .unwrap();

    let body = body_string(handle(req, &app).unwrap());
    assert!(body.contains("kanban"), "kanban board should render");
}

#[test]
fn garbage_view_mode_cookie_falls_back_to_table() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/leads")
        .header(
            "Cookie",
            format!("session={token}; {VIEW_MODE_COOKIE}=hologram"),
        )
        .body(Body::empty())
        .unwrap();

    let body = body_string(handle(req, &app).unwrap());
    assert!(body.contains("lead-table"), "table view is the fallback");
}

#[test]
fn saved_filter_set_survives_the_cookie_round_trip() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    let resp = handle(
        post(
            "/settings/filters/save",
            Some(&token),
            &[
                ("name", "Hot with arrears"),
                ("cf0", "status"),
                ("co0", "equals"),
                ("cv0", "hot"),
                ("cf1", "arrears"),
                ("co1", "greater_than"),
                ("cv1", "1000"),
            ],
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let cookie = set_cookie_header(&resp);
    assert!(cookie.starts_with(&format!("{SAVED_FILTERS_COOKIE}=")), "{cookie}");
    let value = cookie
        .strip_prefix(&format!("{SAVED_FILTERS_COOKIE}="))
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    // Reload the store from the persisted value, as a fresh request would.
    let cookies: std::collections::HashMap<String, String> =
        [(SAVED_FILTERS_COOKIE.to_string(), value)].into_iter().collect();
    let sets = crate::prefs::saved_filters(&cookies);

    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].name, "Hot with arrears");
    assert_eq!(sets[0].filters.len(), 2);
    assert_eq!(sets[0].filters[0].field, crate::domain::filter::LeadField::Status);
    assert_eq!(sets[0].filters[0].value, "hot");
    assert_eq!(sets[0].filters[1].op, crate::domain::filter::FilterOp::GreaterThan);
}

#[test]
fn saving_without_conditions_is_rejected() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    let result = handle(
        post("/settings/filters/save", Some(&token), &[("name", "Empty")]),
        &app,
    );
    assert!(result.is_err());
}
