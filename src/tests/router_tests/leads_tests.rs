// src/tests/router_tests/leads_tests.rs

use crate::auth::guard::Role;
use crate::db::leads as db_leads;
use crate::domain::lead::Status;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post, signed_in_user, test_app};

fn seed_lead(app: &crate::routes::App, token: &str, owner: &str, status: &str, arrears: &str) -> i64 {
    let resp = handle(
        post(
            "/leads",
            Some(token),
            &[
                ("owner_name", owner),
                ("property_address", "12 Elm St"),
                ("status", status),
                ("arrears", arrears),
            ],
        ),
        app,
    )
    .expect("create failed");
    assert_eq!(resp.status(), 302);

    // "/leads/{id}"
    location(&resp)
        .rsplit('/')
        .next()
        .unwrap()
        .parse()
        .expect("redirect did not contain a lead id")
}

#[test]
fn create_then_list_shows_the_lead() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    seed_lead(&app, &token, "Jane Roe", "hot", "1500");

    let resp = handle(get("/leads", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Jane Roe"));
    assert!(body.contains("12 Elm St"));
}

#[test]
fn search_and_status_filters_narrow_the_list() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);

    seed_lead(&app, &token, "Jane Roe", "hot", "1500");
    seed_lead(&app, &token, "Bob Smith", "cold", "");

    let body = body_string(handle(get("/leads?q=jane", Some(&token)), &app).unwrap());
    assert!(body.contains("Jane Roe"));
    assert!(!body.contains("Bob Smith"));

    let body = body_string(handle(get("/leads?status=HOT", Some(&token)), &app).unwrap());
    assert!(body.contains("Jane Roe"));
    assert!(!body.contains("Bob Smith"));

    // Advanced condition through the wire format.
    let body = body_string(
        handle(
            get("/leads?cf0=arrears&co0=greater_than&cv0=1000", Some(&token)),
            &app,
        )
        .unwrap(),
    );
    assert!(body.contains("Jane Roe"));
    assert!(!body.contains("Bob Smith"));
}

#[test]
fn edit_changes_status_and_logs_activity() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);
    let id = seed_lead(&app, &token, "Jane Roe", "cold", "");

    let resp = handle(
        post(
            &format!("/leads/{id}/edit"),
            Some(&token),
            &[
                ("owner_name", "Jane Roe"),
                ("property_address", "12 Elm St"),
                ("status", "keep"),
            ],
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let lead = app
        .db
        .with_conn(|conn| db_leads::get_lead(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(lead.status, Status::Keep);

    let activities = app
        .db
        .with_conn(|conn| crate::db::activities::list_recent(conn, 10))
        .unwrap();
    assert!(activities.iter().any(|a| a.title.contains("Updated lead")));
}

#[test]
fn delete_removes_the_lead() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);
    let id = seed_lead(&app, &token, "Jane Roe", "cold", "");

    let resp = handle(post(&format!("/leads/{id}/delete"), Some(&token), &[]), &app).unwrap();
    assert_eq!(resp.status(), 302);

    let lead = app.db.with_conn(|conn| db_leads::get_lead(conn, id)).unwrap();
    assert!(lead.is_none());
}

#[test]
fn call_stub_requires_phone_and_logs_intent() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);
    let id = seed_lead(&app, &token, "Jane Roe", "cold", "");

    // No phone on file: validation error.
    assert!(handle(post(&format!("/leads/{id}/call"), Some(&token), &[]), &app).is_err());

    handle(
        post(
            &format!("/leads/{id}/edit"),
            Some(&token),
            &[
                ("owner_name", "Jane Roe"),
                ("property_address", "12 Elm St"),
                ("phone", "555-0100"),
            ],
        ),
        &app,
    )
    .unwrap();

    let resp = handle(post(&format!("/leads/{id}/call"), Some(&token), &[]), &app).unwrap();
    assert_eq!(resp.status(), 302);

    let activities = app
        .db
        .with_conn(|conn| crate::db::activities::list_recent(conn, 10))
        .unwrap();
    assert!(activities.iter().any(|a| a.title.contains("Called")));
}

#[test]
fn csv_export_matches_the_filtered_view() {
    let app = test_app();
    let (_, token) = signed_in_user(&app, "agent@example.com", Role::Employee);
    seed_lead(&app, &token, "Jane Roe", "hot", "1500");
    seed_lead(&app, &token, "Bob Smith", "cold", "");

    let resp = handle(get("/leads/export.csv?status=hot", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Jane Roe"));
    assert!(!body.contains("Bob Smith"));
    assert!(body.lines().next().unwrap().contains("Owner Name"));
}
