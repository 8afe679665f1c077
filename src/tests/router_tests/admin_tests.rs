// src/tests/router_tests/admin_tests.rs

use crate::auth::guard::Role;
use crate::db::users;
use crate::domain::activity::{ActivityKind, NewActivity};
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post, signed_in_user, test_app};

#[test]
fn admin_users_page_lists_accounts() {
    let app = test_app();
    let (_, admin_token) = signed_in_user(&app, "admin@example.com", Role::Admin);
    signed_in_user(&app, "emp@example.com", Role::Employee);

    let resp = handle(get("/admin/users", Some(&admin_token)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("admin@example.com"));
    assert!(body.contains("emp@example.com"));
}

#[test]
fn admin_can_promote_an_employee() {
    let app = test_app();
    let (_, admin_token) = signed_in_user(&app, "admin@example.com", Role::Admin);
    let (emp_id, _) = signed_in_user(&app, "emp@example.com", Role::Employee);

    let resp = handle(
        post(
            &format!("/admin/users/{emp_id}/role"),
            Some(&admin_token),
            &[("role", "manager")],
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/users");

    let profile = app
        .db
        .with_conn(|conn| users::get_profile(conn, emp_id))
        .unwrap()
        .unwrap();
    assert_eq!(profile.role, Role::Manager);
}

#[test]
fn admin_cannot_change_their_own_role() {
    let app = test_app();
    let (admin_id, admin_token) = signed_in_user(&app, "admin@example.com", Role::Admin);

    let result = handle(
        post(
            &format!("/admin/users/{admin_id}/role"),
            Some(&admin_token),
            &[("role", "employee")],
        ),
        &app,
    );
    assert!(result.is_err());

    let profile = app
        .db
        .with_conn(|conn| users::get_profile(conn, admin_id))
        .unwrap()
        .unwrap();
    assert_eq!(profile.role, Role::Admin);
}

#[test]
fn employee_cannot_change_roles() {
    let app = test_app();
    let (_, emp_token) = signed_in_user(&app, "emp@example.com", Role::Employee);
    let (other_id, _) = signed_in_user(&app, "other@example.com", Role::Employee);

    let resp = handle(
        post(
            &format!("/admin/users/{other_id}/role"),
            Some(&emp_token),
            &[("role", "admin")],
        ),
        &app,
    )
    .unwrap();
    // Guard bounced the request to the employee landing route.
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/leads");

    let profile = app
        .db
        .with_conn(|conn| users::get_profile(conn, other_id))
        .unwrap()
        .unwrap();
    assert_eq!(profile.role, Role::Employee);
}

#[test]
fn admin_can_reset_the_activity_log() {
    let app = test_app();
    let (_, admin_token) = signed_in_user(&app, "admin@example.com", Role::Admin);

    app.db
        .with_conn(|conn| {
            crate::db::activities::insert_activity(
                conn,
                &NewActivity::new(ActivityKind::Other, "seed"),
                1000,
            )?;
            Ok(())
        })
        .unwrap();

    let resp = handle(post("/admin/reset-activity", Some(&admin_token), &[]), &app).unwrap();
    assert_eq!(resp.status(), 302);

    let remaining = app
        .db
        .with_conn(|conn| crate::db::activities::list_recent(conn, 10))
        .unwrap();
    assert!(remaining.is_empty());
}

#[test]
fn analytics_page_renders_for_admin() {
    let app = test_app();
    let (_, admin_token) = signed_in_user(&app, "admin@example.com", Role::Admin);

    let resp = handle(get("/admin/analytics", Some(&admin_token)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Leads by status"));
}
