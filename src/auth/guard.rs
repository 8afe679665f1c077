// src/auth/guard.rs
//
// Per-request gate in front of every protected route. Resolves the session
// cookie to a user and role, then checks the route policy plus any
// per-route role constraint. Every failure mode ends in a redirect, never
// a hung request: a session whose user row has vanished is revoked on the
// spot and sent back to the login page.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::auth::sessions;
use crate::db::users;
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    LeadManager,
    Employee,
    Guest,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::LeadManager => "lead_manager",
            Role::Employee => "employee",
            Role::Guest => "guest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::LeadManager => "Lead Manager",
            Role::Employee => "Employee",
            Role::Guest => "Guest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "lead_manager" => Some(Role::LeadManager),
            "employee" => Some(Role::Employee),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }

    pub fn all() -> [Role; 5] {
        [Role::Admin, Role::Manager, Role::LeadManager, Role::Employee, Role::Guest]
    }

    /// Where the role lands after login or after a denied route.
    pub fn default_landing(self) -> &'static str {
        match self {
            Role::Admin | Role::Manager | Role::Guest => "/dashboard",
            Role::LeadManager | Role::Employee => "/leads",
        }
    }

    /// Global route policy: may this role reach the given path at all?
    pub fn may_access(self, path: &str) -> bool {
        if path.starts_with("/admin") {
            return self == Role::Admin;
        }
        if path.starts_with("/campaigns") {
            return matches!(self, Role::Admin | Role::Manager);
        }
        if path.starts_with("/leads") {
            return matches!(self, Role::Admin | Role::Manager | Role::LeadManager | Role::Employee);
        }
        // Dashboard, settings, calendar, notifications, prefs: any
        // authenticated role.
        true
    }
}

/// The resolved identity a satisfied guard hands to the route handler.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

/// Outcome of evaluating the guard for one request.
#[derive(Debug)]
pub enum Guarded {
    Allow(AuthedUser),
    /// Redirect target; either /login or the role's landing route.
    Redirect(&'static str),
}

/// Evaluate the guard: session -> profile -> route policy -> optional
/// per-route role constraint. Both role checks redirect to the same
/// landing route, so evaluation order carries no significance.
pub fn guard(
    conn: &Connection,
    session_token: Option<&str>,
    path: &str,
    allowed_roles: Option<&[Role]>,
    now: i64,
) -> Result<Guarded, ServerError> {
    let Some(token) = session_token else {
        return Ok(Guarded::Redirect("/login"));
    };

    let Some(user_id) = sessions::load_session_user(conn, token, now)? else {
        return Ok(Guarded::Redirect("/login"));
    };

    // Session is live but the role profile is gone: terminal failure,
    // forced logout rather than an unresolvable in-between state.
    let Some(profile) = users::get_profile(conn, user_id)? else {
        log::warn!("session for user {user_id} has no profile row; revoking");
        sessions::revoke_session(conn, token, now)?;
        return Ok(Guarded::Redirect("/login"));
    };

    let user = AuthedUser {
        id: profile.id,
        email: profile.email,
        role: profile.role,
    };

    if !user.role.may_access(path) {
        return Ok(Guarded::Redirect(user.role.default_landing()));
    }

    if let Some(allowed) = allowed_roles {
        if !allowed.contains(&user.role) {
            return Ok(Guarded::Redirect(user.role.default_landing()));
        }
    }

    Ok(Guarded::Allow(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sessions::create_session;
    use crate::db::users::create_user;
    use rusqlite::params;

    fn conn_with_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
        conn
    }

    fn seed(conn: &Connection, email: &str, role: Role) -> (i64, String) {
        let id = create_user(conn, email, "$argon2id$stub", role, 1000).unwrap();
        let token = create_session(conn, id, 1000).unwrap();
        (id, token)
    }

    #[test]
    fn route_policy_matrix() {
        assert!(Role::Admin.may_access("/admin/users"));
        assert!(!Role::Manager.may_access("/admin/users"));
        assert!(!Role::Employee.may_access("/admin/settings"));

        assert!(Role::Manager.may_access("/campaigns"));
        assert!(!Role::Employee.may_access("/campaigns/3"));

        assert!(Role::Employee.may_access("/leads"));
        assert!(!Role::Guest.may_access("/leads/7"));

        for role in Role::all() {
            assert!(role.may_access("/dashboard"));
            assert!(role.may_access("/settings"));
        }
    }

    #[test]
    fn missing_session_redirects_to_login() {
        let conn = conn_with_schema();
        let out = guard(&conn, None, "/leads", None, 1000).unwrap();
        assert!(matches!(out, Guarded::Redirect("/login")));

        let out = guard(&conn, Some("bogus"), "/leads", None, 1000).unwrap();
        assert!(matches!(out, Guarded::Redirect("/login")));
    }

    #[test]
    fn employee_hitting_admin_lands_on_leads() {
        let conn = conn_with_schema();
        let (_, token) = seed(&conn, "emp@example.com", Role::Employee);

        let out = guard(&conn, Some(&token), "/admin/users", None, 1001).unwrap();
        match out {
            Guarded::Redirect(to) => assert_eq!(to, "/leads"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn allowed_roles_constraint_redirects_to_landing() {
        let conn = conn_with_schema();
        let (_, token) = seed(&conn, "mgr@example.com", Role::Manager);

        // Route policy admits managers to /campaigns; the extra constraint
        // does not.
        let out = guard(&conn, Some(&token), "/campaigns", Some(&[Role::Admin]), 1001).unwrap();
        match out {
            Guarded::Redirect(to) => assert_eq!(to, "/dashboard"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn satisfied_guard_allows_with_identity() {
        let conn = conn_with_schema();
        let (id, token) = seed(&conn, "lm@example.com", Role::LeadManager);

        let out = guard(&conn, Some(&token), "/leads", None, 1001).unwrap();
        match out {
            Guarded::Allow(user) => {
                assert_eq!(user.id, id);
                assert_eq!(user.role, Role::LeadManager);
            }
            other => panic!("expected allow, got {other:?}"),
        }
    }

    #[test]
    fn vanished_profile_forces_logout_and_revokes() {
        let conn = conn_with_schema();
        let (id, token) = seed(&conn, "gone@example.com", Role::Employee);

        // Delete the user out from under the live session. FK cascade
        // would clear the session too, so detach it with enforcement off.
        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        conn.execute("update sessions set user_id = 999999 where user_id = ?", params![id])
            .unwrap();

        let out = guard(&conn, Some(&token), "/leads", None, 1001).unwrap();
        assert!(matches!(out, Guarded::Redirect("/login")));

        // The session was revoked, not left dangling.
        let out = guard(&conn, Some(&token), "/dashboard", None, 1002).unwrap();
        assert!(matches!(out, Guarded::Redirect("/login")));
        let revoked: i64 = conn
            .query_row("select count(*) from sessions where revoked_at is not null", [], |r| r.get(0))
            .unwrap();
        assert_eq!(revoked, 1);
    }
}
