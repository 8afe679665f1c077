// src/db/users.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::guard::Role;
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
    pub last_login_at: Option<i64>,
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::Validation("invalid email".into()));
    }
    Ok(e)
}

fn role_from_row(raw: &str) -> Role {
    // Rows written before a role existed still resolve; unrecognized
    // values fall to the least-privileged role.
    Role::parse(raw).unwrap_or(Role::Guest)
}

/// Insert a new user. Email should already be normalized by caller.
/// A duplicate email is a validation error, not a DB error.
pub fn create_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    role: Role,
    now: i64,
) -> Result<i64, ServerError> {
    let inserted = conn.execute(
        "insert or ignore into users (email, password_hash, role, created_at) values (?, ?, ?, ?)",
        params![email, password_hash, role.as_str(), now],
    )
    .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::Validation(
            "an account with that email already exists".into(),
        ));
    }

    conn.query_row(
        "select id from users where email = ?",
        params![email],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select user id failed: {e}")))
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<UserProfile>, ServerError> {
    conn.query_row(
        "select id, email, role, created_at, last_login_at from users where email = ?",
        params![email],
        |r| {
            Ok(UserProfile {
                id: r.get(0)?,
                email: r.get(1)?,
                role: role_from_row(&r.get::<_, String>(2)?),
                created_at: r.get(3)?,
                last_login_at: r.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user by email failed: {e}")))
}

/// The role profile behind a session. None when the row has vanished;
/// the guard treats that as a terminal auth failure.
pub fn get_profile(conn: &Connection, user_id: i64) -> Result<Option<UserProfile>, ServerError> {
    conn.query_row(
        "select id, email, role, created_at, last_login_at from users where id = ?",
        params![user_id],
        |r| {
            Ok(UserProfile {
                id: r.get(0)?,
                email: r.get(1)?,
                role: role_from_row(&r.get::<_, String>(2)?),
                created_at: r.get(3)?,
                last_login_at: r.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user profile failed: {e}")))
}

pub fn get_password_hash(conn: &Connection, user_id: i64) -> Result<String, ServerError> {
    conn.query_row(
        "select password_hash from users where id = ?",
        params![user_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select password hash failed: {e}")))
}

pub fn get_password_hash_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<(i64, String)>, ServerError> {
    conn.query_row(
        "select id, password_hash from users where email = ?",
        params![email],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select password hash failed: {e}")))
}

pub fn set_password_hash(
    conn: &Connection,
    user_id: i64,
    password_hash: &str,
) -> Result<(), ServerError> {
    conn.execute(
        "update users set password_hash = ? where id = ?",
        params![password_hash, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update password hash failed: {e}")))?;
    Ok(())
}

pub fn set_role(conn: &Connection, user_id: i64, role: Role) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update users set role = ? where id = ?",
            params![role.as_str(), user_id],
        )
        .map_err(|e| ServerError::DbError(format!("update role failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}

pub fn list_users(conn: &Connection) -> Result<Vec<UserProfile>, ServerError> {
    let mut stmt = conn
        .prepare("select id, email, role, created_at, last_login_at from users order by id")
        .map_err(|e| ServerError::DbError(format!("prepare list users failed: {e}")))?;

    let rows = stmt
        .query_map([], |r| {
            Ok(UserProfile {
                id: r.get(0)?,
                email: r.get(1)?,
                role: role_from_row(&r.get::<_, String>(2)?),
                created_at: r.get(3)?,
                last_login_at: r.get(4)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list users failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read user row failed: {e}")))?);
    }
    Ok(out)
}
