// src/auth/reset.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::token::{generate_token_default, hash_token};
use crate::db::users;
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct ResetConfig {
    /// TTL for reset links in seconds.
    pub ttl_secs: i64,
    /// Relative path used when building links.
    pub reset_path: String,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 15 * 60,
            reset_path: "/auth/reset".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedReset {
    pub email: String,
    pub user_id: i64,
    /// Raw token pair (never stored; hashes only in DB).
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    /// Relative URL like "/auth/reset?access_token=…&refresh_token=…"
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct RedeemedReset {
    pub user_id: i64,
    pub email: String,
}

pub struct ResetService {
    cfg: ResetConfig,
}

impl ResetService {
    pub fn new(cfg: ResetConfig) -> Self {
        Self { cfg }
    }

    fn build_link(&self, access: &str, refresh: &str) -> String {
        format!(
            "{}?access_token={}&refresh_token={}",
            self.cfg.reset_path, access, refresh
        )
    }

    /// Issue a reset token pair for an existing account:
    /// - look up the user (unknown emails are a Validation error; the
    ///   router flattens that into a neutral message)
    /// - mint access + refresh tokens, store the hashes
    ///
    /// Mail delivery is the caller's job; `issued.link` is loggable.
    pub fn request(
        &self,
        conn: &Connection,
        email: &str,
        now: i64,
    ) -> Result<IssuedReset, ServerError> {
        let email = users::normalize_email(email)?;
        let Some(profile) = users::find_by_email(conn, &email)? else {
            return Err(ServerError::Validation("no account for that email".into()));
        };

        let access_token = generate_token_default();
        let refresh_token = generate_token_default();
        let expires_at = now + self.cfg.ttl_secs;

        conn.execute(
            r#"
            insert into password_resets (user_id, token_hash, refresh_hash, created_at, expires_at)
            values (?, ?, ?, ?, ?)
            "#,
            params![
                profile.id,
                hash_token(&access_token).as_slice(),
                hash_token(&refresh_token).as_slice(),
                now,
                expires_at
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert password reset failed: {e}")))?;

        Ok(IssuedReset {
            email,
            user_id: profile.id,
            link: self.build_link(&access_token, &refresh_token),
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Redeem a reset token pair (single-use, transactional):
    /// - access token must exist, be unexpired, unused
    /// - refresh token must match the stored companion hash
    pub fn redeem(
        &self,
        conn: &mut Connection,
        access_token: &str,
        refresh_token: &str,
        now: i64,
    ) -> Result<RedeemedReset, ServerError> {
        let access_token = access_token.trim();
        let refresh_token = refresh_token.trim();
        if access_token.is_empty() || refresh_token.is_empty() {
            return Err(ServerError::BadRequest("missing reset token".into()));
        }

        let access_hash = hash_token(access_token);
        let refresh_hash = hash_token(refresh_token);

        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

        let row: Option<(i64, i64, Vec<u8>, i64, Option<i64>)> = tx
            .query_row(
                r#"
                select id, user_id, refresh_hash, expires_at, used_at
                from password_resets
                where token_hash = ?
                "#,
                params![access_hash.as_slice()],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
            )
            .optional()
            .map_err(|e| ServerError::DbError(format!("select password reset failed: {e}")))?;

        let Some((id, user_id, stored_refresh, expires_at, used_at)) = row else {
            tx.rollback().ok();
            return Err(ServerError::Unauthorized("invalid or expired reset link".into()));
        };

        if used_at.is_some()
            || expires_at <= now
            || !crate::auth::token::hashes_equal(&stored_refresh, refresh_hash.as_slice())
        {
            tx.rollback().ok();
            return Err(ServerError::Unauthorized("invalid or expired reset link".into()));
        }

        // Guard used_at IS NULL so only one consumer wins.
        let updated = tx
            .execute(
                "update password_resets set used_at = ? where id = ? and used_at is null",
                params![now, id],
            )
            .map_err(|e| ServerError::DbError(format!("update password reset failed: {e}")))?;

        if updated != 1 {
            tx.rollback().ok();
            return Err(ServerError::Unauthorized("invalid or expired reset link".into()));
        }

        let email: String = tx
            .query_row(
                "select email from users where id = ?",
                params![user_id],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(format!("select user email failed: {e}")))?;

        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

        Ok(RedeemedReset { user_id, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::guard::Role;
    use crate::db::users::create_user;

    fn conn_with_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
        conn
    }

    fn svc() -> ResetService {
        ResetService::new(ResetConfig {
            ttl_secs: 60,
            reset_path: "/auth/reset".to_string(),
        })
    }

    #[test]
    fn request_builds_query_param_link() {
        let conn = conn_with_schema();
        create_user(&conn, "a@b.com", "$argon2id$stub", Role::Employee, 1000).unwrap();

        let issued = svc().request(&conn, "A@B.com", 1000).unwrap();
        assert!(issued.link.starts_with("/auth/reset?access_token="));
        assert!(issued.link.contains("&refresh_token="));
        assert!(issued.link.contains(&issued.access_token));
        assert!(issued.link.contains(&issued.refresh_token));
        assert_eq!(issued.expires_at, 1060);
    }

    #[test]
    fn unknown_email_is_rejected() {
        let conn = conn_with_schema();
        assert!(matches!(
            svc().request(&conn, "ghost@example.com", 1000),
            Err(ServerError::Validation(_))
        ));
    }

    #[test]
    fn redeem_succeeds_once_then_fails() {
        let mut conn = conn_with_schema();
        create_user(&conn, "a@b.com", "$argon2id$stub", Role::Employee, 1000).unwrap();
        let service = svc();

        let issued = service.request(&conn, "a@b.com", 1000).unwrap();

        let redeemed = service
            .redeem(&mut conn, &issued.access_token, &issued.refresh_token, 1001)
            .unwrap();
        assert_eq!(redeemed.user_id, issued.user_id);
        assert_eq!(redeemed.email, "a@b.com");

        let second = service.redeem(&mut conn, &issued.access_token, &issued.refresh_token, 1002);
        assert!(matches!(second, Err(ServerError::Unauthorized(_))));
    }

    #[test]
    fn redeem_rejects_mismatched_refresh_token() {
        let mut conn = conn_with_schema();
        create_user(&conn, "a@b.com", "$argon2id$stub", Role::Employee, 1000).unwrap();
        let service = svc();

        let issued = service.request(&conn, "a@b.com", 1000).unwrap();
        let res = service.redeem(&mut conn, &issued.access_token, "wrong", 1001);
        assert!(matches!(res, Err(ServerError::Unauthorized(_))));
    }

    #[test]
    fn redeem_fails_after_expiry() {
        let mut conn = conn_with_schema();
        create_user(&conn, "x@y.com", "$argon2id$stub", Role::Employee, 1000).unwrap();
        let service = ResetService::new(ResetConfig { ttl_secs: 1, reset_path: "/auth/reset".into() });

        let issued = service.request(&conn, "x@y.com", 1000).unwrap();
        let res = service.redeem(&mut conn, &issued.access_token, &issued.refresh_token, 1002);
        assert!(matches!(res, Err(ServerError::Unauthorized(_))));
    }

    #[test]
    fn redeem_rejects_blank_tokens() {
        let mut conn = conn_with_schema();
        let res = svc().redeem(&mut conn, "  ", "x", 1000);
        assert!(matches!(res, Err(ServerError::BadRequest(_))));
    }
}
