// src/db/activities.rs
use rusqlite::{params, Connection};

use crate::domain::activity::{ActivityItem, ActivityKind, NewActivity};
use crate::errors::ServerError;

pub fn insert_activity(conn: &Connection, activity: &NewActivity, now: i64) -> Result<i64, ServerError> {
    let metadata = activity
        .metadata
        .as_ref()
        .map(|m| m.to_string());

    conn.execute(
        r#"
        insert into activities (kind, title, description, actor_user_id, metadata, created_at)
        values (?, ?, ?, ?, ?, ?)
        "#,
        params![
            activity.kind.as_str(),
            activity.title,
            activity.description,
            activity.actor_user_id,
            metadata,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert activity failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Best-effort variant used on mutation paths: a failed audit write is
/// logged and swallowed so it never blocks the primary action.
pub fn record(conn: &Connection, activity: NewActivity, now: i64) {
    if let Err(e) = insert_activity(conn, &activity, now) {
        log::warn!("activity log write failed ({}): {e}", activity.kind.as_str());
    }
}

/// Latest activities, newest first.
pub fn list_recent(conn: &Connection, limit: i64) -> Result<Vec<ActivityItem>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, kind, title, description, actor_user_id, metadata, created_at \
             from activities order by created_at desc, id desc limit ?",
        )
        .map_err(|e| ServerError::DbError(format!("prepare list activities failed: {e}")))?;

    let rows = stmt
        .query_map(params![limit], |r| {
            let metadata: Option<String> = r.get(5)?;
            Ok(ActivityItem {
                id: r.get(0)?,
                kind: ActivityKind::parse(&r.get::<_, String>(1)?),
                title: r.get(2)?,
                description: r.get(3)?,
                actor_user_id: r.get(4)?,
                metadata: metadata.and_then(|m| serde_json::from_str(&m).ok()),
                created_at: r.get(6)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list activities failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read activity row failed: {e}")))?);
    }
    Ok(out)
}

pub fn count_since(conn: &Connection, since: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from activities where created_at >= ?",
        params![since],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count activities failed: {e}")))
}

/// Admin-only wipe of the audit trail.
pub fn reset_activity_logs(conn: &Connection) -> Result<i64, ServerError> {
    let deleted = conn
        .execute("delete from activities", [])
        .map_err(|e| ServerError::DbError(format!("reset activity logs failed: {e}")))?;
    Ok(deleted as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conn_with_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
        conn
    }

    #[test]
    fn insert_and_list_newest_first() {
        let conn = conn_with_schema();
        insert_activity(&conn, &NewActivity::new(ActivityKind::LeadCreated, "first"), 1000).unwrap();
        insert_activity(&conn, &NewActivity::new(ActivityKind::LeadUpdated, "second"), 2000).unwrap();

        let items = list_recent(&conn, 10).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "second");
        assert_eq!(items[1].title, "first");
    }

    #[test]
    fn metadata_round_trips_as_json() {
        let conn = conn_with_schema();
        let activity = NewActivity::new(ActivityKind::CallPlaced, "call")
            .metadata(json!({"lead_id": 7, "phone": "555-0100"}));
        insert_activity(&conn, &activity, 1000).unwrap();

        let items = list_recent(&conn, 1).unwrap();
        let meta = items[0].metadata.as_ref().unwrap();
        assert_eq!(meta["lead_id"], 7);
    }

    #[test]
    fn reset_clears_everything() {
        let conn = conn_with_schema();
        insert_activity(&conn, &NewActivity::new(ActivityKind::Other, "x"), 1000).unwrap();
        insert_activity(&conn, &NewActivity::new(ActivityKind::Other, "y"), 1000).unwrap();

        assert_eq!(reset_activity_logs(&conn).unwrap(), 2);
        assert!(list_recent(&conn, 10).unwrap().is_empty());
    }

    #[test]
    fn count_since_filters_by_timestamp() {
        let conn = conn_with_schema();
        insert_activity(&conn, &NewActivity::new(ActivityKind::Other, "old"), 1000).unwrap();
        insert_activity(&conn, &NewActivity::new(ActivityKind::Other, "new"), 5000).unwrap();
        assert_eq!(count_since(&conn, 2000).unwrap(), 1);
    }
}
