// src/db/leads.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::lead::{
    Disposition, Heir, Lead, LeadFile, NewLead, Occupancy, Status, Temperature,
};
use crate::errors::ServerError;

fn lead_from_row(r: &Row) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: r.get(0)?,
        owner_name: r.get(1)?,
        property_address: r.get(2)?,
        tax_id: r.get(3)?,
        lawsuit_no: r.get(4)?,
        arrears: r.get(5)?,
        status: Status::parse(&r.get::<_, String>(6)?).unwrap_or(Status::Cold),
        temperature: Temperature::parse(&r.get::<_, String>(7)?).unwrap_or(Temperature::Cold),
        occupancy: Occupancy::parse(&r.get::<_, String>(8)?).unwrap_or(Occupancy::Unknown),
        disposition: Disposition::parse(&r.get::<_, String>(9)?).unwrap_or(Disposition::Undecided),
        email: r.get(10)?,
        phone: r.get(11)?,
        notes: r.get(12)?,
        created_at: r.get(13)?,
        updated_at: r.get(14)?,
    })
}

const LEAD_COLUMNS: &str = "id, owner_name, property_address, tax_id, lawsuit_no, arrears, \
     status, temperature, occupancy, disposition, email, phone, notes, created_at, updated_at";

pub fn insert_lead(conn: &Connection, lead: &NewLead, now: i64) -> Result<i64, ServerError> {
    lead.validate()?;

    conn.execute(
        r#"
        insert into leads (
          owner_name, property_address, tax_id, lawsuit_no, arrears,
          status, temperature, occupancy, disposition, email, phone, notes,
          created_at, updated_at
        ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            lead.owner_name,
            lead.property_address,
            lead.tax_id,
            lead.lawsuit_no,
            lead.arrears,
            lead.status.as_str(),
            lead.temperature.as_str(),
            lead.occupancy.as_str(),
            lead.disposition.as_str(),
            lead.email,
            lead.phone,
            lead.notes,
            now,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert lead failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Full collection, insertion order. Filtering and sorting happen in
/// memory through the filter engine, not in SQL.
pub fn list_leads(conn: &Connection) -> Result<Vec<Lead>, ServerError> {
    let mut stmt = conn
        .prepare(&format!("select {LEAD_COLUMNS} from leads order by id"))
        .map_err(|e| ServerError::DbError(format!("prepare list leads failed: {e}")))?;

    let rows = stmt
        .query_map([], |r| lead_from_row(r))
        .map_err(|e| ServerError::DbError(format!("list leads failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read lead row failed: {e}")))?);
    }
    Ok(out)
}

pub fn get_lead(conn: &Connection, id: i64) -> Result<Option<Lead>, ServerError> {
    conn.query_row(
        &format!("select {LEAD_COLUMNS} from leads where id = ?"),
        params![id],
        |r| lead_from_row(r),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select lead failed: {e}")))
}

/// Full-row update; any field may change, id and created_at stay.
pub fn update_lead(conn: &Connection, lead: &Lead, now: i64) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            r#"
            update leads set
              owner_name = ?, property_address = ?, tax_id = ?, lawsuit_no = ?,
              arrears = ?, status = ?, temperature = ?, occupancy = ?,
              disposition = ?, email = ?, phone = ?, notes = ?, updated_at = ?
            where id = ?
            "#,
            params![
                lead.owner_name,
                lead.property_address,
                lead.tax_id,
                lead.lawsuit_no,
                lead.arrears,
                lead.status.as_str(),
                lead.temperature.as_str(),
                lead.occupancy.as_str(),
                lead.disposition.as_str(),
                lead.email,
                lead.phone,
                lead.notes,
                now,
                lead.id
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update lead failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

/// Owned collections go with the lead (FK cascade).
pub fn delete_lead(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from leads where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete lead failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

// ---- heirs ----

pub fn add_heir(
    conn: &Connection,
    lead_id: i64,
    name: &str,
    relationship: &str,
    percentage: f64,
    contact: Option<&str>,
) -> Result<i64, ServerError> {
    if name.trim().is_empty() {
        return Err(ServerError::Validation("heir name must not be empty".into()));
    }
    if !(0.0..=100.0).contains(&percentage) {
        return Err(ServerError::Validation(
            "heir percentage must be between 0 and 100".into(),
        ));
    }

    conn.execute(
        "insert into heirs (lead_id, name, relationship, percentage, contact) values (?, ?, ?, ?, ?)",
        params![lead_id, name.trim(), relationship.trim(), percentage, contact],
    )
    .map_err(|e| ServerError::DbError(format!("insert heir failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn list_heirs(conn: &Connection, lead_id: i64) -> Result<Vec<Heir>, ServerError> {
    let mut stmt = conn
        .prepare("select id, lead_id, name, relationship, percentage, contact from heirs where lead_id = ? order by id")
        .map_err(|e| ServerError::DbError(format!("prepare list heirs failed: {e}")))?;

    let rows = stmt
        .query_map(params![lead_id], |r| {
            Ok(Heir {
                id: r.get(0)?,
                lead_id: r.get(1)?,
                name: r.get(2)?,
                relationship: r.get(3)?,
                percentage: r.get(4)?,
                contact: r.get(5)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list heirs failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read heir row failed: {e}")))?);
    }
    Ok(out)
}

pub fn delete_heir(conn: &Connection, lead_id: i64, heir_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "delete from heirs where id = ? and lead_id = ?",
        params![heir_id, lead_id],
    )
    .map_err(|e| ServerError::DbError(format!("delete heir failed: {e}")))?;
    Ok(())
}

// ---- attached files ----

pub fn add_file(
    conn: &Connection,
    lead_id: i64,
    name: &str,
    url: &str,
    file_type: Option<&str>,
    size_bytes: Option<i64>,
    now: i64,
) -> Result<i64, ServerError> {
    if name.trim().is_empty() || url.trim().is_empty() {
        return Err(ServerError::Validation("file name and url are required".into()));
    }

    conn.execute(
        "insert into lead_files (lead_id, name, url, file_type, size_bytes, uploaded_at) values (?, ?, ?, ?, ?, ?)",
        params![lead_id, name.trim(), url.trim(), file_type, size_bytes, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert file failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn list_files(conn: &Connection, lead_id: i64) -> Result<Vec<LeadFile>, ServerError> {
    let mut stmt = conn
        .prepare("select id, lead_id, name, url, file_type, size_bytes, uploaded_at from lead_files where lead_id = ? order by id")
        .map_err(|e| ServerError::DbError(format!("prepare list files failed: {e}")))?;

    let rows = stmt
        .query_map(params![lead_id], |r| {
            Ok(LeadFile {
                id: r.get(0)?,
                lead_id: r.get(1)?,
                name: r.get(2)?,
                url: r.get(3)?,
                file_type: r.get(4)?,
                size_bytes: r.get(5)?,
                uploaded_at: r.get(6)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list files failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read file row failed: {e}")))?);
    }
    Ok(out)
}

pub fn delete_file(conn: &Connection, lead_id: i64, file_id: i64) -> Result<(), ServerError> {
    conn.execute(
        "delete from lead_files where id = ? and lead_id = ?",
        params![file_id, lead_id],
    )
    .map_err(|e| ServerError::DbError(format!("delete file failed: {e}")))?;
    Ok(())
}

// ---- tags ----

/// Set semantics: adding a tag twice is a no-op.
pub fn add_tag(conn: &Connection, lead_id: i64, tag: &str) -> Result<(), ServerError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(ServerError::Validation("tag must not be empty".into()));
    }
    conn.execute(
        "insert or ignore into lead_tags (lead_id, tag) values (?, ?)",
        params![lead_id, tag],
    )
    .map_err(|e| ServerError::DbError(format!("insert tag failed: {e}")))?;
    Ok(())
}

pub fn list_tags(conn: &Connection, lead_id: i64) -> Result<Vec<String>, ServerError> {
    let mut stmt = conn
        .prepare("select tag from lead_tags where lead_id = ? order by tag")
        .map_err(|e| ServerError::DbError(format!("prepare list tags failed: {e}")))?;

    let rows = stmt
        .query_map(params![lead_id], |r| r.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(format!("list tags failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read tag row failed: {e}")))?);
    }
    Ok(out)
}

pub fn remove_tag(conn: &Connection, lead_id: i64, tag: &str) -> Result<(), ServerError> {
    conn.execute(
        "delete from lead_tags where lead_id = ? and tag = ?",
        params![lead_id, tag.trim()],
    )
    .map_err(|e| ServerError::DbError(format!("delete tag failed: {e}")))?;
    Ok(())
}

/// Lead counts grouped by status, for the dashboard and analytics.
pub fn count_by_status(conn: &Connection) -> Result<Vec<(Status, i64)>, ServerError> {
    let mut out = Vec::new();
    for status in Status::all() {
        let n: i64 = conn
            .query_row(
                "select count(*) from leads where status = ?",
                params![status.as_str()],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(format!("count by status failed: {e}")))?;
        out.push((status, n));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn_with_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
        conn
    }

    fn draft(owner: &str, address: &str) -> NewLead {
        NewLead {
            owner_name: owner.into(),
            property_address: address.into(),
            ..NewLead::default()
        }
    }

    #[test]
    fn insert_get_update_delete_round_trip() {
        let conn = conn_with_schema();
        let id = insert_lead(&conn, &draft("Jane Roe", "12 Elm St"), 1000).unwrap();

        let mut lead = get_lead(&conn, id).unwrap().unwrap();
        assert_eq!(lead.owner_name, "Jane Roe");
        assert_eq!(lead.status, Status::Cold);

        lead.status = Status::Hot;
        lead.arrears = Some(900.0);
        update_lead(&conn, &lead, 1001).unwrap();

        let reloaded = get_lead(&conn, id).unwrap().unwrap();
        assert_eq!(reloaded.status, Status::Hot);
        assert_eq!(reloaded.arrears, Some(900.0));
        assert_eq!(reloaded.updated_at, 1001);

        delete_lead(&conn, id).unwrap();
        assert!(get_lead(&conn, id).unwrap().is_none());
        assert!(matches!(delete_lead(&conn, id), Err(ServerError::NotFound)));
    }

    #[test]
    fn insert_refuses_invalid_drafts() {
        let conn = conn_with_schema();
        let err = insert_lead(&conn, &draft("", "12 Elm St"), 1000).unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));
    }

    #[test]
    fn heirs_validate_percentage_and_cascade_on_delete() {
        let conn = conn_with_schema();
        let id = insert_lead(&conn, &draft("Jane Roe", "12 Elm St"), 1000).unwrap();

        add_heir(&conn, id, "Sam Roe", "son", 50.0, Some("555-0101")).unwrap();
        assert!(add_heir(&conn, id, "Bad", "cousin", 150.0, None).is_err());
        assert_eq!(list_heirs(&conn, id).unwrap().len(), 1);

        delete_lead(&conn, id).unwrap();
        assert!(list_heirs(&conn, id).unwrap().is_empty());
    }

    #[test]
    fn tags_are_a_set() {
        let conn = conn_with_schema();
        let id = insert_lead(&conn, &draft("Jane Roe", "12 Elm St"), 1000).unwrap();

        add_tag(&conn, id, "probate").unwrap();
        add_tag(&conn, id, "probate").unwrap();
        add_tag(&conn, id, "vacant").unwrap();
        assert_eq!(list_tags(&conn, id).unwrap(), vec!["probate", "vacant"]);

        remove_tag(&conn, id, "probate").unwrap();
        assert_eq!(list_tags(&conn, id).unwrap(), vec!["vacant"]);
    }

    #[test]
    fn files_store_metadata_only() {
        let conn = conn_with_schema();
        let id = insert_lead(&conn, &draft("Jane Roe", "12 Elm St"), 1000).unwrap();

        add_file(&conn, id, "deed.pdf", "https://files.example/deed.pdf", Some("application/pdf"), Some(1024), 1000).unwrap();
        let files = list_files(&conn, id).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "deed.pdf");

        delete_file(&conn, id, files[0].id).unwrap();
        assert!(list_files(&conn, id).unwrap().is_empty());
    }

    #[test]
    fn count_by_status_covers_every_status() {
        let conn = conn_with_schema();
        insert_lead(&conn, &draft("A", "1 St"), 1000).unwrap();
        let mut hot = draft("B", "2 St");
        hot.status = Status::Hot;
        insert_lead(&conn, &hot, 1000).unwrap();

        let counts = count_by_status(&conn).unwrap();
        assert_eq!(counts.len(), Status::all().len());
        let hot_count = counts.iter().find(|(s, _)| *s == Status::Hot).unwrap().1;
        let cold_count = counts.iter().find(|(s, _)| *s == Status::Cold).unwrap().1;
        assert_eq!(hot_count, 1);
        assert_eq!(cold_count, 1);
    }
}
