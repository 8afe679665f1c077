// src/db/campaigns.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::lead::{Campaign, CampaignLead, NewLead};
use crate::errors::ServerError;

pub fn create_campaign(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
    now: i64,
) -> Result<i64, ServerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServerError::Validation("campaign name must not be empty".into()));
    }

    let inserted = conn
        .execute(
            "insert or ignore into campaigns (name, description, created_at) values (?, ?, ?)",
            params![name, description, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert campaign failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::Validation(format!(
            "a campaign named \"{name}\" already exists"
        )));
    }

    Ok(conn.last_insert_rowid())
}

pub fn list_campaigns(conn: &Connection) -> Result<Vec<Campaign>, ServerError> {
    let mut stmt = conn
        .prepare("select id, name, description, created_at from campaigns order by id")
        .map_err(|e| ServerError::DbError(format!("prepare list campaigns failed: {e}")))?;

    let rows = stmt
        .query_map([], |r| {
            Ok(Campaign {
                id: r.get(0)?,
                name: r.get(1)?,
                description: r.get(2)?,
                created_at: r.get(3)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list campaigns failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read campaign row failed: {e}")))?);
    }
    Ok(out)
}

pub fn get_campaign(conn: &Connection, id: i64) -> Result<Option<Campaign>, ServerError> {
    conn.query_row(
        "select id, name, description, created_at from campaigns where id = ?",
        params![id],
        |r| {
            Ok(Campaign {
                id: r.get(0)?,
                name: r.get(1)?,
                description: r.get(2)?,
                created_at: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select campaign failed: {e}")))
}

/// Insert one campaign-scoped lead. The classification fields of the
/// draft are ignored; campaign leads don't carry them.
pub fn insert_campaign_lead(
    conn: &Connection,
    campaign_id: i64,
    draft: &NewLead,
    now: i64,
) -> Result<i64, ServerError> {
    draft.validate()?;

    let inserted = conn
        .execute(
            r#"
            insert into campaign_leads (
              campaign_id, owner_name, property_address, tax_id, lawsuit_no,
              arrears, email, phone, notes, created_at
            )
            select ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
            where exists (select 1 from campaigns where id = ?1)
            "#,
            params![
                campaign_id,
                draft.owner_name,
                draft.property_address,
                draft.tax_id,
                draft.lawsuit_no,
                draft.arrears,
                draft.email,
                draft.phone,
                draft.notes,
                now
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert campaign lead failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(conn.last_insert_rowid())
}

pub fn list_campaign_leads(
    conn: &Connection,
    campaign_id: i64,
) -> Result<Vec<CampaignLead>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, campaign_id, owner_name, property_address, tax_id, lawsuit_no, \
             arrears, email, phone, notes, created_at \
             from campaign_leads where campaign_id = ? order by id",
        )
        .map_err(|e| ServerError::DbError(format!("prepare list campaign leads failed: {e}")))?;

    let rows = stmt
        .query_map(params![campaign_id], |r| {
            Ok(CampaignLead {
                id: r.get(0)?,
                campaign_id: r.get(1)?,
                owner_name: r.get(2)?,
                property_address: r.get(3)?,
                tax_id: r.get(4)?,
                lawsuit_no: r.get(5)?,
                arrears: r.get(6)?,
                email: r.get(7)?,
                phone: r.get(8)?,
                notes: r.get(9)?,
                created_at: r.get(10)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("list campaign leads failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read campaign lead failed: {e}")))?);
    }
    Ok(out)
}

pub fn count_campaign_leads(conn: &Connection, campaign_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from campaign_leads where campaign_id = ?",
        params![campaign_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count campaign leads failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn_with_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
        conn
    }

    fn draft(owner: &str) -> NewLead {
        NewLead {
            owner_name: owner.into(),
            property_address: "12 Elm St".into(),
            ..NewLead::default()
        }
    }

    #[test]
    fn campaign_names_are_unique() {
        let conn = conn_with_schema();
        create_campaign(&conn, "Spring Mailout", None, 1000).unwrap();
        let err = create_campaign(&conn, "Spring Mailout", None, 1001).unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));
    }

    #[test]
    fn campaign_leads_stay_scoped_to_their_campaign() {
        let conn = conn_with_schema();
        let a = create_campaign(&conn, "A", None, 1000).unwrap();
        let b = create_campaign(&conn, "B", None, 1000).unwrap();

        insert_campaign_lead(&conn, a, &draft("Jane"), 1000).unwrap();
        insert_campaign_lead(&conn, a, &draft("Joan"), 1000).unwrap();
        insert_campaign_lead(&conn, b, &draft("Jim"), 1000).unwrap();

        assert_eq!(count_campaign_leads(&conn, a).unwrap(), 2);
        assert_eq!(count_campaign_leads(&conn, b).unwrap(), 1);

        let leads = list_campaign_leads(&conn, a).unwrap();
        assert!(leads.iter().all(|l| l.campaign_id == a));
    }

    #[test]
    fn inserting_into_missing_campaign_is_not_found() {
        let conn = conn_with_schema();
        let err = insert_campaign_lead(&conn, 4242, &draft("Jane"), 1000).unwrap_err();
        assert!(matches!(err, ServerError::NotFound));
    }
}
