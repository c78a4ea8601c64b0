use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{finish_delete, non_empty, Discipline, NewDiscipline};
use crate::error::{StoreError, StoreResult};

fn from_row(row: &Row<'_>) -> rusqlite::Result<Discipline> {
    Ok(Discipline {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        hours: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_disciplines(conn: &Connection) -> StoreResult<Vec<Discipline>> {
    let mut stmt =
        conn.prepare("SELECT id, name, code, hours, created_at FROM disciplines ORDER BY id")?;
    let disciplines = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(disciplines)
}

pub fn get_discipline(conn: &Connection, id: i64) -> StoreResult<Discipline> {
    conn.query_row(
        "SELECT id, name, code, hours, created_at FROM disciplines WHERE id = ?1",
        [id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        kind: "Discipline",
        id,
    })
}

pub fn create_discipline(conn: &Connection, discipline: &NewDiscipline) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO disciplines (name, code, hours, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            discipline.name,
            non_empty(&discipline.code),
            discipline.hours,
            Utc::now()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_discipline(conn: &Connection, id: i64) -> StoreResult<()> {
    finish_delete(
        conn.execute("DELETE FROM disciplines WHERE id = ?1", [id]),
        "Discipline",
        id,
    )
}
