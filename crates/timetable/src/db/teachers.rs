use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{finish_delete, non_empty, NewTeacher, Teacher};
use crate::error::{StoreError, StoreResult};

const COLUMNS: &str =
    "id, last_name, first_name, middle_name, position, phone, email, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        middle_name: row.get(3)?,
        position: row.get(4)?,
        phone: row.get(5)?,
        email: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn list_teachers(conn: &Connection) -> StoreResult<Vec<Teacher>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM teachers ORDER BY id"))?;
    let teachers = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(teachers)
}

pub fn get_teacher(conn: &Connection, id: i64) -> StoreResult<Teacher> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM teachers WHERE id = ?1"),
        [id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        kind: "Teacher",
        id,
    })
}

pub fn create_teacher(conn: &Connection, teacher: &NewTeacher) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO teachers (last_name, first_name, middle_name, position, phone, email, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            teacher.last_name,
            teacher.first_name,
            non_empty(&teacher.middle_name),
            non_empty(&teacher.position),
            non_empty(&teacher.phone),
            non_empty(&teacher.email),
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_teacher(conn: &Connection, id: i64) -> StoreResult<()> {
    finish_delete(
        conn.execute("DELETE FROM teachers WHERE id = ?1", [id]),
        "Teacher",
        id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::teacher;
    use crate::db::Store;

    #[test]
    fn test_created_teacher_is_listed() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn().unwrap();

        let new = NewTeacher {
            middle_name: Some("Ivanovich".into()),
            position: Some("Associate professor".into()),
            email: Some("ivanov@example.edu".into()),
            ..teacher("Ivanov", "Ivan")
        };
        let id = create_teacher(&conn, &new).unwrap();

        let listed = list_teachers(&conn).unwrap();
        assert_eq!(listed.len(), 1);
        let t = &listed[0];
        assert_eq!(t.id, id);
        assert_eq!(t.last_name, "Ivanov");
        assert_eq!(t.first_name, "Ivan");
        assert_eq!(t.middle_name.as_deref(), Some("Ivanovich"));
        assert_eq!(t.position.as_deref(), Some("Associate professor"));
        assert_eq!(t.phone, None);
        assert_eq!(t.email.as_deref(), Some("ivanov@example.edu"));
        assert_eq!(t.full_name(), "Ivanov Ivan Ivanovich");
        assert_eq!(get_teacher(&conn, id).unwrap(), *t);
    }

    #[test]
    fn test_blank_optional_fields_stored_as_null() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn().unwrap();

        let new = NewTeacher {
            phone: Some("   ".into()),
            ..teacher("Sidorov", "Sidor")
        };
        let id = create_teacher(&conn, &new).unwrap();
        assert_eq!(get_teacher(&conn, id).unwrap().phone, None);
    }

    #[test]
    fn test_delete_teacher() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn().unwrap();

        let id = create_teacher(&conn, &teacher("Sidorov", "Sidor")).unwrap();
        delete_teacher(&conn, id).unwrap();
        assert!(list_teachers(&conn).unwrap().is_empty());

        assert!(matches!(
            delete_teacher(&conn, id),
            Err(StoreError::NotFound { kind: "Teacher", .. })
        ));
    }
}
