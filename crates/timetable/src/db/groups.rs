use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{finish_delete, non_empty, Group, NewGroup};
use crate::error::{StoreError, StoreResult};

const COLUMNS: &str = "id, name, specialty, course, students_count, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group {
        id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
        course: row.get(3)?,
        students_count: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn list_groups(conn: &Connection) -> StoreResult<Vec<Group>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM student_groups ORDER BY id"))?;
    let groups = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(groups)
}

pub fn get_group(conn: &Connection, id: i64) -> StoreResult<Group> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM student_groups WHERE id = ?1"),
        [id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound { kind: "Group", id })
}

/// Inserts a group. Group names are unique.
pub fn create_group(conn: &Connection, group: &NewGroup) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO student_groups (name, specialty, course, students_count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            group.name,
            non_empty(&group.specialty),
            group.course,
            group.students_count,
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_group(conn: &Connection, id: i64) -> StoreResult<()> {
    finish_delete(
        conn.execute("DELETE FROM student_groups WHERE id = ?1", [id]),
        "Group",
        id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn group(name: &str) -> NewGroup {
        NewGroup {
            name: name.into(),
            specialty: Some("Information Systems".into()),
            course: 1,
            students_count: 25,
        }
    }

    #[test]
    fn test_created_group_is_listed() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn().unwrap();

        let id = create_group(&conn, &group("IS-21")).unwrap();
        let g = get_group(&conn, id).unwrap();
        assert_eq!(g.name, "IS-21");
        assert_eq!(g.specialty.as_deref(), Some("Information Systems"));
        assert_eq!(g.course, 1);
        assert_eq!(g.students_count, 25);
        assert_eq!(list_groups(&conn).unwrap(), vec![g]);
    }

    #[test]
    fn test_duplicate_group_name_rejected() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn().unwrap();

        create_group(&conn, &group("IS-21")).unwrap();
        assert!(matches!(
            create_group(&conn, &group("IS-21")),
            Err(StoreError::Integrity(_))
        ));
    }

    #[test]
    fn test_delete_unknown_group() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.conn().unwrap();
        assert!(matches!(
            delete_group(&conn, 7),
            Err(StoreError::NotFound { kind: "Group", id: 7 })
        ));
    }
}
