use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tracing::info;

use super::conflict::{check_conflict, ProposedSlot};
use super::{finish_delete, NewScheduleEntry, ScheduleEntry, ScheduleRow};
use crate::error::{StoreError, StoreResult};

const ENTRY_COLUMNS: &str = "s.id, s.group_id, s.discipline_id, s.teacher_id, s.room_id,
    s.day_of_week, s.lesson_number, s.start_time, s.end_time, s.lesson_type, s.week_type,
    s.created_at, s.updated_at";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<ScheduleEntry> {
    Ok(ScheduleEntry {
        id: row.get(0)?,
        group_id: row.get(1)?,
        discipline_id: row.get(2)?,
        teacher_id: row.get(3)?,
        room_id: row.get(4)?,
        day_of_week: row.get(5)?,
        lesson_number: row.get(6)?,
        start_time: row.get(7)?,
        end_time: row.get(8)?,
        lesson_type: row.get(9)?,
        week_type: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

/// Lists the timetable ordered by day and lesson, optionally for one group only.
pub fn list_schedule(conn: &Connection, group_id: Option<i64>) -> StoreResult<Vec<ScheduleRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS},
                g.name,
                d.name,
                TRIM(t.last_name || ' ' || t.first_name || ' ' || COALESCE(t.middle_name, '')),
                r.room_number
         FROM schedule s
         JOIN student_groups g ON s.group_id = g.id
         JOIN disciplines d ON s.discipline_id = d.id
         JOIN teachers t ON s.teacher_id = t.id
         JOIN rooms r ON s.room_id = r.id
         WHERE ?1 IS NULL OR s.group_id = ?1
         ORDER BY s.day_of_week, s.lesson_number, s.id"
    ))?;

    let rows = stmt
        .query_map([group_id], |row| {
            Ok(ScheduleRow {
                entry: entry_from_row(row)?,
                group_name: row.get(13)?,
                discipline_name: row.get(14)?,
                teacher_name: row.get(15)?,
                room_number: row.get(16)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn get_schedule_entry(conn: &Connection, id: i64) -> StoreResult<ScheduleEntry> {
    conn.query_row(
        &format!("SELECT {ENTRY_COLUMNS} FROM schedule s WHERE s.id = ?1"),
        [id],
        entry_from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        kind: "Schedule entry",
        id,
    })
}

/// Adds an entry to the timetable.
///
/// The conflict check and the insert share one immediate transaction, so a
/// concurrent writer cannot slip a booking in between them. Fails with
/// [`StoreError::Conflict`] when the room or teacher is taken and with
/// [`StoreError::Integrity`] when a referenced record does not exist.
pub fn create_schedule_entry(conn: &Connection, entry: &NewScheduleEntry) -> StoreResult<i64> {
    let tx = rusqlite::Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    check_conflict(&tx, &ProposedSlot::from(entry))?.into_result()?;

    let now = Utc::now();
    tx.execute(
        "INSERT INTO schedule (
            group_id, discipline_id, teacher_id, room_id, day_of_week, lesson_number,
            start_time, end_time, lesson_type, week_type, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            entry.group_id,
            entry.discipline_id,
            entry.teacher_id,
            entry.room_id,
            entry.day_of_week,
            entry.lesson_number,
            entry.start_time,
            entry.end_time,
            entry.lesson_type,
            entry.week_type,
            now,
            now,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    info!(
        "Scheduled entry {} (room {}, teacher {}, day {}, lesson {}, {} weeks)",
        id, entry.room_id, entry.teacher_id, entry.day_of_week, entry.lesson_number, entry.week_type
    );
    Ok(id)
}

pub fn delete_schedule_entry(conn: &Connection, id: i64) -> StoreResult<()> {
    finish_delete(
        conn.execute("DELETE FROM schedule WHERE id = ?1", [id]),
        "Schedule entry",
        id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{fixture, room};
    use crate::db::{disciplines, groups, rooms, teachers, WeekType};
    use crate::error::ConflictKind;

    #[test]
    fn test_create_and_list_with_names() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();

        let id = create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::All)).unwrap();
        let rows = list_schedule(&conn, None).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.entry.id, id);
        assert_eq!(row.entry.start_time, "08:30");
        assert_eq!(row.entry.week_type, WeekType::All);
        assert_eq!(row.entry.created_at, row.entry.updated_at);
        assert_eq!(row.group_name, "IS-21");
        assert_eq!(row.discipline_name, "Math");
        assert_eq!(row.teacher_name, "Petrov Petr");
        assert_eq!(row.room_number, "101");
        assert_eq!(get_schedule_entry(&conn, id).unwrap(), row.entry);
    }

    #[test]
    fn test_list_ordered_and_filtered_by_group() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();

        create_schedule_entry(&conn, &fx.entry(2, 1, WeekType::All)).unwrap();
        create_schedule_entry(&conn, &fx.entry(1, 2, WeekType::All)).unwrap();
        create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::All)).unwrap();

        let other_group = groups::create_group(
            &conn,
            &crate::db::NewGroup {
                name: "IS-22".into(),
                specialty: None,
                course: 2,
                students_count: 20,
            },
        )
        .unwrap();
        let mut entry = fx.entry(4, 1, WeekType::All);
        entry.group_id = other_group;
        create_schedule_entry(&conn, &entry).unwrap();

        let all: Vec<_> = list_schedule(&conn, None)
            .unwrap()
            .into_iter()
            .map(|r| (r.entry.day_of_week, r.entry.lesson_number))
            .collect();
        assert_eq!(all, vec![(1, 1), (1, 2), (2, 1), (4, 1)]);

        let filtered = list_schedule(&conn, Some(other_group)).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].group_name, "IS-22");

        assert_eq!(list_schedule(&conn, Some(fx.group_id)).unwrap().len(), 3);
    }

    #[test]
    fn test_conflicting_entry_not_inserted() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();

        create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::All)).unwrap();
        let err = create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::Odd)).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ConflictKind::Room)));

        let mut busy_teacher = fx.entry(1, 1, WeekType::All);
        busy_teacher.room_id = rooms::create_room(&conn, &room("102")).unwrap();
        let err = create_schedule_entry(&conn, &busy_teacher).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ConflictKind::Teacher)));

        assert_eq!(list_schedule(&conn, None).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_reference_is_integrity_error() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();

        let mut entry = fx.entry(1, 1, WeekType::All);
        entry.discipline_id = 999;
        assert!(matches!(
            create_schedule_entry(&conn, &entry),
            Err(StoreError::Integrity(_))
        ));
        assert!(list_schedule(&conn, None).unwrap().is_empty());
    }

    #[test]
    fn test_referenced_records_cannot_be_deleted() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();

        let id = create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::All)).unwrap();
        assert!(matches!(
            teachers::delete_teacher(&conn, fx.teacher_id),
            Err(StoreError::InUse { kind: "Teacher", .. })
        ));
        assert!(matches!(
            rooms::delete_room(&conn, fx.room_id),
            Err(StoreError::InUse { kind: "Room", .. })
        ));
        assert!(matches!(
            groups::delete_group(&conn, fx.group_id),
            Err(StoreError::InUse { kind: "Group", .. })
        ));
        assert!(matches!(
            disciplines::delete_discipline(&conn, fx.discipline_id),
            Err(StoreError::InUse { kind: "Discipline", .. })
        ));

        delete_schedule_entry(&conn, id).unwrap();
        teachers::delete_teacher(&conn, fx.teacher_id).unwrap();
        assert!(teachers::list_teachers(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_entry() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();

        assert!(matches!(
            delete_schedule_entry(&conn, 12345),
            Err(StoreError::NotFound { id: 12345, .. })
        ));
    }
}
