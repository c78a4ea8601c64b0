//! Double-booking detection for schedule entries.
//!
//! Two entries overlap when they share the day of week and the lesson number
//! and their week types intersect (see [`WeekType::intersects`]). A room or a
//! teacher may hold at most one overlapping entry.

use rusqlite::{named_params, Connection, OptionalExtension};
use tracing::debug;

use super::{NewScheduleEntry, WeekType};
use crate::error::{ConflictKind, StoreError, StoreResult};

/// The parts of a proposed entry that decide whether it collides with the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedSlot {
    pub room_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub lesson_number: i32,
    pub week_type: WeekType,
}

impl From<&NewScheduleEntry> for ProposedSlot {
    fn from(entry: &NewScheduleEntry) -> Self {
        Self {
            room_id: entry.room_id,
            teacher_id: entry.teacher_id,
            day_of_week: entry.day_of_week,
            lesson_number: entry.lesson_number,
            week_type: entry.week_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResult {
    NoConflict,
    RoomConflict,
    TeacherConflict,
}

impl ConflictResult {
    /// `Ok(())` when free, otherwise the matching [`StoreError::Conflict`].
    pub fn into_result(self) -> StoreResult<()> {
        match self {
            ConflictResult::NoConflict => Ok(()),
            ConflictResult::RoomConflict => Err(StoreError::Conflict(ConflictKind::Room)),
            ConflictResult::TeacherConflict => Err(StoreError::Conflict(ConflictKind::Teacher)),
        }
    }
}

// `resource` is spliced in from a fixed column name, never from user input.
fn overlap_query(resource: &str) -> String {
    format!(
        "SELECT id FROM schedule
         WHERE {resource} = :resource
           AND day_of_week = :day
           AND lesson_number = :lesson
           AND (week_type = 'all' OR :week = 'all' OR week_type = :week)
         LIMIT 1"
    )
}

fn find_overlap(
    conn: &Connection,
    resource: &str,
    resource_id: i64,
    slot: &ProposedSlot,
) -> StoreResult<Option<i64>> {
    let existing = conn
        .query_row(
            &overlap_query(resource),
            named_params! {
                ":resource": resource_id,
                ":day": slot.day_of_week,
                ":lesson": slot.lesson_number,
                ":week": slot.week_type,
            },
            |row| row.get(0),
        )
        .optional()?;
    Ok(existing)
}

/// Checks whether `slot` would double-book its room or its teacher.
///
/// The room is checked first; when it is taken the teacher is not looked at.
/// Read-only.
pub fn check_conflict(conn: &Connection, slot: &ProposedSlot) -> StoreResult<ConflictResult> {
    if let Some(id) = find_overlap(conn, "room_id", slot.room_id, slot)? {
        debug!("Room {} already booked by schedule entry {}", slot.room_id, id);
        return Ok(ConflictResult::RoomConflict);
    }

    if let Some(id) = find_overlap(conn, "teacher_id", slot.teacher_id, slot)? {
        debug!(
            "Teacher {} already booked by schedule entry {}",
            slot.teacher_id, id
        );
        return Ok(ConflictResult::TeacherConflict);
    }

    Ok(ConflictResult::NoConflict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schedule::create_schedule_entry;
    use crate::db::test_support::{fixture, room, teacher};
    use crate::db::{rooms, teachers};

    #[test]
    fn test_all_week_blocks_every_week_type() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();
        create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::All)).unwrap();

        for week in WeekType::ALL {
            let slot = ProposedSlot::from(&fx.entry(1, 1, week));
            assert_eq!(
                check_conflict(&conn, &slot).unwrap(),
                ConflictResult::RoomConflict,
                "week type {week}"
            );
        }
    }

    #[test]
    fn test_other_lesson_or_day_is_free() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();
        create_schedule_entry(&conn, &fx.entry(1, 1, WeekType::All)).unwrap();

        let next_lesson = ProposedSlot::from(&fx.entry(1, 2, WeekType::All));
        assert_eq!(
            check_conflict(&conn, &next_lesson).unwrap(),
            ConflictResult::NoConflict
        );

        let next_day = ProposedSlot::from(&fx.entry(2, 1, WeekType::All));
        assert_eq!(
            check_conflict(&conn, &next_day).unwrap(),
            ConflictResult::NoConflict
        );
    }

    #[test]
    fn test_odd_and_even_weeks_partition_a_slot() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();
        create_schedule_entry(&conn, &fx.entry(1, 3, WeekType::Odd)).unwrap();

        let even = ProposedSlot::from(&fx.entry(1, 3, WeekType::Even));
        assert_eq!(check_conflict(&conn, &even).unwrap(), ConflictResult::NoConflict);

        let odd = ProposedSlot::from(&fx.entry(1, 3, WeekType::Odd));
        assert_eq!(check_conflict(&conn, &odd).unwrap(), ConflictResult::RoomConflict);

        // "all" also covers odd weeks, even though the stored row is not "all".
        let all = ProposedSlot::from(&fx.entry(1, 3, WeekType::All));
        assert_eq!(check_conflict(&conn, &all).unwrap(), ConflictResult::RoomConflict);
    }

    #[test]
    fn test_teacher_conflict_in_another_room() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();
        create_schedule_entry(&conn, &fx.entry(3, 2, WeekType::All)).unwrap();

        let other_room = rooms::create_room(&conn, &room("202")).unwrap();
        let slot = ProposedSlot {
            room_id: other_room,
            ..ProposedSlot::from(&fx.entry(3, 2, WeekType::Even))
        };
        assert_eq!(
            check_conflict(&conn, &slot).unwrap(),
            ConflictResult::TeacherConflict
        );

        let other_teacher = teachers::create_teacher(&conn, &teacher("Sidorov", "Sidor")).unwrap();
        let slot = ProposedSlot {
            teacher_id: other_teacher,
            ..slot
        };
        assert_eq!(check_conflict(&conn, &slot).unwrap(), ConflictResult::NoConflict);
    }

    #[test]
    fn test_room_reported_before_teacher() {
        let fx = fixture();
        let conn = fx.store.conn().unwrap();
        create_schedule_entry(&conn, &fx.entry(5, 4, WeekType::All)).unwrap();

        // Same room and same teacher: only the room is reported.
        let slot = ProposedSlot::from(&fx.entry(5, 4, WeekType::All));
        assert_eq!(check_conflict(&conn, &slot).unwrap(), ConflictResult::RoomConflict);
        assert!(matches!(
            ConflictResult::RoomConflict.into_result(),
            Err(StoreError::Conflict(ConflictKind::Room))
        ));
    }
}
