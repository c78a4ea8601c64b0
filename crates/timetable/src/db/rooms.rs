use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{finish_delete, non_empty, NewRoom, Room};
use crate::error::{StoreError, StoreResult};

const COLUMNS: &str = "id, room_number, building, capacity, equipment, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        room_number: row.get(1)?,
        building: row.get(2)?,
        capacity: row.get(3)?,
        equipment: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn list_rooms(conn: &Connection) -> StoreResult<Vec<Room>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM rooms ORDER BY id"))?;
    let rooms = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rooms)
}

pub fn get_room(conn: &Connection, id: i64) -> StoreResult<Room> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM rooms WHERE id = ?1"),
        [id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound { kind: "Room", id })
}

/// Inserts a room. A duplicate room number fails with [`StoreError::Integrity`].
pub fn create_room(conn: &Connection, room: &NewRoom) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO rooms (room_number, building, capacity, equipment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            room.room_number,
            non_empty(&room.building),
            room.capacity,
            non_empty(&room.equipment),
            Utc::now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_room(conn: &Connection, id: i64) -> StoreResult<()> {
    finish_delete(
        conn.execute("DELETE FROM rooms WHERE id = ?1", [id]),
        "Room",
        id,
    )
}
