/// Database types for timetable records
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Teacher {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Teacher {
    /// "Last First Middle", without a trailing space when there is no middle name.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.last_name,
            self.first_name,
            self.middle_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacher {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub building: Option<String>,
    pub capacity: i32,
    pub equipment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Room {}", self.room_number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub room_number: String,
    pub building: Option<String>,
    pub capacity: i32,
    pub equipment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discipline {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub hours: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscipline {
    pub name: String,
    pub code: Option<String>,
    pub hours: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
    pub course: i32,
    pub students_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGroup {
    pub name: String,
    pub specialty: Option<String>,
    pub course: i32,
    pub students_count: i32,
}

/// Which calendar weeks a lesson slot applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeekType {
    #[default]
    All,
    Odd,
    Even,
}

impl WeekType {
    pub const ALL: [WeekType; 3] = [WeekType::All, WeekType::Odd, WeekType::Even];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekType::All => "all",
            WeekType::Odd => "odd",
            WeekType::Even => "even",
        }
    }

    /// Returns true if a lesson held on `self` weeks can meet a lesson held on `other` weeks.
    ///
    /// Same rule as the week filter of the overlap query in [`crate::db::conflict`].
    pub fn intersects(self, other: WeekType) -> bool {
        self == WeekType::All || other == WeekType::All || self == other
    }
}

impl fmt::Display for WeekType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(WeekType::All),
            "odd" => Ok(WeekType::Odd),
            "even" => Ok(WeekType::Even),
            other => Err(format!("expected one of all/odd/even, got '{other}'")),
        }
    }
}

impl ToSql for WeekType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for WeekType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: i64,
    pub group_id: i64,
    pub discipline_id: i64,
    pub teacher_id: i64,
    pub room_id: i64,
    pub day_of_week: i32, // 1 = Monday
    pub lesson_number: i32,
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
    pub lesson_type: String,
    pub week_type: WeekType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewScheduleEntry {
    pub group_id: i64,
    pub discipline_id: i64,
    pub teacher_id: i64,
    pub room_id: i64,
    pub day_of_week: i32,
    pub lesson_number: i32,
    pub start_time: String,
    pub end_time: String,
    pub lesson_type: String,
    pub week_type: WeekType,
}

/// A schedule entry joined with the display names of everything it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub entry: ScheduleEntry,
    pub group_name: String,
    pub discipline_name: String,
    pub teacher_name: String,
    pub room_number: String,
}

/// English name of a 1-based weekday number.
pub fn day_name(day_of_week: i32) -> &'static str {
    match day_of_week {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_without_middle_name() {
        let teacher = Teacher {
            id: 1,
            last_name: "Petrov".into(),
            first_name: "Petr".into(),
            middle_name: None,
            position: None,
            phone: None,
            email: None,
            created_at: Utc::now(),
        };
        assert_eq!(teacher.full_name(), "Petrov Petr");

        let teacher = Teacher {
            middle_name: Some("Ivanovich".into()),
            ..teacher
        };
        assert_eq!(teacher.full_name(), "Petrov Petr Ivanovich");
    }

    #[test]
    fn test_week_type_intersection() {
        for w in WeekType::ALL {
            assert!(WeekType::All.intersects(w));
            assert!(w.intersects(WeekType::All));
            assert!(w.intersects(w));
        }
        assert!(!WeekType::Odd.intersects(WeekType::Even));
        assert!(!WeekType::Even.intersects(WeekType::Odd));
    }

    #[test]
    fn test_week_type_parse() {
        assert_eq!("odd".parse::<WeekType>(), Ok(WeekType::Odd));
        assert_eq!(" Even ".parse::<WeekType>(), Ok(WeekType::Even));
        assert!("weekly".parse::<WeekType>().is_err());
    }
}
