//! Parse-and-validate step between raw form fields and typed records.
//!
//! Every form arrives as plain text. Nothing is coerced implicitly: blank
//! required fields and non-numeric numbers become [`StoreError::Validation`].

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::db::{NewDiscipline, NewGroup, NewRoom, NewScheduleEntry, NewTeacher, WeekType};
use crate::error::{StoreError, StoreResult};

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required(field: &'static str, value: &Option<String>) -> StoreResult<String> {
    trimmed(value)
        .map(str::to_string)
        .ok_or_else(|| StoreError::validation(field, "is required"))
}

fn optional(value: &Option<String>) -> Option<String> {
    trimmed(value).map(str::to_string)
}

fn parse_number<T: std::str::FromStr>(field: &'static str, text: &str) -> StoreResult<T> {
    text.parse()
        .map_err(|_| StoreError::validation(field, format!("'{text}' is not a whole number")))
}

/// A number that falls back to `default` when left blank.
fn number_or(field: &'static str, value: &Option<String>, default: i32) -> StoreResult<i32> {
    match trimmed(value) {
        Some(text) => parse_number(field, text),
        None => Ok(default),
    }
}

fn required_number<T: std::str::FromStr>(
    field: &'static str,
    value: &Option<String>,
) -> StoreResult<T> {
    let text = trimmed(value).ok_or_else(|| StoreError::validation(field, "is required"))?;
    parse_number(field, text)
}

fn ensure(field: &'static str, ok: bool, message: &str) -> StoreResult<()> {
    if ok {
        Ok(())
    } else {
        Err(StoreError::validation(field, message))
    }
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap())
}

/// A 24-hour "HH:MM" clock time.
fn clock_time(field: &'static str, value: &Option<String>) -> StoreResult<String> {
    let text = required(field, value)?;
    if time_pattern().is_match(&text) {
        Ok(text)
    } else {
        Err(StoreError::validation(
            field,
            format!("'{text}' is not a time in HH:MM format"),
        ))
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TeacherForm {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<&TeacherForm> for NewTeacher {
    type Error = StoreError;

    fn try_from(form: &TeacherForm) -> StoreResult<Self> {
        Ok(NewTeacher {
            last_name: required("last_name", &form.last_name)?,
            first_name: required("first_name", &form.first_name)?,
            middle_name: optional(&form.middle_name),
            position: optional(&form.position),
            phone: optional(&form.phone),
            email: optional(&form.email),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoomForm {
    pub room_number: Option<String>,
    pub building: Option<String>,
    pub capacity: Option<String>,
    pub equipment: Option<String>,
}

impl TryFrom<&RoomForm> for NewRoom {
    type Error = StoreError;

    fn try_from(form: &RoomForm) -> StoreResult<Self> {
        let capacity = number_or("capacity", &form.capacity, 0)?;
        ensure("capacity", capacity >= 0, "must not be negative")?;

        Ok(NewRoom {
            room_number: required("room_number", &form.room_number)?,
            building: optional(&form.building),
            capacity,
            equipment: optional(&form.equipment),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DisciplineForm {
    pub name: Option<String>,
    pub code: Option<String>,
    pub hours: Option<String>,
}

impl TryFrom<&DisciplineForm> for NewDiscipline {
    type Error = StoreError;

    fn try_from(form: &DisciplineForm) -> StoreResult<Self> {
        let hours = number_or("hours", &form.hours, 0)?;
        ensure("hours", hours >= 0, "must not be negative")?;

        Ok(NewDiscipline {
            name: required("name", &form.name)?,
            code: optional(&form.code),
            hours,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct GroupForm {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub course: Option<String>,
    pub students_count: Option<String>,
}

impl TryFrom<&GroupForm> for NewGroup {
    type Error = StoreError;

    fn try_from(form: &GroupForm) -> StoreResult<Self> {
        let course = number_or("course", &form.course, 1)?;
        ensure("course", course >= 1, "must be at least 1")?;
        let students_count = number_or("students_count", &form.students_count, 0)?;
        ensure("students_count", students_count >= 0, "must not be negative")?;

        Ok(NewGroup {
            name: required("name", &form.name)?,
            specialty: optional(&form.specialty),
            course,
            students_count,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ScheduleForm {
    pub group_id: Option<String>,
    pub discipline_id: Option<String>,
    pub teacher_id: Option<String>,
    pub room_id: Option<String>,
    pub day_of_week: Option<String>,
    pub lesson_number: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub lesson_type: Option<String>,
    pub week_type: Option<String>,
}

impl TryFrom<&ScheduleForm> for NewScheduleEntry {
    type Error = StoreError;

    fn try_from(form: &ScheduleForm) -> StoreResult<Self> {
        let day_of_week: i32 = required_number("day_of_week", &form.day_of_week)?;
        ensure(
            "day_of_week",
            (1..=7).contains(&day_of_week),
            "must be between 1 (Monday) and 7 (Sunday)",
        )?;
        let lesson_number: i32 = required_number("lesson_number", &form.lesson_number)?;
        ensure("lesson_number", lesson_number >= 1, "must be at least 1")?;

        let start_time = clock_time("start_time", &form.start_time)?;
        let end_time = clock_time("end_time", &form.end_time)?;
        // Zero-padded HH:MM compares correctly as text.
        ensure(
            "end_time",
            end_time > start_time,
            "must be later than the start time",
        )?;

        let week_type = match trimmed(&form.week_type) {
            Some(text) => text
                .parse::<WeekType>()
                .map_err(|e| StoreError::validation("week_type", e))?,
            None => WeekType::default(),
        };

        Ok(NewScheduleEntry {
            group_id: required_number("group_id", &form.group_id)?,
            discipline_id: required_number("discipline_id", &form.discipline_id)?,
            teacher_id: required_number("teacher_id", &form.teacher_id)?,
            room_id: required_number("room_id", &form.room_id)?,
            day_of_week,
            lesson_number,
            start_time,
            end_time,
            lesson_type: required("lesson_type", &form.lesson_type)?,
            week_type,
        })
    }
}

/// Parses the optional `group_id` filter of the schedule page. Blank means no filter.
pub fn parse_group_filter(value: &Option<String>) -> StoreResult<Option<i64>> {
    trimmed(value)
        .map(|text| parse_number("group_id", text))
        .transpose()
}
