//! Server-rendered HTML pages.
//!
//! Pages are plain strings; every value that came from the database or from a
//! form goes through [`escape`] before it is written out.

use axum::http::StatusCode;
use axum::response::Html;

use crate::db::{day_name, Discipline, Group, Room, ScheduleRow, Teacher, WeekType};
use crate::server::forms::{DisciplineForm, GroupForm, RoomForm, ScheduleForm, TeacherForm};
use crate::server::types::{Notice, NoticeLevel};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
nav a{margin-right:1em}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:4px 8px}\
.notice{padding:8px;margin:1em 0}.success{background:#dfd}.error{background:#fdd}\
form.inline{display:inline}label{display:block;margin:6px 0}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

fn layout(title: &str, notice: Option<&Notice>, body: &str) -> Html<String> {
    let notice = notice
        .map(|n| {
            let class = match n.level {
                NoticeLevel::Success => "success",
                NoticeLevel::Error => "error",
            };
            format!(r#"<div class="notice {class}">{}</div>"#, escape(&n.text))
        })
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title} | Timetable</title><style>{STYLE}</style></head>
<body>
<nav><a href="/schedule">Schedule</a><a href="/teachers">Teachers</a><a href="/rooms">Rooms</a><a href="/disciplines">Disciplines</a><a href="/groups">Groups</a></nav>
<h1>{title}</h1>
{notice}
{body}
</body>
</html>"#,
        title = escape(title),
    ))
}

fn records_table(headers: &[&str], rows: &[String]) -> String {
    if rows.is_empty() {
        return r#"<p class="empty">Nothing here yet.</p>"#.to_string();
    }

    let head: String = headers.iter().map(|h| format!("<th>{h}</th>")).collect();
    format!(
        r#"<table class="records"><thead><tr>{head}<th></th></tr></thead><tbody>{}</tbody></table>"#,
        rows.concat()
    )
}

fn delete_button(action: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{action}"><button type="submit">Delete</button></form>"#
    )
}

fn text_input(name: &str, label: &str, value: &Option<String>, required: bool) -> String {
    let required = if required { " required" } else { "" };
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{}"{required}></label>"#,
        opt(value)
    )
}

fn number_input(name: &str, label: &str, value: &Option<String>, min: i32) -> String {
    format!(
        r#"<label>{label} <input type="number" name="{name}" min="{min}" value="{}"></label>"#,
        opt(value)
    )
}

fn select(
    name: &str,
    label: &str,
    options: &[(String, String)],
    selected: &Option<String>,
) -> String {
    let selected = selected.as_deref().unwrap_or("");
    let options: String = options
        .iter()
        .map(|(value, text)| {
            let attr = if value == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{attr}>{}</option>"#,
                escape(value),
                escape(text)
            )
        })
        .collect();
    format!(r#"<label>{label} <select name="{name}" required>{options}</select></label>"#)
}

fn form(action: &str, fields: &[String]) -> String {
    format!(
        r#"<form method="post" action="{action}">{}<button type="submit">Save</button></form>"#,
        fields.concat()
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        Some(&Notice::error(message)),
        r#"<p><a href="/schedule">Back to the schedule</a></p>"#,
    )
}

pub fn schedule_page(
    rows: &[ScheduleRow],
    groups: &[Group],
    selected_group: Option<i64>,
    notice: Option<&Notice>,
) -> Html<String> {
    let selected = selected_group.map(|id| id.to_string());
    let mut options = vec![(String::new(), "All groups".to_string())];
    options.extend(groups.iter().map(|g| (g.id.to_string(), g.name.clone())));
    let options: String = options
        .iter()
        .map(|(value, text)| {
            let attr = if Some(value) == selected.as_ref() { " selected" } else { "" };
            format!(r#"<option value="{value}"{attr}>{}</option>"#, escape(text))
        })
        .collect();

    let filter = format!(
        r#"<form method="get" action="/schedule"><select name="group_id">{options}</select><button type="submit">Filter</button></form>
<p><a href="/schedule/add">Add lesson</a></p>"#
    );

    let rows: Vec<String> = rows
        .iter()
        .map(|r| {
            let e = &r.entry;
            format!(
                r#"<tr data-id="{id}"><td>{day}</td><td>{lesson}</td><td>{start}-{end}</td><td>{group}</td><td>{discipline}</td><td>{lesson_type}</td><td>{teacher}</td><td>{room}</td><td>{week}</td><td>{delete}</td></tr>"#,
                id = e.id,
                day = day_name(e.day_of_week),
                lesson = e.lesson_number,
                start = escape(&e.start_time),
                end = escape(&e.end_time),
                group = escape(&r.group_name),
                discipline = escape(&r.discipline_name),
                lesson_type = escape(&e.lesson_type),
                teacher = escape(&r.teacher_name),
                room = escape(&r.room_number),
                week = e.week_type,
                delete = delete_button(&format!("/schedule/delete/{}", e.id)),
            )
        })
        .collect();

    let table = records_table(
        &["Day", "Lesson", "Time", "Group", "Discipline", "Type", "Teacher", "Room", "Weeks"],
        &rows,
    );
    layout("Schedule", notice, &format!("{filter}{table}"))
}

pub fn schedule_form_page(
    groups: &[Group],
    disciplines: &[Discipline],
    teachers: &[Teacher],
    rooms: &[Room],
    values: &ScheduleForm,
    notice: Option<&Notice>,
) -> Html<String> {
    let groups: Vec<_> = groups.iter().map(|g| (g.id.to_string(), g.name.clone())).collect();
    let disciplines: Vec<_> = disciplines
        .iter()
        .map(|d| (d.id.to_string(), d.name.clone()))
        .collect();
    let teachers: Vec<_> = teachers
        .iter()
        .map(|t| (t.id.to_string(), t.full_name()))
        .collect();
    let rooms: Vec<_> = rooms.iter().map(|r| (r.id.to_string(), r.to_string())).collect();
    let days: Vec<_> = (1..=7).map(|d| (d.to_string(), day_name(d).to_string())).collect();
    let weeks: Vec<_> = WeekType::ALL
        .iter()
        .map(|w| (w.as_str().to_string(), w.as_str().to_string()))
        .collect();

    let fields = [
        select("group_id", "Group", &groups, &values.group_id),
        select("discipline_id", "Discipline", &disciplines, &values.discipline_id),
        select("teacher_id", "Teacher", &teachers, &values.teacher_id),
        select("room_id", "Room", &rooms, &values.room_id),
        select("day_of_week", "Day", &days, &values.day_of_week),
        number_input("lesson_number", "Lesson number", &values.lesson_number, 1),
        text_input("start_time", "Start (HH:MM)", &values.start_time, true),
        text_input("end_time", "End (HH:MM)", &values.end_time, true),
        text_input("lesson_type", "Lesson type", &values.lesson_type, true),
        select("week_type", "Weeks", &weeks, &values.week_type),
    ];
    layout("Add lesson", notice, &form("/schedule/add", &fields))
}

pub fn teachers_page(teachers: &[Teacher], notice: Option<&Notice>) -> Html<String> {
    let rows: Vec<String> = teachers
        .iter()
        .map(|t| {
            format!(
                r#"<tr data-id="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                t.id,
                escape(&t.full_name()),
                opt(&t.position),
                opt(&t.phone),
                opt(&t.email),
                delete_button(&format!("/teachers/delete/{}", t.id)),
            )
        })
        .collect();

    let body = format!(
        r#"<p><a href="/teachers/add">Add teacher</a></p>{}"#,
        records_table(&["Name", "Position", "Phone", "Email"], &rows)
    );
    layout("Teachers", notice, &body)
}

pub fn teacher_form_page(values: &TeacherForm, notice: Option<&Notice>) -> Html<String> {
    let fields = [
        text_input("last_name", "Last name", &values.last_name, true),
        text_input("first_name", "First name", &values.first_name, true),
        text_input("middle_name", "Middle name", &values.middle_name, false),
        text_input("position", "Position", &values.position, false),
        text_input("phone", "Phone", &values.phone, false),
        text_input("email", "Email", &values.email, false),
    ];
    layout("Add teacher", notice, &form("/teachers/add", &fields))
}

pub fn rooms_page(rooms: &[Room], notice: Option<&Notice>) -> Html<String> {
    let rows: Vec<String> = rooms
        .iter()
        .map(|r| {
            format!(
                r#"<tr data-id="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                r.id,
                escape(&r.room_number),
                opt(&r.building),
                r.capacity,
                opt(&r.equipment),
                delete_button(&format!("/rooms/delete/{}", r.id)),
            )
        })
        .collect();

    let body = format!(
        r#"<p><a href="/rooms/add">Add room</a></p>{}"#,
        records_table(&["Number", "Building", "Capacity", "Equipment"], &rows)
    );
    layout("Rooms", notice, &body)
}

pub fn room_form_page(values: &RoomForm, notice: Option<&Notice>) -> Html<String> {
    let fields = [
        text_input("room_number", "Room number", &values.room_number, true),
        text_input("building", "Building", &values.building, false),
        number_input("capacity", "Capacity", &values.capacity, 0),
        text_input("equipment", "Equipment", &values.equipment, false),
    ];
    layout("Add room", notice, &form("/rooms/add", &fields))
}

pub fn disciplines_page(disciplines: &[Discipline], notice: Option<&Notice>) -> Html<String> {
    let rows: Vec<String> = disciplines
        .iter()
        .map(|d| {
            format!(
                r#"<tr data-id="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                d.id,
                escape(&d.name),
                opt(&d.code),
                d.hours,
                delete_button(&format!("/disciplines/delete/{}", d.id)),
            )
        })
        .collect();

    let body = format!(
        r#"<p><a href="/disciplines/add">Add discipline</a></p>{}"#,
        records_table(&["Name", "Code", "Hours"], &rows)
    );
    layout("Disciplines", notice, &body)
}

pub fn discipline_form_page(values: &DisciplineForm, notice: Option<&Notice>) -> Html<String> {
    let fields = [
        text_input("name", "Name", &values.name, true),
        text_input("code", "Code", &values.code, false),
        number_input("hours", "Hours", &values.hours, 0),
    ];
    layout("Add discipline", notice, &form("/disciplines/add", &fields))
}

pub fn groups_page(groups: &[Group], notice: Option<&Notice>) -> Html<String> {
    let rows: Vec<String> = groups
        .iter()
        .map(|g| {
            format!(
                r#"<tr data-id="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                g.id,
                escape(&g.name),
                opt(&g.specialty),
                g.course,
                g.students_count,
                delete_button(&format!("/groups/delete/{}", g.id)),
            )
        })
        .collect();

    let body = format!(
        r#"<p><a href="/groups/add">Add group</a></p>{}"#,
        records_table(&["Name", "Specialty", "Course", "Students"], &rows)
    );
    layout("Groups", notice, &body)
}

pub fn group_form_page(values: &GroupForm, notice: Option<&Notice>) -> Html<String> {
    let fields = [
        text_input("name", "Name", &values.name, true),
        text_input("specialty", "Specialty", &values.specialty, false),
        number_input("course", "Course", &values.course, 1),
        number_input("students_count", "Students", &values.students_count, 0),
    ];
    layout("Add group", notice, &form("/groups/add", &fields))
}
