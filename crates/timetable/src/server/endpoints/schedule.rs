use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::rejected_form;
use crate::db::{disciplines, groups, rooms, schedule, teachers, NewScheduleEntry};
use crate::error::StoreResult;
use crate::server::forms::{parse_group_filter, ScheduleForm};
use crate::server::pages;
use crate::server::types::{flash_notice, Flash, Notice, PageError};
use crate::types::AppState;

/// Query parameters for the schedule page.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// Only show lessons of this group. Blank shows everything.
    pub group_id: Option<String>,
    pub flash: Option<String>,
}

/// GET /schedule
///
/// The timetable ordered by day and lesson number.
///
/// Query parameters:
/// - `group_id` (optional): restrict the table to one group
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_schedule(
    State(s): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Html<String>, PageError> {
    info!("GET /schedule (group_id={:?})", query.group_id);

    let group_id = parse_group_filter(&query.group_id)?;
    let conn = s.store.conn()?;
    let rows = schedule::list_schedule(&conn, group_id)?;
    let groups = groups::list_groups(&conn)?;

    Ok(pages::schedule_page(
        &rows,
        &groups,
        group_id,
        flash_notice(&query.flash).as_ref(),
    ))
}

/// Renders the add-lesson form with every selectable group, discipline, teacher and room.
fn render_schedule_form(
    s: &AppState,
    values: &ScheduleForm,
    notice: Option<&Notice>,
) -> StoreResult<Html<String>> {
    let conn = s.store.conn()?;
    Ok(pages::schedule_form_page(
        &groups::list_groups(&conn)?,
        &disciplines::list_disciplines(&conn)?,
        &teachers::list_teachers(&conn)?,
        &rooms::list_rooms(&conn)?,
        values,
        notice,
    ))
}

/// GET /schedule/add
pub async fn get_add_schedule(State(s): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    info!("GET /schedule/add");
    Ok(render_schedule_form(&s, &ScheduleForm::default(), None)?)
}

fn add_schedule_entry(s: &AppState, form: &ScheduleForm) -> StoreResult<i64> {
    let entry = NewScheduleEntry::try_from(form)?;
    schedule::create_schedule_entry(&*s.store.conn()?, &entry)
}

/// POST /schedule/add
///
/// Rejects the lesson when its room or teacher is already booked in an
/// overlapping slot; the form comes back with the submitted values and a
/// message naming the busy resource.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_add_schedule(
    State(s): State<Arc<AppState>>,
    Form(form): Form<ScheduleForm>,
) -> Response {
    info!("POST /schedule/add");

    match add_schedule_entry(&s, &form) {
        Ok(_) => Redirect::to(&Flash::ScheduleAdded.redirect_target("/schedule")).into_response(),
        Err(e) if e.is_user_error() => {
            rejected_form(e, |notice| render_schedule_form(&s, &form, Some(notice)))
        }
        Err(e) => PageError(e).into_response(),
    }
}

/// POST /schedule/delete/:id
pub async fn post_delete_schedule(
    State(s): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    info!("POST /schedule/delete/{}", id);

    schedule::delete_schedule_entry(&*s.store.conn()?, id)?;
    Ok(Redirect::to(
        &Flash::ScheduleDeleted.redirect_target("/schedule"),
    ))
}
