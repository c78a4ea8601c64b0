use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tracing::info;

use super::{rejected_form, ListQuery};
use crate::db::{teachers, NewTeacher};
use crate::error::StoreResult;
use crate::server::forms::TeacherForm;
use crate::server::pages;
use crate::server::types::{flash_notice, Flash, PageError};
use crate::types::AppState;

/// GET /teachers
pub async fn get_teachers(
    State(s): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    info!("GET /teachers");

    let teachers = teachers::list_teachers(&*s.store.conn()?)?;
    Ok(pages::teachers_page(&teachers, flash_notice(&query.flash).as_ref()))
}

/// GET /teachers/add
pub async fn get_add_teacher() -> Html<String> {
    pages::teacher_form_page(&TeacherForm::default(), None)
}

fn add_teacher(s: &AppState, form: &TeacherForm) -> StoreResult<i64> {
    let teacher = NewTeacher::try_from(form)?;
    teachers::create_teacher(&*s.store.conn()?, &teacher)
}

/// POST /teachers/add
pub async fn post_add_teacher(
    State(s): State<Arc<AppState>>,
    Form(form): Form<TeacherForm>,
) -> Response {
    info!("POST /teachers/add");

    match add_teacher(&s, &form) {
        Ok(id) => {
            info!("Added teacher {}", id);
            Redirect::to(&Flash::TeacherAdded.redirect_target("/teachers")).into_response()
        }
        Err(e) if e.is_user_error() => {
            rejected_form(e, |notice| Ok(pages::teacher_form_page(&form, Some(notice))))
        }
        Err(e) => PageError(e).into_response(),
    }
}

/// POST /teachers/delete/:id
pub async fn post_delete_teacher(
    State(s): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    info!("POST /teachers/delete/{}", id);

    teachers::delete_teacher(&*s.store.conn()?, id)?;
    Ok(Redirect::to(&Flash::TeacherDeleted.redirect_target("/teachers")))
}
