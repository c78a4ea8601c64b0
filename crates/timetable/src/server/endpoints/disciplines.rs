use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tracing::info;

use super::{rejected_form, ListQuery};
use crate::db::{disciplines, NewDiscipline};
use crate::error::StoreResult;
use crate::server::forms::DisciplineForm;
use crate::server::pages;
use crate::server::types::{flash_notice, Flash, PageError};
use crate::types::AppState;

/// GET /disciplines
pub async fn get_disciplines(
    State(s): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    info!("GET /disciplines");

    let disciplines = disciplines::list_disciplines(&*s.store.conn()?)?;
    Ok(pages::disciplines_page(
        &disciplines,
        flash_notice(&query.flash).as_ref(),
    ))
}

/// GET /disciplines/add
pub async fn get_add_discipline() -> Html<String> {
    pages::discipline_form_page(&DisciplineForm::default(), None)
}

fn add_discipline(s: &AppState, form: &DisciplineForm) -> StoreResult<i64> {
    let discipline = NewDiscipline::try_from(form)?;
    disciplines::create_discipline(&*s.store.conn()?, &discipline)
}

/// POST /disciplines/add
pub async fn post_add_discipline(
    State(s): State<Arc<AppState>>,
    Form(form): Form<DisciplineForm>,
) -> Response {
    info!("POST /disciplines/add");

    match add_discipline(&s, &form) {
        Ok(id) => {
            info!("Added discipline {}", id);
            Redirect::to(&Flash::DisciplineAdded.redirect_target("/disciplines")).into_response()
        }
        Err(e) if e.is_user_error() => {
            rejected_form(e, |notice| Ok(pages::discipline_form_page(&form, Some(notice))))
        }
        Err(e) => PageError(e).into_response(),
    }
}

/// POST /disciplines/delete/:id
pub async fn post_delete_discipline(
    State(s): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    info!("POST /disciplines/delete/{}", id);

    disciplines::delete_discipline(&*s.store.conn()?, id)?;
    Ok(Redirect::to(
        &Flash::DisciplineDeleted.redirect_target("/disciplines"),
    ))
}
