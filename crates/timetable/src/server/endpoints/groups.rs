use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tracing::info;

use super::{rejected_form, ListQuery};
use crate::db::{groups, NewGroup};
use crate::error::StoreResult;
use crate::server::forms::GroupForm;
use crate::server::pages;
use crate::server::types::{flash_notice, Flash, PageError};
use crate::types::AppState;

/// GET /groups
pub async fn get_groups(
    State(s): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    info!("GET /groups");

    let groups = groups::list_groups(&*s.store.conn()?)?;
    Ok(pages::groups_page(&groups, flash_notice(&query.flash).as_ref()))
}

/// GET /groups/add
pub async fn get_add_group() -> Html<String> {
    pages::group_form_page(&GroupForm::default(), None)
}

fn add_group(s: &AppState, form: &GroupForm) -> StoreResult<i64> {
    let group = NewGroup::try_from(form)?;
    groups::create_group(&*s.store.conn()?, &group)
}

/// POST /groups/add
pub async fn post_add_group(
    State(s): State<Arc<AppState>>,
    Form(form): Form<GroupForm>,
) -> Response {
    info!("POST /groups/add");

    match add_group(&s, &form) {
        Ok(id) => {
            info!("Added group {}", id);
            Redirect::to(&Flash::GroupAdded.redirect_target("/groups")).into_response()
        }
        Err(e) if e.is_user_error() => {
            rejected_form(e, |notice| Ok(pages::group_form_page(&form, Some(notice))))
        }
        Err(e) => PageError(e).into_response(),
    }
}

/// POST /groups/delete/:id
pub async fn post_delete_group(
    State(s): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    info!("POST /groups/delete/{}", id);

    groups::delete_group(&*s.store.conn()?, id)?;
    Ok(Redirect::to(&Flash::GroupDeleted.redirect_target("/groups")))
}
