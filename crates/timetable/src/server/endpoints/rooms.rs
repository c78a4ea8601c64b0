use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tracing::info;

use super::{rejected_form, ListQuery};
use crate::db::{rooms, NewRoom};
use crate::error::StoreResult;
use crate::server::forms::RoomForm;
use crate::server::pages;
use crate::server::types::{flash_notice, Flash, PageError};
use crate::types::AppState;

/// GET /rooms
pub async fn get_rooms(
    State(s): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    info!("GET /rooms");

    let rooms = rooms::list_rooms(&*s.store.conn()?)?;
    Ok(pages::rooms_page(&rooms, flash_notice(&query.flash).as_ref()))
}

/// GET /rooms/add
pub async fn get_add_room() -> Html<String> {
    pages::room_form_page(&RoomForm::default(), None)
}

fn add_room(s: &AppState, form: &RoomForm) -> StoreResult<i64> {
    let room = NewRoom::try_from(form)?;
    rooms::create_room(&*s.store.conn()?, &room)
}

/// POST /rooms/add
///
/// A room number that is already taken is reported on the re-rendered form.
pub async fn post_add_room(
    State(s): State<Arc<AppState>>,
    Form(form): Form<RoomForm>,
) -> Response {
    info!("POST /rooms/add");

    match add_room(&s, &form) {
        Ok(id) => {
            info!("Added room {}", id);
            Redirect::to(&Flash::RoomAdded.redirect_target("/rooms")).into_response()
        }
        Err(e) if e.is_user_error() => {
            rejected_form(e, |notice| Ok(pages::room_form_page(&form, Some(notice))))
        }
        Err(e) => PageError(e).into_response(),
    }
}

/// POST /rooms/delete/:id
pub async fn post_delete_room(
    State(s): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    info!("POST /rooms/delete/{}", id);

    rooms::delete_room(&*s.store.conn()?, id)?;
    Ok(Redirect::to(&Flash::RoomDeleted.redirect_target("/rooms")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::endpoints::test_util::*;
    use axum::http::StatusCode;

    fn form(number: &str) -> RoomForm {
        RoomForm {
            room_number: Some(number.into()),
            building: Some("Main".into()),
            capacity: Some("30".into()),
            equipment: Some("Projector".into()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_room_number_conflicts() {
        let s = state();

        let response = post_add_room(State(s.clone()), Form(form("101"))).await;
        assert_eq!(location(&response), "/rooms?flash=room_added");

        let response = post_add_room(State(s.clone()), Form(form("101"))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let Html(body) = get_rooms(State(s), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(record_rows(&body), 1);
        assert_eq!(notice_text(&body), None);
    }

    #[tokio::test]
    async fn test_delete_room() {
        let s = state();
        post_add_room(State(s.clone()), Form(form("101"))).await;
        let id = rooms::list_rooms(&*s.store.conn().unwrap()).unwrap()[0].id;

        let redirect = post_delete_room(State(s.clone()), Path(id)).await.unwrap();
        assert_eq!(
            location(&redirect.into_response()),
            "/rooms?flash=room_deleted"
        );

        let Html(body) = get_rooms(State(s), Query(ListQuery::default()))
            .await
            .unwrap();
        assert_eq!(record_rows(&body), 0);
    }
}
