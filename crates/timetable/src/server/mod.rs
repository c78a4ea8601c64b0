use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{disciplines, groups, rooms, schedule, status, teachers};
use crate::types::AppState;

mod endpoints;
pub mod forms;
pub mod pages;
pub mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let schedule_router = Router::new()
        .route("/schedule", get(schedule::get_schedule))
        .route(
            "/schedule/add",
            get(schedule::get_add_schedule).post(schedule::post_add_schedule),
        )
        .route("/schedule/delete/:id", post(schedule::post_delete_schedule));

    // Plain CRUD pages for the records a lesson refers to
    let records_router = Router::new()
        .route("/teachers", get(teachers::get_teachers))
        .route(
            "/teachers/add",
            get(teachers::get_add_teacher).post(teachers::post_add_teacher),
        )
        .route("/teachers/delete/:id", post(teachers::post_delete_teacher))
        .route("/rooms", get(rooms::get_rooms))
        .route(
            "/rooms/add",
            get(rooms::get_add_room).post(rooms::post_add_room),
        )
        .route("/rooms/delete/:id", post(rooms::post_delete_room))
        .route("/disciplines", get(disciplines::get_disciplines))
        .route(
            "/disciplines/add",
            get(disciplines::get_add_discipline).post(disciplines::post_add_discipline),
        )
        .route(
            "/disciplines/delete/:id",
            post(disciplines::post_delete_discipline),
        )
        .route("/groups", get(groups::get_groups))
        .route(
            "/groups/add",
            get(groups::get_add_group).post(groups::post_add_group),
        )
        .route("/groups/delete/:id", post(groups::post_delete_group));

    Router::new()
        .route("/", get(status::get_index))
        .route("/health", get(status::get_health))
        .route("/init-db", get(status::get_init_db))
        .merge(schedule_router)
        .merge(records_router)
        .with_state(app_state)
}
