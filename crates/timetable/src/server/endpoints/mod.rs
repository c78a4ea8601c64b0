pub mod disciplines;
pub mod groups;
pub mod rooms;
pub mod schedule;
pub mod status;
pub mod teachers;

use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::server::types::{status_for, Notice, PageError};

/// Query parameters shared by the plain list pages.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub flash: Option<String>,
}

/// Re-renders a submitted form with the error shown on top.
///
/// Rendering may itself need the store; if that fails the error page is shown instead.
fn rejected_form(
    err: StoreError,
    render: impl FnOnce(&Notice) -> StoreResult<Html<String>>,
) -> Response {
    warn!("Form submission rejected: {}", err);
    let status = status_for(&err);
    match render(&Notice::error(err.to_string())) {
        Ok(page) => (status, page).into_response(),
        Err(render_err) => PageError(render_err).into_response(),
    }
}
