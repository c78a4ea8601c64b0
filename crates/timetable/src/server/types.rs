use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::error::StoreError;
use crate::server::pages;

/// One-shot success messages, carried to list pages in the `flash` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    ScheduleAdded,
    ScheduleDeleted,
    TeacherAdded,
    TeacherDeleted,
    RoomAdded,
    RoomDeleted,
    DisciplineAdded,
    DisciplineDeleted,
    GroupAdded,
    GroupDeleted,
    DatabaseInitialized,
}

impl Flash {
    const ALL: [Flash; 11] = [
        Flash::ScheduleAdded,
        Flash::ScheduleDeleted,
        Flash::TeacherAdded,
        Flash::TeacherDeleted,
        Flash::RoomAdded,
        Flash::RoomDeleted,
        Flash::DisciplineAdded,
        Flash::DisciplineDeleted,
        Flash::GroupAdded,
        Flash::GroupDeleted,
        Flash::DatabaseInitialized,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Flash::ScheduleAdded => "schedule_added",
            Flash::ScheduleDeleted => "schedule_deleted",
            Flash::TeacherAdded => "teacher_added",
            Flash::TeacherDeleted => "teacher_deleted",
            Flash::RoomAdded => "room_added",
            Flash::RoomDeleted => "room_deleted",
            Flash::DisciplineAdded => "discipline_added",
            Flash::DisciplineDeleted => "discipline_deleted",
            Flash::GroupAdded => "group_added",
            Flash::GroupDeleted => "group_deleted",
            Flash::DatabaseInitialized => "database_initialized",
        }
    }

    /// Unknown keys are ignored rather than rejected.
    pub fn from_key(key: &str) -> Option<Flash> {
        Flash::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::ScheduleAdded => "Lesson added to the schedule!",
            Flash::ScheduleDeleted => "Lesson removed from the schedule!",
            Flash::TeacherAdded => "Teacher added!",
            Flash::TeacherDeleted => "Teacher deleted!",
            Flash::RoomAdded => "Room added!",
            Flash::RoomDeleted => "Room deleted!",
            Flash::DisciplineAdded => "Discipline added!",
            Flash::DisciplineDeleted => "Discipline deleted!",
            Flash::GroupAdded => "Group added!",
            Flash::GroupDeleted => "Group deleted!",
            Flash::DatabaseInitialized => "Database initialized!",
        }
    }

    /// `path` with this flash attached as a query parameter.
    pub fn redirect_target(&self, path: &str) -> String {
        format!("{path}?flash={}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message box shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

impl From<Flash> for Notice {
    fn from(flash: Flash) -> Self {
        Notice::success(flash.message())
    }
}

/// Reads the `flash` query value into a notice, if it names a known message.
pub fn flash_notice(key: &Option<String>) -> Option<Notice> {
    key.as_deref().and_then(Flash::from_key).map(Notice::from)
}

/// HTTP status used when a store error ends a request.
pub fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) | StoreError::Integrity(_) | StoreError::InUse { .. } => {
            StatusCode::CONFLICT
        }
        StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A store error rendered as a standalone HTML error page.
#[derive(Debug)]
pub struct PageError(pub StoreError);

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if self.0.is_user_error() {
            warn!("Request rejected: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }

        (status, pages::error_page(status, &self.0.to_string())).into_response()
    }
}
