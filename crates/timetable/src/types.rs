use crate::db::Store;

/// State shared by every request handler.
pub struct AppState {
    /// The timetable database.
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}
