use std::sync::Arc;

use edu_db::EduDb;

/// Shared handler state. The database is opened once and injected here.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<EduDb>,
}

impl AppState {
    #[must_use]
    pub fn new(db: EduDb) -> Self {
        Self { db: Arc::new(db) }
    }
}
