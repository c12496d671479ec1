use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::Subject;
use crate::store::StoreError;

/// Shared per-process state. The connection is injected at startup and owned
/// here; handlers borrow it for the duration of one operation.
pub struct AppState {
    db: Mutex<Connection>,
    pub catalog: Vec<Subject>,
}

impl AppState {
    pub fn new(conn: Connection, catalog: Vec<Subject>) -> AppState {
        AppState {
            db: Mutex::new(conn),
            catalog,
        }
    }

    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db
            .lock()
            .map_err(|_| StoreError::Storage("database handle poisoned".to_string()))
    }
}
