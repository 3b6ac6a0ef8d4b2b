use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    /// Canonical served directory. Nothing outside it is ever read or written.
    pub root: Arc<PathBuf>,
    /// Shared secret; `None` leaves every route open.
    pub password: Option<Arc<str>>,
}

impl AppState {
    pub fn new(root: PathBuf, password: Option<String>) -> Self {
        Self {
            root: Arc::new(root),
            password: password.map(Arc::from),
        }
    }
}
