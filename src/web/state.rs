// src/web/state.rs
// Web server state

use std::sync::Arc;

use crate::audit::Auditor;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Contract auditor; `None` when the server started without an API key
    pub auditor: Option<Arc<Auditor>>,
}

impl AppState {
    pub fn new(auditor: Option<Arc<Auditor>>) -> Self {
        Self { auditor }
    }
}
