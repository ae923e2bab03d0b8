use crate::{config::AppConfig, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub session_username: String,
}

impl AppState {
    pub fn new(store: Store, config: &AppConfig) -> Self {
        Self {
            store,
            session_username: config.session_username.clone(),
        }
    }
}
