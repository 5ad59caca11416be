use crate::config::Config;
use crate::media::MediaHost;
use crate::store::ContentStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub media_host: Arc<dyn MediaHost>,
    pub config: Arc<Config>,
}
