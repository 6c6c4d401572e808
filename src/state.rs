use crate::config::AppConfig;
use crate::services::suggestions::SuggestionRequester;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub suggestions: SuggestionRequester,
}

impl AppState {
    pub fn new(config: AppConfig, suggestions: SuggestionRequester) -> Self {
        Self {
            config: Arc::new(config),
            suggestions,
        }
    }
}
