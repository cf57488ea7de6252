use std::sync::Arc;

use crate::config::AppConfig;
use crate::interactor::{ConversationState, RateStore, ToggleStates};

/// ServiceContainer owns the state shared by every chat
pub struct ServiceContainer {
    rate_store: Arc<RateStore>,
    conversations: Arc<ConversationState>,
    toggle_states: Arc<ToggleStates>,
}

impl ServiceContainer {
    pub fn new(config: &AppConfig, rate_store: Arc<RateStore>) -> Self {
        let toggle_states = Arc::new(ToggleStates::new(config.toggle_cache_capacity));

        Self {
            rate_store,
            conversations: Arc::new(ConversationState::new()),
            toggle_states,
        }
    }

    // Accessor methods

    pub fn rate_store(&self) -> Arc<RateStore> {
        self.rate_store.clone()
    }

    pub fn conversations(&self) -> Arc<ConversationState> {
        self.conversations.clone()
    }

    pub fn toggle_states(&self) -> Arc<ToggleStates> {
        self.toggle_states.clone()
    }
}
