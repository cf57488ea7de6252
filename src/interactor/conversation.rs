use log::debug;
use std::collections::HashMap;
use teloxide::types::UserId;
use tokio::sync::RwLock;

use crate::entity::State;

/// Per-user record of the step a text reply is expected for.
///
/// At most one step is active per user. Replies are admitted only while the
/// stored step equals what the handler expects; anything else is stale.
#[derive(Default)]
pub struct ConversationState {
    steps: RwLock<HashMap<UserId, State>>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, user_id: UserId, state: State) {
        debug!("User {} now at step {:?}", user_id, state);
        let mut steps = self.steps.write().await;
        if state.is_idle() {
            steps.remove(&user_id);
        } else {
            steps.insert(user_id, state);
        }
    }

    pub async fn clear(&self, user_id: UserId) {
        if self.steps.write().await.remove(&user_id).is_some() {
            debug!("Cleared pending step of user {}", user_id);
        }
    }

    pub async fn accept(&self, user_id: UserId, expected: &State) -> bool {
        let steps = self.steps.read().await;
        match steps.get(&user_id) {
            Some(current) => current == expected,
            None => expected.is_idle(),
        }
    }

    pub async fn current(&self, user_id: UserId) -> State {
        self.steps
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}
