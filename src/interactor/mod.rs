pub mod conversation;
pub mod profit_engine;
pub mod rate_store;
pub mod toggle_state;

pub use conversation::ConversationState;
pub use rate_store::{RateRepository, RateStore};
pub use toggle_state::{ToggleKey, ToggleRecord, ToggleStates};
