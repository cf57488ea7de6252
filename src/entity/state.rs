use super::{Currency, PendingTransaction};
use crate::entity::Category;

/// Step a user is currently expected to answer with a text message.
///
/// Each variant carries every parameter collected so far, so the next step
/// can be resumed from the state value alone.
#[derive(Clone, Default, Debug, PartialEq)]
pub enum State {
    #[default]
    Start,
    AwaitingRateInput {
        currency: Currency,
    },
    AwaitingSecondRateInput {
        currency: Currency,
        first: f64,
    },
    AwaitingLotPrice {
        category: Category,
    },
    AwaitingActionPrice {
        pending: PendingTransaction,
    },
    AwaitingNewLotPrice {
        pending: PendingTransaction,
        action_price: f64,
    },
}

impl State {
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Start)
    }
}
