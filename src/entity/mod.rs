mod bot_error;
mod callback_action;
mod category;
mod currency;
mod exchange_rates;
mod state;
mod transaction;

pub use bot_error::BotError;
pub use callback_action::{CallbackAction, MAX_CALLBACK_DATA_LEN};
pub use category::{Category, CategoryDescriptor, CommissionSchedule, FEE_MULTIPLIER};
pub use currency::{Currency, RateInputKind};
pub use exchange_rates::{is_valid_rate, ExchangeRates};
pub use state::State;
pub use transaction::{PendingTransaction, ProfitBreakdown, ProfitDelta, ProfitReport};
