use super::{Category, Currency};

/// Parameters collected before the action price is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTransaction {
    pub category: Category,
    pub currency: Currency,
    /// Price the end buyer pays, in RUB.
    pub lot_price_buyer: f64,
}

impl PendingTransaction {
    pub fn new(category: Category, currency: Currency, lot_price_buyer: f64) -> Self {
        Self {
            category,
            currency,
            lot_price_buyer,
        }
    }
}

/// Outcome of one profit calculation, in both denominations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitBreakdown {
    pub cost_basis_foreign: f64,
    /// Cost basis converted to MDL.
    pub cost_basis_major: f64,
    /// Cost basis converted to RUB.
    pub cost_basis_settle: f64,
    pub lot_after_commission: f64,
    pub commission_rate: Option<f64>,
    pub net_profit_settle: f64,
    pub net_profit_major: f64,
}

impl ProfitBreakdown {
    pub fn is_loss(&self) -> bool {
        self.net_profit_settle < 0.0
    }
}

/// Difference between the current profit and the frozen "off" baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitDelta {
    pub settle: f64,
    pub major: f64,
}

/// Everything a result screen needs to render itself and its buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitReport {
    pub pending: PendingTransaction,
    pub action_price: f64,
    pub breakdown: ProfitBreakdown,
    pub alternate_active: bool,
    /// Present only while the alternate commission is active.
    pub delta: Option<ProfitDelta>,
}
