//! Inline button payloads.
//!
//! Every button carries an underscore-delimited payload of the form
//! `<verb>_<category>_<currency>_<param1>_<param2>`. Transaction parameters
//! travel only through these payloads between the currency menu, the result
//! screen and its buttons, so encoding and parsing live here and nowhere
//! else.

use std::fmt;

use super::{BotError, Category, Currency, PendingTransaction};

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    UpdateRates,
    UpdateRate(Currency),
    CalculateProfit,
    /// Category menu requested from a result screen; the result stays.
    CalculateAgain,
    BackToMain,
    BackToUpdateRates,
    BackToGameSelection,
    SelectCategory(Category),
    SelectCurrency(PendingTransaction),
    Toggle {
        pending: PendingTransaction,
        action_price: f64,
    },
    Recalculate {
        pending: PendingTransaction,
        action_price: f64,
    },
}

impl CallbackAction {
    pub fn parse(data: &str) -> Result<Self, BotError> {
        match data {
            "update_rates" => return Ok(CallbackAction::UpdateRates),
            "calculate_profit" => return Ok(CallbackAction::CalculateProfit),
            "calculate_again" => return Ok(CallbackAction::CalculateAgain),
            "back_to_main" => return Ok(CallbackAction::BackToMain),
            "back_to_update_rates" => return Ok(CallbackAction::BackToUpdateRates),
            "back_to_game_selection" => return Ok(CallbackAction::BackToGameSelection),
            _ => {}
        }

        let parts: Vec<&str> = data.split('_').collect();
        let unknown = || BotError::UnknownCallback(data.to_string());

        match parts.as_slice() {
            ["update", currency] => Ok(CallbackAction::UpdateRate(currency.parse()?)),
            ["category", category] => Ok(CallbackAction::SelectCategory(category.parse()?)),
            ["currency", category, currency, lot_price_buyer] => {
                Ok(CallbackAction::SelectCurrency(PendingTransaction::new(
                    category.parse()?,
                    parse_action_currency(currency)?,
                    parse_number(lot_price_buyer, data)?,
                )))
            }
            ["toggle", category, currency, lot_price_buyer, action_price] => {
                Ok(CallbackAction::Toggle {
                    pending: PendingTransaction::new(
                        category.parse()?,
                        parse_action_currency(currency)?,
                        parse_number(lot_price_buyer, data)?,
                    ),
                    action_price: parse_number(action_price, data)?,
                })
            }
            // Action price comes before the lot price here: the lot price is
            // the value about to be replaced.
            ["recalculate", category, currency, action_price, lot_price_buyer] => {
                Ok(CallbackAction::Recalculate {
                    pending: PendingTransaction::new(
                        category.parse()?,
                        parse_action_currency(currency)?,
                        parse_number(lot_price_buyer, data)?,
                    ),
                    action_price: parse_number(action_price, data)?,
                })
            }
            _ => Err(unknown()),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            CallbackAction::UpdateRates => "update_rates".to_string(),
            CallbackAction::UpdateRate(currency) => format!("update_{}", currency.slug()),
            CallbackAction::CalculateProfit => "calculate_profit".to_string(),
            CallbackAction::CalculateAgain => "calculate_again".to_string(),
            CallbackAction::BackToMain => "back_to_main".to_string(),
            CallbackAction::BackToUpdateRates => "back_to_update_rates".to_string(),
            CallbackAction::BackToGameSelection => "back_to_game_selection".to_string(),
            CallbackAction::SelectCategory(category) => format!("category_{}", category.slug()),
            CallbackAction::SelectCurrency(pending) => format!(
                "currency_{}_{}_{}",
                pending.category.slug(),
                pending.currency.slug(),
                pending.lot_price_buyer
            ),
            CallbackAction::Toggle {
                pending,
                action_price,
            } => format!(
                "toggle_{}_{}_{}_{}",
                pending.category.slug(),
                pending.currency.slug(),
                pending.lot_price_buyer,
                action_price
            ),
            CallbackAction::Recalculate {
                pending,
                action_price,
            } => format!(
                "recalculate_{}_{}_{}_{}",
                pending.category.slug(),
                pending.currency.slug(),
                action_price,
                pending.lot_price_buyer
            ),
        }
    }

    /// Rejects payloads Telegram would refuse, which happens when a typed
    /// number has too many digits to fit on a button.
    pub fn ensure_fits(&self) -> Result<(), BotError> {
        let data = self.encode();
        if data.len() > MAX_CALLBACK_DATA_LEN {
            return Err(BotError::InvalidAmount(format!(
                "too many digits to keep on a button ({} of {} bytes), use a shorter number",
                data.len(),
                MAX_CALLBACK_DATA_LEN
            )));
        }
        Ok(())
    }

    /// Buttons of a result screen that carry the transaction parameters.
    pub fn result_actions(pending: PendingTransaction, action_price: f64) -> Vec<Self> {
        let mut actions = Vec::new();
        if pending.category.has_commission() {
            actions.push(CallbackAction::Toggle {
                pending,
                action_price,
            });
        }
        actions.push(CallbackAction::Recalculate {
            pending,
            action_price,
        });
        actions
    }

    /// Whether pressing this button starts a fresh top-level action, which
    /// drops whatever text reply the user was expected to send.
    pub fn resets_conversation(&self) -> bool {
        !matches!(self, CallbackAction::Toggle { .. })
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn parse_action_currency(value: &str) -> Result<Currency, BotError> {
    let currency: Currency = value.parse()?;
    if !currency.is_action_currency() {
        return Err(BotError::UnknownCallback(format!(
            "{} is not an action currency",
            currency
        )));
    }
    Ok(currency)
}

fn parse_number(value: &str, data: &str) -> Result<f64, BotError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| BotError::UnknownCallback(data.to_string()))
}
