use log::warn;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::entity::{
    CallbackAction, Category, Currency, PendingTransaction, ProfitReport, MAX_CALLBACK_DATA_LEN,
};

pub fn button(label: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    let data = action.encode();
    if data.len() > MAX_CALLBACK_DATA_LEN {
        warn!(
            "Callback payload {} is {} bytes, Telegram accepts at most {}",
            data,
            data.len(),
            MAX_CALLBACK_DATA_LEN
        );
    }
    InlineKeyboardButton::callback(label.into(), data)
}

/// Every menu in the bot is a single column of buttons.
pub fn single_column(buttons: Vec<InlineKeyboardButton>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(buttons.into_iter().map(|button| vec![button]))
}

pub fn back_keyboard(action: CallbackAction) -> InlineKeyboardMarkup {
    single_column(vec![button("🔙 Back", action)])
}

pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    single_column(vec![
        button("💳 Update rates", CallbackAction::UpdateRates),
        button("💰 Calculate profit", CallbackAction::CalculateProfit),
    ])
}

pub fn rate_selection_keyboard() -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = Currency::ALL
        .into_iter()
        .map(|currency| {
            button(
                format!("{} {}", currency.flag(), currency.pair_label()),
                CallbackAction::UpdateRate(currency),
            )
        })
        .collect();
    buttons.push(button("🔙 Back", CallbackAction::BackToMain));
    single_column(buttons)
}

pub fn category_keyboard() -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = Category::ALL
        .into_iter()
        .map(|category| button(category.title(), CallbackAction::SelectCategory(category)))
        .collect();
    buttons.push(button("🔙 Back", CallbackAction::BackToMain));
    single_column(buttons)
}

pub fn currency_keyboard(category: Category, lot_price_buyer: f64) -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = Currency::ACTION
        .into_iter()
        .map(|currency| {
            button(
                format!("{} {}", currency.flag(), currency.plural_name()),
                CallbackAction::SelectCurrency(PendingTransaction::new(
                    category,
                    currency,
                    lot_price_buyer,
                )),
            )
        })
        .collect();
    buttons.push(button("🔙 Back", CallbackAction::BackToGameSelection));
    single_column(buttons)
}

pub fn result_keyboard(report: &ProfitReport) -> InlineKeyboardMarkup {
    let descriptor = report.pending.category.descriptor();
    let mut buttons = Vec::new();

    if let Some(schedule) = descriptor.commission {
        let indicator = if report.alternate_active { "🟢" } else { "🔴" };
        buttons.push(button(
            format!("{} {}", indicator, schedule.toggle_label),
            CallbackAction::Toggle {
                pending: report.pending,
                action_price: report.action_price,
            },
        ));
    }

    buttons.push(button(
        format!("⚙️ Calculate with another {} price", descriptor.lot_noun),
        CallbackAction::Recalculate {
            pending: report.pending,
            action_price: report.action_price,
        },
    ));
    buttons.push(button("🔁 Calculate again", CallbackAction::CalculateAgain));
    buttons.push(button("🔙 Main menu", CallbackAction::BackToMain));

    single_column(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ProfitBreakdown;
    use teloxide::types::InlineKeyboardButtonKind;

    fn payloads(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .map(|row| {
                assert_eq!(row.len(), 1);
                match &row[0].kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    other => panic!("unexpected button kind {:?}", other),
                }
            })
            .collect()
    }

    fn report(category: Category, alternate_active: bool) -> ProfitReport {
        ProfitReport {
            pending: PendingTransaction::new(category, Currency::Uah, 1000.0),
            action_price: 50.0,
            breakdown: ProfitBreakdown {
                cost_basis_foreign: 50.0,
                cost_basis_major: 21.9,
                cost_basis_settle: 121.08291,
                lot_after_commission: 1000.0,
                commission_rate: None,
                net_profit_settle: 878.91709,
                net_profit_major: 158.96,
            },
            alternate_active,
            delta: None,
        }
    }

    #[test]
    fn currency_menu_threads_lot_price() {
        let markup = currency_keyboard(Category::ClashRoyale, 750.0);
        assert_eq!(
            payloads(&markup),
            vec![
                "currency_clash_uah_750",
                "currency_clash_brl_750",
                "currency_clash_usd_750",
                "back_to_game_selection",
            ]
        );
    }

    #[test]
    fn commission_result_has_toggle_first() {
        let markup = result_keyboard(&report(Category::BrawlStars, true));
        let data = payloads(&markup);
        assert_eq!(data[0], "toggle_brawl_uah_1000_50");
        assert_eq!(data[1], "recalculate_brawl_uah_50_1000");
        assert_eq!(markup.inline_keyboard[0][0].text, "🟢 Quests");
    }

    #[test]
    fn simple_resale_result_has_no_toggle() {
        let markup = result_keyboard(&report(Category::Telegram, false));
        assert_eq!(
            payloads(&markup),
            vec![
                "recalculate_telegram_uah_50_1000",
                "calculate_again",
                "back_to_main",
            ]
        );
    }

    #[test]
    fn rate_menu_lists_every_currency() {
        assert_eq!(
            payloads(&rate_selection_keyboard()),
            vec!["update_rub", "update_uah", "update_brl", "update_usd", "back_to_main"]
        );
    }
}
