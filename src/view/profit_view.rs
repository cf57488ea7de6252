use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, MessageId},
    Bot,
};

use super::{render, with_error};
use crate::commands::ui;
use crate::entity::{CallbackAction, Category, Currency, PendingTransaction, ProfitReport};
use crate::utils::format_signed;

#[async_trait]
pub trait ProfitView: Send + Sync {
    async fn display_category_menu(&self, edit: Option<MessageId>) -> Result<()>;
    async fn display_lot_price_prompt(
        &self,
        category: Category,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn display_currency_menu(
        &self,
        category: Category,
        lot_price_buyer: f64,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn display_action_price_prompt(
        &self,
        pending: PendingTransaction,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn display_new_lot_price_prompt(
        &self,
        pending: PendingTransaction,
        action_price: f64,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn display_result(&self, report: &ProfitReport, edit: Option<MessageId>) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub fn lot_price_prompt(category: Category) -> String {
    format!(
        "💸 Enter the {} price (for the buyer) in rubles:",
        category.descriptor().lot_noun
    )
}

pub fn action_price_prompt(currency: Currency) -> String {
    format!("⚙️ Enter the action price in {}:", currency.code())
}

pub fn new_lot_price_prompt(category: Category) -> String {
    format!(
        "💸 Enter <b>another</b> {} price in rubles:",
        category.descriptor().lot_noun
    )
}

pub fn result_text(report: &ProfitReport) -> String {
    let pending = &report.pending;
    let breakdown = &report.breakdown;
    let lot_label = match pending.category.descriptor().lot_noun {
        "item" => "Item price",
        _ => "Lot price",
    };

    let mut text = format!(
        "🇷🇺 {}: <code>{:.2}</code> RUB\n\
         {} Action price: <code>{:.2}</code> {}\n\
         🇲🇩 Cost basis: <code>{:.2}</code> MDL\n\n",
        lot_label,
        pending.lot_price_buyer,
        pending.currency.flag(),
        report.action_price,
        pending.currency.code(),
        breakdown.cost_basis_major,
    );

    let headline = if breakdown.is_loss() {
        "❗ Loss:"
    } else {
        "💰 Net profit:"
    };

    text.push_str(&format!(
        "<b>{}</b> <code>{:.2}</code> RUB",
        headline, breakdown.net_profit_settle
    ));
    if let Some(delta) = report.delta {
        text.push_str(&format!(" (<b>{}</b>)", format_signed(delta.settle)));
    }

    text.push_str(&format!(
        "\n └ 🇲🇩: ~<code>{:.2}</code> MDL",
        breakdown.net_profit_major
    ));
    if let Some(delta) = report.delta {
        text.push_str(&format!(" (<b>{}</b>)", format_signed(delta.major)));
    }

    text
}

pub struct TelegramProfitView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramProfitView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ProfitView for TelegramProfitView {
    async fn display_category_menu(&self, edit: Option<MessageId>) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            "🎮 Choose a category:".to_string(),
            ui::category_keyboard(),
            edit,
        )
        .await
    }

    async fn display_lot_price_prompt(
        &self,
        category: Category,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            with_error(&lot_price_prompt(category), error.as_deref()),
            ui::back_keyboard(CallbackAction::BackToGameSelection),
            edit,
        )
        .await
    }

    async fn display_currency_menu(
        &self,
        category: Category,
        lot_price_buyer: f64,
        edit: Option<MessageId>,
    ) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            "⚙️ Choose the action currency:".to_string(),
            ui::currency_keyboard(category, lot_price_buyer),
            edit,
        )
        .await
    }

    async fn display_action_price_prompt(
        &self,
        pending: PendingTransaction,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            with_error(&action_price_prompt(pending.currency), error.as_deref()),
            ui::back_keyboard(CallbackAction::BackToGameSelection),
            edit,
        )
        .await
    }

    async fn display_new_lot_price_prompt(
        &self,
        pending: PendingTransaction,
        _action_price: f64,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            with_error(&new_lot_price_prompt(pending.category), error.as_deref()),
            ui::back_keyboard(CallbackAction::BackToGameSelection),
            edit,
        )
        .await
    }

    async fn display_result(&self, report: &ProfitReport, edit: Option<MessageId>) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            result_text(report),
            ui::result_keyboard(report),
            edit,
        )
        .await
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("❌ Error: {}", error_message))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ExchangeRates, ProfitDelta};
    use crate::interactor::profit_engine;

    fn report(lot_price_buyer: f64, action_price: f64, delta: Option<ProfitDelta>) -> ProfitReport {
        let pending = PendingTransaction::new(Category::BrawlStars, Currency::Uah, lot_price_buyer);
        let breakdown =
            profit_engine::calculate(&ExchangeRates::default(), &pending, action_price, false)
                .unwrap();
        ProfitReport {
            pending,
            action_price,
            breakdown,
            alternate_active: delta.is_some(),
            delta,
        }
    }

    #[test]
    fn renders_profit_in_both_denominations() {
        let text = result_text(&report(1000.0, 50.0, None));
        assert!(text.contains("🇷🇺 Lot price: <code>1000.00</code> RUB"));
        assert!(text.contains("🇺🇦 Action price: <code>50.00</code> UAH"));
        assert!(text.contains("🇲🇩 Cost basis: <code>21.90</code> MDL"));
        assert!(text.contains("<b>💰 Net profit:</b> <code>693.05</code> RUB"));
        assert!(text.contains(" └ 🇲🇩: ~<code>125.35</code> MDL"));
        assert!(!text.contains("(<b>"));
    }

    #[test]
    fn renders_signed_delta_when_alternate_active() {
        let delta = ProfitDelta {
            settle: 63.86,
            major: 11.55,
        };
        let text = result_text(&report(1000.0, 50.0, Some(delta)));
        assert!(text.contains("RUB (<b>+63.86</b>)"));
        assert!(text.contains("MDL (<b>+11.55</b>)"));
    }

    #[test]
    fn renders_loss_headline() {
        let text = result_text(&report(100.0, 500.0, None));
        assert!(text.contains("<b>❗ Loss:</b> <code>-"));
    }

    #[test]
    fn prompts_use_category_nouns() {
        assert!(lot_price_prompt(Category::Telegram).contains("item price"));
        assert!(lot_price_prompt(Category::ClashRoyale).contains("lot price"));
        assert_eq!(action_price_prompt(Currency::Brl), "⚙️ Enter the action price in BRL:");
    }
}
