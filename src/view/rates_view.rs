use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, MessageId, ParseMode},
    Bot,
};

use super::{render, with_error};
use crate::commands::ui;
use crate::entity::{CallbackAction, Currency, ExchangeRates};

#[async_trait]
pub trait RatesView: Send + Sync {
    async fn display_main_menu(&self, rates: &ExchangeRates, edit: Option<MessageId>)
        -> Result<()>;
    async fn display_rate_selection(&self, edit: Option<MessageId>) -> Result<()>;
    async fn display_rate_prompt(
        &self,
        prompt: String,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()>;
    async fn display_rate_updated(&self, currency: Currency, rates: &ExchangeRates) -> Result<()>;
}

pub fn main_menu_text(rates: &ExchangeRates) -> String {
    let mut text = "<b>💳 Current exchange rates:</b>\n".to_string();
    for (currency, rate) in rates.iter() {
        let quote = match currency {
            Currency::Rub => "RUB",
            _ => "MDL",
        };
        text.push_str(&format!(
            "• {} <b>{}:</b> <code>{:.*}</code> {}\n",
            currency.flag(),
            currency.pair_label(),
            currency.display_precision(),
            rate,
            quote
        ));
    }
    text.push_str("\n⚙️ Choose an action:");
    text
}

pub struct TelegramRatesView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramRatesView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl RatesView for TelegramRatesView {
    async fn display_main_menu(
        &self,
        rates: &ExchangeRates,
        edit: Option<MessageId>,
    ) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            main_menu_text(rates),
            ui::main_menu_keyboard(),
            edit,
        )
        .await
    }

    async fn display_rate_selection(&self, edit: Option<MessageId>) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            "⚙️ Choose the rate to update:".to_string(),
            ui::rate_selection_keyboard(),
            edit,
        )
        .await
    }

    async fn display_rate_prompt(
        &self,
        prompt: String,
        error: Option<String>,
        edit: Option<MessageId>,
    ) -> Result<()> {
        render(
            &self.bot,
            self.chat_id,
            with_error(&prompt, error.as_deref()),
            ui::back_keyboard(CallbackAction::BackToUpdateRates),
            edit,
        )
        .await
    }

    async fn display_rate_updated(&self, currency: Currency, rates: &ExchangeRates) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "✅ Rate <b>{} {}</b> updated successfully!",
                    currency.flag(),
                    currency.pair_label()
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;

        self.display_main_menu(rates, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_menu_lists_rates_with_precision() {
        let text = main_menu_text(&ExchangeRates::default());
        assert!(text.contains("<b>MDL - RUB:</b> <code>5.5289</code> RUB"));
        assert!(text.contains("<b>UAH - MDL:</b> <code>0.4380</code> MDL"));
        assert!(text.contains("<b>BRL - MDL:</b> <code>3.5000</code> MDL"));
        assert!(text.contains("<b>USD - MDL:</b> <code>18.65</code> MDL"));
    }
}
