use anyhow::Result;
use log::debug;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{profit_presenter, rates_presenter};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::presenter::{ProfitPresenter, RatesPresenter};

/// Routes a plain text message to the step the user is currently at.
pub async fn handle_text_reply(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let Some(user_id) = msg.from.as_ref().map(|user| user.id) else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        debug!("Ignoring non-text message from user {}", user_id);
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match services.conversations().current(user_id).await {
        State::Start => {
            debug!("User {} sent text outside of any dialogue", user_id);
            Ok(())
        }
        State::AwaitingRateInput { currency } => {
            rates_presenter(bot, chat_id, &services)
                .receive_rate_input(user_id, currency, text)
                .await
        }
        State::AwaitingSecondRateInput { currency, first } => {
            rates_presenter(bot, chat_id, &services)
                .receive_second_rate_input(user_id, currency, first, text)
                .await
        }
        State::AwaitingLotPrice { category } => {
            profit_presenter(bot, chat_id, &services)
                .receive_lot_price(user_id, category, text)
                .await
        }
        State::AwaitingActionPrice { pending } => {
            profit_presenter(bot, chat_id, &services)
                .receive_action_price(user_id, pending, text)
                .await
        }
        State::AwaitingNewLotPrice {
            pending,
            action_price,
        } => {
            profit_presenter(bot, chat_id, &services)
                .receive_new_lot_price(user_id, pending, action_price, text)
                .await
        }
    }
}
