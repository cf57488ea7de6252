use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use super::{profit_presenter, rates_presenter};
use crate::di::ServiceContainer;
use crate::entity::CallbackAction;
use crate::presenter::{ProfitPresenter, RatesPresenter};

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {}", err);
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let user_id = q.from.id;

    let Some(message) = q.regular_message() else {
        warn!(
            "Callback {} from user {} has no accessible message",
            data, user_id
        );
        return Ok(());
    };
    let chat_id = message.chat.id;
    let message_id = message.id;

    let action = match CallbackAction::parse(data) {
        Ok(action) => action,
        Err(e) => {
            warn!("Ignoring callback from user {}: {}", user_id, e);
            return Ok(());
        }
    };

    info!("Received callback: {} from user {}", action, user_id);

    if action.resets_conversation() {
        services.conversations().clear(user_id).await;
    }

    let rates = rates_presenter(bot.clone(), chat_id, &services);
    let profit = profit_presenter(bot, chat_id, &services);
    let edit = Some(message_id);

    match action {
        CallbackAction::UpdateRates | CallbackAction::BackToUpdateRates => {
            rates.show_rate_selection(user_id, edit).await
        }
        CallbackAction::UpdateRate(currency) => {
            rates.start_rate_update(user_id, currency, edit).await
        }
        CallbackAction::BackToMain => rates.show_main_menu(user_id, edit).await,
        CallbackAction::CalculateProfit | CallbackAction::BackToGameSelection => {
            profit.show_category_menu(user_id, edit).await
        }
        // The result stays on screen, the menu comes as a new message.
        CallbackAction::CalculateAgain => profit.show_category_menu(user_id, None).await,
        CallbackAction::SelectCategory(category) => {
            profit.select_category(user_id, category, edit).await
        }
        CallbackAction::SelectCurrency(pending) => {
            profit.select_currency(user_id, pending, edit).await
        }
        CallbackAction::Toggle {
            pending,
            action_price,
        } => {
            profit
                .toggle_commission((chat_id, message_id), pending, action_price)
                .await
        }
        CallbackAction::Recalculate {
            pending,
            action_price,
        } => {
            profit
                .start_recalculation(user_id, (chat_id, message_id), pending, action_price)
                .await
        }
    }
}
