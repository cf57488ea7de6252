use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::UserId};

use super::{rates_presenter, CommandHandler};
use crate::di::ServiceContainer;
use crate::presenter::RatesPresenter;

/// `/rate` and `/start`: show the current rates with the main menu.
pub struct RateCommand;

impl CommandHandler for RateCommand {
    fn command_name() -> &'static str {
        "rate"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        user_id: UserId,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Main menu requested by user {}", user_id);

        let presenter = rates_presenter(bot, msg.chat.id, &services);
        presenter.show_main_menu(user_id, None).await
    }
}
