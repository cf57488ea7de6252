use anyhow::Result;
use std::sync::Arc;
use teloxide::{prelude::*, types::UserId, utils::command::BotCommands};

use super::{Command, CommandHandler};
use crate::di::ServiceContainer;

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _user_id: UserId,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        bot.send_message(msg.chat.id, Command::descriptions().to_string())
            .await?;

        Ok(())
    }
}
