use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::commands::{
    callback::handle_callback, help::HelpCommand, rate::RateCommand,
    reply::handle_text_reply, Command, CommandHandler,
};
use crate::di::ServiceContainer;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

async fn run_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceContainer>,
) -> anyhow::Result<()> {
    let Some(user_id) = msg.from.as_ref().map(|user| user.id) else {
        return Ok(());
    };

    match cmd {
        Command::Rate | Command::Start => {
            debug!("Handling /{} for user {}", RateCommand::command_name(), user_id);
            RateCommand::execute(bot, msg, user_id, services).await
        }
        Command::Help => {
            debug!("Handling /{} for user {}", HelpCommand::command_name(), user_id);
            HelpCommand::execute(bot, msg, user_id, services).await
        }
    }
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use teloxide::dispatching::UpdateFilterExt;

        let services_for_commands = self.services.clone();
        let services_for_replies = self.services.clone();
        let services_for_callbacks = self.services.clone();

        // Use Command enum with teloxide's command filter
        let command_handler = teloxide::filter_command::<Command, _>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let services = services_for_commands.clone();
                async move { run_command(bot, msg, cmd, services).await }
            },
        );

        let message_handler = Update::filter_message()
            .branch(command_handler)
            .branch(dptree::endpoint(move |bot: Bot, msg: Message| {
                let services = services_for_replies.clone();
                async move { handle_text_reply(bot, msg, services).await }
            }));

        // Add callback query handler for our buttons
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, services).await }
            },
        );

        dptree::entry()
            .branch(message_handler)
            .branch(callback_handler)
    }
}

