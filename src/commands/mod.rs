use anyhow::Result;
use std::sync::Arc;
use teloxide::{
    prelude::*,
    types::{ChatId, UserId},
    utils::command::BotCommands,
};

use crate::di::ServiceContainer;
use crate::interactor::RateStore;
use crate::presenter::{ProfitPresenterImpl, RatesPresenterImpl};
use crate::view::profit_view::TelegramProfitView;
use crate::view::rates_view::TelegramRatesView;

pub mod callback;
pub mod help;
pub mod rate;
pub mod reply;
pub mod ui;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        user_id: UserId,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Bot Commands enum for teloxide command filter
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show exchange rates and the main menu")]
    Rate,
    #[command(description = "start the bot and show the main menu")]
    Start,
    #[command(description = "display this help message")]
    Help,
}

pub type RatesPresenterFor = RatesPresenterImpl<RateStore, TelegramRatesView>;
pub type ProfitPresenterFor = ProfitPresenterImpl<RateStore, TelegramProfitView>;

/// Builds the rates flow presenter rendering into `chat_id`.
pub fn rates_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> RatesPresenterFor {
    let view = Arc::new(TelegramRatesView::new(bot, chat_id));
    RatesPresenterImpl::new(services.rate_store(), services.conversations(), view)
}

/// Builds the profit flow presenter rendering into `chat_id`.
pub fn profit_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> ProfitPresenterFor {
    let view = Arc::new(TelegramProfitView::new(bot, chat_id));
    ProfitPresenterImpl::new(
        services.rate_store(),
        services.conversations(),
        services.toggle_states(),
        view,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_commands() {
        assert_eq!(Command::parse("/rate", "rate_bot").unwrap(), Command::Rate);
        assert_eq!(Command::parse("/start", "rate_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "rate_bot").unwrap(), Command::Help);
        assert!(Command::parse("/swap", "rate_bot").is_err());
    }

    #[test]
    fn registers_every_command() {
        let commands = Command::bot_commands();
        let names: Vec<_> = commands
            .iter()
            .map(|c| c.command.trim_start_matches('/'))
            .collect();
        assert_eq!(names, vec!["rate", "start", "help"]);
    }
}
