use anyhow::Result;
use log::warn;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardMarkup, MessageId, ParseMode},
    ApiError, RequestError,
};

pub mod profit_view;
pub mod rates_view;

/// Prepends a validation error line to a prompt.
pub fn with_error(prompt: &str, error: Option<&str>) -> String {
    match error {
        Some(error) => format!("❌ Error: {}\n\n{}", error, prompt),
        None => prompt.to_string(),
    }
}

/// Shows `text` either by editing `edit` in place or as a new message.
pub(crate) async fn render(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    keyboard: InlineKeyboardMarkup,
    edit: Option<MessageId>,
) -> Result<()> {
    if let Some(message_id) = edit {
        match bot
            .edit_message_text(chat_id, message_id, text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard.clone())
            .await
        {
            Ok(_) => return Ok(()),
            Err(RequestError::Api(ApiError::MessageNotModified)) => return Ok(()),
            Err(e) => warn!(
                "Failed to edit message {} in chat {}: {}, sending a new one",
                message_id.0, chat_id.0, e
            ),
        }
    }

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}
