use crate::expression::ExpressionError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Telegram API error: {0}")]
    TelegramApi(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ExpressionError),

    #[error("Calculation error: {0}")]
    Domain(String),

    #[error("Failed to persist exchange rates: {0}")]
    Persistence(String),

    #[error("Unknown callback payload: {0}")]
    UnknownCallback(String),
}

impl BotError {
    /// Whether the error comes from operator input and should be answered
    /// with a re-prompt of the same step.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BotError::InvalidAmount(_) | BotError::InvalidExpression(_)
        )
    }
}
