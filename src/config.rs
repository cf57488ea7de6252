use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::entity::BotError;

/// Optional settings file, looked up as `rate_bot.toml` (or any format the
/// `config` crate recognizes) in the working directory.
pub const CONFIG_FILE: &str = "rate_bot";

pub const DEFAULT_RATES_FILE: &str = "exchange_rates.json";
pub const DEFAULT_TOGGLE_CACHE_CAPACITY: u64 = 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub rates_file: String,
    pub toggle_cache_capacity: usize,
}

impl AppConfig {
    /// Layers defaults, the optional settings file and the environment.
    ///
    /// `TELEGRAM_BOT_TOKEN`, `RATES_FILE` and `TOGGLE_CACHE_CAPACITY` map onto
    /// the fields of the same name.
    pub fn load() -> Result<Self, BotError> {
        let builder = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::default().try_parsing(true));

        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, BotError> {
        Ok(Config::builder()
            .set_default("rates_file", DEFAULT_RATES_FILE)?
            .set_default("toggle_cache_capacity", DEFAULT_TOGGLE_CACHE_CAPACITY)?)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, BotError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;

        if config.telegram_bot_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "TELEGRAM_BOT_TOKEN must not be empty".to_string(),
            )
            .into());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_defaults_around_token() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("telegram_bot_token", "123:abc")
            .unwrap();

        let config = AppConfig::from_builder(builder).unwrap();
        assert_eq!(config.telegram_bot_token, "123:abc");
        assert_eq!(config.rates_file, DEFAULT_RATES_FILE);
        assert_eq!(config.toggle_cache_capacity, 1024);
    }

    #[test]
    fn overrides_take_precedence() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("telegram_bot_token", "t")
            .unwrap()
            .set_override("rates_file", "/tmp/rates.json")
            .unwrap()
            .set_override("toggle_cache_capacity", 8)
            .unwrap();

        let config = AppConfig::from_builder(builder).unwrap();
        assert_eq!(config.rates_file, "/tmp/rates.json");
        assert_eq!(config.toggle_cache_capacity, 8);
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let result = AppConfig::from_builder(AppConfig::defaults().unwrap());
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn blank_token_is_rejected() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("telegram_bot_token", "  ")
            .unwrap();

        let err = AppConfig::from_builder(builder).unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
