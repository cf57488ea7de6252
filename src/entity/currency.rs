use std::fmt;
use std::str::FromStr;

use super::BotError;

/// Currencies tracked by the rate table.
///
/// `Rub` is the settlement currency and is stored as "RUB per one MDL",
/// every other entry is "MDL per one unit of the currency".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    Rub,
    Uah,
    Brl,
    Usd,
}

/// How the operator supplies a new rate for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateInputKind {
    /// One message with the rate itself.
    Direct,
    /// Two messages; the stored rate is `first / second`.
    Ratio,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Rub, Currency::Uah, Currency::Brl, Currency::Usd];

    /// Currencies a promotion can be priced in.
    pub const ACTION: [Currency; 3] = [Currency::Uah, Currency::Brl, Currency::Usd];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Uah => "UAH",
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
        }
    }

    /// Lowercase form used inside callback payloads.
    pub fn slug(&self) -> &'static str {
        match self {
            Currency::Rub => "rub",
            Currency::Uah => "uah",
            Currency::Brl => "brl",
            Currency::Usd => "usd",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Currency::Rub => "🇷🇺",
            Currency::Uah => "🇺🇦",
            Currency::Brl => "🇧🇷",
            Currency::Usd => "🇺🇸",
        }
    }

    pub fn plural_name(&self) -> &'static str {
        match self {
            Currency::Rub => "Rubles",
            Currency::Uah => "Hryvnias",
            Currency::Brl => "Reais",
            Currency::Usd => "Dollars",
        }
    }

    /// Label of the rate pair as shown in menus, e.g. `MDL - RUB`.
    pub fn pair_label(&self) -> String {
        match self {
            Currency::Rub => "MDL - RUB".to_string(),
            other => format!("{} - MDL", other.code()),
        }
    }

    /// Default factor used when the rates file is absent or broken.
    pub fn default_rate(&self) -> f64 {
        match self {
            Currency::Rub => 5.5289,
            Currency::Uah => 0.4380,
            Currency::Brl => 3.5000,
            Currency::Usd => 18.65,
        }
    }

    pub fn display_precision(&self) -> usize {
        match self {
            Currency::Usd => 2,
            _ => 4,
        }
    }

    pub fn rate_input_kind(&self) -> RateInputKind {
        match self {
            Currency::Usd => RateInputKind::Direct,
            _ => RateInputKind::Ratio,
        }
    }

    /// Prompt for the first (or only) value of a rate update.
    pub fn first_rate_prompt(&self) -> String {
        match self {
            Currency::Rub => "🟢 At what rate were the USDT bought?".to_string(),
            Currency::Usd => "🇺🇸 What is the <b>USD - MDL</b> rate?".to_string(),
            _ => "🇲🇩 What was the amount of the last transaction in MDL?".to_string(),
        }
    }

    /// Prompt for the second value of a two-step rate update.
    pub fn second_rate_prompt(&self) -> String {
        match self {
            Currency::Rub => "🔴 At what rate were the USDT sold?".to_string(),
            other => format!(
                "{} What was the amount of this transaction in {}?",
                other.flag(),
                other.code()
            ),
        }
    }

    pub fn is_action_currency(&self) -> bool {
        Currency::ACTION.contains(self)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rub" => Ok(Currency::Rub),
            "uah" => Ok(Currency::Uah),
            "brl" => Ok(Currency::Brl),
            "usd" => Ok(Currency::Usd),
            _ => Err(BotError::UnknownCallback(format!("unknown currency: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("uah".parse::<Currency>().unwrap(), Currency::Uah);
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("eur".parse::<Currency>().is_err());
    }

    #[test]
    fn only_usd_takes_a_direct_rate() {
        assert_eq!(Currency::Usd.rate_input_kind(), RateInputKind::Direct);
        assert_eq!(Currency::Rub.rate_input_kind(), RateInputKind::Ratio);
        assert_eq!(Currency::Brl.rate_input_kind(), RateInputKind::Ratio);
    }

    #[test]
    fn settlement_currency_is_not_an_action_currency() {
        assert!(!Currency::Rub.is_action_currency());
        assert!(Currency::Uah.is_action_currency());
    }
}
