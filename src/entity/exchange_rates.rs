use std::collections::BTreeMap;

use super::Currency;

/// Currency → conversion factor table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRates {
    rates: BTreeMap<Currency, f64>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            rates: Currency::ALL
                .into_iter()
                .map(|currency| (currency, currency.default_rate()))
                .collect(),
        }
    }
}

impl ExchangeRates {
    pub fn get(&self, currency: Currency) -> f64 {
        self.rates
            .get(&currency)
            .copied()
            .unwrap_or_else(|| currency.default_rate())
    }

    pub(crate) fn set(&mut self, currency: Currency, rate: f64) {
        self.rates.insert(currency, rate);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.rates.iter().map(|(currency, rate)| (*currency, *rate))
    }

    /// Builds a table from explicit entries; unlisted currencies keep
    /// their defaults.
    pub fn with_rates(entries: &[(Currency, f64)]) -> Self {
        let mut rates = Self::default();
        for (currency, rate) in entries {
            rates.set(*currency, *rate);
        }
        rates
    }

    /// Serializable form keyed by currency code.
    pub fn to_code_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter()
            .map(|(currency, rate)| (currency.code(), rate))
            .collect()
    }
}

pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}
