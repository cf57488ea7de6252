use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::entity::{is_valid_rate, BotError, Currency, ExchangeRates};

#[async_trait]
pub trait RateRepository: Send + Sync {
    async fn snapshot(&self) -> ExchangeRates;
    async fn update(&self, currency: Currency, rate: f64) -> Result<f64, BotError>;
    async fn update_derived(
        &self,
        currency: Currency,
        numerator: f64,
        denominator: f64,
    ) -> Result<f64, BotError>;
}

/// Exchange rate table backed by a JSON file.
///
/// Reads never fail: a missing or broken file yields the default table.
/// Writes are best effort and only logged when they fail.
pub struct RateStore {
    path: PathBuf,
    rates: RwLock<ExchangeRates>,
}

impl RateStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rates = load(&path).await;
        info!("Loaded exchange rates from {}", path.display());
        Self {
            path,
            rates: RwLock::new(rates),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn store(&self, currency: Currency, rate: f64) -> Result<f64, BotError> {
        if !is_valid_rate(rate) {
            return Err(BotError::InvalidAmount(format!(
                "rate for {} must be a positive number",
                currency
            )));
        }

        // The write lock is held through the file write so concurrent
        // updates hit the disk in the same order they hit the table.
        let mut rates = self.rates.write().await;
        rates.set(currency, rate);
        info!("Exchange rate {} updated to {}", currency.pair_label(), rate);

        if let Err(e) = save(&self.path, &rates).await {
            warn!("Failed to save exchange rates: {}", e);
        }

        Ok(rate)
    }
}

#[async_trait]
impl RateRepository for RateStore {
    async fn snapshot(&self) -> ExchangeRates {
        self.rates.read().await.clone()
    }

    async fn update(&self, currency: Currency, rate: f64) -> Result<f64, BotError> {
        self.store(currency, rate).await
    }

    async fn update_derived(
        &self,
        currency: Currency,
        numerator: f64,
        denominator: f64,
    ) -> Result<f64, BotError> {
        if denominator == 0.0 {
            return Err(BotError::Domain(format!(
                "cannot derive {} rate: division by zero",
                currency
            )));
        }

        self.store(currency, numerator / denominator).await
    }
}

pub async fn load(path: &Path) -> ExchangeRates {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            debug!("Rates file {} not readable ({}), using defaults", path.display(), e);
            return ExchangeRates::default();
        }
    };

    let stored: HashMap<String, Value> = match serde_json::from_str(&content) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Rates file {} is corrupt ({}), using defaults", path.display(), e);
            return ExchangeRates::default();
        }
    };

    let mut rates = ExchangeRates::default();
    for currency in Currency::ALL {
        match stored.get(currency.code()).and_then(Value::as_f64) {
            Some(rate) if is_valid_rate(rate) => rates.set(currency, rate),
            Some(rate) => warn!(
                "Stored {} rate {} is not positive, using default {}",
                currency,
                rate,
                currency.default_rate()
            ),
            None => warn!(
                "Stored rates lack {}, using default {}",
                currency,
                currency.default_rate()
            ),
        }
    }

    rates
}

pub async fn save(path: &Path, rates: &ExchangeRates) -> Result<(), BotError> {
    let json = serde_json::to_string_pretty(&rates.to_code_map())
        .map_err(|e| BotError::Persistence(e.to_string()))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| BotError::Persistence(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = RateStore::open(dir.path().join("rates.json")).await;

        let rates = store.snapshot().await;
        assert_eq!(rates, ExchangeRates::default());
        assert_eq!(rates.get(Currency::Rub), 5.5289);
        assert_eq!(rates.get(Currency::Usd), 18.65);
    }

    #[tokio::test]
    async fn corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = RateStore::open(&path).await;
        assert_eq!(store.snapshot().await, ExchangeRates::default());
    }

    #[tokio::test]
    async fn partial_file_is_backfilled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        std::fs::write(&path, r#"{"RUB": 6.1, "UAH": -1, "EUR": 20.0}"#).unwrap();

        let rates = RateStore::open(&path).await.snapshot().await;
        assert_eq!(rates.get(Currency::Rub), 6.1);
        assert_eq!(rates.get(Currency::Uah), Currency::Uah.default_rate());
        assert_eq!(rates.get(Currency::Brl), Currency::Brl.default_rate());
    }

    #[tokio::test]
    async fn update_persists_the_whole_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let store = RateStore::open(&path).await;

        store.update(Currency::Usd, 17.9).await.unwrap();

        let reopened = RateStore::open(&path).await.snapshot().await;
        assert_eq!(reopened.get(Currency::Usd), 17.9);
        assert_eq!(reopened.get(Currency::Rub), 5.5289);

        let raw: HashMap<String, f64> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw["USD"], 17.9);
    }

    #[tokio::test]
    async fn derived_update_divides_in_order() {
        let dir = tempdir().unwrap();
        let store = RateStore::open(dir.path().join("rates.json")).await;

        let rate = store.update_derived(Currency::Rub, 97.0, 17.5).await.unwrap();
        assert_eq!(rate, 97.0 / 17.5);
        assert_eq!(store.snapshot().await.get(Currency::Rub), 97.0 / 17.5);
    }

    #[tokio::test]
    async fn zero_denominator_is_a_domain_error() {
        let dir = tempdir().unwrap();
        let store = RateStore::open(dir.path().join("rates.json")).await;

        let result = store.update_derived(Currency::Uah, 100.0, 0.0).await;
        assert!(matches!(result, Err(BotError::Domain(_))));

        let rates = store.snapshot().await;
        assert_eq!(rates.get(Currency::Uah), 0.4380);
        assert!(rates.iter().all(|(_, rate)| rate.is_finite()));
    }

    #[tokio::test]
    async fn non_positive_rates_are_rejected() {
        let dir = tempdir().unwrap();
        let store = RateStore::open(dir.path().join("rates.json")).await;

        assert!(store.update(Currency::Usd, 0.0).await.is_err());
        assert!(store.update(Currency::Usd, f64::NAN).await.is_err());
        assert!(store.update_derived(Currency::Brl, -5.0, 2.0).await.is_err());
        assert_eq!(store.snapshot().await, ExchangeRates::default());
    }

    #[tokio::test]
    async fn unwritable_path_does_not_fail_the_update() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("rates.json");
        let store = RateStore::open(&path).await;

        assert_eq!(store.update(Currency::Usd, 19.0).await.unwrap(), 19.0);
        assert_eq!(store.snapshot().await.get(Currency::Usd), 19.0);
    }
}
