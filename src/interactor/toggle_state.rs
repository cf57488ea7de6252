use log::debug;
use std::collections::{BTreeMap, HashMap};
use teloxide::types::{ChatId, MessageId};
use tokio::sync::Mutex;

use super::profit_engine;
use crate::entity::{BotError, ExchangeRates, PendingTransaction, ProfitDelta, ProfitReport};

/// Identifies a rendered result message.
pub type ToggleKey = (ChatId, MessageId);

/// Toggle memory of one result message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleRecord {
    pub alternate_active: bool,
    /// Profit with the standard commission, captured on the first toggle.
    pub baseline_settle: f64,
    pub baseline_major: f64,
}

/// Toggle records keyed by message, evicting the least recently toggled
/// message once `capacity` is reached.
pub struct ToggleStates {
    inner: Mutex<ToggleCache>,
}

struct ToggleCache {
    capacity: usize,
    tick: u64,
    records: HashMap<ToggleKey, (ToggleRecord, u64)>,
    recency: BTreeMap<u64, ToggleKey>,
}

impl ToggleCache {
    fn get(&self, key: &ToggleKey) -> Option<ToggleRecord> {
        self.records.get(key).map(|(record, _)| *record)
    }

    fn put(&mut self, key: ToggleKey, record: ToggleRecord) {
        self.tick += 1;
        if let Some((_, old_tick)) = self.records.insert(key, (record, self.tick)) {
            self.recency.remove(&old_tick);
        }
        self.recency.insert(self.tick, key);

        while self.records.len() > self.capacity {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            self.records.remove(&oldest);
            debug!("Evicted toggle state of message {:?}", oldest);
        }
    }

    fn remove(&mut self, key: &ToggleKey) -> Option<ToggleRecord> {
        let (record, tick) = self.records.remove(key)?;
        self.recency.remove(&tick);
        Some(record)
    }
}

impl ToggleStates {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(ToggleCache {
                capacity: capacity.max(1),
                tick: 0,
                records: HashMap::new(),
                recency: BTreeMap::new(),
            }),
        }
    }

    /// Flips the alternate commission of a result message and recomputes it.
    ///
    /// The first toggle of a message freezes the standard-commission profit
    /// as baseline; every later toggle reports its delta against that same
    /// baseline.
    pub async fn toggle(
        &self,
        key: ToggleKey,
        rates: &ExchangeRates,
        pending: &PendingTransaction,
        action_price: f64,
    ) -> Result<ProfitReport, BotError> {
        profit_engine::requires_commission(pending.category)?;

        let mut cache = self.inner.lock().await;

        let record = match cache.get(&key) {
            Some(record) => record,
            None => {
                let baseline = profit_engine::baseline(rates, pending, action_price)?;
                ToggleRecord {
                    alternate_active: false,
                    baseline_settle: baseline.net_profit_settle,
                    baseline_major: baseline.net_profit_major,
                }
            }
        };

        let alternate_active = !record.alternate_active;
        let breakdown = profit_engine::calculate(rates, pending, action_price, alternate_active)?;

        cache.put(
            key,
            ToggleRecord {
                alternate_active,
                ..record
            },
        );

        let delta = alternate_active.then(|| ProfitDelta {
            settle: breakdown.net_profit_settle - record.baseline_settle,
            major: breakdown.net_profit_major - record.baseline_major,
        });

        Ok(ProfitReport {
            pending: *pending,
            action_price,
            breakdown,
            alternate_active,
            delta,
        })
    }

    /// Drops the record of a message that no longer shows a result.
    pub async fn forget(&self, key: ToggleKey) {
        if self.inner.lock().await.remove(&key).is_some() {
            debug!("Reset toggle state of message {:?}", key);
        }
    }

    pub async fn get(&self, key: ToggleKey) -> Option<ToggleRecord> {
        self.inner.lock().await.get(&key)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Category, Currency};

    fn key(id: i32) -> ToggleKey {
        (ChatId(42), MessageId(id))
    }

    fn quests() -> PendingTransaction {
        PendingTransaction::new(Category::BrawlStars, Currency::Uah, 1000.0)
    }

    #[tokio::test]
    async fn first_toggle_activates_alternate_and_reports_delta() {
        let toggles = ToggleStates::new(16);
        let rates = ExchangeRates::default();

        let report = toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        let baseline = profit_engine::baseline(&rates, &quests(), 50.0).unwrap();

        assert!(report.alternate_active);
        let delta = report.delta.unwrap();
        assert_eq!(
            delta.settle,
            report.breakdown.net_profit_settle - baseline.net_profit_settle
        );
        assert!(delta.settle > 0.0);
    }

    #[tokio::test]
    async fn toggling_twice_restores_baseline() {
        let toggles = ToggleStates::new(16);
        let rates = ExchangeRates::default();
        let baseline = profit_engine::baseline(&rates, &quests(), 50.0).unwrap();

        toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        let report = toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();

        assert!(!report.alternate_active);
        assert_eq!(report.delta, None);
        assert_eq!(report.breakdown.net_profit_settle, baseline.net_profit_settle);

        let record = toggles.get(key(1)).await.unwrap();
        assert_eq!(
            report.breakdown.net_profit_settle - record.baseline_settle,
            0.0
        );
    }

    #[tokio::test]
    async fn baseline_stays_frozen_when_rates_change() {
        let toggles = ToggleStates::new(16);
        let rates = ExchangeRates::default();
        toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        let frozen = toggles.get(key(1)).await.unwrap();

        let changed = ExchangeRates::with_rates(&[(Currency::Uah, 0.5)]);
        toggles.toggle(key(1), &changed, &quests(), 50.0).await.unwrap();
        let report = toggles.toggle(key(1), &changed, &quests(), 50.0).await.unwrap();

        let record = toggles.get(key(1)).await.unwrap();
        assert_eq!(record.baseline_settle, frozen.baseline_settle);
        assert_eq!(
            report.delta.unwrap().settle,
            report.breakdown.net_profit_settle - frozen.baseline_settle
        );
    }

    #[tokio::test]
    async fn messages_are_toggled_independently() {
        let toggles = ToggleStates::new(16);
        let rates = ExchangeRates::default();

        toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        let other = toggles.toggle(key(2), &rates, &quests(), 50.0).await.unwrap();

        assert!(other.alternate_active);
        assert_eq!(toggles.len().await, 2);
    }

    #[tokio::test]
    async fn evicts_least_recently_toggled() {
        let toggles = ToggleStates::new(2);
        let rates = ExchangeRates::default();

        toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        toggles.toggle(key(2), &rates, &quests(), 50.0).await.unwrap();
        toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        toggles.toggle(key(3), &rates, &quests(), 50.0).await.unwrap();

        assert_eq!(toggles.len().await, 2);
        assert!(toggles.get(key(1)).await.is_some());
        assert!(toggles.get(key(2)).await.is_none());
        assert!(toggles.get(key(3)).await.is_some());
    }

    #[tokio::test]
    async fn forget_resets_to_off() {
        let toggles = ToggleStates::new(4);
        let rates = ExchangeRates::default();
        toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();

        toggles.forget(key(1)).await;

        assert!(toggles.is_empty().await);
        let report = toggles.toggle(key(1), &rates, &quests(), 50.0).await.unwrap();
        assert!(report.alternate_active);
    }

    #[tokio::test]
    async fn simple_resale_cannot_toggle() {
        let toggles = ToggleStates::new(4);
        let pending = PendingTransaction::new(Category::Telegram, Currency::Usd, 100.0);

        let result = toggles
            .toggle(key(1), &ExchangeRates::default(), &pending, 1.0)
            .await;

        assert!(matches!(result, Err(BotError::Domain(_))));
        assert!(toggles.is_empty().await);
    }
}
