//! Forex Rate Cache
//!
//! Per-base TTL cache in front of a [`RateSource`]. Fresh entries are served
//! without a network call; failed fetches fall back to whatever entry exists,
//! however old.
//!
//! Concurrent fetches for the same base are ordered by a per-base sequence
//! number taken when the request is issued. A response is stored only if no
//! newer request for that base was issued in the meantime, so the most recently
//! issued request wins regardless of which response arrives last.

use chrono::Utc;
use mebel_models::{CurrencyRate, ForexCacheEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::rate_client::{ForexError, RateSource, RawRates};

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    Empty,
    Fresh,
    Stale,
}

#[derive(Debug, Default)]
struct Slot {
    entry: Option<ForexCacheEntry>,
    /// Sequence number of the most recently issued fetch.
    issued: u64,
}

pub struct ForexRateCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl_ms: i64,
    tracked: Vec<String>,
    slots: RwLock<HashMap<String, Slot>>,
}

impl<S: RateSource, C: Clock> ForexRateCache<S, C> {
    pub fn new(source: S, clock: C, ttl: Duration, tracked: Vec<String>) -> Self {
        Self {
            source,
            clock,
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            tracked: tracked.iter().map(|code| code.trim().to_ascii_uppercase()).collect(),
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Currency codes reported for every base, in output order.
    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Normalized rates for `base`, from cache while fresh.
    pub async fn fetch(&self, base: &str) -> Result<Vec<CurrencyRate>, ForexError> {
        let base = cache_key(base);
        let now = self.clock.now_ms();

        {
            let slots = self.slots.read().await;
            if let Some(entry) = slots.get(&base).and_then(|slot| slot.entry.as_ref()) {
                if entry.is_fresh(now, self.ttl_ms) {
                    debug!(base = %base, age_ms = entry.age_ms(now), "Serving cached rates");
                    return Ok(self.normalize(&entry.rates));
                }
            }
        }

        self.load(base, false).await
    }

    /// Drops the entry for `base` and fetches it again.
    pub async fn refresh(&self, base: &str) -> Result<Vec<CurrencyRate>, ForexError> {
        self.load(cache_key(base), true).await
    }

    /// Inverts a raw quote into "price of one unit in base" for every tracked
    /// code. Missing or non-positive quotes become zero.
    pub fn normalize(&self, raw: &RawRates) -> Vec<CurrencyRate> {
        self.tracked
            .iter()
            .map(|code| {
                let per_unit_in_base = match raw.get(code) {
                    Some(rate) if rate.is_finite() && *rate > 0.0 => 1.0 / rate,
                    _ => 0.0,
                };
                CurrencyRate {
                    code: code.clone(),
                    per_unit_in_base,
                }
            })
            .collect()
    }

    pub async fn state(&self, base: &str) -> CacheState {
        let slots = self.slots.read().await;
        match slots.get(&cache_key(base)).and_then(|slot| slot.entry.as_ref()) {
            None => CacheState::Empty,
            Some(entry) if entry.is_fresh(self.clock.now_ms(), self.ttl_ms) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// All cached entries, ordered by base, in their persisted shape.
    pub async fn snapshot(&self) -> Vec<ForexCacheEntry> {
        let slots = self.slots.read().await;
        let mut entries: Vec<_> = slots.values().filter_map(|slot| slot.entry.clone()).collect();
        entries.sort_by(|a, b| a.base.cmp(&b.base));
        entries
    }

    /// Loads previously persisted entries. An entry never replaces a newer one.
    pub async fn restore(&self, entries: impl IntoIterator<Item = ForexCacheEntry>) {
        let mut slots = self.slots.write().await;
        for mut entry in entries {
            entry.base = cache_key(&entry.base);
            let slot = slots.entry(entry.base.clone()).or_default();
            let newer_cached = slot
                .entry
                .as_ref()
                .is_some_and(|cached| cached.timestamp >= entry.timestamp);
            if !newer_cached {
                slot.entry = Some(entry);
            }
        }
    }

    async fn load(&self, base: String, invalidate: bool) -> Result<Vec<CurrencyRate>, ForexError> {
        let sequence = {
            let mut slots = self.slots.write().await;
            let slot = slots.entry(base.clone()).or_default();
            if invalidate {
                slot.entry = None;
            }
            slot.issued += 1;
            slot.issued
        };

        match self.source.fetch_rates(&base).await {
            Ok(raw) => {
                let rates = self.normalize(&raw);
                let entry = ForexCacheEntry::new(base.clone(), self.clock.now_ms(), raw);

                let mut slots = self.slots.write().await;
                let slot = slots.entry(base.clone()).or_default();
                if slot.issued == sequence {
                    slot.entry = Some(entry);
                } else {
                    debug!(base = %base, sequence, latest = slot.issued, "Discarding superseded rates");
                }
                Ok(rates)
            }
            Err(error) => {
                let slots = self.slots.read().await;
                match slots.get(&base).and_then(|slot| slot.entry.as_ref()) {
                    Some(entry) => {
                        warn!(
                            base = %base,
                            error = %error,
                            age_ms = entry.age_ms(self.clock.now_ms()),
                            "Rate fetch failed, serving cached rates"
                        );
                        Ok(self.normalize(&entry.rates))
                    }
                    None => Err(error),
                }
            }
        }
    }
}

fn cache_key(base: &str) -> String {
    base.trim().to_ascii_uppercase()
}
