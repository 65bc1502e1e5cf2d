//! Currency rate models shared by the rate cache and its consumers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Units of `code` obtainable for one unit of the cache entry's base currency,
/// inverted so that `per_unit_in_base` reads as "price of one `code` in base".
///
/// A zero value means the rate source did not quote the currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub code: String,
    pub per_unit_in_base: f64,
}

impl CurrencyRate {
    pub fn is_quoted(&self) -> bool {
        self.per_unit_in_base > 0.0
    }
}

/// Cached rate quote for one base currency.
///
/// The field names form the persisted shape and must stay stable across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexCacheEntry {
    pub base: String,
    /// Epoch milliseconds at which the quote was stored.
    pub timestamp: i64,
    /// Raw quote: `1 base = rates[code] code`.
    pub rates: HashMap<String, f64>,
}

impl ForexCacheEntry {
    pub fn new(base: impl Into<String>, timestamp: i64, rates: HashMap<String, f64>) -> Self {
        Self {
            base: base.into(),
            timestamp,
            rates,
        }
    }

    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }

    /// An entry stamped in the future (clock skew, a hand-edited snapshot) is
    /// never fresh.
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        (0..ttl_ms).contains(&self.age_ms(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_window() {
        let entry = ForexCacheEntry::new("RUB", 1_000, HashMap::new());
        assert!(entry.is_fresh(1_000, 600_000));
        assert!(entry.is_fresh(600_999, 600_000));
        assert!(!entry.is_fresh(601_000, 600_000));
        assert!(!entry.is_fresh(999, 600_000));
    }

    #[test]
    fn test_persisted_shape() {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), 0.011);
        let entry = ForexCacheEntry::new("RUB", 1_700_000_000_000, rates);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["base"], "RUB");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
        assert_eq!(json["rates"]["USD"], 0.011);
    }
}
