/// HeroMiners API schema ("nested-stats" shape).
///
/// `GET /api/stats_address` →
/// `{ "stats": { "shares_good": 300 }, "workers": [ { "name": "w1", "shares_good": 300 } ] }`
///
/// `shares_good` per worker is cumulative: accepted shares since the worker
/// first connected under the address. `stats.shares_good` is the address-wide
/// total and is only passed through for cross-checking.

use serde::{Deserialize, Serialize};

use super::{PoolBackend, PoolSchema, WorkerEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub shares_good: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shares_good: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub workers: Vec<Worker>,
}

impl PoolSchema for PoolState {
    const BACKEND: PoolBackend = PoolBackend::HeroMiners;

    fn worker_entries(&self) -> Vec<WorkerEntry<'_>> {
        self.workers
            .iter()
            .map(|w| WorkerEntry {
                name: &w.name,
                shares: w.shares_good,
            })
            .collect()
    }

    fn reported_total(&self) -> Option<i64> {
        self.stats.as_ref().and_then(|s| s.shares_good)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_pool_state() {
        let state: PoolState = serde_json::from_value(json!({
            "stats": {"shares_good": 300, "hashrate": 1200},
            "workers": [{"name": "w1", "shares_good": 300, "lastShare": 1700000000}]
        }))
        .unwrap();
        assert_eq!(state.reported_total(), Some(300));
        let entries = state.worker_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "w1");
        assert_eq!(entries[0].shares, Some(300));
    }

    #[test]
    fn test_empty_state() {
        let state: PoolState = serde_json::from_value(json!({})).unwrap();
        assert!(state.worker_entries().is_empty());
        assert_eq!(state.reported_total(), None);
    }
}
