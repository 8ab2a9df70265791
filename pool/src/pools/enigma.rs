/// EnigmaPool API schema ("flat-list" shape).
///
/// The pool publishes two endpoints:
///   - `/workers` → `{ "workers": [ { "worker": "rig1", "shares": 120 } ] }`
///   - `/shares`  → `{ "shares": { "valid": 200 } }`
///
/// `shares` per worker is the number of valid shares the worker has in the
/// pool's current PPLNS window (a point-in-time count, not cumulative).
/// `shares.valid` is the pool-wide total for the same window and is only
/// passed through for cross-checking.

use serde::{Deserialize, Serialize};

use super::{PoolBackend, PoolSchema, WorkerEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(default)]
    pub worker: String,
    #[serde(default)]
    pub shares: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shares {
    #[serde(default)]
    pub valid: Option<i64>,
}

/// Body of the `/workers` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRequest {
    #[serde(default)]
    pub workers: Vec<Worker>,
}

/// Body of the `/shares` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharesRequest {
    #[serde(default)]
    pub shares: Shares,
}

/// Both endpoints merged into one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnigmaSnapshot {
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub shares: Option<Shares>,
}

impl EnigmaSnapshot {
    pub fn from_parts(workers: WorkerRequest, shares: SharesRequest) -> Self {
        Self {
            workers: workers.workers,
            shares: Some(shares.shares),
        }
    }
}

impl PoolSchema for EnigmaSnapshot {
    const BACKEND: PoolBackend = PoolBackend::EnigmaPool;

    fn worker_entries(&self) -> Vec<WorkerEntry<'_>> {
        self.workers
            .iter()
            .map(|w| WorkerEntry {
                name: &w.worker,
                shares: w.shares,
            })
            .collect()
    }

    fn reported_total(&self) -> Option<i64> {
        self.shares.as_ref().and_then(|s| s.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_combined_payload() {
        let snap: EnigmaSnapshot = serde_json::from_value(json!({
            "workers": [{"worker": "rig1", "shares": 120}, {"worker": "rig2", "shares": 80}],
            "shares": {"valid": 200}
        }))
        .unwrap();
        assert_eq!(snap.workers.len(), 2);
        assert_eq!(snap.reported_total(), Some(200));
        let entries = snap.worker_entries();
        assert_eq!(entries[0].name, "rig1");
        assert_eq!(entries[1].shares, Some(80));
    }

    #[test]
    fn test_from_parts_merges_endpoints() {
        let workers: WorkerRequest =
            serde_json::from_value(json!({"workers": [{"worker": "rig1", "shares": 5}]})).unwrap();
        let shares: SharesRequest = serde_json::from_value(json!({"shares": {"valid": 5}})).unwrap();
        let snap = EnigmaSnapshot::from_parts(workers, shares);
        assert_eq!(snap.workers.len(), 1);
        assert_eq!(snap.reported_total(), Some(5));
    }

    #[test]
    fn test_missing_share_count_decodes_as_none() {
        let snap: EnigmaSnapshot =
            serde_json::from_value(json!({"workers": [{"worker": "rig1"}]})).unwrap();
        assert_eq!(snap.workers[0].shares, None);
        assert_eq!(snap.reported_total(), None);
    }
}
