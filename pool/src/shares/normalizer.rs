/// Share normalization
///
/// Maps each backend's worker rows onto canonical `WorkerShare` records:
///   1. Dispatch on the snapshot variant to get the backend's worker rows
///   2. Reject empty names, missing counts and negative counts
///   3. Reject duplicate worker names (summing or dropping would skew payout weights)
///   4. Pass the backend's aggregate total through untouched
///
/// The normalizer holds no state and can be shared across threads freely.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::NormalizeError;
use crate::pools::{PoolBackend, PoolSnapshot, WorkerEntry};

/// Canonical per-worker share record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerShare {
    pub worker_name: String,
    pub valid_share_count: u64,
}

impl WorkerShare {
    pub fn new(worker_name: impl Into<String>, valid_share_count: u64) -> Self {
        Self {
            worker_name: worker_name.into(),
            valid_share_count,
        }
    }
}

/// Canonical shares plus the backend's own aggregate figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSnapshot {
    pub backend: PoolBackend,
    pub shares: Vec<WorkerShare>,
    pub reported_total: Option<u64>,
}

impl NormalizedSnapshot {
    /// Sum of the per-worker counts.
    pub fn share_sum(&self) -> u64 {
        self.shares
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.valid_share_count))
    }

    /// Whether the per-worker sum equals the reported aggregate.
    /// `None` when the backend reported no aggregate.
    pub fn total_matches(&self) -> Option<bool> {
        self.reported_total.map(|total| total == self.share_sum())
    }

    pub fn into_shares(self) -> Vec<WorkerShare> {
        self.shares
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShareNormalizer;

impl ShareNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Canonical shares for one decoded snapshot, in backend order.
    pub fn normalize(&self, snapshot: &PoolSnapshot) -> Result<Vec<WorkerShare>, NormalizeError> {
        self.normalize_snapshot(snapshot).map(NormalizedSnapshot::into_shares)
    }

    /// Canonical shares plus the pass-through aggregate total.
    pub fn normalize_snapshot(&self, snapshot: &PoolSnapshot) -> Result<NormalizedSnapshot, NormalizeError> {
        let backend = snapshot.backend();
        let shares = collect_shares(backend, snapshot.worker_entries())?;

        let reported_total = match snapshot.reported_total() {
            Some(total) if total < 0 => {
                warn!(
                    "{} reported a negative aggregate share total {}; dropping it",
                    backend, total
                );
                None
            }
            Some(total) => Some(total as u64),
            None => None,
        };

        let normalized = NormalizedSnapshot {
            backend,
            shares,
            reported_total,
        };

        if normalized.total_matches() == Some(false) {
            warn!(
                "{} aggregate total {:?} differs from per-worker share sum {}",
                backend,
                normalized.reported_total,
                normalized.share_sum()
            );
        }

        debug!(
            "Normalized {} snapshot: {} workers, share sum {}, reported total {:?}",
            backend,
            normalized.shares.len(),
            normalized.share_sum(),
            normalized.reported_total
        );

        Ok(normalized)
    }

    /// Decode a raw JSON payload for `backend`, then normalize it.
    pub fn normalize_value(&self, backend: PoolBackend, payload: &Value) -> Result<NormalizedSnapshot, NormalizeError> {
        let snapshot = PoolSnapshot::decode(backend, payload)?;
        self.normalize_snapshot(&snapshot)
    }

    /// Like `normalize_value`, resolving the backend by name first.
    pub fn normalize_json(&self, backend_name: &str, payload: &Value) -> Result<NormalizedSnapshot, NormalizeError> {
        let backend: PoolBackend = backend_name.parse()?;
        self.normalize_value(backend, payload)
    }

    /// Normalize several snapshots independently.
    ///
    /// A failing backend is logged and reported in its own slot; the others
    /// are still processed.
    pub fn normalize_all<'a, I>(&self, snapshots: I) -> Vec<(PoolBackend, Result<NormalizedSnapshot, NormalizeError>)>
    where
        I: IntoIterator<Item = &'a PoolSnapshot>,
    {
        snapshots
            .into_iter()
            .map(|snapshot| {
                let backend = snapshot.backend();
                let result = self.normalize_snapshot(snapshot);
                if let Err(e) = &result {
                    warn!("Skipping {} snapshot this cycle: {}", backend, e);
                }
                (backend, result)
            })
            .collect()
    }
}

fn collect_shares(backend: PoolBackend, entries: Vec<WorkerEntry<'_>>) -> Result<Vec<WorkerShare>, NormalizeError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
    let mut shares = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(NormalizeError::malformed(
                backend,
                None,
                format!("worker entry #{} has no name", index),
            ));
        }

        let count = match entry.shares {
            None => {
                return Err(NormalizeError::malformed(
                    backend,
                    Some(entry.name),
                    "missing share count",
                ))
            }
            Some(n) if n < 0 => {
                return Err(NormalizeError::malformed(
                    backend,
                    Some(entry.name),
                    format!("negative share count {}", n),
                ))
            }
            Some(n) => n as u64,
        };

        if !seen.insert(entry.name) {
            return Err(NormalizeError::DuplicateWorkerEntry {
                backend,
                worker: entry.name.to_string(),
            });
        }

        shares.push(WorkerShare::new(entry.name, count));
    }

    Ok(shares)
}
