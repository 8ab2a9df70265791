/// Pool backends
///
/// Each supported pool API has its own schema module. Backends form a
/// closed set: adding one means a new schema module implementing
/// `PoolSchema`, a `PoolBackend` variant and a `PoolSnapshot` arm.
/// The canonical `WorkerShare` model never changes.

pub mod enigma;
pub mod herominers;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NormalizeError;

pub use enigma::EnigmaSnapshot;
pub use herominers::PoolState as HeroMinersState;

/// Supported pool APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolBackend {
    EnigmaPool,
    HeroMiners,
}

/// How a backend's per-worker share count evolves between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareSemantics {
    /// Count of shares currently inside the pool's payout window.
    PointInTime,
    /// Monotonic count since the worker first connected.
    Cumulative,
}

impl PoolBackend {
    pub const ALL: [PoolBackend; 2] = [PoolBackend::EnigmaPool, PoolBackend::HeroMiners];

    pub fn name(&self) -> &'static str {
        match self {
            PoolBackend::EnigmaPool => "enigmapool",
            PoolBackend::HeroMiners => "herominers",
        }
    }

    pub fn share_semantics(&self) -> ShareSemantics {
        match self {
            PoolBackend::EnigmaPool => ShareSemantics::PointInTime,
            PoolBackend::HeroMiners => ShareSemantics::Cumulative,
        }
    }
}

impl fmt::Display for PoolBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoolBackend {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enigmapool" | "enigma-pool" | "enigma" => Ok(PoolBackend::EnigmaPool),
            "herominers" | "hero-miners" | "hero" => Ok(PoolBackend::HeroMiners),
            _ => Err(NormalizeError::UnknownBackendVariant {
                name: s.to_string(),
            }),
        }
    }
}

/// One worker row as a backend reports it, before canonical checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerEntry<'a> {
    pub name: &'a str,
    pub shares: Option<i64>,
}

/// Mapping from a backend's decoded response to canonical worker rows.
pub trait PoolSchema {
    const BACKEND: PoolBackend;

    /// Per-worker rows in the order the backend listed them.
    fn worker_entries(&self) -> Vec<WorkerEntry<'_>>;

    /// Aggregate valid-share figure reported next to the worker list.
    fn reported_total(&self) -> Option<i64>;
}

/// A decoded response from one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolSnapshot {
    EnigmaPool(EnigmaSnapshot),
    HeroMiners(HeroMinersState),
}

impl PoolSnapshot {
    /// Decode a raw JSON payload with the schema of `backend`.
    pub fn decode(backend: PoolBackend, payload: &Value) -> Result<Self, NormalizeError> {
        let decoded = match backend {
            PoolBackend::EnigmaPool => EnigmaSnapshot::deserialize(payload).map(PoolSnapshot::EnigmaPool),
            PoolBackend::HeroMiners => HeroMinersState::deserialize(payload).map(PoolSnapshot::HeroMiners),
        };
        decoded.map_err(|e| NormalizeError::malformed(backend, None, e.to_string()))
    }

    pub fn backend(&self) -> PoolBackend {
        match self {
            PoolSnapshot::EnigmaPool(_) => EnigmaSnapshot::BACKEND,
            PoolSnapshot::HeroMiners(_) => HeroMinersState::BACKEND,
        }
    }

    pub fn worker_entries(&self) -> Vec<WorkerEntry<'_>> {
        match self {
            PoolSnapshot::EnigmaPool(s) => s.worker_entries(),
            PoolSnapshot::HeroMiners(s) => s.worker_entries(),
        }
    }

    pub fn reported_total(&self) -> Option<i64> {
        match self {
            PoolSnapshot::EnigmaPool(s) => s.reported_total(),
            PoolSnapshot::HeroMiners(s) => s.reported_total(),
        }
    }
}

impl From<EnigmaSnapshot> for PoolSnapshot {
    fn from(s: EnigmaSnapshot) -> Self {
        PoolSnapshot::EnigmaPool(s)
    }
}

impl From<HeroMinersState> for PoolSnapshot {
    fn from(s: HeroMinersState) -> Self {
        PoolSnapshot::HeroMiners(s)
    }
}
