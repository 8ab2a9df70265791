/// Worker shares module
///
/// Converts backend-specific pool snapshots into the canonical
/// `WorkerShare` sequence consumed by the payout engine.

pub mod normalizer;

pub use normalizer::{NormalizedSnapshot, ShareNormalizer, WorkerShare};
