//! Error taxonomy for config loading and share normalization.
//!
//! Messages name fields, backends and workers. They never carry secret values.

use std::path::PathBuf;

use thiserror::Error;

use crate::pools::PoolBackend;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found or unreadable: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config JSON: {message}")]
    Parse { message: String },
    #[error("invalid config field `{field}`: {reason}")]
    Validation { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse {
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error(
        "malformed {backend} pool data{}: {reason}",
        .worker.as_deref().map(|w| format!(" for worker `{}`", w)).unwrap_or_default()
    )]
    MalformedPoolData {
        backend: PoolBackend,
        worker: Option<String>,
        reason: String,
    },
    #[error("duplicate worker entry `{worker}` in {backend} pool data")]
    DuplicateWorkerEntry { backend: PoolBackend, worker: String },
    #[error("unknown pool backend `{name}`")]
    UnknownBackendVariant { name: String },
}

impl NormalizeError {
    pub(crate) fn malformed(
        backend: PoolBackend,
        worker: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        NormalizeError::MalformedPoolData {
            backend,
            worker: worker.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Backend the failure belongs to, when known.
    pub fn backend(&self) -> Option<PoolBackend> {
        match self {
            NormalizeError::MalformedPoolData { backend, .. }
            | NormalizeError::DuplicateWorkerEntry { backend, .. } => Some(*backend),
            NormalizeError::UnknownBackendVariant { .. } => None,
        }
    }
}
