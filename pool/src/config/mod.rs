//! Sub-pool configuration
//!
//! Loaded from an operator-authored JSON document:
//!
//! ```json
//! {
//!   "node": {
//!     "nodeApi": { "apiUrl": "http://127.0.0.1:9053/", "apiKey": "..." },
//!     "wallet": { "mnemonic": "...", "password": "...", "mnemonicPassword": "..." },
//!     "networkType": "MAINNET"
//!   },
//!   "parameters": {
//!     "workerName": "subpool-1",
//!     "minerAddressList": ["9f..."],
//!     "workerList": ["rig1"],
//!     "holdingAddress": "9f...",
//!     "consensusAddress": "9f...",
//!     "minimumPayout": 0.5
//!   }
//! }
//! ```
//!
//! Loading decodes into private raw structs and validates before a
//! `SubPoolConfig` is handed out, so callers never see a half-valid config.

pub mod credentials;
pub mod parameters;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ConfigError;
use credentials::RawNodeConfig;
use parameters::RawParameters;

pub use credentials::{CredentialsConfig, NodeApiConfig, WalletConfig};
pub use parameters::SubPoolParameters;

/// Environment variable naming the config file when no path is given.
pub const CONFIG_ENV: &str = "SUBPOOL_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "subpool_config.json";

#[derive(Deserialize)]
struct RawSubPoolConfig {
    node: RawNodeConfig,
    parameters: RawParameters,
}

/// Where a config document comes from.
pub enum ConfigSource<'a> {
    Reader(&'a mut dyn Read),
    Path(&'a Path),
    File(File),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPoolConfig {
    node: CredentialsConfig,
    parameters: SubPoolParameters,
}

impl SubPoolConfig {
    /// Compose a config, checking the parameters against the node's network.
    pub fn new(node: CredentialsConfig, parameters: SubPoolParameters) -> Result<Self, ConfigError> {
        parameters.validate_for(node.network_type())?;
        Ok(Self { node, parameters })
    }

    pub fn load(source: ConfigSource<'_>) -> Result<Self, ConfigError> {
        match source {
            ConfigSource::Reader(reader) => Self::from_reader(reader),
            ConfigSource::Path(path) => Self::from_path(path),
            ConfigSource::File(file) => Self::from_file(file),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let raw: RawSubPoolConfig = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawSubPoolConfig = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_file(file: File) -> Result<Self, ConfigError> {
        Self::from_reader(BufReader::new(file))
    }

    /// Load from a path; relative paths resolve against the working directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = resolve_path(path.as_ref())?;
        let not_found = |source: std::io::Error| ConfigError::NotFound {
            path: path.clone(),
            source,
        };

        let meta = std::fs::metadata(&path).map_err(not_found)?;
        if !meta.is_file() {
            return Err(not_found(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let file = File::open(&path).map_err(not_found)?;

        let config = Self::from_file(file)?;
        info!("Loaded sub-pool config from {}", path.display());
        Ok(config)
    }

    fn from_raw(raw: RawSubPoolConfig) -> Result<Self, ConfigError> {
        let node = raw.node.validate()?;
        let parameters = raw.parameters.validate(node.network_type())?;
        let config = Self { node, parameters };

        info!(
            "Sub-pool config valid: worker={}, network={}, miners={}, workers={}, min_payout={}",
            config.parameters.worker_name(),
            config.node.network_type(),
            config.parameters.miner_address_list().len(),
            config.parameters.worker_list().len(),
            config.parameters.minimum_payout()
        );

        Ok(config)
    }

    /// Node credentials (API, wallet, network).
    pub fn credentials(&self) -> &CredentialsConfig {
        &self.node
    }

    pub fn parameters(&self) -> &SubPoolParameters {
        &self.parameters
    }

    /// Replace the credentials wholesale, re-validating the whole config.
    pub fn with_credentials(self, node: CredentialsConfig) -> Result<Self, ConfigError> {
        Self::new(node, self.parameters)
    }

    /// Replace the parameters wholesale, re-validating the whole config.
    pub fn with_parameters(self, parameters: SubPoolParameters) -> Result<Self, ConfigError> {
        Self::new(self.node, parameters)
    }

    /// Operator-facing summary with secrets left out.
    pub fn summary(&self) -> serde_json::Value {
        let p = &self.parameters;
        json!({
            "node": {
                "apiUrl": self.node.node_api_url(),
                "apiKeySet": !self.node.node_api_key().is_empty(),
                "walletPasswordSet": self.node.wallet_password().is_some(),
                "networkType": self.node.network_type().name(),
            },
            "parameters": {
                "workerName": p.worker_name(),
                "minerAddressList": p.miner_address_list(),
                "workerList": p.worker_list(),
                "holdingAddress": p.holding_address(),
                "consensusAddress": p.consensus_address(),
                "minimumPayout": p.minimum_payout().to_string(),
            }
        })
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|source| ConfigError::NotFound {
            path: path.to_path_buf(),
            source,
        })
}

/// Config path from an explicit argument, then `SUBPOOL_CONFIG`, then the default file name.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

#[derive(Debug, Clone, Default)]
pub enum ConfigState {
    #[default]
    Unloaded,
    Loaded(Arc<SubPoolConfig>),
}

/// Process-wide config handle.
///
/// Readers take a cheap `Arc` snapshot; a reload swaps the whole `Arc`
/// so nobody observes a config mid-update.
#[derive(Debug, Default)]
pub struct SharedConfig {
    state: RwLock<ConfigState>,
}

impl SharedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(config: SubPoolConfig) -> Self {
        Self {
            state: RwLock::new(ConfigState::Loaded(Arc::new(config))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.read(), ConfigState::Loaded(_))
    }

    pub fn current(&self) -> Option<Arc<SubPoolConfig>> {
        match &*self.state.read() {
            ConfigState::Loaded(cfg) => Some(Arc::clone(cfg)),
            ConfigState::Unloaded => None,
        }
    }

    /// Swap in `config`, returning the previous one if any.
    pub fn replace(&self, config: SubPoolConfig) -> Option<Arc<SubPoolConfig>> {
        let next = ConfigState::Loaded(Arc::new(config));
        match std::mem::replace(&mut *self.state.write(), next) {
            ConfigState::Loaded(prev) => Some(prev),
            ConfigState::Unloaded => None,
        }
    }

    /// Load from `source` and swap only if loading succeeds.
    pub fn reload(&self, source: ConfigSource<'_>) -> Result<Arc<SubPoolConfig>, ConfigError> {
        let config = Arc::new(SubPoolConfig::load(source)?);
        *self.state.write() = ConfigState::Loaded(Arc::clone(&config));
        info!("Sub-pool config reloaded");
        Ok(config)
    }
}
