//! Node credentials: API endpoint, wallet secrets and network selection.

use serde::Deserialize;
use subpool_core::{NetworkType, Secret};

use crate::error::ConfigError;

/// `node` object of the config document, as written on disk.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNodeConfig {
    pub node_api: RawApiConfig,
    pub wallet: RawWalletConfig,
    pub network_type: NetworkType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawApiConfig {
    pub api_url: String,
    pub api_key: Secret,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawWalletConfig {
    pub mnemonic: Secret,
    #[serde(default)]
    pub password: Option<Secret>,
    #[serde(default)]
    pub mnemonic_password: Option<Secret>,
}

impl RawNodeConfig {
    pub(crate) fn validate(self) -> Result<CredentialsConfig, ConfigError> {
        CredentialsConfig::new(
            self.node_api.api_url,
            self.node_api.api_key,
            self.wallet.mnemonic,
            self.wallet.password,
            self.wallet.mnemonic_password,
            self.network_type,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeApiConfig {
    api_url: String,
    api_key: Secret,
}

impl NodeApiConfig {
    /// URL of the node API endpoint.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Key the node API authenticates requests with.
    pub fn api_key(&self) -> &Secret {
        &self.api_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    mnemonic: Secret,
    password: Secret,
    mnemonic_password: Secret,
}

impl WalletConfig {
    /// Mnemonic the wallet keys are derived from. Must match the node wallet.
    pub fn mnemonic(&self) -> &Secret {
        &self.mnemonic
    }

    /// Password protecting the node wallet data; `None` means no password.
    pub fn password(&self) -> Option<&Secret> {
        if self.password.is_empty() {
            None
        } else {
            Some(&self.password)
        }
    }

    /// Password protecting the mnemonic. Same as `password` unless set.
    pub fn mnemonic_password(&self) -> &Secret {
        &self.mnemonic_password
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsConfig {
    node_api: NodeApiConfig,
    wallet: WalletConfig,
    network_type: NetworkType,
}

impl CredentialsConfig {
    /// Build validated credentials.
    ///
    /// An absent `password` means no password. An absent `mnemonic_password`
    /// falls back to `password` before anything else is checked.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Secret,
        mnemonic: Secret,
        password: Option<Secret>,
        mnemonic_password: Option<Secret>,
        network_type: NetworkType,
    ) -> Result<Self, ConfigError> {
        let api_url = api_url.into().trim().to_string();
        let password = password.unwrap_or_default();
        let mnemonic_password = mnemonic_password.unwrap_or_else(|| password.clone());

        if api_url.is_empty() {
            return Err(ConfigError::invalid("node.nodeApi.apiUrl", "must not be empty"));
        }
        let host = api_url
            .strip_prefix("https://")
            .or_else(|| api_url.strip_prefix("http://"));
        match host {
            None => {
                return Err(ConfigError::invalid(
                    "node.nodeApi.apiUrl",
                    "must start with http:// or https://",
                ))
            }
            Some(h) if h.trim_matches('/').is_empty() => {
                return Err(ConfigError::invalid("node.nodeApi.apiUrl", "has no host"))
            }
            Some(_) => {}
        }
        if mnemonic.expose().trim().is_empty() {
            return Err(ConfigError::invalid("node.wallet.mnemonic", "must not be empty"));
        }

        Ok(Self {
            node_api: NodeApiConfig { api_url, api_key },
            wallet: WalletConfig {
                mnemonic,
                password,
                mnemonic_password,
            },
            network_type,
        })
    }

    pub fn node_api(&self) -> &NodeApiConfig {
        &self.node_api
    }

    pub fn wallet(&self) -> &WalletConfig {
        &self.wallet
    }

    pub fn node_api_url(&self) -> &str {
        self.node_api.api_url()
    }

    pub fn node_api_key(&self) -> &Secret {
        self.node_api.api_key()
    }

    pub fn mnemonic(&self) -> &Secret {
        self.wallet.mnemonic()
    }

    pub fn wallet_password(&self) -> Option<&Secret> {
        self.wallet.password()
    }

    pub fn mnemonic_password(&self) -> &Secret {
        self.wallet.mnemonic_password()
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(url: &str, password: Option<&str>, mnemonic_password: Option<&str>) -> Result<CredentialsConfig, ConfigError> {
        CredentialsConfig::new(
            url,
            Secret::from("node-key"),
            Secret::from("slab fossil cabin"),
            password.map(Secret::from),
            mnemonic_password.map(Secret::from),
            NetworkType::Mainnet,
        )
    }

    #[test]
    fn test_mnemonic_password_defaults_to_wallet_password() {
        let c = creds("http://127.0.0.1:9053/", Some("walletpass"), None).unwrap();
        assert_eq!(c.mnemonic_password().expose(), "walletpass");
        assert_eq!(c.wallet_password().map(Secret::expose), Some("walletpass"));
    }

    #[test]
    fn test_explicit_mnemonic_password_kept() {
        let c = creds("http://127.0.0.1:9053/", Some("walletpass"), Some("other")).unwrap();
        assert_eq!(c.mnemonic_password().expose(), "other");
    }

    #[test]
    fn test_absent_password_means_none() {
        let c = creds("https://node.example.org", None, None).unwrap();
        assert!(c.wallet_password().is_none());
        assert!(c.mnemonic_password().is_empty());
    }

    #[test]
    fn test_api_url_checks() {
        for bad in ["", "   ", "127.0.0.1:9053", "ftp://node", "http://"] {
            match creds(bad, None, None) {
                Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "node.nodeApi.apiUrl"),
                other => panic!("expected validation error for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_empty_mnemonic_rejected_without_leaking() {
        let err = CredentialsConfig::new(
            "http://127.0.0.1:9053",
            Secret::from("super-secret-key"),
            Secret::from(""),
            None,
            None,
            NetworkType::Testnet,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("node.wallet.mnemonic"));
        assert!(!msg.contains("super-secret-key"));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let c = creds("http://127.0.0.1:9053/", Some("walletpass"), None).unwrap();
        let dbg = format!("{:?}", c);
        assert!(!dbg.contains("walletpass"));
        assert!(!dbg.contains("slab fossil"));
        assert!(!dbg.contains("node-key"));
        assert!(dbg.contains("127.0.0.1:9053"));
    }
}
