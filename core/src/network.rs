/// Network type identification for the sub-pool's chain.
///
/// Drives address validation: every configured address must carry the
/// prefix of the network the node wallet runs on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl NetworkType {
    /// Human-readable network name (used in logs and summaries).
    pub fn name(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => "mainnet",
            NetworkType::Testnet => "testnet",
        }
    }

    /// High nibble of an encoded address' prefix byte.
    pub fn address_prefix(&self) -> u8 {
        match self {
            NetworkType::Mainnet => 0x00,
            NetworkType::Testnet => 0x10,
        }
    }

    /// Resolve a network from the high nibble of an address prefix byte.
    pub fn from_address_prefix(prefix: u8) -> Option<Self> {
        match prefix & 0xF0 {
            0x00 => Some(NetworkType::Mainnet),
            0x10 => Some(NetworkType::Testnet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network '{0}', use 'MAINNET' or 'TESTNET'")]
pub struct UnknownNetwork(pub String);

impl FromStr for NetworkType {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::Mainnet),
            "testnet" | "test" => Ok(NetworkType::Testnet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Config documents spell it "MAINNET"/"TESTNET"; accept any case.
impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
