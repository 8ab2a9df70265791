//! Sub-pool participants, payout routing and the payout threshold.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Deserialize;
use subpool_core::{validate_address, NetworkType};

use crate::error::ConfigError;

/// `parameters` object of the config document, as written on disk.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawParameters {
    pub worker_name: String,
    pub miner_address_list: Vec<String>,
    #[serde(default)]
    pub worker_list: Vec<String>,
    pub holding_address: String,
    pub consensus_address: String,
    pub minimum_payout: Decimal,
}

impl RawParameters {
    pub(crate) fn validate(self, network: NetworkType) -> Result<SubPoolParameters, ConfigError> {
        SubPoolParameters::new(
            self.worker_name,
            self.miner_address_list,
            self.worker_list,
            self.holding_address,
            self.consensus_address,
            self.minimum_payout,
            network,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPoolParameters {
    worker_name: String,
    miner_address_list: Vec<String>,
    worker_list: Vec<String>,
    holding_address: String,
    consensus_address: String,
    minimum_payout: Decimal,
}

impl SubPoolParameters {
    /// Build validated parameters; addresses are checked against `network`.
    pub fn new(
        worker_name: impl Into<String>,
        miner_address_list: Vec<String>,
        worker_list: Vec<String>,
        holding_address: impl Into<String>,
        consensus_address: impl Into<String>,
        minimum_payout: Decimal,
        network: NetworkType,
    ) -> Result<Self, ConfigError> {
        let params = Self {
            worker_name: worker_name.into(),
            miner_address_list,
            worker_list,
            holding_address: holding_address.into(),
            consensus_address: consensus_address.into(),
            minimum_payout,
        };
        params.validate_for(network)?;
        Ok(params)
    }

    /// Check every invariant against `network`.
    pub fn validate_for(&self, network: NetworkType) -> Result<(), ConfigError> {
        if self.worker_name.trim().is_empty() {
            return Err(ConfigError::invalid("parameters.workerName", "must not be empty"));
        }

        if self.miner_address_list.is_empty() {
            return Err(ConfigError::invalid(
                "parameters.minerAddressList",
                "must contain at least one address",
            ));
        }
        let mut seen = HashSet::with_capacity(self.miner_address_list.len());
        for (i, addr) in self.miner_address_list.iter().enumerate() {
            let field = format!("parameters.minerAddressList[{}]", i);
            validate_address(addr, network).map_err(|e| ConfigError::invalid(&field, e.to_string()))?;
            if !seen.insert(addr.as_str()) {
                return Err(ConfigError::invalid(field, format!("duplicate address {}", addr)));
            }
        }

        let mut seen = HashSet::with_capacity(self.worker_list.len());
        for (i, worker) in self.worker_list.iter().enumerate() {
            let field = format!("parameters.workerList[{}]", i);
            if worker.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
            if !seen.insert(worker.as_str()) {
                return Err(ConfigError::invalid(field, format!("duplicate worker {}", worker)));
            }
        }

        validate_address(&self.holding_address, network)
            .map_err(|e| ConfigError::invalid("parameters.holdingAddress", e.to_string()))?;
        validate_address(&self.consensus_address, network)
            .map_err(|e| ConfigError::invalid("parameters.consensusAddress", e.to_string()))?;
        if self.holding_address == self.consensus_address {
            return Err(ConfigError::invalid(
                "parameters.consensusAddress",
                "must differ from holdingAddress",
            ));
        }

        if self.minimum_payout <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "parameters.minimumPayout",
                format!("must be greater than zero, got {}", self.minimum_payout),
            ));
        }

        Ok(())
    }

    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }

    pub fn miner_address_list(&self) -> &[String] {
        &self.miner_address_list
    }

    pub fn worker_list(&self) -> &[String] {
        &self.worker_list
    }

    /// Address funds accumulate in before distribution.
    pub fn holding_address(&self) -> &str {
        &self.holding_address
    }

    pub fn consensus_address(&self) -> &str {
        &self.consensus_address
    }

    /// Smallest amount worth paying out, in whole coins.
    pub fn minimum_payout(&self) -> Decimal {
        self.minimum_payout
    }

    pub fn is_member_worker(&self, worker: &str) -> bool {
        self.worker_list.iter().any(|w| w == worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MINER_A: &str = "9eXWAAe1uEeub5ujQL5JCKefFjCP2LnVCKJPDrLFdALKCAB2VPg";
    const MINER_B: &str = "9eXwoWUnwhpPPWtVv71oJucXF2WVL1A4NjKzW4CDnFwa4iQrM8g";
    const HOLDING: &str = "9eYPSrKZzAysBwsGRsxJRVaPEKpbdfXdZ9MbnG4BwMYpwNFyULc";
    const CONSENSUS: &str = "6Ld9mYPByYufyAwTa27xFP8GbaxChqzgja7dTEt";

    fn params(miners: &[&str], workers: &[&str], holding: &str, consensus: &str, min: Decimal) -> Result<SubPoolParameters, ConfigError> {
        SubPoolParameters::new(
            "subpool-1",
            miners.iter().map(|s| s.to_string()).collect(),
            workers.iter().map(|s| s.to_string()).collect(),
            holding,
            consensus,
            min,
            NetworkType::Mainnet,
        )
    }

    fn field_of(r: Result<SubPoolParameters, ConfigError>) -> String {
        match r {
            Err(ConfigError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_parameters() {
        let p = params(&[MINER_A, MINER_B], &["rig1", "rig2", "rig3"], HOLDING, CONSENSUS, dec!(0.5)).unwrap();
        assert_eq!(p.miner_address_list().len(), 2);
        assert_eq!(p.worker_list().len(), 3);
        assert_eq!(p.minimum_payout(), dec!(0.5));
        assert!(p.is_member_worker("rig2"));
        assert!(!p.is_member_worker("rig9"));
    }

    #[test]
    fn test_minimum_payout_must_be_positive() {
        assert_eq!(
            field_of(params(&[MINER_A], &[], HOLDING, CONSENSUS, dec!(0))),
            "parameters.minimumPayout"
        );
        assert_eq!(
            field_of(params(&[MINER_A], &[], HOLDING, CONSENSUS, dec!(-1.5))),
            "parameters.minimumPayout"
        );
        assert!(params(&[MINER_A], &[], HOLDING, CONSENSUS, dec!(0.001)).is_ok());
    }

    #[test]
    fn test_empty_miner_list_rejected() {
        assert_eq!(
            field_of(params(&[], &[], HOLDING, CONSENSUS, dec!(1))),
            "parameters.minerAddressList"
        );
    }

    #[test]
    fn test_duplicate_miner_address_rejected() {
        assert_eq!(
            field_of(params(&[MINER_A, MINER_B, MINER_A], &[], HOLDING, CONSENSUS, dec!(1))),
            "parameters.minerAddressList[2]"
        );
    }

    #[test]
    fn test_invalid_miner_address_rejected() {
        assert_eq!(
            field_of(params(&[MINER_A, "not-an-address"], &[], HOLDING, CONSENSUS, dec!(1))),
            "parameters.minerAddressList[1]"
        );
    }

    #[test]
    fn test_duplicate_worker_rejected() {
        assert_eq!(
            field_of(params(&[MINER_A], &["rig1", "rig1"], HOLDING, CONSENSUS, dec!(1))),
            "parameters.workerList[1]"
        );
    }

    #[test]
    fn test_holding_and_consensus_must_differ() {
        assert_eq!(
            field_of(params(&[MINER_A], &[], HOLDING, HOLDING, dec!(1))),
            "parameters.consensusAddress"
        );
    }

    #[test]
    fn test_addresses_checked_against_network() {
        let p = params(&[MINER_A], &[], HOLDING, CONSENSUS, dec!(1)).unwrap();
        assert!(p.validate_for(NetworkType::Testnet).is_err());
    }
}
