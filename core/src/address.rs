/// Syntactic chain-address validation.
///
/// An encoded address is Base58 over `prefix | content | checksum`:
///   - `prefix` (1 byte) = network nibble (`0x00` mainnet, `0x10` testnet) + address type
///   - `content` = public key (P2PK, 33 bytes), script hash (P2SH, 24 bytes)
///     or serialized script (P2S, variable)
///   - `checksum` = first 4 bytes of `blake2b256(prefix | content)`
///
/// Validation is purely syntactic. It never contacts a node.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use thiserror::Error;

use crate::network::NetworkType;

type Blake2b256 = Blake2b<U32>;

const CHECKSUM_LEN: usize = 4;
const P2PK_CONTENT_LEN: usize = 33;
const P2SH_CONTENT_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    P2pk,
    P2sh,
    P2s,
}

impl AddressKind {
    fn from_type_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x01 => Some(AddressKind::P2pk),
            0x02 => Some(AddressKind::P2sh),
            0x03 => Some(AddressKind::P2s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("address is not valid base58")]
    InvalidEncoding,
    #[error("address is too short ({0} bytes)")]
    TooShort(usize),
    #[error("unknown address type 0x{0:02x}")]
    UnknownType(u8),
    #[error("content length {actual} does not match {kind:?} (expected {expected})")]
    ContentLength {
        kind: AddressKind,
        expected: usize,
        actual: usize,
    },
    #[error("address checksum mismatch")]
    ChecksumMismatch,
    #[error("address belongs to {found} but {expected} is configured")]
    WrongNetwork {
        expected: NetworkType,
        found: String,
    },
}

/// Validate `address` for `network`, returning its kind on success.
pub fn validate_address(address: &str, network: NetworkType) -> Result<AddressKind, AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }

    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::InvalidEncoding)?;

    if bytes.len() < 1 + CHECKSUM_LEN + 1 {
        return Err(AddressError::TooShort(bytes.len()));
    }

    let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let digest = Blake2b256::digest(body);
    if &digest[..CHECKSUM_LEN] != checksum {
        return Err(AddressError::ChecksumMismatch);
    }

    let prefix = body[0];
    match NetworkType::from_address_prefix(prefix) {
        Some(found) if found == network => {}
        Some(found) => {
            return Err(AddressError::WrongNetwork {
                expected: network,
                found: found.name().to_string(),
            })
        }
        None => {
            return Err(AddressError::WrongNetwork {
                expected: network,
                found: format!("prefix 0x{:02x}", prefix & 0xF0),
            })
        }
    }

    let kind = AddressKind::from_type_nibble(prefix & 0x0F)
        .ok_or(AddressError::UnknownType(prefix & 0x0F))?;

    let content_len = body.len() - 1;
    let expected = match kind {
        AddressKind::P2pk => Some(P2PK_CONTENT_LEN),
        AddressKind::P2sh => Some(P2SH_CONTENT_LEN),
        AddressKind::P2s => None,
    };
    if let Some(expected) = expected {
        if content_len != expected {
            return Err(AddressError::ContentLength {
                kind,
                expected,
                actual: content_len,
            });
        }
    }

    Ok(kind)
}

pub fn is_valid_address(address: &str, network: NetworkType) -> bool {
    validate_address(address, network).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_P2PK: &str = "9f4QF8AD1nQ3nJahQVkMj8hFSVVzVom77b52JU7EW71Zexg6N8v";
    const MAINNET_P2SH: &str = "6Ld9mYPByYufyAwTa27xFP8GbaxChqzgja7dTEt";
    const TESTNET_P2PK: &str = "3WxZPvAUrDKXj17nHXDz2wA3R84FTNPFy3vTSjYY1GsjCyt7KpMD";

    #[test]
    fn test_valid_mainnet_addresses() {
        assert_eq!(validate_address(MAINNET_P2PK, NetworkType::Mainnet), Ok(AddressKind::P2pk));
        assert_eq!(validate_address(MAINNET_P2SH, NetworkType::Mainnet), Ok(AddressKind::P2sh));
    }

    #[test]
    fn test_valid_testnet_address() {
        assert_eq!(validate_address(TESTNET_P2PK, NetworkType::Testnet), Ok(AddressKind::P2pk));
    }

    #[test]
    fn test_wrong_network_rejected() {
        assert!(matches!(
            validate_address(MAINNET_P2PK, NetworkType::Testnet),
            Err(AddressError::WrongNetwork { .. })
        ));
        assert!(!is_valid_address(TESTNET_P2PK, NetworkType::Mainnet));
    }

    #[test]
    fn test_checksum_mismatch() {
        let tampered = "9eXWAAe1uEeub5ujQL5JCKefFjCP2LnVCKJPDrLFdALKCAB2VPa";
        assert_eq!(
            validate_address(tampered, NetworkType::Mainnet),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(validate_address("", NetworkType::Mainnet), Err(AddressError::Empty));
        // '0' and 'l' are outside the base58 alphabet
        assert_eq!(
            validate_address("0lO", NetworkType::Mainnet),
            Err(AddressError::InvalidEncoding)
        );
        assert!(matches!(
            validate_address("9f4Q", NetworkType::Mainnet),
            Err(AddressError::TooShort(_))
        ));
    }
}
