//! Chain-level primitives shared by the sub-pool crates:
//! network selection, address validation and secret handling.

pub mod address;
pub mod network;
pub mod secret;

pub use address::{is_valid_address, validate_address, AddressError, AddressKind};
pub use network::{NetworkType, UnknownNetwork};
pub use secret::Secret;
