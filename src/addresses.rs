use crate::errors::FieldError;
use serde::Deserialize;

/// First byte of every TRON account address.
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Prefix byte plus the 20-byte account hash.
const ADDRESS_BYTES: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    /// Base58check, the `T...` form users usually see.
    Base58,
    /// Hex with the `41` prefix.
    Hex,
}

impl AddressFormat {
    pub fn detect(address: &str) -> Option<Self> {
        if is_base58_address(address) {
            Some(Self::Base58)
        } else if is_hex_address(address) {
            Some(Self::Hex)
        } else {
            None
        }
    }
}

pub fn is_address(address: &str) -> bool {
    AddressFormat::detect(address).is_some()
}

fn is_base58_address(address: &str) -> bool {
    if !address.starts_with('T') {
        return false;
    }

    bs58::decode(address)
        .with_check(Some(ADDRESS_PREFIX))
        .into_vec()
        .is_ok_and(|payload| payload.len() == ADDRESS_BYTES)
}

fn is_hex_address(address: &str) -> bool {
    if address.len() != ADDRESS_BYTES * 2 || !address.starts_with("41") {
        return false;
    }

    hex::decode(address).is_ok()
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddressRequest {
    pub address: String,
}

pub fn validate_address(address: &str) -> Result<(), FieldError> {
    if is_address(address) {
        Ok(())
    } else {
        Err(FieldError::invalid_address())
    }
}
