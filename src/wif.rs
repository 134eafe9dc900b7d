//! Wallet Import Format: a versioned, optionally compression-flagged,
//! Base58Check-encoded private key.

use crate::encoding::base58;
use crate::error::Result;

/// Mainnet version bytes for the four legacy chains this crate supports.
pub mod version {
    pub const BITCOIN: u8 = 0x80;
    pub const LITECOIN: u8 = 0xb0;
    pub const DOGECOIN: u8 = 0x9e;
    pub const DASH: u8 = 0xcc;
}

/// `b58check_encode(version ‖ privkey ‖ (0x01 if compressed))`.
pub fn encode(version: u8, privkey32: &[u8; 32], compressed: bool) -> Result<String> {
    let mut payload = Vec::with_capacity(34);
    payload.push(version);
    payload.extend_from_slice(privkey32);
    if compressed {
        payload.push(0x01);
    }
    Ok(base58::check_encode(&payload))
}

/// Decodes a WIF string, returning `(version, privkey32, compressed)`.
pub fn decode(s: &str) -> Result<(u8, [u8; 32], bool)> {
    let payload = base58::check_decode(s)?;
    if payload.len() != 33 && payload.len() != 34 {
        return Err(crate::error::CryptoError::InvalidLength);
    }
    let version = payload[0];
    let compressed = payload.len() == 34;
    let mut privkey = [0u8; 32];
    privkey.copy_from_slice(&payload[1..33]);
    Ok((version, privkey, compressed))
}
