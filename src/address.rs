//! Per-currency address builders: public key (or its hash) in, address
//! string out. Each pipeline composes a hash chain from [`crate::hash`]
//! with one codec from [`crate::encoding`].

use tracing::debug;

use crate::encoding::{base58, bech32, cashaddr, eip55, kaspa, nano, nimiq};
use crate::error::{CryptoError, Result};
use crate::hash::{blake2b, hash160, keccak256};

/// Version bytes for the legacy (Base58Check) address family.
pub mod version {
    pub const BITCOIN: u8 = 0x00;
    pub const LITECOIN: u8 = 0x30;
    pub const DOGECOIN: u8 = 0x1e;
    pub const DASH: u8 = 0x4c;
}

/// `b58check_encode(version ‖ hash160(pubkey))` — Bitcoin, Litecoin,
/// Dogecoin, Dash legacy addresses all share this pipeline.
pub fn legacy_address(version: u8, pubkey: &[u8]) -> String {
    debug!(version, "address::legacy_address");
    let mut payload = vec![version];
    payload.extend_from_slice(&hash160(pubkey));
    base58::check_encode(&payload)
}

/// Native SegWit address: `bech32(hrp, [0] ‖ to_words(hash160(pubkey)))`.
pub fn segwit_address(hrp: &str, pubkey: &[u8]) -> Result<String> {
    debug!(hrp, "address::segwit_address");
    let hash = hash160(pubkey);
    let mut payload = vec![0u8];
    payload.extend(bech32::to_words(&hash));
    bech32::encode(hrp, &payload)
}

/// Ethereum address: `keccak256(uncompressed_pubkey[1..])[12..32]`, EIP-55
/// cased. `uncompressed_pubkey` is the 65-byte `04 ‖ x ‖ y` form.
pub fn ethereum_address(uncompressed_pubkey: &[u8; 65]) -> Result<String> {
    debug!("address::ethereum_address");
    if uncompressed_pubkey[0] != 0x04 {
        return Err(CryptoError::InvalidPoint);
    }
    let digest = keccak256(&uncompressed_pubkey[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..32]);
    Ok(eip55::checksum(&addr))
}

/// Converts a legacy Base58Check address to its CashAddr equivalent,
/// discarding the legacy version byte and reusing the 20-byte hash under
/// the fixed `"bitcoincash"` prefix, version 0 (P2PKH).
pub fn legacy_to_cashaddr(legacy_address: &str) -> Result<String> {
    let payload = base58::check_decode(legacy_address)?;
    if payload.len() != 21 {
        return Err(CryptoError::InvalidLength);
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    cashaddr::encode(cashaddr::DEFAULT_PREFIX, cashaddr::TYPE_P2PKH, &hash)
}

/// Kaspa address from a 33-byte compressed secp256k1 pubkey: drops the
/// `02`/`03` prefix to get the x-only key, then Kaspa-Bech32 encodes
/// `[version=0] ‖ x`.
pub fn kaspa_address(compressed_pubkey: &[u8]) -> Result<String> {
    if compressed_pubkey.len() != 33 {
        return Err(CryptoError::InvalidLength);
    }
    let mut x = [0u8; 32];
    x.copy_from_slice(&compressed_pubkey[1..]);
    kaspa::encode(kaspa::DEFAULT_PREFIX, kaspa::VERSION_PUBKEY, &x)
}

/// Nimiq address: `Blake2b-256(ed25519_pubkey)[0..20]`, Nimiq Base32 plus
/// IBAN-97 checksum.
pub fn nimiq_address(ed25519_pubkey: &[u8; 32]) -> Result<String> {
    let digest = blake2b(ed25519_pubkey, 32)?;
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&digest[..20]);
    nimiq::encode(&hash)
}

/// Nano address from a Nano-variant (Blake2b-512-derived) Ed25519 pubkey.
pub fn nano_address(ed25519_pubkey: &[u8; 32]) -> Result<String> {
    nano::encode(ed25519_pubkey)
}
