//! Hash primitives used throughout the curve engines and address codecs.
//!
//! Thin, typed wrappers over the RustCrypto hash crates — no hashing
//! algorithm is implemented by hand here, only the glue the rest of the
//! crate needs (fixed-size output arrays, a parameterizable Blake2b, and
//! the Bitcoin `hash160` composite).

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

use crate::error::{CryptoError, Result};

/// SHA-256 per FIPS 180-4.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-512 per FIPS 180-4.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

/// RIPEMD-160.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Keccak-256, the pre-NIST variant with padding byte `0x01` (not SHA3's
/// `0x06`) — what Ethereum and the EIP-55 checksum use.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// `hash160(x) = RIPEMD-160(SHA-256(x))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Blake2b with a caller-chosen output length in `1..=64` bytes, no key, no
/// salt, no personalization. Used by the Nimiq address hash (32 bytes) and
/// the Nano checksum (5 bytes).
pub fn blake2b(data: &[u8], out_len: usize) -> Result<Vec<u8>> {
    if out_len == 0 || out_len > 64 {
        return Err(CryptoError::InvalidLength);
    }
    let mut hasher = Blake2bVar::new(out_len).map_err(|_| CryptoError::InvalidLength)?;
    hasher.update(data);
    let mut out = vec![0u8; out_len];
    hasher
        .finalize_variable(&mut out)
        .map_err(|_| CryptoError::InvalidLength)?;
    Ok(out)
}

/// Blake2b-512, the expansion function behind the Nano Ed25519 derivation.
pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let out = blake2b(data, 64).expect("64 is a valid Blake2b output length");
    out.try_into().expect("blake2b(_, 64) always returns 64 bytes")
}

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA-256 per RFC 2104.
pub fn hmac_sha256(key: &[u8], msg: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(msg);
    mac.finalize().into_bytes().into()
}

/// HMAC-SHA-512 per RFC 2104.
pub fn hmac_sha512(key: &[u8], msg: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(msg);
    mac.finalize().into_bytes().into()
}
