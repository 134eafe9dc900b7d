//! Nano addresses: a custom Base32 alphabet over a 32-byte public key
//! padded with 4 leading zero bits, followed by a byte-reversed Blake2b-5
//! checksum, under the `nano_` prefix.

use num_bigint::BigUint;
use tracing::warn;

use crate::error::{CryptoError, Result};
use crate::hash::blake2b;

const ALPHABET: &[u8] = b"13456789abcdefghijkmnopqrstuwxyz";

fn alphabet_index(c: char) -> Option<u8> {
    ALPHABET.iter().position(|&b| b as char == c).map(|i| i as u8)
}

const PREFIX: &str = "nano_";

/// Packs `0000 ‖ pubkey` (4 zero bits + 256 key bits = 260 bits) into 52
/// Base32 characters, MSB-first.
fn encode_pubkey(pubkey: &[u8; 32]) -> String {
    let mut acc: u32 = 0;
    let mut bits: u32 = 4;
    let mut out = String::with_capacity(52);
    for &byte in pubkey {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
    }
    out
}

fn decode_pubkey(chars: &str) -> Result<[u8; 32]> {
    if chars.len() != 52 {
        return Err(CryptoError::InvalidLength);
    }
    // 52 base-32 digits carry 260 bits: a 4-bit zero pad above the 256-bit
    // key. Accumulating byte-sized chunks as they become available
    // misaligns at that boundary (260 isn't a multiple of 8), so the whole
    // digit string is read into one big-endian integer first instead.
    let mut value = BigUint::from(0u32);
    for c in chars.chars() {
        let word = alphabet_index(c).ok_or(CryptoError::InvalidLength)?;
        value = (value << 5u32) + BigUint::from(word);
    }
    if (value.clone() >> 256u32) != BigUint::from(0u32) {
        return Err(CryptoError::InvalidLength);
    }
    let bytes = value.to_bytes_be();
    let mut key = [0u8; 32];
    key[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(key)
}

/// Packs 5 checksum bytes into 8 Base32 characters, MSB-first.
fn encode_checksum(bytes: &[u8; 5]) -> String {
    let mut acc: u64 = 0;
    let mut bits: u32 = 0;
    let mut out = String::with_capacity(8);
    for &byte in bytes {
        acc = (acc << 8) | byte as u64;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
    }
    out
}

fn decode_checksum(chars: &str) -> Result<[u8; 5]> {
    if chars.len() != 8 {
        return Err(CryptoError::InvalidLength);
    }
    let mut acc: u64 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(5);
    for c in chars.chars() {
        let word = alphabet_index(c).ok_or(CryptoError::InvalidLength)?;
        acc = (acc << 5) | word as u64;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if out.len() != 5 {
        return Err(CryptoError::InvalidLength);
    }
    let mut result = [0u8; 5];
    result.copy_from_slice(&out);
    Ok(result)
}

fn checksum_of(pubkey: &[u8; 32]) -> Result<[u8; 5]> {
    let digest = blake2b(pubkey, 5)?;
    let mut bytes = [0u8; 5];
    bytes.copy_from_slice(&digest);
    bytes.reverse();
    Ok(bytes)
}

/// Builds `nano_` ‖ base32(pubkey) ‖ base32(reversed blake2b-5(pubkey)).
pub fn encode(pubkey: &[u8; 32]) -> Result<String> {
    let checksum = checksum_of(pubkey)?;
    Ok(format!(
        "{}{}{}",
        PREFIX,
        encode_pubkey(pubkey),
        encode_checksum(&checksum)
    ))
}

/// Parses and checksum-verifies a Nano address, returning the 32-byte
/// public key.
pub fn decode(s: &str) -> Result<[u8; 32]> {
    let body = s.strip_prefix(PREFIX).ok_or(CryptoError::InvalidLength)?;
    if body.len() != 60 {
        return Err(CryptoError::InvalidLength);
    }
    let (pubkey_part, checksum_part) = body.split_at(52);
    let pubkey = decode_pubkey(pubkey_part)?;
    let checksum = decode_checksum(checksum_part)?;
    if checksum_of(&pubkey)? != checksum {
        warn!("nano: checksum mismatch");
        return Err(CryptoError::InvalidChecksum);
    }
    Ok(pubkey)
}
