//! Kaspa's Bech32 variant: same 8↔5 repacker as [`crate::encoding::bech32`],
//! but the prefix is expanded into only the low 5 bits of each character
//! (no high-bits block, no separator zero) and checksummed with its own
//! 40-bit generator set, using `:` instead of `1` as the separator.

use tracing::warn;

use crate::encoding::bech32::{from_words, to_words};
use crate::error::{CryptoError, Result};

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

pub const DEFAULT_PREFIX: &str = "kaspa";

/// Version byte for a plain Schnorr (x-only) public key payload.
pub const VERSION_PUBKEY: u8 = 0;

fn polymod(values: &[u64]) -> u64 {
    const GENERATOR: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];
    let mut c: u64 = 1;
    for &v in values {
        let c0 = c >> 35;
        c = ((c & 0x07ffffffff) << 5) ^ v;
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= gen;
            }
        }
    }
    c ^ 1
}

fn prefix_expand(prefix: &str) -> Vec<u64> {
    prefix.bytes().map(|b| (b & 0x1f) as u64).collect()
}

fn checksum(prefix: &str, data: &[u8]) -> [u8; 8] {
    let mut values = prefix_expand(prefix);
    values.extend(data.iter().map(|&b| b as u64));
    values.extend([0u64; 8]);

    let mod_value = polymod(&values);
    let mut out = [0u8; 8];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = ((mod_value >> (5 * (7 - i))) & 0x1f) as u8;
    }
    out
}

/// Encodes a 32-byte x-only public key as a Kaspa address: `prefix:payload`.
pub fn encode(prefix: &str, version: u8, pubkey_x: &[u8; 32]) -> Result<String> {
    let mut payload = vec![version];
    payload.extend_from_slice(pubkey_x);
    let data = to_words(&payload);

    let checksum_words = checksum(prefix, &data);

    let mut out = String::with_capacity(prefix.len() + 1 + data.len() + 8);
    out.push_str(prefix);
    out.push(':');
    for &w in data.iter().chain(checksum_words.iter()) {
        out.push(CHARSET[w as usize] as char);
    }
    Ok(out)
}

pub struct Decoded {
    pub prefix: String,
    pub version: u8,
    pub pubkey_x: Vec<u8>,
}

pub fn decode(s: &str) -> Result<Decoded> {
    let idx = s.rfind(':').ok_or(CryptoError::InvalidBech32)?;
    let prefix = &s[..idx];
    let payload = &s[idx + 1..];
    if prefix.is_empty() || payload.len() < 8 {
        return Err(CryptoError::InvalidBech32);
    }

    let mut words = Vec::with_capacity(payload.len());
    for c in payload.chars() {
        let pos = CHARSET
            .iter()
            .position(|&b| b as char == c)
            .ok_or(CryptoError::InvalidBech32)?;
        words.push(pos as u8);
    }

    let (data, checksum_words) = words.split_at(words.len() - 8);
    if checksum(prefix, data) != checksum_words {
        warn!(prefix, "kaspa: checksum mismatch");
        return Err(CryptoError::InvalidChecksum);
    }

    let decoded_payload = from_words(data, true)?;
    if decoded_payload.is_empty() {
        return Err(CryptoError::InvalidLength);
    }
    let version = decoded_payload[0];
    let pubkey_x = decoded_payload[1..].to_vec();
    if pubkey_x.len() != 32 {
        return Err(CryptoError::InvalidLength);
    }

    Ok(Decoded {
        prefix: prefix.to_string(),
        version,
        pubkey_x,
    })
}
