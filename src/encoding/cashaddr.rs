//! CashAddr, the Bitcoin Cash Bech32 variant: no HRP carried in the
//! payload itself (the prefix is just followed by `:`), a version byte
//! packing address type and hash-length code, and an 8-word 40-bit
//! checksum over a distinct GF(2^40) generator set.

use tracing::warn;

use crate::encoding::bech32::{from_words, to_words};
use crate::error::{CryptoError, Result};

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// The fixed Bitcoin Cash prefix this crate always emits (decode accepts
/// prefix-less input per spec.md §9, but never emits it).
pub const DEFAULT_PREFIX: &str = "bitcoincash";

/// P2PKH address type, packed into the top bits of the version byte.
pub const TYPE_P2PKH: u8 = 0;
/// P2SH address type.
pub const TYPE_P2SH: u8 = 1;

fn polymod(values: &[u64]) -> u64 {
    let mut c: u64 = 1;
    for &v in values {
        let c0 = c >> 35;
        c = ((c & 0x07ffffffff) << 5) ^ v;
        if c0 & 0x01 != 0 {
            c ^= 0x98f2bc8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79b76d99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf33e5fb3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae2eabe2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e4f43e470;
        }
    }
    c ^ 1
}

fn checksum(prefix: &str, data: &[u8]) -> [u8; 8] {
    let mut values: Vec<u64> = prefix.bytes().map(|b| (b & 0x1f) as u64).collect();
    values.push(0);
    values.extend(data.iter().map(|&b| b as u64));
    values.extend([0u64; 8]);

    let mod_value = polymod(&values);
    let mut out = [0u8; 8];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = ((mod_value >> (5 * (7 - i))) & 0x1f) as u8;
    }
    out
}

/// Size code for a 160-bit (20-byte) hash, per the CashAddr version-byte
/// layout — the only length this crate's address builders need.
const SIZE_CODE_160BIT: u8 = 0;

/// Encodes a 20-byte hash160 as a CashAddr string: `prefix:payload`.
pub fn encode(prefix: &str, addr_type: u8, hash160: &[u8; 20]) -> Result<String> {
    let version_byte = (addr_type << 3) | SIZE_CODE_160BIT;
    let mut payload = vec![version_byte];
    payload.extend_from_slice(hash160);
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

/// A decoded CashAddr payload.
pub struct Decoded {
    pub prefix: String,
    pub addr_type: u8,
    pub hash: Vec<u8>,
}

/// Decodes a CashAddr string, accepting a missing `prefix:` (defaulting to
/// [`DEFAULT_PREFIX`]) but verifying the checksum against whatever prefix
/// was actually used.
pub fn decode(s: &str) -> Result<Decoded> {
    let (prefix, payload) = match s.rfind(':') {
        Some(idx) => (&s[..idx], &s[idx + 1..]),
        None => (DEFAULT_PREFIX, s),
    };
    if payload.len() < 8 {
        return Err(CryptoError::InvalidBech32);
    }

    let mut words = Vec::with_capacity(payload.len());
    for c in payload.chars() {
        let idx = CHARSET
            .iter()
            .position(|&b| b as char == c)
            .ok_or(CryptoError::InvalidBech32)?;
        words.push(idx as u8);
    }

    let (data, checksum_words) = words.split_at(words.len() - 8);
    if checksum(prefix, data) != checksum_words {
        warn!(prefix, "cashaddr: checksum mismatch");
        return Err(CryptoError::InvalidChecksum);
    }

    let decoded_payload = from_words(data, true)?;
    if decoded_payload.is_empty() {
        return Err(CryptoError::InvalidLength);
    }
    let version_byte = decoded_payload[0];
    let addr_type = version_byte >> 3;
    let hash = decoded_payload[1..].to_vec();
    if hash.len() != 20 {
        return Err(CryptoError::InvalidLength);
    }

    Ok(Decoded {
        prefix: prefix.to_string(),
        addr_type,
        hash,
    })
}
