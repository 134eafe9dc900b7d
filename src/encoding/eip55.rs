//! EIP-55 mixed-case checksum encoding for 20-byte Ethereum addresses.

use tracing::warn;

use crate::error::{CryptoError, Result};
use crate::hash::keccak256;

/// Renders `address` as lowercase hex, then uppercases each hex letter
/// whose corresponding nibble in `keccak256(lowercase_hex)` is `>= 8`.
pub fn checksum(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let digest = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        if c.is_ascii_alphabetic() {
            let byte = digest[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if nibble >= 8 {
                out.extend(c.to_uppercase());
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Parses a `0x`-prefixed hex address of either case, rejecting a mixed-case
/// string whose casing doesn't match the EIP-55 checksum.
pub fn parse(address: &str) -> Result<[u8; 20]> {
    let stripped = address.strip_prefix("0x").unwrap_or(address);
    if stripped.len() != 40 {
        return Err(CryptoError::InvalidLength);
    }
    let bytes = hex::decode(stripped).map_err(|_| CryptoError::InvalidHex)?;
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);

    let all_lower = stripped.chars().all(|c| !c.is_ascii_uppercase());
    let all_upper = stripped.chars().all(|c| !c.is_ascii_lowercase());
    if all_lower || all_upper {
        return Ok(out);
    }
    if checksum(&out) != format!("0x{}", stripped) {
        warn!("eip55: checksum casing mismatch");
        return Err(CryptoError::InvalidChecksum);
    }
    Ok(out)
}
