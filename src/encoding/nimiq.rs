//! Nimiq addresses: a custom Base32 alphabet over a 20-byte hash, prefixed
//! with `NQ` and an IBAN-style (ISO 7064 MOD97-10) check digit pair.

use tracing::warn;

use crate::error::{CryptoError, Result};

const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKLMNPQRSTUVXY";

fn alphabet_index(c: char) -> Option<u8> {
    ALPHABET.iter().position(|&b| b as char == c).map(|i| i as u8)
}

/// Packs bytes into 5-bit groups and maps each to the Nimiq alphabet,
/// MSB-first, zero-padding the final group — same bit-packing shape as
/// [`crate::encoding::bech32::to_words`], emitting characters directly.
pub fn encode_base32(bytes: &[u8]) -> String {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = String::with_capacity((bytes.len() * 8 + 4) / 5);
    for &byte in bytes {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((acc << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Inverse of [`encode_base32`]. Rejects characters outside the alphabet
/// and non-zero leftover padding bits.
pub fn decode_base32(s: &str) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(s.len() * 5 / 8);
    for c in s.chars() {
        let word = alphabet_index(c).ok_or(CryptoError::InvalidLength)?;
        acc = (acc << 5) | word as u32;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (acc & ((1 << bits) - 1)) != 0 {
        return Err(CryptoError::InvalidLength);
    }
    Ok(out)
}

/// ISO 7064 MOD97-10 over the decimal expansion of `rearranged`, where
/// letters map to `A=10 .. Z=35`, computed digit-by-digit to avoid needing
/// bignum arithmetic on an arbitrarily long numeric string.
fn mod97(rearranged: &str) -> Result<u32> {
    let mut acc: u32 = 0;
    for c in rearranged.chars() {
        if c.is_ascii_digit() {
            acc = (acc * 10 + c.to_digit(10).unwrap()) % 97;
        } else if c.is_ascii_uppercase() {
            let value = 10 + (c as u32 - 'A' as u32);
            acc = (acc * 100 + value) % 97;
        } else {
            return Err(CryptoError::InvalidChecksum);
        }
    }
    Ok(acc)
}

fn checksum(base32_addr: &str) -> Result<u32> {
    let rearranged = format!("{}NQ00", base32_addr);
    let remainder = mod97(&rearranged)?;
    Ok(98 - remainder)
}

/// Builds `"NQ" ‖ checksum ‖ base32(hash)` from a 20-byte address hash.
pub fn encode(hash20: &[u8; 20]) -> Result<String> {
    let base32_addr = encode_base32(hash20);
    let check = checksum(&base32_addr)?;
    Ok(format!("NQ{:02}{}", check, base32_addr))
}

/// Parses and checksum-verifies a Nimiq address, returning the 20-byte hash.
pub fn decode(s: &str) -> Result<[u8; 20]> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() != 36 || !cleaned.starts_with("NQ") {
        return Err(CryptoError::InvalidLength);
    }
    let check_digits = &cleaned[2..4];
    let base32_addr = &cleaned[4..];
    let expected = check_digits
        .parse::<u32>()
        .map_err(|_| CryptoError::InvalidChecksum)?;
    if checksum(base32_addr)? != expected {
        warn!("nimiq: checksum mismatch");
        return Err(CryptoError::InvalidChecksum);
    }
    let bytes = decode_base32(base32_addr)?;
    if bytes.len() != 20 {
        return Err(CryptoError::InvalidLength);
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let hash = [0xabu8; 20];
        let addr = encode(&hash).unwrap();
        assert!(addr.starts_with("NQ"));
        assert_eq!(decode(&addr).unwrap(), hash);
    }

    #[test]
    fn rejects_bad_checksum() {
        let hash = [0x01u8; 20];
        let mut addr = encode(&hash).unwrap();
        // Flip a base32 payload character, leaving the check digits untouched.
        let mut chars: Vec<char> = addr.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '0' { '1' } else { '0' };
        addr = chars.into_iter().collect();
        assert_eq!(decode(&addr), Err(CryptoError::InvalidChecksum));
    }

    #[test]
    fn base32_round_trip() {
        let data = [0x12u8, 0x34, 0x56, 0x78, 0x9a];
        let encoded = encode_base32(&data);
        assert_eq!(decode_base32(&encoded).unwrap(), data);
    }

    #[test]
    fn encode_matches_known_hash_vector() {
        // Blake2b-256(pubkey)[0..20] for the SHA-512-derived keypair
        // exercised end-to-end in tests/vectors.rs.
        let hash = hex::decode("1e4d05a58c2164e770875facd26050f7eb9a5934").unwrap();
        let mut hash20 = [0u8; 20];
        hash20.copy_from_slice(&hash);
        assert_eq!(encode(&hash20).unwrap(), "NQ913R6GB9CC45JEEU47BXND4Q2GXYMRLN9L");
    }
}
