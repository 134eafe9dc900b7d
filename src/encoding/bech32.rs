//! BIP-173 Bech32: human-readable part, separator `1`, 5-bit word payload,
//! 6-word checksum. The 8↔5 bit repacker here (`to_words`/`from_words`) is
//! shared by the CashAddr and Kaspa variants in sibling modules, which swap
//! in their own HRP-expansion and polymod rules.

use tracing::warn;

use crate::error::{CryptoError, Result};

const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

fn charset_index(c: char) -> Option<u8> {
    CHARSET.iter().position(|&b| b as char == c).map(|i| i as u8)
}

/// Converts a byte string into 5-bit words, MSB-first, zero-padding the
/// final word. Never truncates.
pub fn to_words(bytes: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity((bytes.len() * 8 + 4) / 5);
    for &byte in bytes {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Inverse of [`to_words`]. When `strict` is set, any non-zero leftover
/// bits are rejected as [`CryptoError::InvalidBech32`] (required on decode
/// per BIP-173); callers packing data for re-encoding may pass `false`.
pub fn from_words(words: &[u8], strict: bool) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(words.len() * 5 / 8);
    for &word in words {
        if word > 31 {
            return Err(CryptoError::InvalidBech32);
        }
        acc = (acc << 5) | word as u32;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if strict && bits >= 5 {
        return Err(CryptoError::InvalidBech32);
    }
    if strict && (acc & ((1 << bits) - 1)) != 0 {
        return Err(CryptoError::InvalidBech32);
    }
    Ok(out)
}

fn hrp_expand(hrp: &str) -> Vec<u8> {
    let mut out: Vec<u8> = hrp.bytes().map(|b| b >> 5).collect();
    out.push(0);
    out.extend(hrp.bytes().map(|b| b & 31));
    out
}

const GENERATOR: [u32; 5] = [
    0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3,
];

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = (chk & 0x1ffffff) << 5 ^ v as u32;
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 != 0 {
                chk ^= gen;
            }
        }
    }
    chk
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; 6]);
    let polymod = polymod(&values) ^ 1;
    let mut checksum = [0u8; 6];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot = ((polymod >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == 1
}

/// A decoded Bech32 string: human-readable part plus its 5-bit data words
/// (checksum words stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub hrp: String,
    pub words: Vec<u8>,
}

/// Encodes `hrp ‖ '1' ‖ words ‖ checksum`.
pub fn encode(hrp: &str, words: &[u8]) -> Result<String> {
    if hrp.is_empty() || !hrp.is_ascii() {
        return Err(CryptoError::InvalidBech32);
    }
    let checksum = create_checksum(hrp, words);
    let mut out = String::with_capacity(hrp.len() + 1 + words.len() + 6);
    out.push_str(hrp);
    out.push('1');
    for &w in words.iter().chain(checksum.iter()) {
        out.push(CHARSET[w as usize] as char);
    }
    Ok(out)
}

/// Decodes and checksum-verifies a Bech32 string.
pub fn decode(s: &str) -> Result<Decoded> {
    if s.chars().any(|c| c.is_ascii_uppercase()) && s.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CryptoError::InvalidBech32);
    }
    let lower = s.to_ascii_lowercase();
    let sep = lower.rfind('1').ok_or(CryptoError::InvalidBech32)?;
    if sep == 0 || sep + 7 > lower.len() {
        return Err(CryptoError::InvalidBech32);
    }
    let hrp = &lower[..sep];
    let data_part = &lower[sep + 1..];

    let mut words = Vec::with_capacity(data_part.len());
    for c in data_part.chars() {
        words.push(charset_index(c).ok_or(CryptoError::InvalidBech32)?);
    }

    if !verify_checksum(hrp, &words) {
        warn!(hrp, "bech32: checksum mismatch");
        return Err(CryptoError::InvalidChecksum);
    }
    let data_len = words.len() - 6;
    words.truncate(data_len);
    Ok(Decoded {
        hrp: hrp.to_string(),
        words,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_words_from_words_round_trip() {
        let data = b"hello bech32";
        let words = to_words(data);
        assert_eq!(from_words(&words, false).unwrap(), data);
    }

    #[test]
    fn encode_decode_round_trip() {
        let words = to_words(&[0u8; 20]);
        let mut payload = vec![0u8];
        payload.extend_from_slice(&words);
        let encoded = encode("bc", &payload).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.hrp, "bc");
        assert_eq!(decoded.words, payload);
    }

    #[test]
    fn flipped_character_breaks_checksum() {
        let words = to_words(&[1u8; 20]);
        let mut payload = vec![0u8];
        payload.extend_from_slice(&words);
        let encoded = encode("bc", &payload).unwrap();
        let mut chars: Vec<char> = encoded.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'q' { 'p' } else { 'q' };
        let flipped: String = chars.into_iter().collect();
        assert_eq!(decode(&flipped), Err(CryptoError::InvalidChecksum));
    }

    #[test]
    fn rejects_mixed_case() {
        assert_eq!(decode("Bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"), Err(CryptoError::InvalidBech32));
    }

    #[test]
    fn known_segwit_vector() {
        // BIP-173 reference test vector (20-byte witness program).
        let hash160 = [
            0x75u8, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4, 0x54, 0x94, 0x1c, 0x45, 0xd1, 0xb3,
            0xa3, 0x23, 0xf1, 0x43, 0x3b, 0xd6,
        ];
        let mut payload = vec![0u8];
        payload.extend(to_words(&hash160));
        let addr = encode("bc", &payload).unwrap();
        assert_eq!(addr, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
    }
}
