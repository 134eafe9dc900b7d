//! Base58 and Base58Check, the encoding behind WIF and every legacy
//! (non-SegWit) address in this crate.

use tracing::warn;

use crate::error::{CryptoError, Result};
use crate::hash::sha256;

const ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn decode_table() -> [i8; 128] {
    let mut table = [-1i8; 128];
    for (value, &byte) in ALPHABET.iter().enumerate() {
        table[byte as usize] = value as i8;
    }
    table
}

/// Encodes bytes as Base58, prefixing one `'1'` per leading zero byte.
pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    let capacity = data.len() * 138 / 100 + 1;
    let mut digits: Vec<u8> = Vec::with_capacity(capacity);

    for &byte in data {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            let value = (*digit as u32) * 256 + carry;
            *digit = (value % 58) as u8;
            carry = value / 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}

/// Decodes a Base58 string, rejecting any character outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let table = decode_table();
    let zeros = s.chars().take_while(|&c| c == '1').count();

    let capacity = s.len() * 733 / 1000 + 1;
    let mut bytes: Vec<u8> = Vec::with_capacity(capacity);

    for c in s.chars() {
        if !c.is_ascii() {
            return Err(CryptoError::InvalidBase58);
        }
        let digit = table[c as usize];
        if digit < 0 {
            return Err(CryptoError::InvalidBase58);
        }
        let mut carry = digit as u32;
        for byte in bytes.iter_mut() {
            let value = (*byte as u32) * 58 + carry;
            *byte = (value % 256) as u8;
            carry = value / 256;
        }
        while carry > 0 {
            bytes.push((carry % 256) as u8);
            carry /= 256;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// `checksum = SHA-256(SHA-256(payload))[0..4]`; returns `payload ‖ checksum`
/// Base58-encoded.
pub fn check_encode(payload: &[u8]) -> String {
    let first = sha256(payload);
    let second = sha256(&first);
    let mut full = payload.to_vec();
    full.extend_from_slice(&second[..4]);
    encode(&full)
}

/// Decodes a Base58Check string, verifying and stripping the trailing
/// 4-byte checksum.
pub fn check_decode(s: &str) -> Result<Vec<u8>> {
    let data = decode(s)?;
    if data.len() < 4 {
        return Err(CryptoError::InvalidLength);
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    let first = sha256(payload);
    let second = sha256(&first);
    if &second[..4] != checksum {
        warn!("base58check: checksum mismatch");
        return Err(CryptoError::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let data = b"\x00\x01\x09\x66\x77\x60\x06\x95\x3d\x55\x67\x43\x9e\x5e\x39\xf8\x6a\x0d\x27\x3b\xee";
        let encoded = encode(data);
        assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn leading_zeros_become_leading_ones() {
        let data = [0u8, 0u8, 1u8];
        assert!(encode(&data).starts_with("11"));
    }

    #[test]
    fn decode_rejects_out_of_alphabet_char() {
        assert_eq!(decode("0OIl"), Err(CryptoError::InvalidBase58));
    }

    #[test]
    fn check_round_trip() {
        let payload = [0x00u8, 0x01, 0x02, 0x03, 0x04];
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn check_decode_rejects_flipped_character() {
        let payload = [0x00u8, 0x01, 0x02, 0x03, 0x04];
        let encoded = check_encode(&payload);
        let mut chars: Vec<char> = encoded.chars().collect();
        let idx = chars.len() / 2;
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        let flipped: String = chars.into_iter().collect();
        assert_eq!(check_decode(&flipped), Err(CryptoError::InvalidChecksum));
    }

    #[test]
    fn known_vector_wif_payload() {
        // From spec.md §8 vector 1: privkey = 1.
        let mut payload = vec![0x80u8];
        let mut key = [0u8; 32];
        key[31] = 1;
        payload.extend_from_slice(&key);
        payload.push(0x01);
        let wif = check_encode(&payload);
        assert_eq!(wif, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn");
    }
}
