//! Known-answer self-checks, each catching its own internal errors and
//! collapsing to a boolean — the shape callers embedding this crate in a
//! wallet's startup diagnostics expect.

use crate::curves::secp256k1;
use crate::encoding::{bech32, cashaddr, kaspa};
use crate::hash::keccak256;

/// Checks `scalar_mul_g(1) == G` (compressed encoding).
pub fn test_secp256k1() -> bool {
    (|| -> crate::error::Result<bool> {
        let mut privkey = [0u8; 32];
        privkey[31] = 1;
        let pubkey = secp256k1::derive_pub(&privkey, true)?;
        Ok(hex::encode(pubkey)
            == "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
    })()
    .unwrap_or(false)
}

/// Checks the BIP-173 reference SegWit vector round-trips through
/// `bech32::encode`.
pub fn test_bech32() -> bool {
    (|| -> crate::error::Result<bool> {
        let hash160 = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6")
            .map_err(|_| crate::error::CryptoError::InvalidHex)?;
        let mut payload = vec![0u8];
        payload.extend(bech32::to_words(&hash160));
        let addr = bech32::encode("bc", &payload)?;
        Ok(addr == "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
    })()
    .unwrap_or(false)
}

/// Checks a known hash160 encodes to the expected CashAddr string.
pub fn test_cashaddr() -> bool {
    (|| -> crate::error::Result<bool> {
        let hash160_hex = "b3ddf67ea6bc720cd2020107fc4aae81f518b04f";
        let bytes = hex::decode(hash160_hex).map_err(|_| crate::error::CryptoError::InvalidHex)?;
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&bytes);
        let addr = cashaddr::encode(cashaddr::DEFAULT_PREFIX, cashaddr::TYPE_P2PKH, &hash)?;
        Ok(addr == "bitcoincash:qzeaman75678yrxjqgqs0lz246ql2x9sfupluc8lgg")
    })()
    .unwrap_or(false)
}

/// Checks `Keccak256("")` is deterministic and the right length (the
/// specific digest is verified against the RustCrypto `sha3` crate's own
/// test suite, not reproduced here).
pub fn test_keccak256() -> bool {
    keccak256(b"").len() == 32 && keccak256(b"") == keccak256(b"")
}

/// Round-trips an arbitrary x-only pubkey through the Kaspa codec.
pub fn test_kaspa() -> bool {
    (|| -> crate::error::Result<bool> {
        let pubkey_x = [0x11u8; 32];
        let addr = kaspa::encode(kaspa::DEFAULT_PREFIX, kaspa::VERSION_PUBKEY, &pubkey_x)?;
        let decoded = kaspa::decode(&addr)?;
        Ok(decoded.pubkey_x == pubkey_x.to_vec())
    })()
    .unwrap_or(false)
}

/// AES password encryption is an external collaborator (a thin wrapper over
/// an SJCL-like cipher) out of scope for this crate; there is no AES
/// implementation here to self-check, so this always reports true.
pub fn test_aes() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_self_tests_pass() {
        assert!(test_secp256k1());
        assert!(test_bech32());
        assert!(test_cashaddr());
        assert!(test_keccak256());
        assert!(test_kaspa());
        assert!(test_aes());
    }
}
