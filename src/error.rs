//! Crate-wide error type.
//!
//! Every fallible public function returns one of these variants. Callers
//! that need to react differently to, say, a bad checksum versus a
//! malformed hex string can match on the kind instead of parsing a message.

use thiserror::Error;

/// The distinguishable failure modes of this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Hex string had an odd length or contained a non-hex character.
    #[error("invalid hex input")]
    InvalidHex,

    /// Scalar was zero or greater than or equal to the curve order.
    #[error("invalid scalar: out of range [1, n-1]")]
    InvalidScalar,

    /// Point decompression failed: no square root, bad prefix, or off-curve.
    #[error("invalid curve point")]
    InvalidPoint,

    /// A character outside the Base58 alphabet was encountered.
    #[error("invalid base58 character")]
    InvalidBase58,

    /// A checksum (Base58Check, Bech32, CashAddr, Kaspa, IBAN-97, Blake2b-5)
    /// did not verify.
    #[error("checksum verification failed")]
    InvalidChecksum,

    /// Malformed Bech32-family string: mixed case, bad HRP, missing
    /// separator, oversized, or non-zero padding bits on strict decode.
    #[error("invalid bech32 encoding")]
    InvalidBech32,

    /// A payload had the wrong size for the requested operation.
    #[error("invalid length for this operation")]
    InvalidLength,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CryptoError>;
