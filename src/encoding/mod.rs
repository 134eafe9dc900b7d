//! Byte-to-text address encodings: Base58(Check), the Bech32 family, and
//! the per-currency Base32 variants used by Nimiq and Nano.

pub mod base58;
pub mod bech32;
pub mod cashaddr;
pub mod eip55;
pub mod kaspa;
pub mod nano;
pub mod nimiq;
