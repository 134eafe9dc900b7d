//! Low-level curve, hashing, and address-encoding primitives for
//! cryptocurrency wallets.
//!
//! This crate has no notion of a wallet, a transaction, or a network — it
//! is the arithmetic and encoding layer a wallet's key-management code sits
//! on top of: scalar multiplication on two curves, the hash and checksum
//! chains each chain's address format is built from, and the handful of
//! string codecs (Base58Check, the Bech32 family, two currency-specific
//! Base32s) those addresses are rendered in.
//!
//! Every fallible entry point returns [`error::Result`]; nothing panics on
//! untrusted input. [`selftest`] offers a handful of known-answer checks a
//! caller can run at startup to catch a broken build before it ever touches
//! a real key.

pub mod address;
pub mod bigint;
pub mod curves;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod nano_raw;
pub mod selftest;
pub mod wif;

pub use error::{CryptoError, Result};
