//! The two curve engines the rest of the crate derives public keys with.

pub mod ed25519;
pub mod secp256k1;
