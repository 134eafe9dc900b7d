//! Field arithmetic over an arbitrary prime modulus.
//!
//! Both curve engines (secp256k1's base/scalar fields, Ed25519's base
//! field) and the NANO→raw decimal conversion need big-integer math; this
//! module is the single leaf the rest of the crate builds on, backed by
//! `num-bigint` rather than a hand-rolled 256-bit type.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};

use crate::error::{CryptoError, Result};

/// Reduces `a` into the unique representative in `[0, p)`.
pub fn mod_reduce(a: &BigUint, p: &BigUint) -> BigUint {
    a % p
}

/// `b^e mod p` by square-and-multiply (delegates to `BigUint::modpow`,
/// which implements the same ladder).
pub fn pow_mod(b: &BigUint, e: &BigUint, p: &BigUint) -> BigUint {
    b.modpow(e, p)
}

/// `(a + b) mod p`.
pub fn add_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + b) % p
}

/// `(a - b) mod p`, correct even when `a < b`.
pub fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + p - (b % p)) % p
}

/// `(a * b) mod p`.
pub fn mul_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a * b) % p
}

/// Modular inverse of `a` mod `p` via the extended Euclidean algorithm.
///
/// Fails with [`CryptoError::InvalidPoint`] when `gcd(a, p) != 1`, which for
/// the prime moduli used in this crate only happens when `a ≡ 0 (mod p)`.
pub fn invert(a: &BigUint, p: &BigUint) -> Result<BigUint> {
    let n = BigInt::from_biguint(Sign::Plus, p.clone());
    let mut t = BigInt::zero();
    let mut new_t = BigInt::one();
    let mut r = n.clone();
    let mut new_r = BigInt::from_biguint(Sign::Plus, a % p);

    while !new_r.is_zero() {
        let quotient = &r / &new_r;

        let prev_t = t.clone();
        t = new_t.clone();
        new_t = prev_t - &quotient * &new_t;

        let prev_r = r.clone();
        r = new_r.clone();
        new_r = prev_r - &quotient * &new_r;
    }

    if r.abs() > BigInt::one() {
        return Err(CryptoError::InvalidPoint);
    }

    if t.is_negative() {
        t += &n;
    }

    let (sign, digits) = t.into_parts();
    debug_assert_eq!(sign, Sign::Plus);
    Ok(digits)
}

/// Square root of `a` mod `p` for `p ≡ 3 (mod 4)` (true for both
/// secp256k1's and Ed25519's base field primes).
///
/// Returns `a^((p+1)/4) mod p` after checking it actually squares back to
/// `a`; fails with [`CryptoError::InvalidPoint`] if `a` has no square root.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Result<BigUint> {
    let three = BigUint::from(3u8);
    let four = BigUint::from(4u8);
    debug_assert_eq!(p % &four, three, "sqrt_mod requires p == 3 (mod 4)");

    let exp = (p + BigUint::one()) / &four;
    let candidate = pow_mod(a, &exp, p);
    if &candidate * &candidate % p == a % p {
        Ok(candidate)
    } else {
        Err(CryptoError::InvalidPoint)
    }
}
