//! secp256k1 scalar multiplication, point (de)compression, and public-key
//! derivation.
//!
//! `y² = x³ + 7` over `F_p`. Points are carried in affine coordinates with a
//! modular inverse on every addition/doubling — simple over fast, since a
//! single derivation is microseconds regardless (spec budget: constant work
//! on 32-byte inputs).

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::Zero;

use tracing::debug;

use crate::bigint::{add_mod, invert, mul_mod, sqrt_mod, sub_mod};
use crate::error::{CryptoError, Result};

/// A point on the curve, or the point at infinity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Identity,
    Affine(BigUint, BigUint),
}

fn p() -> BigUint {
    // 2^256 - 2^32 - 977
    BigUint::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        16,
    )
    .unwrap()
}

fn n() -> BigUint {
    BigUint::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        16,
    )
    .unwrap()
}

fn g() -> Point {
    let gx = BigUint::parse_bytes(
        b"79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        16,
    )
    .unwrap();
    let gy = BigUint::parse_bytes(
        b"483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
        16,
    )
    .unwrap();
    Point::Affine(gx, gy)
}

fn field_prime() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(p)
}

fn group_order() -> &'static BigUint {
    static N: OnceLock<BigUint> = OnceLock::new();
    N.get_or_init(n)
}

fn base_point() -> &'static Point {
    static G: OnceLock<Point> = OnceLock::new();
    G.get_or_init(g)
}

/// secp256k1's scalar-field curve order, exposed for callers validating
/// scalars before calling into this module.
pub fn curve_order() -> BigUint {
    group_order().clone()
}

fn point_double(a: &Point) -> Point {
    match a {
        Point::Identity => Point::Identity,
        Point::Affine(x, y) => {
            if y.is_zero() {
                return Point::Identity;
            }
            let three_x2 = mul_mod(&BigUint::from(3u8), &mul_mod(x, x, field_prime()), field_prime());
            let two_y = mul_mod(&BigUint::from(2u8), y, field_prime());
            let lambda = mul_mod(&three_x2, &invert(&two_y, field_prime()).expect("2y invertible"), field_prime());
            let x3 = sub_mod(&mul_mod(&lambda, &lambda, field_prime()), &add_mod(x, x, field_prime()), field_prime());
            let y3 = sub_mod(&mul_mod(&lambda, &sub_mod(x, &x3, field_prime()), field_prime()), y, field_prime());
            Point::Affine(x3, y3)
        }
    }
}

fn point_add(a: &Point, b: &Point) -> Point {
    match (a, b) {
        (Point::Identity, other) => other.clone(),
        (other, Point::Identity) => other.clone(),
        (Point::Affine(x1, y1), Point::Affine(x2, y2)) => {
            if x1 == x2 {
                return if y1 == y2 {
                    point_double(a)
                } else {
                    // y2 == p - y1: P + (-P) = identity.
                    Point::Identity
                };
            }
            let lambda = mul_mod(
                &sub_mod(y2, y1, field_prime()),
                &invert(&sub_mod(x2, x1, field_prime()), field_prime()).expect("x2 != x1 implies invertible"),
                field_prime(),
            );
            let x3 = sub_mod(&sub_mod(&mul_mod(&lambda, &lambda, field_prime()), x1, field_prime()), x2, field_prime());
            let y3 = sub_mod(&mul_mod(&lambda, &sub_mod(x1, &x3, field_prime()), field_prime()), y1, field_prime());
            Point::Affine(x3, y3)
        }
    }
}

/// `k * G` via a double-and-add ladder, MSB to LSB. Rejects `k = 0` and
/// `k >= n`: the identity is not a reachable output of derivation.
pub fn scalar_mul_g(k: &BigUint) -> Result<Point> {
    scalar_mul(k, base_point())
}

/// `k * point` via a double-and-add ladder, MSB to LSB.
pub fn scalar_mul(k: &BigUint, point: &Point) -> Result<Point> {
    if k.is_zero() || k >= group_order() {
        return Err(CryptoError::InvalidScalar);
    }
    let mut result = Point::Identity;
    for bit_index in (0..k.bits()).rev() {
        result = point_double(&result);
        if k.bit(bit_index) {
            result = point_add(&result, point);
        }
    }
    Ok(result)
}

fn to_32_be(x: &BigUint) -> [u8; 32] {
    let bytes = x.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Compresses an affine point to 33 bytes: `02`/`03` prefix (even/odd `y`)
/// followed by the big-endian `x` coordinate.
pub fn compress(point: &Point) -> Result<[u8; 33]> {
    match point {
        Point::Identity => Err(CryptoError::InvalidPoint),
        Point::Affine(x, y) => {
            let mut out = [0u8; 33];
            out[0] = if y.bit(0) { 0x03 } else { 0x02 };
            out[1..].copy_from_slice(&to_32_be(x));
            Ok(out)
        }
    }
}

/// Recovers the full point from its 33-byte compressed form by solving
/// `y² = x³ + 7` for `y` and picking the root matching the prefix's parity.
pub fn decompress(bytes: &[u8]) -> Result<Point> {
    if bytes.len() != 33 {
        return Err(CryptoError::InvalidLength);
    }
    let prefix = bytes[0];
    if prefix != 0x02 && prefix != 0x03 {
        return Err(CryptoError::InvalidPoint);
    }
    let x = BigUint::from_bytes_be(&bytes[1..]);
    if x >= *field_prime() {
        return Err(CryptoError::InvalidPoint);
    }
    let rhs = add_mod(&mul_mod(&mul_mod(&x, &x, field_prime()), &x, field_prime()), &BigUint::from(7u8), field_prime());
    let y = sqrt_mod(&rhs, field_prime())?;
    let want_odd = prefix == 0x03;
    let y = if y.bit(0) == want_odd { y } else { sub_mod(&BigUint::zero(), &y, field_prime()) };
    Ok(Point::Affine(x, y))
}

/// Expands a 33-byte compressed key into its 65-byte uncompressed form
/// (`04 ‖ x ‖ y`).
pub fn expand(compressed: &[u8]) -> Result<[u8; 65]> {
    let point = decompress(compressed)?;
    match point {
        Point::Affine(x, y) => {
            let mut out = [0u8; 65];
            out[0] = 0x04;
            out[1..33].copy_from_slice(&to_32_be(&x));
            out[33..].copy_from_slice(&to_32_be(&y));
            Ok(out)
        }
        Point::Identity => Err(CryptoError::InvalidPoint),
    }
}

/// Derives a secp256k1 public key from a 32-byte big-endian private key,
/// returning either the 33-byte compressed or 65-byte uncompressed form.
pub fn derive_pub(privkey32: &[u8], compressed: bool) -> Result<Vec<u8>> {
    debug!(compressed, "secp256k1::derive_pub");
    if privkey32.len() != 32 {
        return Err(CryptoError::InvalidLength);
    }
    let k = BigUint::from_bytes_be(privkey32);
    let point = scalar_mul_g(&k)?;
    if compressed {
        Ok(compress(&point)?.to_vec())
    } else {
        match point {
            Point::Affine(x, y) => {
                let mut out = vec![0x04u8];
                out.extend_from_slice(&to_32_be(&x));
                out.extend_from_slice(&to_32_be(&y));
                Ok(out)
            }
            Point::Identity => Err(CryptoError::InvalidPoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privkey_one_yields_generator() {
        let mut privkey = [0u8; 32];
        privkey[31] = 1;
        let pubkey = derive_pub(&privkey, true).unwrap();
        assert_eq!(
            hex::encode(pubkey),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn rejects_zero_scalar() {
        let privkey = [0u8; 32];
        assert_eq!(derive_pub(&privkey, true), Err(CryptoError::InvalidScalar));
    }

    #[test]
    fn rejects_scalar_ge_order() {
        let privkey = to_32_be(group_order());
        assert_eq!(derive_pub(&privkey, true), Err(CryptoError::InvalidScalar));
    }

    #[test]
    fn compress_decompress_round_trip() {
        let mut privkey = [0u8; 32];
        privkey[31] = 5;
        let k = BigUint::from_bytes_be(&privkey);
        let point = scalar_mul_g(&k).unwrap();
        let compressed = compress(&point).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(point, decompressed);
        assert_eq!(compress(&decompressed).unwrap(), compressed);
    }

    #[test]
    fn expand_round_trips_through_compress() {
        let mut privkey = [0u8; 32];
        privkey[31] = 7;
        let compressed = derive_pub(&privkey, true).unwrap();
        let uncompressed = expand(&compressed).unwrap();
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(uncompressed.len(), 65);
    }

    #[test]
    fn decompress_rejects_bad_prefix() {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x04;
        assert_eq!(decompress(&bytes), Err(CryptoError::InvalidPoint));
    }
}
