//! Ed25519 in (twisted) Edwards form: clamped-scalar public-key derivation
//! and affine point encoding/decoding.
//!
//! Two wallets derive Ed25519 keys from a 32-byte seed via two different
//! 64-byte expansion hashes (SHA-512 for Nimiq, Blake2b-512 for Nano); both
//! share the same clamping rule and the same curve math, parameterized only
//! over which hash produced the 64 bytes — see [`derive_pub`].

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::bigint::{add_mod, invert, mul_mod, pow_mod, sub_mod};
use crate::error::{CryptoError, Result};

/// A point on the twisted Edwards curve `-x² + y² = 1 + d·x²·y²`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: BigUint,
    pub y: BigUint,
}

fn p() -> BigUint {
    // 2^255 - 19
    (BigUint::one() << 255u32) - BigUint::from(19u8)
}

fn d() -> BigUint {
    let p = field_prime();
    let num = sub_mod(&BigUint::zero(), &BigUint::from(121665u32), p);
    let den = invert(&BigUint::from(121666u32), p).expect("121666 invertible mod p");
    mul_mod(&num, &den, p)
}

fn base_point() -> Point {
    let x = BigUint::parse_bytes(
        b"216936D3CD6E53FEC0A4E231FDD6DC5C692CC7609525A7B2C9562D608F25D51A",
        16,
    )
    .unwrap();
    let y = BigUint::parse_bytes(
        b"6666666666666666666666666666666666666666666666666666666666666658",
        16,
    )
    .unwrap();
    Point { x, y }
}

fn field_prime() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(p)
}

fn curve_d() -> &'static BigUint {
    static D: OnceLock<BigUint> = OnceLock::new();
    D.get_or_init(d)
}

fn identity() -> Point {
    Point {
        x: BigUint::zero(),
        y: BigUint::one(),
    }
}

/// The unified twisted-Edwards addition law (`a = -1`), complete for this
/// curve, so the same formula handles doubling.
fn point_add(p1: &Point, p2: &Point) -> Point {
    let p = field_prime();
    let dd = curve_d();

    let x1y2 = mul_mod(&p1.x, &p2.y, p);
    let y1x2 = mul_mod(&p1.y, &p2.x, p);
    let y1y2 = mul_mod(&p1.y, &p2.y, p);
    let x1x2 = mul_mod(&p1.x, &p2.x, p);
    let dxy = mul_mod(&mul_mod(&x1x2, &y1y2, p), dd, p);

    let x3_num = add_mod(&x1y2, &y1x2, p);
    let x3_den = invert(&add_mod(&BigUint::one(), &dxy, p), p).expect("1 + d*x1*x2*y1*y2 invertible");
    let x3 = mul_mod(&x3_num, &x3_den, p);

    let y3_num = add_mod(&y1y2, &x1x2, p);
    let y3_den = invert(&sub_mod(&BigUint::one(), &dxy, p), p).expect("1 - d*x1*x2*y1*y2 invertible");
    let y3 = mul_mod(&y3_num, &y3_den, p);

    Point { x: x3, y: y3 }
}

/// `k * point` via double-and-add with bits consumed LSB to MSB: the
/// addend is doubled each step and accumulated into the result only where
/// the corresponding scalar bit is set.
fn scalar_mul(k: &BigUint, point: &Point) -> Point {
    let mut result = identity();
    let mut addend = point.clone();
    for bit_index in 0..k.bits() {
        if k.bit(bit_index) {
            result = point_add(&result, &addend);
        }
        addend = point_add(&addend, &addend);
    }
    result
}

/// Clears bits 0-2 of byte 0, clears bit 7 and sets bit 6 of byte 31, then
/// interprets the 32 bytes as a little-endian scalar. Shared by both
/// Nimiq's SHA-512 derivation and Nano's Blake2b-512 derivation.
fn clamp(seed_low_32: &[u8]) -> BigUint {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(seed_low_32);
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    BigUint::from_bytes_le(&bytes)
}

/// Encodes a point as 32 little-endian bytes of `y` with the sign bit of
/// `x` placed in bit 7 of the last byte.
pub fn encode(point: &Point) -> [u8; 32] {
    let mut bytes = point.y.to_bytes_le();
    bytes.resize(32, 0);
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    if point.x.bit(0) {
        out[31] |= 0x80;
    }
    out
}

fn ed25519_sqrt(a: &BigUint) -> Result<BigUint> {
    let p = field_prime();
    let a = a % p;
    // p ≡ 5 (mod 8): candidate root is a^((p+3)/8).
    let exp = (p + BigUint::from(3u8)) / BigUint::from(8u8);
    let mut x = pow_mod(&a, &exp, p);
    if mul_mod(&x, &x, p) != a {
        let sqrt_m1_exp = (p - BigUint::one()) / BigUint::from(4u8);
        let sqrt_m1 = pow_mod(&BigUint::from(2u8), &sqrt_m1_exp, p);
        x = mul_mod(&x, &sqrt_m1, p);
        if mul_mod(&x, &x, p) != a {
            return Err(CryptoError::InvalidPoint);
        }
    }
    Ok(x)
}

/// Decodes a 32-byte Edwards point, recovering `x` from `y` and the sign
/// bit via `x² = (y²-1) / (d·y²+1)`. Not required by any address builder in
/// this crate, but provided for round-trip testing against [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Point> {
    if bytes.len() != 32 {
        return Err(CryptoError::InvalidLength);
    }
    let p = field_prime();
    let sign = bytes[31] & 0x80 != 0;
    let mut y_bytes = [0u8; 32];
    y_bytes.copy_from_slice(bytes);
    y_bytes[31] &= 0x7f;
    let y = BigUint::from_bytes_le(&y_bytes);
    if y >= *p {
        return Err(CryptoError::InvalidPoint);
    }

    let yy = mul_mod(&y, &y, p);
    let u = sub_mod(&yy, &BigUint::one(), p);
    let v = add_mod(&mul_mod(curve_d(), &yy, p), &BigUint::one(), p);
    let x2 = mul_mod(&u, &invert(&v, p)?, p);
    let mut x = ed25519_sqrt(&x2)?;

    if x.is_zero() && sign {
        return Err(CryptoError::InvalidPoint);
    }
    if x.bit(0) != sign {
        x = sub_mod(&BigUint::zero(), &x, p);
    }
    Ok(Point { x, y })
}

/// Derives an Ed25519 public key from a 32-byte seed, given a 64-byte
/// expansion hash (SHA-512 or Blake2b-512). The low 32 bytes of the
/// expansion are clamped into a scalar; the public key is that scalar
/// times the base point, Edwards-encoded.
pub fn derive_pub(seed32: &[u8], expand64: impl FnOnce(&[u8]) -> [u8; 64]) -> Result<[u8; 32]> {
    debug!("ed25519::derive_pub");
    if seed32.len() != 32 {
        return Err(CryptoError::InvalidLength);
    }
    let expanded = expand64(seed32);
    let scalar = clamp(&expanded[..32]);
    let public_point = scalar_mul(&scalar, &base_point());
    Ok(encode(&public_point))
}
