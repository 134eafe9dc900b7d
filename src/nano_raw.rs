//! NANO → raw unit conversion: multiplying a decimal-string amount by
//! 10^30 with arbitrary-precision integers.

use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{CryptoError, Result};

const RAW_PER_NANO_EXPONENT: u32 = 30;

/// Converts a decimal NANO amount (optionally with a `.` fraction) to its
/// canonical raw-unit decimal string, `amount * 10^30`.
pub fn nano_to_raw(amount: &str) -> Result<String> {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CryptoError::InvalidLength);
    }
    if frac_part.len() > RAW_PER_NANO_EXPONENT as usize {
        return Err(CryptoError::InvalidLength);
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CryptoError::InvalidLength);
    }

    let padded_frac = format!(
        "{:0<width$}",
        frac_part,
        width = RAW_PER_NANO_EXPONENT as usize
    );
    let digits = if int_part.is_empty() {
        format!("0{}", padded_frac)
    } else {
        format!("{}{}", int_part, padded_frac)
    };

    let value = BigUint::from_str_radix(&digits, 10).map_err(|_| CryptoError::InvalidLength)?;
    Ok(value.to_string())
}
