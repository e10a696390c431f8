//! Decimal digit shifting for 8 digit significands.

use FloatResult;

/// `10^0` through `10^19`, every power of ten that fits a `u64`.
const POW10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

/// Rescales `decimals` by `10^amount`.
///
/// A negative `amount` drops `-amount` low-order digits, truncating towards
/// zero. Once more than 8 digits are dropped the result is 0, whatever the
/// input was. This is used to align the smaller operand of an addition, and
/// the truncation means such sums can be off by one in the last digit.
///
/// A non-negative `amount` multiplies by `10^amount` without any overflow
/// check (the result wraps). Callers must make sure the result fits.
pub fn shift_decimals(decimals: u32, amount: i32) -> u32 {
    shift_decimals_checked(decimals, amount).unwrap_exact_or_rounded()
}

/// Like `shift_decimals`, but reports whether nonzero digits were dropped.
pub(crate) fn shift_decimals_checked(decimals: u32, amount: i32) -> FloatResult<u32> {
    if decimals == 0 {
        return FloatResult::Exact(0);
    }

    if amount >= 0 {
        let scaled = (0..amount).fold(decimals, |acc, _| acc.wrapping_mul(10));
        return FloatResult::Exact(scaled);
    }

    if amount < -8 {
        return FloatResult::Rounded(0);
    }

    let (shifted, exact) = truncate_digits(u64::from(decimals), (-amount) as u32);
    if exact {
        FloatResult::Exact(shifted as u32)
    } else {
        FloatResult::Rounded(shifted as u32)
    }
}

/// Drops `digits` low-order decimal digits of `value`.
///
/// Returns the truncated value and whether all dropped digits were 0.
pub(crate) fn truncate_digits(value: u64, digits: u32) -> (u64, bool) {
    match POW10.get(digits as usize) {
        Some(&divisor) => (value / divisor, value % divisor == 0),
        None => (0, value == 0),
    }
}
