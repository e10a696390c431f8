//! Conversion between `d32` and binary floating point.
//!
//! `f64 -> d32` multiplies the binary significand with the leading decimal
//! digits of the matching power of two, so no decimal digit depends on the
//! host's float formatting. `d32 -> f64` goes through a table of powers of
//! ten.

use {d32, Classified};
use decomposed::{normalize_and_pack, MANTISSA_MAX};
use ieee754::Ieee754;
use num_bigint::BigUint;
use num_traits::{pow, ToPrimitive};
use std::sync::OnceLock;

/// Binary exponents (of the `f64` value) covered by the power-of-two table.
const BINARY_EXP_MIN: i32 = -180;
const BINARY_EXP_MAX: i32 = 160;
/// `f64` exponent bias and number of fraction bits.
const F64_BIAS: i32 = 1023;
const F64_FRACTION_BITS: i32 = 52;

/// Power of two of the first table entry: the lowest binary exponent, applied
/// to an integer significand with 52 fraction bits.
const POW2_FIRST: i32 = BINARY_EXP_MIN - F64_FRACTION_BITS;
const POW2_LEN: usize = (BINARY_EXP_MAX - BINARY_EXP_MIN) as usize;
/// Significant digits stored per power of two.
const POW2_DIGITS: usize = 9;

/// Leading decimal digits of the powers of two `2^POW2_FIRST ..`.
struct Pow2Table {
    /// First 9 significant digits, rounded half up.
    digits: [u64; POW2_LEN],
    /// `floor(log10(2^k))`, so that `2^k ~ digits * 10^(exponent - 8)`.
    exponents: [i16; POW2_LEN],
}

impl Pow2Table {
    fn get() -> &'static Self {
        static TABLE: OnceLock<Pow2Table> = OnceLock::new();
        TABLE.get_or_init(Self::compute)
    }

    /// Computes the table with exact big integer arithmetic.
    fn compute() -> Self {
        let mut table = Pow2Table {
            digits: [0; POW2_LEN],
            exponents: [0; POW2_LEN],
        };

        for index in 0..POW2_LEN {
            let k = POW2_FIRST + index as i32;
            // 2^-n = 5^n * 10^-n, so negative powers share the digits of 5^n
            let n = if k >= 0 {
                pow(BigUint::from(2u32), k as usize)
            } else {
                pow(BigUint::from(5u32), (-k) as usize)
            };
            let len = n.to_str_radix(10).len();
            let (digits, carry) = leading_digits(&n, len);

            table.digits[index] = digits;
            table.exponents[index] = (len as i32 - 1 + k.min(0) + carry as i32) as i16;
        }

        debug!("computed {} powers of two", POW2_LEN);
        table
    }
}

/// Rounds `n` (which has `len` decimal digits) to its first `POW2_DIGITS`
/// digits. Also returns whether rounding carried into a new digit.
fn leading_digits(n: &BigUint, len: usize) -> (u64, bool) {
    if len <= POW2_DIGITS {
        let scale = pow(10u64, POW2_DIGITS - len);
        return (n.to_u64().unwrap_or(0) * scale, false);
    }

    let divisor = pow(BigUint::from(10u32), len - POW2_DIGITS);
    let remainder = n % &divisor;
    let mut digits = (n / &divisor).to_u64().unwrap_or(0);
    if remainder * 2u32 >= divisor {
        digits += 1;
    }
    if digits == pow(10u64, POW2_DIGITS) {
        (digits / 10, true)
    } else {
        (digits, false)
    }
}

/// Powers of ten `1e-54 ..= 1e47`, one per decimal exponent a decoded `d32`
/// can have (including the subnormal scale).
const POW10_F64: [f64; 102] = [
    1e-54, 1e-53, 1e-52, 1e-51, 1e-50,
    1e-49, 1e-48, 1e-47, 1e-46, 1e-45, 1e-44, 1e-43, 1e-42, 1e-41, 1e-40,
    1e-39, 1e-38, 1e-37, 1e-36, 1e-35, 1e-34, 1e-33, 1e-32, 1e-31, 1e-30,
    1e-29, 1e-28, 1e-27, 1e-26, 1e-25, 1e-24, 1e-23, 1e-22, 1e-21, 1e-20,
    1e-19, 1e-18, 1e-17, 1e-16, 1e-15, 1e-14, 1e-13, 1e-12, 1e-11, 1e-10,
    1e-9, 1e-8, 1e-7, 1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1,
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9,
    1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18, 1e19,
    1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27, 1e28, 1e29,
    1e30, 1e31, 1e32, 1e33, 1e34, 1e35, 1e36, 1e37, 1e38, 1e39,
    1e40, 1e41, 1e42, 1e43, 1e44, 1e45, 1e46, 1e47,
];
const POW10_F64_OFFSET: i32 = 54;

impl d32 {
    /// Converts an `f64` to the nearest `d32`.
    ///
    /// The 53 bit significand is reduced to about 10 digits and multiplied
    /// with the first 9 digits of the power of two, which gives a rounded 8
    /// digit result. Values below `1.0e-48` become subnormal or zero, values
    /// above the largest `d32` become infinite.
    ///
    /// NaN, infinities and values outside `2^-180 .. 2^160` are converted via
    /// an `f32` and its bits are reinterpreted. For those inputs, that yields
    /// NaN, an infinity or a zero.
    pub fn from_f64(f: f64) -> Self {
        let (sign, raw_exp, fraction) = f.decompose_raw();
        let raw_exp = i32::from(raw_exp);
        if raw_exp == 0x7ff
            || raw_exp < F64_BIAS + BINARY_EXP_MIN
            || raw_exp >= F64_BIAS + BINARY_EXP_MAX
        {
            let single = f as f32;
            debug!("from_f64: {} out of range, falling back to {}", f, single);
            return d32(single.to_bits());
        }

        let index = (raw_exp - F64_BIAS - BINARY_EXP_MIN) as usize;
        let table = Pow2Table::get();
        let significand = (1 << F64_FRACTION_BITS) | fraction;
        let millions = (significand + 500_000) / 1_000_000;
        let product = table.digits[index] * millions;

        // `millions * 10^6 * digits * 10^(exponent - 8)` with the mantissa
        // scaled by 10^-7.
        let mut mantissa = (product + 5_000_000_000) / 10_000_000_000;
        let mut exponent = i32::from(table.exponents[index]) + 15;
        while exponent < i32::from(d32::MIN_EXP) || mantissa > u64::from(MANTISSA_MAX) {
            mantissa /= 10;
            exponent += 1;
        }

        let result = normalize_and_pack(sign, mantissa, exponent, true).into_inner();
        trace!("from_f64: {} -> {}e{} -> {:?}", f, mantissa, exponent, result);
        result
    }

    /// Converts `self` to an `f64`.
    ///
    /// Exact up to the final `f64` rounding. Infinities map to infinities, all
    /// NaN words to `f64::NAN`.
    pub fn to_f64(&self) -> f64 {
        match self.classify() {
            Classified::Inf { sign } => if sign { -::std::f64::INFINITY } else { ::std::f64::INFINITY },
            Classified::NaN => ::std::f64::NAN,
            _ => {
                let parts = self.decompose();
                let mantissa = f64::from(parts.mantissa());
                let mantissa = if parts.sign() { -mantissa } else { mantissa };
                let scale = POW10_F64[(i32::from(parts.exponent()) + POW10_F64_OFFSET) as usize];
                mantissa * scale * 0.000_000_1
            }
        }
    }

    /// Converts an `f32` to the nearest `d32` (via `f64`, which is lossless).
    pub fn from_f32(f: f32) -> Self {
        Self::from_f64(f64::from(f))
    }

    /// Converts `self` to an `f32`, rounding in the process.
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}

impl From<f64> for d32 {
    fn from(f: f64) -> Self {
        Self::from_f64(f)
    }
}

impl From<f32> for d32 {
    fn from(f: f32) -> Self {
        Self::from_f32(f)
    }
}

impl From<d32> for f64 {
    fn from(d: d32) -> Self {
        d.to_f64()
    }
}
