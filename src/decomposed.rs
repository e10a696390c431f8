//! Provides the decomposed `(sign, mantissa, exponent)` form of a `d32` and
//! the bit-level codec between the two.
//!
//! The exponent field selects one of two digit mappings:
//!
//! ```notrust
//! field   exponent        mantissa field holds
//! 14-49   -6..=5          8 digits, leading digit bucket (1-3, 4-6, 7-9) in
//!                         the exponent field
//! 0-13    -48..=-7        units digit = exponent offset (0-2), then the 7
//! 50-63   6..=47          most significant digits
//! ```
//!
//! Field 0 with a units digit of 0 doubles as the subnormal range.

use {d32, FloatResult};
use significand::truncate_digits;
use std::fmt;

/// Smallest 8 digit mantissa.
pub(crate) const MANTISSA_MIN: u32 = 10_000_000;
/// Largest 8 digit mantissa.
pub(crate) const MANTISSA_MAX: u32 = 99_999_999;
/// Largest mantissa that is still finite at `d32::MAX_EXP`.
pub(crate) const MANTISSA_MAX_AT_CEILING: u32 = 50_000_000;

pub(crate) const FIELD_MASK: u32 = 0x01ff_ffff;
/// No valid encoding stores a mantissa field this large.
pub(crate) const FIELD_LIMIT: u32 = 30_000_000;

const EXPONENT_SHIFT: u32 = 25;
const EXPONENT_MASK: u32 = 0x3f;

/// Exponent field values of the 8 digit region.
const BUCKETED_FIELDS: (u32, u32) = (14, 49);
/// Lowest leading-digit value of each bucket, scaled to 8 digits.
const BUCKET_BASE: [u32; 3] = [10_000_000, 40_000_000, 70_000_000];
/// Exponent range stored with full 8 digit precision.
const BUCKETED_EXPONENTS: (i32, i32) = (-6, 6);

/// A `d32` decomposed into its components (may be zero or meaningless for
/// invalid words).
///
/// The number represented is:
///
/// ```notrust
/// (-1)^sign * mantissa * 10^(exponent - 7)
/// ```
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Decomposed {
    sign: bool,
    /// `D.DDDDDDD` as an integer. Subnormals have a leading 0.
    mantissa: u32,
    exponent: i16,
}

impl Decomposed {
    pub fn new(sign: bool, mantissa: u32, exponent: i16) -> Self {
        Self { sign, mantissa, exponent }
    }

    /// Returns the sign of the number (`true` when negative).
    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn mantissa(&self) -> u32 {
        self.mantissa
    }

    pub fn exponent(&self) -> i16 {
        self.exponent
    }

    /// Returns `(sign, mantissa, exponent)`.
    pub fn into_parts(self) -> (bool, u32, i16) {
        (self.sign, self.mantissa, self.exponent)
    }

    /// Returns `true` if the mantissa is zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Encodes the parts back into a `d32`.
    ///
    /// This is the same as `d32::from_mantissa` and truncates the eighth digit
    /// for exponents outside `-6..6`.
    pub fn pack(&self) -> d32 {
        d32(encode(self.sign, self.mantissa, i32::from(self.exponent)))
    }
}

impl fmt::Debug for Decomposed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign {
            write!(f, "-")?;
        }

        write!(f, "{}*10^{}", self.mantissa, i32::from(self.exponent) - 7)
    }
}

/// Returns `true` if values with this exponent keep only 7 significant
/// digits.
pub(crate) fn is_reduced_precision(exponent: i16) -> bool {
    let exponent = i32::from(exponent);
    exponent < BUCKETED_EXPONENTS.0 || exponent >= BUCKETED_EXPONENTS.1
}

/// Packs sign, 8 digit mantissa and exponent into raw `d32` bits.
///
/// Out-of-domain inputs still yield a word. Each field is masked to its
/// width.
pub(crate) fn encode(sign: bool, mantissa: u32, exponent: i32) -> u32 {
    let (exponent_field, field) = if exponent >= BUCKETED_EXPONENTS.0 && exponent < BUCKETED_EXPONENTS.1 {
        let bucket = match mantissa {
            m if m >= BUCKET_BASE[2] => 2,
            m if m >= BUCKET_BASE[1] => 1,
            _ => 0,
        };
        let exponent_field = (exponent + 6) * 3 + BUCKETED_FIELDS.0 as i32 + bucket as i32;
        (exponent_field, mantissa.wrapping_sub(BUCKET_BASE[bucket]))
    } else {
        // Drop the last digit. The freed units place extends the exponent.
        let biased = exponent + if exponent < BUCKETED_EXPONENTS.0 { 48 } else { 144 };
        let units = (biased % 3) as u32;
        (biased / 3, (mantissa / 10).wrapping_add(units.wrapping_mul(MANTISSA_MIN)))
    };

    let sign = if sign { d32::SIGN_BIT } else { 0 };
    sign | ((exponent_field as u32 & EXPONENT_MASK) << EXPONENT_SHIFT) | (field & FIELD_MASK)
}

/// Splits raw `d32` bits into sign, mantissa and exponent.
///
/// Total over all inputs. Invalid words decode to whatever their fields say.
pub(crate) fn decode(bits: u32) -> Decomposed {
    let sign = bits & d32::SIGN_BIT != 0;
    let exponent_field = (bits >> EXPONENT_SHIFT) & EXPONENT_MASK;
    let field = bits & FIELD_MASK;

    if exponent_field >= BUCKETED_FIELDS.0 && exponent_field <= BUCKETED_FIELDS.1 {
        let z = exponent_field - BUCKETED_FIELDS.0;
        Decomposed {
            sign,
            mantissa: field + BUCKET_BASE[(z % 3) as usize],
            exponent: (z / 3) as i16 - 6,
        }
    } else {
        let base = if exponent_field < BUCKETED_FIELDS.0 { 16 } else { 48 };
        let units = if field >= 2 * MANTISSA_MIN {
            2
        } else if field >= MANTISSA_MIN {
            1
        } else {
            0
        };
        Decomposed {
            sign,
            mantissa: (field - units * MANTISSA_MIN) * 10,
            exponent: ((exponent_field as i16) - base) * 3 + units as i16,
        }
    }
}

/// Brings a wide intermediate result back into 8 digit form and packs it.
///
/// The mantissa is shrunk until it has at most 8 digits, then grown until it
/// has 8 digits or the exponent reaches the floor. Below the floor it is
/// shifted right into the subnormal range. Discarded digits are truncated.
///
/// `exact` tells whether the caller already lost digits while computing the
/// mantissa.
pub(crate) fn normalize_and_pack(sign: bool, mantissa: u64, exponent: i32, exact: bool) -> FloatResult<d32> {
    let (floor, ceiling) = (i32::from(d32::MIN_EXP), i32::from(d32::MAX_EXP));
    let (mut mantissa, mut exponent, mut exact) = (mantissa, exponent, exact);

    if mantissa == 0 {
        return if exact {
            FloatResult::Exact(d32::zero(sign))
        } else {
            FloatResult::Underflow { sign }
        };
    }

    while mantissa > u64::from(MANTISSA_MAX) {
        exact &= mantissa % 10 == 0;
        mantissa /= 10;
        exponent += 1;
    }
    while mantissa < u64::from(MANTISSA_MIN) && exponent > floor {
        mantissa *= 10;
        exponent -= 1;
    }
    if exponent < floor {
        let (shifted, shift_exact) = truncate_digits(mantissa, (floor - exponent) as u32);
        trace!("normalize: {}e{} below floor, shifted to {}", mantissa, exponent, shifted);
        mantissa = shifted;
        exponent = floor;
        exact &= shift_exact;
    }

    if exponent > ceiling || (exponent == ceiling && mantissa > u64::from(MANTISSA_MAX_AT_CEILING)) {
        debug!("normalize: {}e{} overflows", mantissa, exponent);
        return FloatResult::Overflow { sign };
    }

    let mantissa = mantissa as u32;
    if is_reduced_precision(exponent as i16) {
        // the eighth digit does not survive encoding
        if mantissa < 10 {
            debug!("normalize: {}e{} underflows", mantissa, exponent);
            return FloatResult::Underflow { sign };
        }
        exact &= mantissa % 10 == 0;
    }

    let packed = d32(encode(sign, mantissa, exponent));
    if exact {
        FloatResult::Exact(packed)
    } else {
        FloatResult::Rounded(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(sign: bool, mantissa: u32, exponent: i16) {
        let bits = encode(sign, mantissa, i32::from(exponent));
        let back = decode(bits);
        assert_eq!(
            back.into_parts(), (sign, mantissa, exponent),
            "{:?} -> {:#010X} -> {:?}", Decomposed::new(sign, mantissa, exponent), bits, back
        );
    }

    #[test]
    fn accessors() {
        let parts = d32::from_mantissa(true, 12_345_678, 3).decompose();
        assert!(parts.sign());
        assert_eq!((parts.mantissa(), parts.exponent()), (12_345_678, 3));
        assert_eq!(parts.into_parts(), (true, 12_345_678, 3));
        assert_eq!(Decomposed::new(true, 12_345_678, 3), parts);
        assert_eq!(format!("{:?}", parts), "-12345678*10^-4");
    }

    #[test]
    fn known_words() {
        assert_eq!(encode(false, 10_000_000, 0), 0x4000_0000);
        assert_eq!(encode(false, 40_000_000, 0), 0x4200_0000);
        assert_eq!(encode(true, 55_000_000, 0), 0xC2E4_E1C0);
        assert_eq!(encode(false, 50_000_000, 47), 0x7F7D_7840);
        assert_eq!(encode(false, 10_000_000, -48), 0x000F_4240);
        assert_eq!(encode(false, 10_000_000, -6), 0x1C00_0000);
        assert_eq!(encode(false, 10, -48), 0x0000_0001);
    }

    #[test]
    fn decode_regions() {
        assert_eq!(decode(0x4000_0000).into_parts(), (false, 10_000_000, 0));
        // largest value with 7 digits below the 8 digit region
        assert_eq!(decode(0x1A00_0000 + 29_999_999).into_parts(), (false, 99_999_990, -7));
        assert_eq!(decode(0x0000_0001).into_parts(), (false, 10, -48));
        assert_eq!(decode(123_456).into_parts(), (false, 1_234_560, -48));
        assert_eq!(decode(0xFF80_0000).into_parts(), (true, 51_658_240, 47));
    }

    #[test]
    fn roundtrip_every_exponent() {
        for exponent in -48..=47 {
            roundtrip(false, 10_000_000, exponent);
            roundtrip(true, 39_999_990, exponent);
            roundtrip(false, 40_000_000, exponent);
            roundtrip(true, 50_000_000, exponent);
            if exponent < 47 {
                roundtrip(false, 70_000_000, exponent);
                roundtrip(true, 99_999_990, exponent);
            }
        }
    }

    #[test]
    fn eight_digit_region() {
        for exponent in -6..6 {
            roundtrip(false, 12_345_678, exponent);
            roundtrip(true, 45_678_901, exponent);
            roundtrip(false, 99_999_999, exponent);
        }
    }

    #[test]
    fn subnormals() {
        roundtrip(false, 0, -48);
        roundtrip(true, 0, -48);
        roundtrip(false, 10, -48);
        roundtrip(false, 9_999_990, -48);
    }

    #[test]
    fn truncates_eighth_digit() {
        assert_eq!(decode(encode(false, 12_345_678, 6)).mantissa(), 12_345_670);
        assert_eq!(decode(encode(false, 12_345_678, -7)).mantissa(), 12_345_670);
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_and_pack(false, 150_000_000, 3, true), FloatResult::Exact(d32(encode(false, 15_000_000, 4))));
        assert_eq!(normalize_and_pack(false, 15, 3, true), FloatResult::Exact(d32(encode(false, 15_000_000, -3))));
        assert_eq!(normalize_and_pack(true, 123_456_789, 0, true), FloatResult::Rounded(d32(encode(true, 12_345_678, 1))));
        assert_eq!(normalize_and_pack(false, 0, 20, true), FloatResult::Exact(d32::ZERO));
        // grows until the floor, then stays subnormal
        assert_eq!(normalize_and_pack(false, 12, -47, true), FloatResult::Exact(d32(encode(false, 120, -48))));
        // below the floor
        assert_eq!(normalize_and_pack(false, 12_345_000, -50, true), FloatResult::Exact(d32(encode(false, 123_450, -48))));
        // the sixth subnormal digit does not fit
        assert_eq!(normalize_and_pack(false, 12_345_600, -50, true), FloatResult::Rounded(d32(encode(false, 123_450, -48))));
        assert_eq!(normalize_and_pack(false, 12_345_600, -60, true), FloatResult::Underflow { sign: false });
        assert_eq!(normalize_and_pack(true, 50_000_001, 47, true), FloatResult::Overflow { sign: true });
        assert_eq!(normalize_and_pack(false, 10_000_000, 48, true), FloatResult::Overflow { sign: false });
        assert_eq!(normalize_and_pack(false, 12_345_678, 10, true), FloatResult::Rounded(d32(encode(false, 12_345_670, 10))));
    }
}
