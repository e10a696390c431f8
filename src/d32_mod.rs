use decomposed::{self, Decomposed};
use std::fmt;

/// A 32-bit decimal floating point number.
///
/// The raw layout is `[sign:1][exponent:6][mantissa:25]`, most significant
/// bit first. See the crate documentation for how the exponent field selects
/// between the different digit mappings.
///
/// Equality is bitwise: `+0` and `-0` compare unequal, and so do words that
/// only differ in how invalid they are.
#[repr(transparent)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct d32(pub(crate) u32);

impl d32 {
    pub const ZERO: Self         = d32(0);
    pub const NEG_ZERO: Self     = d32(0x8000_0000);
    /// `+1.0000000e+00`.
    pub const ONE: Self          = d32(0x4000_0000);
    pub const INFINITY: Self     = d32(0x7f80_0000);
    pub const NEG_INFINITY: Self = d32(0xff80_0000);

    /// Not a Number (`NaN`).
    ///
    /// This is the bit pattern of the `f32` quiet NaN, which is also what the
    /// single precision fallback of `from_f64` produces for NaN inputs. Any
    /// other invalid bit pattern is treated as NaN too.
    pub const NAN: Self          = d32(0x7fc0_0000);

    /// Largest finite value, `+5.0000000e+47`.
    pub const MAX: Self          = d32(0x7f7d_7840);
    /// Smallest finite value, `-5.0000000e+47`.
    pub const MIN: Self          = d32(0xff7d_7840);
    /// Smallest positive normal value, `+1.0000000e-48`.
    pub const MIN_POSITIVE: Self = d32(0x000f_4240);
    /// Smallest positive subnormal value, `1.0e-54`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = d32(0x0000_0001);

    /// Lowest decimal exponent (shared by the smallest normals and all
    /// subnormals).
    pub const MIN_EXP: i16 = -48;
    /// Highest decimal exponent.
    pub const MAX_EXP: i16 = 47;
    /// Number of significant decimal digits of a normal value.
    pub const DIGITS: u32 = 8;

    pub(crate) const SIGN_BIT: u32 = 1 << 31;

    /// Creates a `d32` from its raw bit representation.
    ///
    /// Every 32-bit pattern is accepted. Invalid patterns behave like `NaN`.
    pub fn from_bits(bits: u32) -> Self {
        d32(bits)
    }

    /// Returns the raw bits of `self`.
    pub fn to_bits(&self) -> u32 {
        self.0
    }

    /// Creates a `d32` from its persisted 4-byte form (most significant byte
    /// first).
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        d32(u32::from_be_bytes(bytes))
    }

    /// Returns the persisted 4-byte form of `self` (most significant byte
    /// first).
    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Encodes `(-1)^sign * mantissa * 10^(exponent - 7)`.
    ///
    /// `mantissa` is the full 8 digit significand `D.DDDDDDD`, so it should
    /// lie in `10_000_000..=99_999_999` (or below `10_000_000` for subnormals
    /// at `MIN_EXP`). For `|exponent| >= 6` only 7 digits are stored and the
    /// last digit is truncated.
    ///
    /// Inputs outside the representable domain are not rejected. They still
    /// produce a word, which is usually invalid and behaves like `NaN`.
    pub fn from_mantissa(sign: bool, mantissa: u32, exponent: i16) -> Self {
        d32(decomposed::encode(sign, mantissa, i32::from(exponent)))
    }

    /// Encodes a value given as a leading digit and the digits following the
    /// decimal point.
    ///
    /// For `leading` in `1..=9`, `trailing` holds the 7 digits after the
    /// point and the result equals
    /// `from_mantissa(sign, leading * 10_000_000 + trailing, exponent)`.
    ///
    /// A `leading` digit of 0 denotes a subnormal `0.DDDDDD`: `trailing` then
    /// holds the 6 digits after the point (counting units of `1.0e-54` at
    /// `MIN_EXP`), matching how subnormals are stored.
    pub fn from_digits(sign: bool, leading: u32, trailing: u32, exponent: i16) -> Self {
        let mantissa = if leading == 0 {
            trailing.wrapping_mul(10)
        } else {
            leading.wrapping_mul(10_000_000).wrapping_add(trailing)
        };
        Self::from_mantissa(sign, mantissa, exponent)
    }

    /// Returns a zero with the given sign.
    pub fn zero(sign: bool) -> Self {
        if sign { Self::NEG_ZERO } else { Self::ZERO }
    }

    /// Returns an infinity with the given sign.
    pub fn infinity(sign: bool) -> Self {
        if sign { Self::NEG_INFINITY } else { Self::INFINITY }
    }

    /// Splits `self` into sign, 8 digit mantissa and decimal exponent.
    ///
    /// This never fails, but the parts of an invalid word are meaningless.
    /// Call `classify` to find out whether they are.
    pub fn decompose(&self) -> Decomposed {
        decomposed::decode(self.0)
    }

    /// Returns the value of the sign bit.
    fn sign_bit(&self) -> bool {
        self.0 & Self::SIGN_BIT != 0
    }

    pub fn is_nan(&self) -> bool {
        match self.classify() {
            Classified::NaN => true,
            _ => false,
        }
    }

    pub fn is_infinite(&self) -> bool {
        match self.classify() {
            Classified::Inf {..} => true,
            _ => false,
        }
    }

    pub fn is_finite(&self) -> bool {
        !(self.is_infinite() || self.is_nan())
    }

    pub fn is_zero(&self) -> bool {
        match self.classify() {
            Classified::Zero {..} => true,
            _ => false,
        }
    }

    pub fn is_subnormal(&self) -> bool {
        match self.classify() {
            Classified::Subnormal {..} => true,
            _ => false,
        }
    }

    pub fn is_normal(&self) -> bool {
        match self.classify() {
            Classified::Normal {..} => true,
            _ => false,
        }
    }

    pub fn is_sign_negative(&self) -> bool {
        self.sign_bit()
    }

    pub fn is_sign_positive(&self) -> bool {
        !self.is_sign_negative()
    }

    /// Classifies `self`, returning the kind of number its bits encode.
    ///
    /// A word is NaN when:
    ///
    /// * it decodes to exponent 47 with a mantissa above `50_000_000` (other
    ///   than the two infinity patterns),
    /// * its raw mantissa field is `30_000_000` or more, which no bucket or
    ///   exponent offset produces, or
    /// * it lies in the 7 digit region (`|exponent| >= 6`, except the
    ///   subnormal floor) and the field has no leading digit.
    pub fn classify(&self) -> Classified {
        let sign = self.sign_bit();
        if self.0 & !Self::SIGN_BIT == Self::INFINITY.0 {
            return Classified::Inf { sign };
        }

        let parts = self.decompose();
        let (exponent, mantissa) = (parts.exponent(), parts.mantissa());
        let field = self.0 & decomposed::FIELD_MASK;
        if exponent == Self::MAX_EXP && mantissa > decomposed::MANTISSA_MAX_AT_CEILING {
            return Classified::NaN;
        }
        if field >= decomposed::FIELD_LIMIT {
            return Classified::NaN;
        }
        if decomposed::is_reduced_precision(exponent) && exponent != Self::MIN_EXP
            && field % decomposed::MANTISSA_MIN < decomposed::MANTISSA_MIN / 10
        {
            // no digit in the units place
            return Classified::NaN;
        }

        match mantissa {
            0 => Classified::Zero { sign },
            m if m < decomposed::MANTISSA_MIN => Classified::Subnormal { sign, mantissa: m },
            m => Classified::Normal { sign, exponent, mantissa: m },
        }
    }
}

impl fmt::Debug for d32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

/// The result of a decimal operation with result `T`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FloatResult<T> {
    /// No digits were lost, the result is exact.
    Exact(T),
    /// Low-order digits were discarded (truncated towards zero).
    Rounded(T),
    /// The result is too large in magnitude and becomes an infinity with the
    /// given sign.
    Overflow { sign: bool },
    /// The result is too small to be represented, even as a subnormal, and
    /// becomes a zero with the given sign.
    Underflow { sign: bool },
    /// A finite non-zero value was divided by zero. The result is an infinity
    /// with the given sign.
    ZeroDivide { sign: bool },
    /// The operation has no meaningful result (NaN operand, `Inf - Inf`,
    /// `0 * Inf`, `0 / 0`, `Inf / Inf`).
    Invalid,
}

impl<T: fmt::Debug> FloatResult<T> {
    /// Returns the exact result, panicking if the result isn't a
    /// `FloatResult::Exact`.
    pub fn unwrap_exact(self) -> T {
        if let FloatResult::Exact(f) = self {
            f
        } else {
            panic!("called `unwrap_exact` on a {:?}", self);
        }
    }

    /// Returns the result of an operation that is known to produce a value,
    /// panicking on the sentinel variants.
    pub fn unwrap_exact_or_rounded(self) -> T {
        match self {
            FloatResult::Exact(t) | FloatResult::Rounded(t) => t,
            _ => panic!("called `unwrap_exact_or_rounded` on a {:?}", self),
        }
    }

    pub fn is_exact(&self) -> bool {
        if let FloatResult::Exact(_) = self { true } else { false }
    }
}

impl FloatResult<d32> {
    /// Extract the (possibly rounded) result, mapping the sentinel variants to
    /// the corresponding special values.
    pub fn into_inner(self) -> d32 {
        match self {
            FloatResult::Exact(t) => t,
            FloatResult::Rounded(t) => t,
            FloatResult::Overflow { sign } => d32::infinity(sign),
            FloatResult::Underflow { sign } => d32::zero(sign),
            FloatResult::ZeroDivide { sign } => d32::infinity(sign),
            FloatResult::Invalid => d32::NAN,
        }
    }
}

/// A `d32` separated by the kind of value it represents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Exponent field and mantissa field are both zero.
    Zero {
        sign: bool,
    },
    /// Exponent field zero, mantissa field in `1..1_000_000`.
    ///
    /// The value is `s * m * 10^-55`, or `s * field * 10^-54`.
    Subnormal {
        sign: bool,
        /// The decoded mantissa (`field * 10`), below `10_000_000`.
        mantissa: u32,
    },
    /// One of the two bit patterns `0x7F800000` and `0xFF800000`.
    Inf {
        sign: bool,
    },
    /// Any invalid bit pattern.
    NaN,
    /// A normal value `s * mantissa * 10^(exponent - 7)`.
    Normal {
        sign: bool,
        /// Decimal exponent in `-48..=47`.
        exponent: i16,
        /// The 8 digit mantissa (`10_000_000..=99_999_999`).
        mantissa: u32,
    },
}

impl Classified {
    /// Returns the sign of the classified value (`false` for NaN).
    pub fn sign(&self) -> bool {
        match *self {
            Classified::Zero { sign } |
            Classified::Subnormal { sign, .. } |
            Classified::Inf { sign } |
            Classified::Normal { sign, .. } => sign,
            Classified::NaN => false,
        }
    }
}
