use std::ops::{Add, Neg};
use std::fmt;

/// A decimal significand represented as sign and magnitude.
///
/// This can represent signed zero and is what the addition of two `d32`
/// mantissas operates on once their exponents are aligned.
#[derive(Copy, Clone)]
pub struct SignMagnitude {
    sign: bool,
    magnitude: u64,
}

impl SignMagnitude {
    pub fn new(sign: bool, magnitude: u64) -> Self {
        Self { sign, magnitude }
    }

    /// Returns `true` for a negative (or negative zero) mantissa.
    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }
}

/// `-0` and `+0` compare equal.
impl PartialEq for SignMagnitude {
    fn eq(&self, other: &Self) -> bool {
        if self.magnitude == 0 && other.magnitude == 0 {
            true
        } else {
            self.sign == other.sign && self.magnitude == other.magnitude
        }
    }
}

impl Eq for SignMagnitude {}

/// Adds two values. With differing signs the result takes the sign of the
/// larger magnitude, and exact cancellation gives `+0`.
impl Add for SignMagnitude {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.sign == rhs.sign {
            Self {
                sign: self.sign,
                magnitude: self.magnitude + rhs.magnitude,
            }
        } else if self.magnitude > rhs.magnitude {
            Self {
                sign: self.sign,
                magnitude: self.magnitude - rhs.magnitude,
            }
        } else if rhs.magnitude > self.magnitude {
            Self {
                sign: rhs.sign,
                magnitude: rhs.magnitude - self.magnitude,
            }
        } else {
            Self::new(false, 0)
        }
    }
}

impl Neg for SignMagnitude {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            sign: !self.sign,
            magnitude: self.magnitude,
        }
    }
}

impl fmt::Debug for SignMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign {
            f.write_str("-")?;
        }

        fmt::Debug::fmt(&self.magnitude, f)
    }
}
