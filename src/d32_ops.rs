//! Operator implementations for `d32`.
//!
//! Only negation is an operator: it flips the sign bit and can't lose digits.
//! The other operations are methods since they may round.

use ::d32;

use std::ops;

impl ops::Neg for d32 {
    type Output = d32;

    fn neg(self) -> d32 {
        self.negate()
    }
}

impl<'a> ops::Neg for &'a d32 {
    type Output = d32;

    fn neg(self) -> d32 {
        -(*self)
    }
}
