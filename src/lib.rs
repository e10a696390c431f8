//! Compact 32-bit decimal floating point numbers.
//!
//! A `d32` stores a signed decimal value with 8 significant digits in 4 bytes.
//! Unlike `f32`, values like `0.1` are represented exactly, and all arithmetic
//! is done on decimal digits without going through binary floating point.
//!
//! # Format
//!
//! ```notrust
//! +------+----------+---------------+
//! | 31   | 30 - 25  | 24 - 0        |
//! | sign | exponent | mantissa      |
//! +------+----------+---------------+
//! ```
//!
//! The value is `(-1)^sign * M * 10^(e - 7)` for an 8 digit mantissa `M`
//! (`D.DDDDDDD`) and a decimal exponent `e` in `-48..=47`. How `M` and `e`
//! are stored depends on the exponent field:
//!
//! * **14-49** (`e` in `-6..=5`): the field also encodes which third of the
//!   leading digit (1-3, 4-6, 7-9) `M` falls in, and the mantissa bits hold `M`
//!   minus 10, 40 or 70 million. All 8 digits are kept.
//! * **0-13 and 50-63** (`e` below -6 or above 5): the mantissa bits hold a
//!   units digit 0-2 that is added to a coarse exponent, followed by the first
//!   7 digits of `M`. The eighth digit is always 0.
//! * **0 with a units digit of 0** doubles as the subnormal range, down to
//!   `1.0e-54`.
//!
//! The largest finite value is `5.0e47`. Bit patterns with a larger magnitude
//! are infinities (`0x7F800000`, `0xFF800000`) or NaN, as are all patterns
//! whose mantissa bits are inconsistent with their exponent field.
//!
//! # Arithmetic
//!
//! `add`, `sub`, `mul` and `div` truncate digits that don't fit. Overflow
//! yields an infinity, underflow a (possibly signed) zero or subnormal. The
//! `*_checked` variants report what happened through `FloatResult`.
//!
//! ```
//! use dec32::d32;
//!
//! let price = d32::from_mantissa(false, 30_000_000, 3);   // 3.0e3
//! let qty = d32::from_digits(false, 5, 0, 0);              // 5.0
//! assert_eq!(price.mul(qty).to_string(), "+1.5000000e+04");
//! ```

#![doc(html_root_url = "https://docs.rs/dec32/0.1.0")]
#![warn(missing_debug_implementations)]

#[macro_use] extern crate log;
extern crate ieee754;
extern crate num_bigint;
extern crate num_traits;

mod decomposed;
mod d32_algo;
mod d32_conv;
mod d32_fmt;
mod d32_mod;
mod d32_ops;
mod significand;
mod sign_mag;

pub use d32_mod::*;
pub use d32_fmt::FORMAT_LEN;
pub use decomposed::Decomposed;
pub use significand::shift_decimals;
