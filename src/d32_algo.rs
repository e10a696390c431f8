//! Implementation of the decimal arithmetic operations.
//!
//! All operations work on the decomposed `(sign, mantissa, exponent)` form and
//! never go through binary floating point. Digits that don't fit are
//! truncated, not rounded.

use {d32, Classified, FloatResult};
use decomposed::normalize_and_pack;
use sign_mag::SignMagnitude;
use significand::{shift_decimals_checked, truncate_digits};

/// Scale of the mantissa: `D.DDDDDDD` is stored as `DDDDDDDD`.
const MANTISSA_SCALE: u64 = 10_000_000;

impl d32 {
    /// Returns `self` with the sign flipped. No decoding takes place, so this
    /// works on every word (including infinities and NaNs).
    pub fn negate(self) -> Self {
        d32(self.0 ^ Self::SIGN_BIT)
    }

    /// Computes `self + rhs`, mapping errors to special values.
    pub fn add(self, rhs: Self) -> Self {
        self.add_checked(rhs).into_inner()
    }

    /// Computes `self - rhs`, mapping errors to special values.
    pub fn sub(self, rhs: Self) -> Self {
        self.sub_checked(rhs).into_inner()
    }

    /// Computes `self * rhs`, mapping errors to special values.
    pub fn mul(self, rhs: Self) -> Self {
        self.mul_checked(rhs).into_inner()
    }

    /// Computes `self / rhs`, mapping errors to special values.
    ///
    /// Dividing a non-zero value by zero yields an infinity whose sign is the
    /// XOR of the operand signs. `0 / 0` yields NaN.
    pub fn div(self, rhs: Self) -> Self {
        self.div_checked(rhs).into_inner()
    }

    pub fn add_checked(self, rhs: Self) -> FloatResult<Self> {
        let lhs = self;
        let (lhs_c, rhs_c) = match lhs.propagate_nans(rhs) {
            Ok((lhs_c, rhs_c)) => (lhs_c, rhs_c),
            Err(res) => return res,
        };

        match (lhs_c, rhs_c) {
            (Classified::Inf { sign: lsign }, Classified::Inf { sign: rsign }) => {
                if lsign == rsign {
                    return FloatResult::Exact(lhs);
                } else {
                    return FloatResult::Invalid;
                }
            }
            (Classified::Inf {..}, _) => return FloatResult::Exact(lhs),
            (_, Classified::Inf {..}) => return FloatResult::Exact(rhs),
            _ => {}
        }

        let (l, r) = (lhs.decompose(), rhs.decompose());
        trace!("add: {:?} + {:?}", l, r);

        let (large, small) = if l.exponent() >= r.exponent() { (l, r) } else { (r, l) };
        let mut exp = i32::from(large.exponent());
        let mut gap = exp - i32::from(small.exponent());
        let mut large_mag = u64::from(large.mantissa());
        if gap > 0 && large.sign() != small.sign() {
            // Keep a guard digit: the difference may cancel leading digits.
            large_mag *= 10;
            exp -= 1;
            gap -= 1;
        }

        let aligned = shift_decimals_checked(small.mantissa(), -gap);
        let exact = aligned.is_exact();
        let small_mag = u64::from(aligned.unwrap_exact_or_rounded());
        trace!("add: aligned to exp={}; {} and {}", exp - 7, large_mag, small_mag);

        let sum = SignMagnitude::new(large.sign(), large_mag) + SignMagnitude::new(small.sign(), small_mag);
        let result = normalize_and_pack(sum.sign(), sum.magnitude(), exp, exact);
        trace!("add: sum={:?} -> {:?}", sum, result);
        result
    }

    pub fn sub_checked(self, rhs: Self) -> FloatResult<Self> {
        self.add_checked(rhs.negate())
    }

    pub fn mul_checked(self, rhs: Self) -> FloatResult<Self> {
        let lhs = self;
        let (lhs_c, rhs_c) = match lhs.propagate_nans(rhs) {
            Ok((lhs_c, rhs_c)) => (lhs_c, rhs_c),
            Err(res) => return res,
        };
        let sign = lhs.is_sign_negative() != rhs.is_sign_negative();

        match (lhs_c, rhs_c) {
            (Classified::Inf {..}, Classified::Zero {..}) |
            (Classified::Zero {..}, Classified::Inf {..}) => return FloatResult::Invalid,
            (Classified::Inf {..}, _) | (_, Classified::Inf {..}) => {
                return FloatResult::Exact(d32::infinity(sign));
            }
            (Classified::Zero {..}, _) | (_, Classified::Zero {..}) => {
                return FloatResult::Exact(d32::zero(sign));
            }
            _ => {}
        }

        let (l, r) = (lhs.decompose(), rhs.decompose());
        trace!("mul: {:?} * {:?}", l, r);

        let exp = i32::from(l.exponent()) + i32::from(r.exponent());
        if exp < i32::from(d32::MIN_EXP) {
            debug!("mul: exponent {} below the floor", exp);
            return FloatResult::Underflow { sign };
        }
        if exp > i32::from(d32::MAX_EXP) {
            debug!("mul: exponent {} above the ceiling", exp);
            return FloatResult::Overflow { sign };
        }

        let product = u64::from(l.mantissa()) * u64::from(r.mantissa());
        let (scaled, exact) = truncate_digits(product, 7);
        let result = normalize_and_pack(sign, scaled, exp, exact);
        trace!("mul: product={} -> {:?}", product, result);
        result
    }

    pub fn div_checked(self, rhs: Self) -> FloatResult<Self> {
        let lhs = self;
        let (lhs_c, rhs_c) = match lhs.propagate_nans(rhs) {
            Ok((lhs_c, rhs_c)) => (lhs_c, rhs_c),
            Err(res) => return res,
        };
        let sign = lhs.is_sign_negative() != rhs.is_sign_negative();

        match (lhs_c, rhs_c) {
            (Classified::Inf {..}, Classified::Inf {..}) |
            (Classified::Zero {..}, Classified::Zero {..}) => return FloatResult::Invalid,
            (Classified::Inf {..}, _) => return FloatResult::Exact(d32::infinity(sign)),
            (_, Classified::Inf {..}) => return FloatResult::Exact(d32::zero(sign)),
            (_, Classified::Zero {..}) => {
                debug!("div: {:?} / 0", lhs);
                return FloatResult::ZeroDivide { sign };
            }
            (Classified::Zero {..}, _) => return FloatResult::Exact(d32::zero(sign)),
            _ => {}
        }

        let (l, r) = (lhs.decompose(), rhs.decompose());
        trace!("div: {:?} / {:?}", l, r);

        // Widen the dividend so the quotient keeps 8 digits. Only a subnormal
        // divisor makes the quotient longer than that.
        let dividend = u64::from(l.mantissa()) * MANTISSA_SCALE;
        let divisor = u64::from(r.mantissa());
        let quotient = dividend / divisor;
        let exact = dividend % divisor == 0;
        let exp = i32::from(l.exponent()) - i32::from(r.exponent());

        let result = normalize_and_pack(sign, quotient, exp, exact);
        trace!("div: quotient={}e{} -> {:?}", quotient, exp, result);
        result
    }

    /// Classifies `self` and `rhs`, returning an `Err` when one of them is NaN.
    fn propagate_nans(self, rhs: Self) -> Result<(Classified, Classified), FloatResult<Self>> {
        match (self.classify(), rhs.classify()) {
            (Classified::NaN, _) | (_, Classified::NaN) => Err(FloatResult::Invalid),
            (lhs_c, rhs_c) => Ok((lhs_c, rhs_c)),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate env_logger;

    use {d32, FloatResult};

    fn num(sign: bool, mantissa: u32, exponent: i16) -> d32 {
        d32::from_mantissa(sign, mantissa, exponent)
    }

    fn check(result: d32, expected: &str) {
        assert_eq!(result.to_string(), expected, "{:?}", result.decompose());
    }

    #[test]
    fn add_simple() {
        env_logger::try_init().ok();

        let two = d32::ONE.add(d32::ONE);
        assert_eq!(two, num(false, 20_000_000, 0));
        check(num(false, 10_000_009, 0).add(num(false, 10_000_004, 0)), "+2.0000013e+00");
    }

    #[test]
    fn add_subnormal() {
        env_logger::try_init().ok();

        // 1.0e-47 + 0.123456e-48
        check(num(false, 10_000_000, -47).add(d32::from_bits(123_456)), "+1.0123450e-47");
        // -1.0e-48 + 0.123456e-48
        check(num(true, 10_000_000, -48).add(d32::from_bits(123_456)), "-0.8765440e-48");
    }

    #[test]
    fn add_negative_operands() {
        check(num(true, 10_000_000, 0).add(num(true, 20_000_000, 0)), "-3.0000000e+00");
        check(num(true, 10_000_000, 0).add(num(true, 20_000_000, 3)), "-2.0010000e+03");
    }

    #[test]
    fn sub_guard_digit() {
        env_logger::try_init().ok();

        // 1.0 - 0.10000001 would lose the last digit without the guard digit
        check(num(false, 10_000_000, 0).sub(num(false, 10_000_001, -1)), "+8.9999999e-01");
        // -1.0 - -1.2345678e-6, the truncated operand shows in the last digit
        check(num(true, 10_000_000, 0).sub(num(true, 12_345_678, -6)), "-9.9999877e-01");
        check(num(false, 10_000_009, 4).sub(num(false, 10_000_004, 4)), "+5.0000000e-03");
    }

    #[test]
    fn sub_self_is_zero() {
        let x = num(true, 12_345_678, 3);
        assert_eq!(x.sub(x), d32::ZERO);
        assert_eq!(x.add(x.negate()), d32::ZERO);
    }

    #[test]
    fn add_checked_reports() {
        assert!(d32::ONE.add_checked(d32::ONE).is_exact());
        assert_eq!(
            num(false, 12_345_678, 0).add_checked(num(false, 10_000_001, -3)),
            FloatResult::Rounded(num(false, 12_355_678, 0))
        );
        assert_eq!(d32::MAX.add_checked(d32::MAX), FloatResult::Overflow { sign: false });
        assert_eq!(d32::INFINITY.add_checked(d32::NEG_INFINITY), FloatResult::Invalid);
        assert_eq!(d32::INFINITY.add_checked(d32::ONE), FloatResult::Exact(d32::INFINITY));
        assert_eq!(d32::ONE.add_checked(d32::NAN), FloatResult::Invalid);
    }

    #[test]
    fn mul_simple() {
        env_logger::try_init().ok();

        check(num(false, 30_000_000, 3).mul(num(false, 50_000_000, 0)), "+1.5000000e+04");
        check(num(false, 12_345_678, 2).mul(num(false, 87_654_321, -3)), "+1.0821520e+00");
        assert_eq!(num(false, 12_345_678, 2).mul(d32::ONE), num(false, 12_345_678, 2));
    }

    #[test]
    fn mul_limits() {
        // -1.0e-48 * 0.123456e-48
        assert_eq!(num(true, 10_000_000, -48).mul(d32::from_bits(123_456)), d32::NEG_ZERO);
        // -10.0 * 0.123456e-48
        check(num(true, 10_000_000, 1).mul(d32::from_bits(123_456)), "-1.2345600e-48");
        assert_eq!(
            num(false, 20_000_000, 20).mul_checked(num(false, 30_000_000, 27)),
            FloatResult::Overflow { sign: false }
        );
        assert_eq!(
            num(false, 20_000_000, 20).mul_checked(num(true, 30_000_000, 28)),
            FloatResult::Overflow { sign: true }
        );
        assert_eq!(
            num(false, 20_000_000, -30).mul_checked(num(true, 30_000_000, -30)),
            FloatResult::Underflow { sign: true }
        );
        assert_eq!(d32::INFINITY.mul_checked(d32::ZERO), FloatResult::Invalid);
        assert_eq!(d32::NEG_INFINITY.mul(num(true, 20_000_000, 0)), d32::INFINITY);
    }

    #[test]
    fn div_simple() {
        env_logger::try_init().ok();

        check(num(false, 30_000_000, 3).div(num(false, 50_000_000, 0)), "+6.0000000e+02");
        check(d32::ONE.div(num(false, 30_000_000, 0)), "+3.3333330e-01");
        assert!(!d32::ONE.div_checked(num(false, 30_000_000, 0)).is_exact());
        check(num(false, 30_000_000, 0).div(num(false, 70_000_000, 0)), "+4.2857140e-01");
    }

    #[test]
    fn div_subnormal_divisor() {
        env_logger::try_init().ok();

        // -1.0e-48 / 0.123456e-48
        check(num(true, 10_000_000, -48).div(d32::from_bits(123_456)), "-8.1000518e+00");
        // -3.0e-2 / 0.006e-48
        assert_eq!(num(true, 30_000_000, -2).div(d32::from_bits(6_000)), d32::NEG_INFINITY);
        // 9.999999e-48 / 1.0e-54
        check(num(false, 99_999_990, -48).div(d32::MIN_POSITIVE_SUBNORMAL), "+9.9999990e+06");
    }

    #[test]
    fn div_limits() {
        assert_eq!(d32::ONE.div_checked(d32::ZERO), FloatResult::ZeroDivide { sign: false });
        assert_eq!(d32::ONE.div(d32::NEG_ZERO), d32::NEG_INFINITY);
        assert_eq!(d32::ZERO.div_checked(d32::ZERO), FloatResult::Invalid);
        assert_eq!(d32::ONE.div(d32::INFINITY), d32::ZERO);
        assert_eq!(d32::NEG_INFINITY.div(d32::ONE), d32::NEG_INFINITY);
        assert_eq!(
            num(false, 10_000_000, 40).div_checked(num(false, 10_000_000, -40)),
            FloatResult::Overflow { sign: false }
        );
        // gradual underflow into the subnormal range
        check(num(false, 10_000_000, -40).div(num(false, 10_000_000, 10)), "+0.0100000e-48");
        assert_eq!(
            num(false, 10_000_000, -40).div_checked(num(false, 10_000_000, 40)),
            FloatResult::Underflow { sign: false }
        );
    }
}
