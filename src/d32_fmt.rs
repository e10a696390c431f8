//! Text rendering of `d32` values.

use {d32, Classified};
use std::{fmt, str};

/// Length of the longest rendering, `-1.2345678e-48`.
pub const FORMAT_LEN: usize = 14;

/// Renders `±D.DDDDDDDe±EE`, `±Infinity`, or `NaN` for any invalid word.
///
/// The exponent always carries a sign and at least two digits. Subnormals keep
/// their leading zero (`+0.0000010e-48` is the smallest one).
impl fmt::Display for d32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.is_sign_negative() { '-' } else { '+' };
        match self.classify() {
            Classified::Inf {..} => write!(f, "{}Infinity", sign),
            Classified::NaN => f.write_str("NaN"),
            Classified::Zero {..} | Classified::Subnormal {..} | Classified::Normal {..} => {
                let parts = self.decompose();
                let mantissa = parts.mantissa();
                write!(
                    f, "{}{}.{:07}e{:+03}",
                    sign, mantissa / 10_000_000, mantissa % 10_000_000, parts.exponent()
                )
            }
        }
    }
}

/// `fmt::Write` adapter over a fixed byte buffer.
struct FixedBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> fmt::Write for FixedBuf<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl d32 {
    /// Renders `self` into a caller-provided buffer and returns the written
    /// part.
    ///
    /// This produces the same text as the `Display` implementation without
    /// allocating.
    pub fn format_into<'a>(&self, buf: &'a mut [u8; FORMAT_LEN]) -> &'a str {
        let len = {
            let mut writer = FixedBuf { buf: &mut buf[..], len: 0 };
            let written = fmt::write(&mut writer, format_args!("{}", self));
            debug_assert!(written.is_ok(), "rendering of {:?} exceeds FORMAT_LEN", self);
            writer.len
        };
        str::from_utf8(&buf[..len]).unwrap_or_default()
    }
}
