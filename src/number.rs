//! Conversions between 64-bit integers and their base 2, 8, 10, and 16 text, plus fixed-point
//! rendering of floats.
//!
//! Encoders write into a caller-supplied byte buffer and return the number of bytes written. A
//! buffer that is too small is reported as [`NumberError::BufferTooSmall`]; nothing is written
//! past its end. The `format_*` functions are owned conveniences on top of a stack buffer that is
//! always large enough.

use crate::ascii;
use crate::error::NumberError;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Longest integer encoding: a sign, a two-character prefix, and 64 binary digits.
pub const MAX_INTEGER_LEN: usize = 1 + 2 + 64;

/// Fractional digits beyond this are not representable in the scaled `u64` remainder.
pub const MAX_FRACTIONAL_DIGITS: u32 = 18;

/// Returns the literal prefix for `base`, empty for decimal.
///
/// # Errors
///
/// Returns [`NumberError::UnsupportedBase`] for anything other than 2, 8, 10, or 16.
pub fn base_prefix(base: u32) -> Result<&'static str, NumberError> {
    match base {
        2 => Ok("0b"),
        8 => Ok("0o"),
        10 => Ok(""),
        16 => Ok("0x"),
        base => Err(NumberError::UnsupportedBase { base }),
    }
}

/// Bounded writer over a caller-owned buffer.
struct Output<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Output<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    fn push(&mut self, byte: u8) -> Result<(), NumberError> {
        let capacity = self.buf.len();
        let slot = self
            .buf
            .get_mut(self.len)
            .ok_or(NumberError::BufferTooSmall { capacity })?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    fn push_str(&mut self, s: &str) -> Result<(), NumberError> {
        s.bytes().try_for_each(|b| self.push(b))
    }

    /// Writes `n` most-significant digit first, left-padded with zeros to `min_width`.
    #[allow(clippy::cast_possible_truncation)]
    fn push_digits(&mut self, mut n: u64, base: u32, min_width: usize) -> Result<(), NumberError> {
        let base = u64::from(base);
        let mut scratch = [0u8; 64];
        let mut start = scratch.len();

        loop {
            start -= 1;
            // Remainder is always below 16.
            scratch[start] = DIGITS[(n % base) as usize];
            n /= base;
            if n == 0 {
                break;
            }
        }

        let width = scratch.len() - start;
        for _ in width..min_width {
            self.push(b'0')?;
        }
        scratch[start..].iter().try_for_each(|&b| self.push(b))
    }

    fn write_integer(&mut self, magnitude: u64, negative: bool, base: u32) -> Result<(), NumberError> {
        let prefix = base_prefix(base)?;
        if negative {
            self.push(b'-')?;
        }
        self.push_str(prefix)?;
        self.push_digits(magnitude, base, 1)
    }
}

/// Encodes `magnitude` in `base`, preceded by `-` when `negative` is set and by the base prefix
/// when the base is not decimal.
///
/// # Errors
///
/// [`NumberError::UnsupportedBase`] for a base outside {2, 8, 10, 16};
/// [`NumberError::BufferTooSmall`] when `buf` cannot hold the encoding.
pub fn encode_integer(
    buf: &mut [u8],
    magnitude: u64,
    negative: bool,
    base: u32,
) -> Result<usize, NumberError> {
    let mut out = Output::new(buf);
    out.write_integer(magnitude, negative, base)?;
    Ok(out.len)
}

/// # Errors
///
/// See [`encode_integer`].
pub fn encode_signed(buf: &mut [u8], n: i64, base: u32) -> Result<usize, NumberError> {
    encode_integer(buf, n.unsigned_abs(), n < 0, base)
}

/// # Errors
///
/// See [`encode_integer`].
pub fn encode_unsigned(buf: &mut [u8], n: u64, base: u32) -> Result<usize, NumberError> {
    encode_integer(buf, n, false, base)
}

/// # Errors
///
/// Returns [`NumberError::UnsupportedBase`] for a base outside {2, 8, 10, 16}.
pub fn format_signed(n: i64, base: u32) -> Result<String, NumberError> {
    let mut buf = [0u8; MAX_INTEGER_LEN];
    let len = encode_signed(&mut buf, n, base)?;
    Ok(ascii_string(&buf[..len]))
}

/// # Errors
///
/// Returns [`NumberError::UnsupportedBase`] for a base outside {2, 8, 10, 16}.
pub fn format_unsigned(n: u64, base: u32) -> Result<String, NumberError> {
    let mut buf = [0u8; MAX_INTEGER_LEN];
    let len = encode_unsigned(&mut buf, n, base)?;
    Ok(ascii_string(&buf[..len]))
}

/// Encodes `value` as a decimal integer part followed, when `fractional_digits > 0`, by a point
/// and exactly `fractional_digits` digits of the rounded remainder.
///
/// Rounding is half away from zero. A remainder that rounds up to a whole unit is carried into
/// the integer part, so `0.999` with two digits becomes `1.00`. With no fractional digits the
/// value is truncated.
///
/// # Errors
///
/// [`NumberError::Overflow`] for non-finite values, magnitudes of 2^64 or more, or more than
/// [`MAX_FRACTIONAL_DIGITS`] digits; [`NumberError::BufferTooSmall`] when `buf` is too short.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn encode_fixed_decimal(
    buf: &mut [u8],
    value: f64,
    fractional_digits: u32,
) -> Result<usize, NumberError> {
    if !value.is_finite() || fractional_digits > MAX_FRACTIONAL_DIGITS {
        return Err(NumberError::Overflow);
    }
    let scale = 10u64.checked_pow(fractional_digits).ok_or(NumberError::Overflow)?;

    let magnitude = value.abs();
    if magnitude >= u64::MAX as f64 {
        return Err(NumberError::Overflow);
    }

    // Both casts are in range: magnitude < 2^64 and the scaled remainder is at most `scale`.
    let whole = magnitude.trunc();
    let mut integer = whole as u64;
    let mut fraction = 0;
    if fractional_digits > 0 {
        fraction = ((magnitude - whole) * scale as f64).round() as u64;
        if fraction >= scale {
            integer = integer.checked_add(1).ok_or(NumberError::Overflow)?;
            fraction -= scale;
        }
    }

    let negative = value < 0.0 && (integer != 0 || fraction != 0);

    let mut out = Output::new(buf);
    out.write_integer(integer, negative, 10)?;
    if fractional_digits > 0 {
        out.push(b'.')?;
        out.push_digits(fraction, 10, fractional_digits as usize)?;
    }
    Ok(out.len)
}

/// # Errors
///
/// See [`encode_fixed_decimal`].
pub fn format_fixed_decimal(value: f64, fractional_digits: u32) -> Result<String, NumberError> {
    // Sign, 20 integer digits, point, fraction.
    let mut buf = [0u8; 1 + 20 + 1 + MAX_FRACTIONAL_DIGITS as usize];
    let len = encode_fixed_decimal(&mut buf, value, fractional_digits)?;
    Ok(ascii_string(&buf[..len]))
}

fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Decodes an optionally negative run of digits in `base`. Hex digits are case-insensitive.
///
/// The text must not carry a base prefix; see [`decode_literal`] for that.
///
/// # Errors
///
/// [`NumberError::UnsupportedBase`], [`NumberError::Empty`] when there are no digits,
/// [`NumberError::InvalidDigit`] for the first character outside the base's alphabet, and
/// [`NumberError::Overflow`] when the value does not fit in an `i64`.
pub fn decode_integer(text: &str, base: u32) -> Result<i64, NumberError> {
    let (negative, digits) = split_sign(text);
    decode_digits(digits, base, negative)
}

/// Decodes an integer literal as written in a value position: an optional `-`, an optional
/// `0b`/`0o`/`0x` prefix, then digits. The sign may also follow the prefix (`0x-ff`), but only
/// one sign is accepted.
///
/// # Errors
///
/// See [`decode_integer`].
pub fn decode_literal(text: &str) -> Result<i64, NumberError> {
    let (negative, rest) = split_sign(text);
    let (base, digits) = split_prefix(rest);

    if negative {
        decode_digits(digits, base, true)
    } else {
        decode_integer(digits, base)
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}

fn split_prefix(text: &str) -> (u32, &str) {
    for base in [2, 8, 16] {
        if let Some(rest) = base_prefix(base).ok().and_then(|p| text.strip_prefix(p)) {
            return (base, rest);
        }
    }

    (10, text)
}

fn digit_value(c: char, base: u32) -> Option<u32> {
    let upper = ascii::to_upper(c);
    (0..base).find(|&d| char::from(DIGITS[d as usize]) == upper)
}

fn decode_digits(digits: &str, base: u32, negative: bool) -> Result<i64, NumberError> {
    base_prefix(base)?;

    if digits.is_empty() {
        return Err(NumberError::Empty);
    }

    // Validate everything first so a bad character wins over overflow.
    if let Some(c) = digits.chars().find(|&c| digit_value(c, base).is_none()) {
        return Err(NumberError::InvalidDigit { c });
    }

    // Accumulate towards the sign so that i64::MIN is reachable.
    let radix = i64::from(base);
    digits.chars().try_fold(0i64, |acc, c| {
        let digit = i64::from(digit_value(c, base).ok_or(NumberError::InvalidDigit { c })?);
        acc.checked_mul(radix)
            .and_then(|acc| {
                if negative {
                    acc.checked_sub(digit)
                } else {
                    acc.checked_add(digit)
                }
            })
            .ok_or(NumberError::Overflow)
    })
}
