//! Lenient cell coercion.
//!
//! Spreadsheet cells are free text. A cell that does not hold a number is
//! replaced by a default instead of failing the row, and the result records
//! which of the two happened.

/// A coerced cell value, tagged with whether it was parsed or substituted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    /// The cell held a usable value.
    Parsed(T),
    /// The cell was empty or malformed; the default was used.
    Defaulted(T),
}

impl<T> Coerced<T> {
    pub fn value(self) -> T {
        match self {
            Coerced::Parsed(v) | Coerced::Defaulted(v) => v,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Coerced::Defaulted(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Coerced<U> {
        match self {
            Coerced::Parsed(v) => Coerced::Parsed(f(v)),
            Coerced::Defaulted(v) => Coerced::Defaulted(f(v)),
        }
    }
}

/// Parse the leading integer of a cell, defaulting to 0.
///
/// Leading whitespace and a sign are accepted; anything after the digits is
/// ignored, so `"12abc"` is 12 and `"7.9"` is 7.
pub fn int_or_zero(cell: &str) -> Coerced<i64> {
    let s = cell.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return Coerced::Defaulted(0);
    }

    match s[..end].parse::<i64>() {
        Ok(v) => Coerced::Parsed(v),
        Err(_) => Coerced::Defaulted(0),
    }
}

/// Parse the leading decimal number of a cell, defaulting to 0.
///
/// The first decimal comma is read as a decimal point (`"2,5"` is 2.5).
/// Trailing text is ignored (`"3h"` is 3).
pub fn float_or_zero(cell: &str) -> Coerced<f64> {
    let normalized = cell.replacen(',', ".", 1);
    let s = normalized.trim_start();

    let end = float_prefix_len(s.as_bytes());
    if end == 0 {
        return Coerced::Defaulted(0.0);
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Parsed(v),
        _ => Coerced::Defaulted(0.0),
    }
}

/// Length of the longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    let mut end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }

    end
}
