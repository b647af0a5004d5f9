//! Numeric-string grammar shared by the coercions and the numeric validators.
//!
//! A numeric string is optional leading whitespace, an optional sign, digits
//! with an optional fraction (or a bare fraction), an optional exponent, and
//! optional trailing whitespace.

use std::cmp::Ordering;

/// Significant digits used when a float is rendered as text.
const PRECISION: usize = 14;

/// A parsed numeric string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub(crate) fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

struct Prefix<'a> {
    text: &'a str,
    rest: &'a str,
    integral: bool,
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

fn scan_prefix(input: &str) -> Option<Prefix<'_>> {
    let trimmed = input.trim_start_matches(is_space);
    let bytes = trimmed.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut integral = true;
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - i - 1;
        if int_digits > 0 || frac_digits > 0 {
            i = j;
            integral = false;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
            integral = false;
        }
    }

    Some(Prefix {
        text: &trimmed[..i],
        rest: &trimmed[i..],
        integral,
    })
}

fn saturate(text: &str) -> i64 {
    if text.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }
}

/// Parses a complete numeric string.
pub(crate) fn parse_number(input: &str) -> Option<Number> {
    let prefix = scan_prefix(input)?;
    if !prefix.rest.chars().all(is_space) {
        return None;
    }
    if prefix.integral {
        if let Ok(i) = prefix.text.parse::<i64>() {
            return Some(Number::Int(i));
        }
    }
    prefix.text.parse::<f64>().ok().map(Number::Float)
}

/// Integer value of the longest numeric prefix; 0 when there is none.
pub(crate) fn leading_int(input: &str) -> i64 {
    let Some(prefix) = scan_prefix(input) else {
        return 0;
    };
    if prefix.integral {
        prefix
            .text
            .parse::<i64>()
            .unwrap_or_else(|_| saturate(prefix.text))
    } else {
        float_to_int(prefix.text.parse::<f64>().unwrap_or(0.0))
    }
}

/// Float value of the longest numeric prefix; 0.0 when there is none.
pub(crate) fn leading_float(input: &str) -> f64 {
    scan_prefix(input)
        .and_then(|prefix| prefix.text.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Truncates toward zero. NaN becomes 0, out-of-range values saturate.
pub(crate) fn float_to_int(value: f64) -> i64 {
    value as i64
}

/// Renders a float with 14 significant digits, switching to exponent form
/// (`1.0E+25`) below 1e-4 or at 1e14 and above.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if mantissa.starts_with('-') { "-" } else { "" };
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    if exponent < -4 || exponent >= PRECISION as i32 {
        let (lead, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{lead}.{tail}E{exp_sign}{}", exponent.abs())
    } else if exponent >= 0 {
        let whole = exponent as usize + 1;
        if digits.len() <= whole {
            format!("{sign}{digits}{}", "0".repeat(whole - digits.len()))
        } else {
            format!("{sign}{}.{}", &digits[..whole], &digits[whole..])
        }
    } else {
        format!("{sign}0.{}{digits}", "0".repeat((-exponent - 1) as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_accepts_numeric_strings() {
        assert_eq!(parse_number("42"), Some(Number::Int(42)));
        assert_eq!(parse_number(" -7 "), Some(Number::Int(-7)));
        assert_eq!(parse_number("1.5"), Some(Number::Float(1.5)));
        assert_eq!(parse_number(".5"), Some(Number::Float(0.5)));
        assert_eq!(parse_number("1e3"), Some(Number::Float(1000.0)));
        assert_eq!(parse_number("1."), Some(Number::Float(1.0)));
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("1e"), None);
    }

    #[test]
    fn parse_number_overflowing_integer_becomes_float() {
        assert!(matches!(
            parse_number("99999999999999999999"),
            Some(Number::Float(_))
        ));
    }

    #[test]
    fn leading_int_truncates_at_first_non_numeric() {
        assert_eq!(leading_int("145abc"), 145);
        assert_eq!(leading_int("1)45@*(&UR)HQ)W.0000(*(HG))"), 1);
        assert_eq!(leading_int("A145"), 0);
        assert_eq!(leading_int("  -12 apples"), -12);
        assert_eq!(leading_int(""), 0);
    }

    #[test]
    fn leading_int_handles_fraction_and_exponent() {
        assert_eq!(leading_int("3.99"), 3);
        assert_eq!(leading_int("-3.99"), -3);
        assert_eq!(leading_int("1e3"), 1000);
    }

    #[test]
    fn leading_int_saturates() {
        assert_eq!(leading_int("99999999999999999999"), i64::MAX);
        assert_eq!(leading_int("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn leading_float_prefix() {
        assert_eq!(leading_float("2.5kg"), 2.5);
        assert_eq!(leading_float("kg"), 0.0);
    }

    #[test]
    fn float_to_int_edges() {
        assert_eq!(float_to_int(f64::NAN), 0);
        assert_eq!(float_to_int(1e300), i64::MAX);
        assert_eq!(float_to_int(-2.7), -2);
    }

    #[test]
    fn format_float_fixed() {
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(10.0), "10");
        assert_eq!(format_float(-0.25), "-0.25");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(10244578109.234451), "10244578109.234");
    }

    #[test]
    fn format_float_exponent_form() {
        assert_eq!(format_float(1e25), "1.0E+25");
        assert_eq!(format_float(1.5e-7), "1.5E-7");
        assert_eq!(format_float(1e14), "1.0E+14");
    }

    #[test]
    fn format_float_non_finite() {
        assert_eq!(format_float(f64::NAN), "NAN");
        assert_eq!(format_float(f64::INFINITY), "INF");
        assert_eq!(format_float(f64::NEG_INFINITY), "-INF");
    }

    #[test]
    fn number_compare() {
        assert_eq!(
            Number::Int(2).compare(Number::Float(2.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::Int(i64::MAX).compare(Number::Int(i64::MAX - 1)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::Float(f64::NAN).compare(Number::Int(1)), None);
    }
}
