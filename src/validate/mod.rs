//! Validator functions.
//!
//! Every validator is a total predicate: malformed input yields `false`,
//! never an error. The few that return `Result` fail only on a
//! misconfigured option (an unsupported mode or country).

mod area_codes;
mod net;

use std::cmp::Ordering;

use regex::Regex;

use crate::config::NumericLocale;
use crate::numeric;
use crate::{filter, Error, ErrorKind, Scalar};

pub use net::{is_email, is_hostname, is_ip, is_uri, HostMask, UriMode};

/// Largest magnitude accepted by [`is_int`].
const INT_LIMIT: &str = "9223372036854775807";

fn all_chars(value: &str, class: impl Fn(char) -> bool) -> bool {
    !value.is_empty() && value.chars().all(class)
}

/// Returns true if every character is alphabetic. Empty input is false.
pub fn is_alpha(value: &str) -> bool {
    all_chars(value, char::is_alphabetic)
}

/// Returns true if every character is alphanumeric. Empty input is false.
pub fn is_alnum(value: &str) -> bool {
    all_chars(value, char::is_alphanumeric)
}

/// Returns true if every character is an ASCII digit. Empty input is false.
///
/// Unlike [`is_int`] there is no upper bound on the number of digits.
pub fn is_digits(value: &str) -> bool {
    all_chars(value, |c| c.is_ascii_digit())
}

/// Returns true if every character is an ASCII hex digit. Empty input is false.
pub fn is_hex(value: &str) -> bool {
    all_chars(value, |c| c.is_ascii_hexdigit())
}

/// Returns true if `value` lies between `min` and `max`.
///
/// The bounds are excluded unless `inclusive` is set. Comparison uses
/// [`Scalar::compare`].
///
/// # Examples
///
/// ```
/// use input_cage::{validate, Scalar};
///
/// let five = Scalar::Int(5);
/// assert!(validate::is_between(&five, &Scalar::Int(5), &Scalar::Int(10), true));
/// assert!(!validate::is_between(&five, &Scalar::Int(5), &Scalar::Int(10), false));
/// ```
pub fn is_between(value: &Scalar, min: &Scalar, max: &Scalar, inclusive: bool) -> bool {
    if is_greater_than(value, min) && is_less_than(value, max) {
        return true;
    }
    inclusive
        && matches!(value.compare(min), Some(Ordering::Equal | Ordering::Greater))
        && matches!(value.compare(max), Some(Ordering::Equal | Ordering::Less))
}

/// Returns true if `value` is strictly greater than `min`.
pub fn is_greater_than(value: &Scalar, min: &Scalar) -> bool {
    value.compare(min) == Some(Ordering::Greater)
}

/// Returns true if `value` is strictly less than `max`.
pub fn is_less_than(value: &Scalar, max: &Scalar) -> bool {
    value.compare(max) == Some(Ordering::Less)
}

/// Returns true if `value` loosely equals one of `allowed`.
pub fn is_one_of(value: &Scalar, allowed: &[Scalar]) -> bool {
    allowed.iter().any(|candidate| value.loose_eq(candidate))
}

/// Reads one `%d` conversion: optional whitespace, optional sign, digits.
fn scan_int(input: &str) -> Option<(i64, &str)> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let start = i;
    let mut magnitude: i64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i64::from(bytes[i] - b'0'));
        i += 1;
    }
    if i == start {
        return None;
    }
    let number = if negative { -magnitude } else { magnitude };
    Some((number, &trimmed[i..]))
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_valid_date(year: i64, month: i64, day: i64) -> bool {
    (1..=32767).contains(&year)
        && (1..=12).contains(&month)
        && day >= 1
        && day <= days_in_month(year, month)
}

/// Returns true if `value` is a `year-month-day` date on the Gregorian
/// calendar.
///
/// Components have no fixed width and text after the day is ignored.
///
/// # Examples
///
/// ```
/// use input_cage::validate::is_date;
///
/// assert!(is_date("2009-06-30"));
/// assert!(is_date("2009-6-30"));
/// assert!(!is_date("2009-06-31"));
/// assert!(!is_date("2009-2-30"));
/// ```
pub fn is_date(value: &str) -> bool {
    scan_date(value).is_some_and(|(year, month, day)| is_valid_date(year, month, day))
}

fn scan_date(value: &str) -> Option<(i64, i64, i64)> {
    let (year, rest) = scan_int(value)?;
    let (month, rest) = scan_int(rest.strip_prefix('-')?)?;
    let (day, _) = scan_int(rest.strip_prefix('-')?)?;
    Some((year, month, day))
}

/// Returns true if `value` is a US ZIP (`NNNNN`) or ZIP+4 (`NNNNN-NNNN`) code.
pub fn is_zip(value: &str) -> bool {
    let bytes = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    match bytes.len() {
        5 => digits(0..5),
        10 => digits(0..5) && bytes[5] == b'-' && digits(6..10),
        _ => false,
    }
}

/// Returns true if the digits of `value` form a card number that passes the
/// Luhn checksum.
///
/// Non-digits are stripped first; 13 to 19 digits must remain.
///
/// # Examples
///
/// ```
/// use input_cage::validate::is_ccnum;
///
/// assert!(is_ccnum("4111 1111 1111 1111"));
/// assert!(!is_ccnum("4111 1111 1111 1112"));
/// ```
pub fn is_ccnum(value: &str) -> bool {
    let digits: Vec<u32> = filter::digits(value)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    let Some((&check, payload)) = digits.split_last() else {
        return false;
    };
    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            let weighted = if i % 2 == 0 { digit * 2 } else { digit };
            weighted / 10 + weighted % 10
        })
        .sum();

    (10 - sum % 10) % 10 == check
}

/// Returns true if `value` is an all-digit phone number for `country`.
///
/// Only `US` is supported: ten digits whose first three are a North
/// American area code.
///
/// # Errors
///
/// Returns `UnsupportedMode` for any other country, once `value` has passed
/// the all-digit check.
pub fn is_phone(value: &str, country: &str) -> Result<bool, Error> {
    if !is_digits(value) {
        return Ok(false);
    }
    match country {
        "US" => {
            if value.len() != 10 {
                return Ok(false);
            }
            let area_code: u16 = value[..3].parse().unwrap_or(0);
            Ok(area_codes::US.binary_search(&area_code).is_ok())
        }
        other => Err(Error::new(
            ErrorKind::UnsupportedMode,
            format!("is_phone() does not yet support country '{}'", other),
        )),
    }
}

/// Returns true if `value` is written the way a float renders.
///
/// Locale separators are normalized first. The result must then compare
/// equal to the 14-digit rendering of its own leading float value, so
/// `"1.50"` passes and `"1.5kg"` does not.
pub fn is_float(value: &str, locale: &NumericLocale) -> bool {
    let normalized = locale.normalize(value);
    let rendered = numeric::format_float(numeric::leading_float(&normalized));
    match (
        numeric::parse_number(&normalized),
        numeric::parse_number(&rendered),
    ) {
        (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
        _ => rendered == normalized.as_ref(),
    }
}

/// Returns true if `value` is a plain integer within the signed 64-bit range.
///
/// Locale separators are normalized first. Fractions, exponents and a
/// leading `+` are rejected. The lower bound is `-9223372036854775807`.
pub fn is_int(value: &str, locale: &NumericLocale) -> bool {
    let normalized = locale.normalize(value);
    let magnitude = normalized.strip_prefix('-').unwrap_or(&normalized);
    if !is_digits(magnitude) {
        return false;
    }
    let significant = match magnitude.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    significant.len() < INT_LIMIT.len()
        || (significant.len() == INT_LIMIT.len() && significant <= INT_LIMIT)
}

/// Returns true if `pattern` matches anywhere in `value`.
pub fn is_regex(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_classes_reject_empty() {
        assert!(!is_alpha(""));
        assert!(!is_alnum(""));
        assert!(!is_digits(""));
        assert!(!is_hex(""));
    }

    #[test]
    fn character_classes() {
        assert!(is_alpha("Crème"));
        assert!(!is_alpha("abc1"));
        assert!(is_alnum("abc123"));
        assert!(!is_alnum("abc 123"));
        assert!(is_digits("102943875019273091740987023948"));
        assert!(!is_digits("1029438750192730t91740987023948"));
        assert!(!is_digits("-1"));
        assert!(is_hex("6F"));
        assert!(is_hex("f6"));
        assert!(!is_hex("0x6F"));
    }

    #[test]
    fn ordering_validators() {
        assert!(is_greater_than(&Scalar::Int(5), &Scalar::Int(0)));
        assert!(!is_greater_than(&Scalar::Int(2), &Scalar::Int(10)));
        assert!(is_greater_than(&Scalar::text("b"), &Scalar::text("a")));
        assert!(!is_greater_than(&Scalar::text("a"), &Scalar::text("b")));
        assert!(is_less_than(&Scalar::text("9"), &Scalar::text("10")));
        assert!(!is_less_than(&Scalar::Int(3), &Scalar::Int(3)));
    }

    #[test]
    fn between_inclusive_and_exclusive() {
        let (min, max) = (Scalar::Int(1), Scalar::Int(10));
        assert!(is_between(&Scalar::Int(1), &min, &max, true));
        assert!(is_between(&Scalar::Int(10), &min, &max, true));
        assert!(!is_between(&Scalar::Int(10), &min, &max, false));
        assert!(is_between(&Scalar::text("5"), &min, &max, false));
        assert!(!is_between(&Scalar::Int(11), &min, &max, true));
        assert!(!is_between(&Scalar::Float(f64::NAN), &min, &max, true));
    }

    #[test]
    fn one_of_uses_loose_equality() {
        let allowed = [Scalar::Int(1), Scalar::text("two")];
        assert!(is_one_of(&Scalar::text("1"), &allowed));
        assert!(is_one_of(&Scalar::text("two"), &allowed));
        assert!(!is_one_of(&Scalar::text("three"), &allowed));
        assert!(!is_one_of(&Scalar::text("x"), &[]));
    }

    #[test]
    fn dates() {
        assert!(is_date("2009-06-30"));
        assert!(!is_date("2009-06-31"));
        assert!(is_date("2009-6-30"));
        assert!(is_date("2-6-30"));
        assert!(!is_date("2009-2-30"));
        assert!(is_date("2008-02-29"));
        assert!(!is_date("1900-02-29"));
        assert!(is_date("2000-02-29"));
        assert!(is_date("2009-06-30T12:00:00"));
    }

    #[test]
    fn dates_reject_malformed() {
        assert!(!is_date(""));
        assert!(!is_date("2009/06/30"));
        assert!(!is_date("2009-06"));
        assert!(!is_date("0-01-01"));
        assert!(!is_date("32768-01-01"));
        assert!(!is_date("2009-13-01"));
        assert!(!is_date("2009-00-10"));
        assert!(!is_date("99999999999999999999999-01-01"));
    }

    #[test]
    fn zip_codes() {
        assert!(is_zip("12345"));
        assert!(is_zip("12345-6789"));
        assert!(!is_zip("1234"));
        assert!(!is_zip("12345-678"));
        assert!(!is_zip("12345 6789"));
        assert!(!is_zip("abcde"));
        assert!(!is_zip("12345\n"));
    }

    #[test]
    fn ccnum_luhn() {
        assert!(is_ccnum("4111111111111111"));
        assert!(is_ccnum("4111-1111-1111-1111"));
        assert!(is_ccnum("378282246310005"));
        assert!(!is_ccnum("4111111111111112"));
        assert!(!is_ccnum("411111111111"));
        assert!(!is_ccnum(""));
        assert!(!is_ccnum("41111111111111111111"));
    }

    #[test]
    fn phone_us() {
        assert_eq!(is_phone("2125551234", "US"), Ok(true));
        assert_eq!(is_phone("9895551234", "US"), Ok(true));
        assert_eq!(is_phone("2115551234", "US"), Ok(false));
        assert_eq!(is_phone("212555123", "US"), Ok(false));
        assert_eq!(is_phone("212-555-1234", "US"), Ok(false));
    }

    #[test]
    fn phone_unsupported_country() {
        let error = is_phone("0201234567", "UK").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedMode);
        assert!(error.message().contains("UK"));

        // The digit check runs before the country is looked at.
        assert_eq!(is_phone("not-a-number", "UK"), Ok(false));
    }

    #[test]
    fn floats() {
        let c = NumericLocale::C;
        assert!(is_float("1.5", &c));
        assert!(is_float("1.50", &c));
        assert!(is_float("-0.25", &c));
        assert!(is_float("10", &c));
        assert!(is_float("1e3", &c));
        assert!(!is_float("1.5kg", &c));
        assert!(!is_float("abc", &c));
        assert!(!is_float("", &c));
    }

    #[test]
    fn floats_with_locale() {
        let german = NumericLocale::new(',', Some('.'));
        assert!(is_float("1.234,5", &german));
        assert!(is_float("0,5", &german));
    }

    #[test]
    fn ints() {
        let c = NumericLocale::C;
        assert!(is_int("0", &c));
        assert!(is_int("-42", &c));
        assert!(is_int("007", &c));
        assert!(is_int("9223372036854775807", &c));
        assert!(is_int("-9223372036854775807", &c));
        assert!(!is_int("9223372036854775808", &c));
        assert!(!is_int("-9223372036854775808", &c));
        assert!(!is_int("1.0", &c));
        assert!(!is_int("1e3", &c));
        assert!(!is_int("+5", &c));
        assert!(!is_int("-", &c));
        assert!(!is_int("", &c));
    }

    #[test]
    fn ints_with_locale() {
        let locale = NumericLocale::new('.', Some(','));
        assert!(is_int("1,000,000", &locale));
        assert!(!is_int("1,000.5", &locale));
    }

    #[test]
    fn regex_matches_anywhere() {
        let pattern = Regex::new(r"^[A-Z]{3}$").unwrap();
        assert!(is_regex("ABC", &pattern));
        assert!(!is_regex("ABCD", &pattern));

        let unanchored = Regex::new(r"\d").unwrap();
        assert!(is_regex("abc1", &unanchored));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn luhn_check_digit(payload: &[u32]) -> u32 {
            let sum: u32 = payload
                .iter()
                .rev()
                .enumerate()
                .map(|(i, &d)| {
                    let w = if i % 2 == 0 { d * 2 } else { d };
                    w / 10 + w % 10
                })
                .sum();
            (10 - sum % 10) % 10
        }

        fn render(digits: &[u32]) -> String {
            digits
                .iter()
                .filter_map(|&d| char::from_digit(d, 10))
                .collect()
        }

        proptest! {
            /// Property: Every Luhn-valid number of 13-19 digits is accepted
            #[test]
            fn proptest_ccnum_accepts_luhn_valid(
                payload in prop::collection::vec(0u32..10, 12..19),
            ) {
                let mut digits = payload.clone();
                digits.push(luhn_check_digit(&payload));
                prop_assert!(is_ccnum(&render(&digits)));
            }

            /// Property: Changing any single digit breaks the checksum
            #[test]
            fn proptest_ccnum_rejects_substitution(
                payload in prop::collection::vec(0u32..10, 12..19),
                index in any::<prop::sample::Index>(),
                delta in 1u32..10,
            ) {
                let mut digits = payload.clone();
                digits.push(luhn_check_digit(&payload));
                let i = index.index(digits.len());
                digits[i] = (digits[i] + delta) % 10;
                prop_assert!(!is_ccnum(&render(&digits)));
            }

            /// Property: Any in-range integer renders as a valid int
            #[test]
            fn proptest_is_int_accepts_i64(n in (i64::MIN + 1)..=i64::MAX) {
                prop_assert!(is_int(&n.to_string(), &NumericLocale::C));
            }

            /// Property: is_between agrees with the integer range check
            #[test]
            fn proptest_is_between_matches_range(
                v in -100i64..100,
                a in -100i64..100,
                b in -100i64..100,
            ) {
                let (min, max) = (a.min(b), a.max(b));
                let value = Scalar::Int(v);
                prop_assert_eq!(
                    is_between(&value, &Scalar::Int(min), &Scalar::Int(max), true),
                    (min..=max).contains(&v)
                );
                prop_assert_eq!(
                    is_between(&value, &Scalar::Int(min), &Scalar::Int(max), false),
                    min < v && v < max
                );
            }
        }
    }
}
