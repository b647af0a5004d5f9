//! Network-shaped validators: email, IPv4, hostnames and URIs.

use std::net::Ipv4Addr;
use std::ops::BitOr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, ErrorKind};

/// "Matches 99% of addresses" rather than the RFC grammar.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$")
        .expect("Invalid email regex pattern")
});

static DNS_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}\.?$")
        .expect("Invalid DNS name regex pattern")
});

// Every label needs at least two characters; there is no TLD requirement.
static LOCAL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]\.)*",
        r"[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]\.?$",
    ))
    .expect("Invalid local name regex pattern")
});

static COMMON_URI_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = concat!(
        r"^(?:[fF][tT][pP]|[hH][tT][tT][pP][sS]?)://",
        r"(?:[-a-zA-Z0-9/~;:@=+$,.!*()']+@)?",
        r"(?:",
        r"(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}\.?",
        r"|",
        r"[0-9]{1,3}(?:\.[0-9]{1,3})?(?:\.[0-9]{1,3})?(?:\.[0-9]{1,3})?",
        r")",
        r"(?::[0-9]*)?",
        r"(?:/(?:%[0-9a-fA-F]{2}|[-_a-zA-Z0-9/~;:@=+$,.!*()'&]*)*/?)?",
        r"(?:\?[^#]*)?",
        r"(?:#[-a-zA-Z0-9_]*)?$",
    );
    Regex::new(pattern).expect("Invalid URI regex pattern")
});

/// Which kinds of hostnames `is_hostname` accepts.
///
/// A bitfield over [`DNS`](Self::DNS), [`IP`](Self::IP) and
/// [`LOCAL`](Self::LOCAL). Masks outside `1..=7` are representable so that
/// a misconfigured mask can be reported and still applied.
///
/// # Examples
///
/// ```
/// use input_cage::validate::{is_hostname, HostMask};
///
/// assert!(is_hostname("192.168.1.1", HostMask::IP));
/// assert!(!is_hostname("192.168.1.1", HostMask::DNS));
/// assert!(is_hostname("example.com", HostMask::DNS | HostMask::IP));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostMask(i64);

impl HostMask {
    /// Internet domain names (`example.com`).
    pub const DNS: Self = Self(1);
    /// Dotted-quad IPv4 addresses.
    pub const IP: Self = Self(2);
    /// Local network names (`localhost`, `intranet.local`).
    pub const LOCAL: Self = Self(4);
    /// All of the above.
    pub const ALL: Self = Self(7);

    /// Creates a mask from raw bits without range checking.
    pub fn from_bits(bits: i64) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub fn bits(self) -> i64 {
        self.0
    }

    /// Returns true if any bit of `other` is set in this mask.
    pub fn allows(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if the mask is within `1..=7`.
    pub fn is_valid(self) -> bool {
        (Self::DNS.0..=Self::ALL.0).contains(&self.0)
    }
}

impl Default for HostMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for HostMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// URI validation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UriMode {
    /// `ftp`, `http` or `https` with an authority.
    #[default]
    Common,
    /// Any absolute URI. Not implemented; validation fails closed.
    Absolute,
}

impl UriMode {
    /// Resolves a numeric mode code (`1` common, `2` absolute).
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode` for any other code.
    pub fn from_code(code: i64) -> Result<Self, Error> {
        match code {
            1 => Ok(Self::Common),
            2 => Ok(Self::Absolute),
            other => Err(Error::new(
                ErrorKind::UnsupportedMode,
                format!("is_uri has no mode {}", other),
            )),
        }
    }

    /// Returns the numeric mode code.
    pub fn code(self) -> i64 {
        match self {
            Self::Common => 1,
            Self::Absolute => 2,
        }
    }
}

/// Returns true if `value` looks like an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Returns true if `value` is a dotted-quad IPv4 address other than `0.0.0.0`.
///
/// The all-zero address converts to a zero 32-bit value and is rejected.
pub fn is_ip(value: &str) -> bool {
    value
        .parse::<Ipv4Addr>()
        .map(|addr| u32::from(addr) != 0)
        .unwrap_or(false)
}

/// Returns true if `value` is a hostname of a kind allowed by `mask`.
///
/// An IPv4 address is decided by the IP bit alone. Otherwise a DNS name
/// passes with the DNS bit, and anything else gets one last chance against
/// the local-name pattern when the LOCAL bit is set.
pub fn is_hostname(value: &str, mask: HostMask) -> bool {
    if is_ip(value) {
        return mask.allows(HostMask::IP);
    }
    if mask.allows(HostMask::DNS) && DNS_NAME_REGEX.is_match(value) {
        return true;
    }
    if !mask.allows(HostMask::LOCAL) {
        return false;
    }
    LOCAL_NAME_REGEX.is_match(value)
}

/// Validates `value` as a URI in the given mode.
///
/// In common mode the host may be a DNS name or one to four dotted octet
/// groups; the octets are not range checked.
///
/// # Errors
///
/// Returns `UnsupportedMode` for [`UriMode::Absolute`].
pub fn is_uri(value: &str, mode: UriMode) -> Result<bool, Error> {
    match mode {
        UriMode::Common => Ok(COMMON_URI_REGEX.is_match(value)),
        UriMode::Absolute => Err(Error::new(
            ErrorKind::UnsupportedMode,
            "is_uri for absolute URIs has not been implemented",
        )),
    }
}
