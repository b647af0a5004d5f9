use std::fmt;

use crate::report::Severity;

/// Error returned by the rule catalog, cages and supercages.
///
/// Filters and validators never fail because of a malformed *input value*;
/// they degrade to a defined result instead. An `Error` means either that
/// the caller misconfigured something (unknown rule name, bad mode, bad
/// argument) or that a cage refused an access (absent key, raw access
/// without opt-in).
///
/// # Examples
///
/// ```
/// use input_cage::{Error, ErrorKind, Severity};
///
/// let error = Error::new(ErrorKind::InvalidRuleName, "no rule named 'get_upper'");
/// assert_eq!(error.kind(), ErrorKind::InvalidRuleName);
/// assert_eq!(error.severity(), Severity::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Creates a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity this error is reported with.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub(crate) fn invalid_rule(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidRuleName,
            format!("no rule named '{}' in the catalog", name),
        )
    }

    pub(crate) fn key_not_found(key: &str) -> Self {
        Self::new(ErrorKind::KeyNotFound, format!("key '{}' does not exist", key))
    }

    pub(crate) fn recursion_limit(max_depth: usize) -> Self {
        Self::new(
            ErrorKind::RecursionLimitExceeded,
            format!("input nesting exceeds the limit of {} levels", max_depth),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

/// Kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A rule name does not resolve to a rule in the catalog.
    InvalidRuleName,
    /// A rule was invoked by name with missing or unusable arguments.
    InvalidArgument,
    /// A user-supplied pattern failed to compile.
    InvalidPattern,
    /// An enumerated option has no implementation. The operation fails closed.
    UnsupportedMode,
    /// An option value is out of range. Processing continues with it.
    InvalidOption,
    /// A cage accessor was called with an absent key.
    KeyNotFound,
    /// Raw access was attempted without the `keep_original` opt-in.
    NotPermitted,
    /// A supercage lookup named a source that does not exist.
    UnknownSource,
    /// Input nesting is deeper than the configured ceiling.
    RecursionLimitExceeded,
    /// A value failed validation inside a sanitizer.
    Rejected,
}

impl ErrorKind {
    /// Returns the severity used when this kind is reported.
    pub fn severity(self) -> Severity {
        match self {
            Self::UnsupportedMode | Self::InvalidOption | Self::RecursionLimitExceeded => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRuleName => write!(f, "invalid rule name"),
            Self::InvalidArgument => write!(f, "invalid rule argument"),
            Self::InvalidPattern => write!(f, "invalid pattern"),
            Self::UnsupportedMode => write!(f, "unsupported mode"),
            Self::InvalidOption => write!(f, "invalid option"),
            Self::KeyNotFound => write!(f, "key not found"),
            Self::NotPermitted => write!(f, "not permitted"),
            Self::UnknownSource => write!(f, "unknown source"),
            Self::RecursionLimitExceeded => write!(f, "recursion limit exceeded"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}
