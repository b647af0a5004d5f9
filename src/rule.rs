//! Rule identifiers.
//!
//! Rules are closed enums so that statically known rule choices are
//! checked by the compiler. Names are only resolved at the dynamic
//! boundary: [`Filter::from_str`], [`Validator::from_name`] and
//! [`rule_kind`].

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::escape::Dialect;
use crate::validate::{HostMask, UriMode};
use crate::{Error, ErrorKind, Scalar};

/// A value-transforming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `get_alpha`
    Alpha,
    /// `get_alnum`
    Alnum,
    /// `get_digits`
    Digits,
    /// `get_int`
    Int,
    /// `get_dir`
    Dir,
    /// `get_rot13`
    Rot13,
    /// `no_tags`
    NoTags,
    /// `no_tags_or_special`
    NoTagsOrSpecial,
    /// `no_path`
    NoPath,
}

impl Filter {
    /// Every filter, in catalog order.
    pub const ALL: [Filter; 9] = [
        Filter::Alpha,
        Filter::Alnum,
        Filter::Digits,
        Filter::Int,
        Filter::Dir,
        Filter::Rot13,
        Filter::NoTags,
        Filter::NoTagsOrSpecial,
        Filter::NoPath,
    ];

    /// Returns the stable rule name.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Alpha => "get_alpha",
            Filter::Alnum => "get_alnum",
            Filter::Digits => "get_digits",
            Filter::Int => "get_int",
            Filter::Dir => "get_dir",
            Filter::Rot13 => "get_rot13",
            Filter::NoTags => "no_tags",
            Filter::NoTagsOrSpecial => "no_tags_or_special",
            Filter::NoPath => "no_path",
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name() == name)
            .ok_or_else(|| Error::invalid_rule(name))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A predicate rule, together with its arguments.
///
/// # Examples
///
/// ```
/// use input_cage::{Catalog, Scalar, Validator};
///
/// let catalog = Catalog::default();
/// let adult = Validator::Between {
///     min: Scalar::Int(18),
///     max: Scalar::Int(130),
///     inclusive: true,
/// };
///
/// assert!(catalog.validate(&adult, &Scalar::text("42")));
/// assert!(!catalog.validate(&adult, &Scalar::text("12")));
/// ```
#[derive(Debug, Clone)]
pub enum Validator {
    /// `is_alpha`
    Alpha,
    /// `is_alnum`
    Alnum,
    /// `is_digits`
    Digits,
    /// `is_hex`
    Hex,
    /// `is_date`
    Date,
    /// `is_email`
    Email,
    /// `is_ip`
    Ip,
    /// `is_zip`
    Zip,
    /// `is_ccnum`
    CcNum,
    /// `is_float`
    Float,
    /// `is_int`
    Int,
    /// `is_between`
    Between {
        /// Lower bound
        min: Scalar,
        /// Upper bound
        max: Scalar,
        /// Whether the bounds themselves pass
        inclusive: bool,
    },
    /// `is_greater_than`
    GreaterThan(Scalar),
    /// `is_less_than`
    LessThan(Scalar),
    /// `is_one_of`
    OneOf(Vec<Scalar>),
    /// `is_hostname`
    Hostname(HostMask),
    /// `is_uri`
    Uri(UriMode),
    /// `is_phone`, with a country code
    Phone(String),
    /// `is_regex`, with a compiled pattern
    Regex(Regex),
}

impl Validator {
    /// Every validator name, in catalog order.
    pub const NAMES: [&'static str; 19] = [
        "is_alpha",
        "is_alnum",
        "is_digits",
        "is_hex",
        "is_between",
        "is_greater_than",
        "is_less_than",
        "is_one_of",
        "is_date",
        "is_email",
        "is_hostname",
        "is_ip",
        "is_uri",
        "is_zip",
        "is_ccnum",
        "is_phone",
        "is_float",
        "is_int",
        "is_regex",
    ];

    /// `is_one_of` over the characters of `allowed`.
    pub fn one_of_chars(allowed: &str) -> Self {
        Validator::OneOf(allowed.chars().map(|c| Scalar::Text(c.to_string())).collect())
    }

    /// `is_regex` with `pattern` compiled up front.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the pattern does not compile.
    pub fn matching(pattern: &str) -> Result<Self, Error> {
        Regex::new(pattern).map(Validator::Regex).map_err(|e| {
            Error::new(
                ErrorKind::InvalidPattern,
                format!("is_regex pattern does not compile: {}", e),
            )
        })
    }

    /// Returns the stable rule name.
    pub fn name(&self) -> &'static str {
        match self {
            Validator::Alpha => "is_alpha",
            Validator::Alnum => "is_alnum",
            Validator::Digits => "is_digits",
            Validator::Hex => "is_hex",
            Validator::Date => "is_date",
            Validator::Email => "is_email",
            Validator::Ip => "is_ip",
            Validator::Zip => "is_zip",
            Validator::CcNum => "is_ccnum",
            Validator::Float => "is_float",
            Validator::Int => "is_int",
            Validator::Between { .. } => "is_between",
            Validator::GreaterThan(_) => "is_greater_than",
            Validator::LessThan(_) => "is_less_than",
            Validator::OneOf(_) => "is_one_of",
            Validator::Hostname(_) => "is_hostname",
            Validator::Uri(_) => "is_uri",
            Validator::Phone(_) => "is_phone",
            Validator::Regex(_) => "is_regex",
        }
    }

    /// Builds a validator from its name and positional arguments.
    ///
    /// Optional arguments fall back to their defaults: `inclusive = true`,
    /// mask `ALL`, URI mode `Common`, country `US`. A single text argument
    /// to `is_one_of` is split into characters.
    ///
    /// # Errors
    ///
    /// - `InvalidRuleName` if no validator has that name
    /// - `InvalidArgument` if a required argument is missing, or if more
    ///   arguments are given than the validator takes
    /// - `UnsupportedMode` for an unknown URI mode code, or a card type
    ///   passed to `is_ccnum`
    /// - `InvalidPattern` if an `is_regex` pattern does not compile
    ///
    /// # Examples
    ///
    /// ```
    /// use input_cage::{ErrorKind, Scalar, Validator};
    ///
    /// let vowel = Validator::from_name("is_one_of", &[Scalar::text("aeiou")]).unwrap();
    /// assert_eq!(vowel.name(), "is_one_of");
    ///
    /// let error = Validator::from_name("is_between", &[Scalar::Int(1)]).unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    ///
    /// let error = Validator::from_name("is_alpha", &[Scalar::Int(1)]).unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn from_name(name: &str, args: &[Scalar]) -> Result<Self, Error> {
        let validator = match name {
            "is_alpha" => Validator::Alpha,
            "is_alnum" => Validator::Alnum,
            "is_digits" => Validator::Digits,
            "is_hex" => Validator::Hex,
            "is_date" => Validator::Date,
            "is_email" => Validator::Email,
            "is_ip" => Validator::Ip,
            "is_zip" => Validator::Zip,
            "is_ccnum" => match args.first() {
                None | Some(Scalar::Null) => Validator::CcNum,
                Some(_) => {
                    return Err(Error::new(
                        ErrorKind::UnsupportedMode,
                        "is_ccnum does not yet support type-specific card checks",
                    ))
                }
            },
            "is_float" => Validator::Float,
            "is_int" => Validator::Int,
            "is_between" => Validator::Between {
                min: required(name, args, 0)?.clone(),
                max: required(name, args, 1)?.clone(),
                inclusive: args.get(2).map_or(true, Scalar::is_truthy),
            },
            "is_greater_than" => Validator::GreaterThan(required(name, args, 0)?.clone()),
            "is_less_than" => Validator::LessThan(required(name, args, 0)?.clone()),
            "is_one_of" => match args {
                [] => return Err(missing_argument(name, 0)),
                [Scalar::Text(allowed)] => Validator::one_of_chars(allowed),
                allowed => Validator::OneOf(allowed.to_vec()),
            },
            "is_hostname" => Validator::Hostname(
                args.first()
                    .map_or(HostMask::ALL, |mask| HostMask::from_bits(mask.to_int())),
            ),
            "is_uri" => Validator::Uri(match args.first() {
                Some(mode) => UriMode::from_code(mode.to_int())?,
                None => UriMode::Common,
            }),
            "is_phone" => Validator::Phone(
                args.first()
                    .map_or_else(|| "US".to_string(), |country| country.to_text().into_owned()),
            ),
            "is_regex" => Validator::matching(&required(name, args, 0)?.to_text())?,
            _ => return Err(Error::invalid_rule(name)),
        };
        match validator.max_args() {
            Some(most) if args.len() > most => Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("{} takes at most {} arguments, got {}", name, most, args.len()),
            )),
            _ => Ok(validator),
        }
    }

    // `None` for the variadic `is_one_of`.
    fn max_args(&self) -> Option<usize> {
        match self {
            Validator::OneOf(_) => None,
            Validator::Between { .. } => Some(3),
            Validator::CcNum
            | Validator::GreaterThan(_)
            | Validator::LessThan(_)
            | Validator::Hostname(_)
            | Validator::Uri(_)
            | Validator::Phone(_)
            | Validator::Regex(_) => Some(1),
            Validator::Alpha
            | Validator::Alnum
            | Validator::Digits
            | Validator::Hex
            | Validator::Date
            | Validator::Email
            | Validator::Ip
            | Validator::Zip
            | Validator::Float
            | Validator::Int => Some(0),
        }
    }
}

fn required<'a>(name: &str, args: &'a [Scalar], index: usize) -> Result<&'a Scalar, Error> {
    args.get(index).ok_or_else(|| missing_argument(name, index))
}

fn missing_argument(name: &str, index: usize) -> Error {
    Error::new(
        ErrorKind::InvalidArgument,
        format!("{} is missing argument {}", name, index + 1),
    )
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which group a rule name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// A filter
    Filter(Filter),
    /// A validator
    Validator,
    /// A database escaper
    Escape(Dialect),
}

/// Looks a rule name up across filters, validators and escapers.
///
/// # Errors
///
/// Returns `InvalidRuleName` if the name is not in the catalog.
pub fn rule_kind(name: &str) -> Result<RuleKind, Error> {
    if let Ok(filter) = name.parse::<Filter>() {
        return Ok(RuleKind::Filter(filter));
    }
    if Validator::NAMES.contains(&name) {
        return Ok(RuleKind::Validator);
    }
    Dialect::ALL
        .into_iter()
        .find(|dialect| dialect.rule_name() == name)
        .map(RuleKind::Escape)
        .ok_or_else(|| Error::invalid_rule(name))
}
