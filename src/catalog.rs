//! The rule catalog: dispatch, reporting and recursive application.

use std::fmt;
use std::sync::Arc;

use crate::rule::RuleKind;
use crate::sanitizer::{FilterSanitizer, ValidatorSanitizer};
use crate::validate;
use crate::{
    filter, rule, walk, Config, Error, ErrorKind, Filter, Reporter, Scalar, TracingReporter,
    Validator, Value,
};

/// Applies filters and validators under one configuration.
///
/// Statically chosen rules ([`Filter`], [`Validator`]) dispatch without
/// failing. Rules named at runtime go through [`apply_filter`],
/// [`apply_validator`] and [`apply_named`], where an unknown name is a
/// configuration error. Every configuration error is handed to the
/// [`Reporter`] before it is returned.
///
/// [`apply_filter`]: Catalog::apply_filter
/// [`apply_validator`]: Catalog::apply_validator
/// [`apply_named`]: Catalog::apply_named
///
/// # Examples
///
/// ```
/// use input_cage::{Catalog, Filter, Scalar, Validator};
///
/// let catalog = Catalog::default();
///
/// assert_eq!(catalog.filter(Filter::Int, &Scalar::text("145abc")), Scalar::Int(145));
/// assert!(catalog.validate(&Validator::Email, &Scalar::text("coj+booboo@poop.com")));
/// assert!(catalog.apply_filter("get_upper", &Scalar::text("x")).is_err());
/// ```
#[derive(Clone)]
pub struct Catalog {
    config: Config,
    reporter: Arc<dyn Reporter>,
}

impl Catalog {
    /// Creates a catalog that reports through `tracing`.
    pub fn new(config: Config) -> Self {
        Self::with_reporter(config, Arc::new(TracingReporter))
    }

    /// Creates a catalog with a custom reporter.
    pub fn with_reporter(config: Config, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies a filter to one scalar.
    ///
    /// Every filter but [`Filter::Int`] produces text.
    pub fn filter(&self, filter: Filter, value: &Scalar) -> Scalar {
        let text = value.to_text();
        let backend = self.config.backend();
        let filtered = match filter {
            Filter::Int => return Scalar::Int(value.to_int()),
            Filter::Alpha => filter::alpha(&text),
            Filter::Alnum => filter::alnum(&text),
            Filter::Digits => filter::digits(&text),
            Filter::Dir => filter::dir(&text),
            Filter::Rot13 => filter::rot13(&text),
            Filter::NoTags => filter::no_tags(&text, backend),
            Filter::NoTagsOrSpecial => filter::no_tags_or_special(&text, backend),
            Filter::NoPath => filter::base_name(&text),
        };
        Scalar::Text(filtered)
    }

    /// Checks one scalar against a validator.
    ///
    /// An unsupported mode or country is reported as a warning and the
    /// value fails. An out-of-range hostname mask is reported and then
    /// applied as given.
    pub fn validate(&self, validator: &Validator, value: &Scalar) -> bool {
        self.check_arguments(validator);
        self.check(validator, value)
    }

    // Argument problems are reported by `check_arguments`, once per call.
    fn check(&self, validator: &Validator, value: &Scalar) -> bool {
        let text = value.to_text();
        let locale = self.config.locale();
        match validator {
            Validator::Alpha => validate::is_alpha(&text),
            Validator::Alnum => validate::is_alnum(&text),
            Validator::Digits => validate::is_digits(&text),
            Validator::Hex => validate::is_hex(&text),
            Validator::Date => validate::is_date(&text),
            Validator::Email => validate::is_email(&text),
            Validator::Ip => validate::is_ip(&text),
            Validator::Zip => validate::is_zip(&text),
            Validator::CcNum => validate::is_ccnum(&text),
            Validator::Float => validate::is_float(&text, locale),
            Validator::Int => validate::is_int(&text, locale),
            Validator::Between {
                min,
                max,
                inclusive,
            } => validate::is_between(value, min, max, *inclusive),
            Validator::GreaterThan(min) => validate::is_greater_than(value, min),
            Validator::LessThan(max) => validate::is_less_than(value, max),
            Validator::OneOf(allowed) => validate::is_one_of(value, allowed),
            Validator::Hostname(mask) => validate::is_hostname(&text, *mask),
            Validator::Uri(mode) => validate::is_uri(&text, *mode).unwrap_or(false),
            Validator::Phone(country) => self.fail_closed(validate::is_phone(&text, country)),
            Validator::Regex(pattern) => validate::is_regex(&text, pattern),
        }
    }

    /// Applies the filter called `name` to one scalar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleName` (reported as an error) if no filter has
    /// that name.
    pub fn apply_filter(&self, name: &str, value: &Scalar) -> Result<Scalar, Error> {
        let filter = self.settle(self.resolve_filter(name))?;
        Ok(self.filter(filter, value))
    }

    /// Checks one scalar against the validator called `name`.
    ///
    /// `args` are the validator's positional arguments, see
    /// [`Validator::from_name`].
    ///
    /// # Errors
    ///
    /// Returns the construction error from [`Validator::from_name`], after
    /// reporting it.
    pub fn apply_validator(
        &self,
        name: &str,
        value: &Scalar,
        args: &[Scalar],
    ) -> Result<bool, Error> {
        let validator = self.settle(Validator::from_name(name, args))?;
        Ok(self.validate(&validator, value))
    }

    /// Applies a filter to a scalar or to every leaf of a container.
    ///
    /// # Errors
    ///
    /// Returns `RecursionLimitExceeded` (reported as a warning) if the value
    /// nests deeper than the configured `max_depth`.
    pub fn apply(&self, value: &Value, filter: Filter) -> Result<Value, Error> {
        self.settle(walk::map_leaves(value, self.config.max_depth(), &mut |leaf| {
            self.filter(filter, leaf)
        }))
    }

    /// Applies the filter called `name` to a scalar or container.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleName` for an unknown name and
    /// `RecursionLimitExceeded` for pathological nesting. Both are reported.
    pub fn apply_named(&self, value: &Value, name: &str) -> Result<Value, Error> {
        let filter = self.settle(self.resolve_filter(name))?;
        self.apply(value, filter)
    }

    /// Checks a scalar, or every leaf of a container, against a validator.
    ///
    /// A container passes only if it has at least one leaf and every leaf
    /// passes.
    ///
    /// # Errors
    ///
    /// Returns `RecursionLimitExceeded` (reported as a warning) if the value
    /// nests deeper than the configured `max_depth`.
    pub fn test(&self, value: &Value, validator: &Validator) -> Result<bool, Error> {
        self.check_arguments(validator);
        self.settle(walk::all_leaves(value, self.config.max_depth(), &mut |leaf| {
            self.check(validator, leaf)
        }))
    }

    /// Returns a sanitizer that applies `filter`.
    pub fn sanitizer(&self, filter: Filter) -> FilterSanitizer<'_> {
        FilterSanitizer::new(self, filter)
    }

    /// Returns a sanitizer that admits values passing `validator`.
    pub fn validator_sanitizer(&self, validator: Validator) -> ValidatorSanitizer<'_> {
        ValidatorSanitizer::new(self, validator)
    }

    /// Reports a configuration problem.
    pub(crate) fn report(&self, error: &Error) {
        self.reporter.report(&error.to_string(), error.severity());
    }

    /// Reports the error, if any, and passes the result through.
    pub(crate) fn settle<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        result.inspect_err(|error| self.report(error))
    }

    /// Resolves a filter name, naming the right group when the name belongs
    /// to a validator or escaper.
    pub(crate) fn resolve_filter(&self, name: &str) -> Result<Filter, Error> {
        match rule::rule_kind(name)? {
            RuleKind::Filter(filter) => Ok(filter),
            RuleKind::Validator | RuleKind::Escape(_) => Err(Error::new(
                ErrorKind::InvalidRuleName,
                format!("'{}' is not a filter", name),
            )),
        }
    }

    fn check_arguments(&self, validator: &Validator) {
        match validator {
            Validator::Hostname(mask) if !mask.is_valid() => self.report(&Error::new(
                ErrorKind::InvalidOption,
                format!("is_hostname mask {} is outside 1..=7", mask.bits()),
            )),
            Validator::Uri(mode) => {
                if let Err(error) = validate::is_uri("", *mode) {
                    self.report(&error);
                }
            }
            _ => {}
        }
    }

    fn fail_closed(&self, result: Result<bool, Error>) -> bool {
        self.settle(result).unwrap_or(false)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
