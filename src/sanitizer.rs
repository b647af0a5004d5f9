use std::fmt;

use crate::{Catalog, Error, ErrorKind, Filter, Tainted, Validator, Value, Verified};

/// Trait for promoting tainted values into verified values.
///
/// `Sanitizer<T>` is the only path from [`Tainted<T>`] to [`Verified<T>`].
/// The built-in sanitizers wrap catalog rules; hosts implement it for their
/// own rules and run them through
/// [`Cage::sanitize_with`](crate::Cage::sanitize_with).
///
/// # Invariants
///
/// Implementations MUST:
/// - Apply their rule to the input before calling `Verified::new_unchecked`
/// - Return `Err(Error)` if the input cannot be promoted
/// - Not leak the rejected input in errors
///
/// # Examples
///
/// ```
/// use input_cage::{Catalog, Filter, Sanitizer, Tainted, Value};
///
/// let catalog = Catalog::default();
/// let digits = catalog.sanitizer(Filter::Digits);
///
/// let verified = digits.sanitize(Tainted::new(Value::text("(555) 123-4567"))).unwrap();
/// assert_eq!(verified.as_ref(), &Value::text("5551234567"));
/// ```
pub trait Sanitizer<T> {
    /// Sanitizes a tainted value, returning a verified value on success.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the input cannot be promoted.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<T>, Error>;
}

/// Promotes a value by running a filter over every leaf.
///
/// Filters never reject input; the only failure is nesting deeper than the
/// catalog's `max_depth`.
pub struct FilterSanitizer<'a> {
    catalog: &'a Catalog,
    filter: Filter,
}

impl<'a> FilterSanitizer<'a> {
    pub(crate) fn new(catalog: &'a Catalog, filter: Filter) -> Self {
        Self { catalog, filter }
    }

    /// Returns the filter this sanitizer applies.
    pub fn filter(&self) -> Filter {
        self.filter
    }
}

impl fmt::Debug for FilterSanitizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSanitizer")
            .field("filter", &self.filter)
            .finish()
    }
}

impl Sanitizer<Value> for FilterSanitizer<'_> {
    fn sanitize(&self, input: Tainted<Value>) -> Result<Verified<Value>, Error> {
        let value = input.into_inner();
        let filtered = self.catalog.apply(&value, self.filter)?;
        Ok(Verified::new_unchecked(filtered))
    }
}

/// Promotes a value unchanged if every leaf passes a validator.
///
/// # Examples
///
/// ```
/// use input_cage::{Catalog, ErrorKind, Sanitizer, Tainted, Validator, Value};
///
/// let catalog = Catalog::default();
/// let email = catalog.validator_sanitizer(Validator::Email);
///
/// assert!(email.sanitize(Tainted::new(Value::text("coj@poop.com"))).is_ok());
///
/// let error = email.sanitize(Tainted::new(Value::text("@poop.com"))).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::Rejected);
/// ```
pub struct ValidatorSanitizer<'a> {
    catalog: &'a Catalog,
    validator: Validator,
}

impl<'a> ValidatorSanitizer<'a> {
    pub(crate) fn new(catalog: &'a Catalog, validator: Validator) -> Self {
        Self { catalog, validator }
    }

    /// Returns the validator this sanitizer checks.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl fmt::Debug for ValidatorSanitizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorSanitizer")
            .field("validator", &self.validator.name())
            .finish()
    }
}

impl Sanitizer<Value> for ValidatorSanitizer<'_> {
    fn sanitize(&self, input: Tainted<Value>) -> Result<Verified<Value>, Error> {
        let value = input.into_inner();
        if self.catalog.test(&value, &self.validator)? {
            Ok(Verified::new_unchecked(value))
        } else {
            Err(Error::new(
                ErrorKind::Rejected,
                format!("value failed {}", self.validator.name()),
            ))
        }
    }
}
