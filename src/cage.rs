//! The cage: filtered-only access to one bag of untrusted input.

use std::fmt;

use crate::escape::{EscapeSanitizer, Escaper};
use crate::walk;
use crate::{
    CageOptions, Catalog, Container, Error, ErrorKind, Filter, Sanitizer, Scalar, Tainted,
    Validator, Value, Verified,
};

/// Wraps one bag of raw input and hands out only filtered or validated
/// values.
///
/// The bag is ingested once and never changes afterwards. Every read goes
/// through a rule and comes back as [`Verified<Value>`]. The raw bag is
/// reachable only through [`get_raw`](Cage::get_raw), and only when
/// `keep_original` was set at construction.
///
/// Keys are looked up exactly first. An absent key containing `/` is then
/// followed as a path into nested containers, so `"address/zip"` finds
/// `form[address][zip]`.
///
/// # Examples
///
/// ```
/// use input_cage::{Cage, CageOptions, Catalog, Container, ErrorKind, Value};
///
/// let mut post: Container = [("age", "42 years"), ("name", "<b>Bob</b>")]
///     .into_iter()
///     .collect();
///
/// let cage = Cage::ingest(&mut post, CageOptions::default(), Catalog::default());
/// assert!(post.is_empty()); // strict ingestion took the caller's bag
///
/// assert_eq!(cage.get_int("age").unwrap().into_inner(), Value::from(42));
/// assert_eq!(cage.no_tags("name").unwrap().into_inner(), Value::text("Bob"));
/// assert_eq!(cage.get_raw("name").unwrap_err().kind(), ErrorKind::NotPermitted);
/// assert_eq!(cage.get_alpha("email").unwrap_err().kind(), ErrorKind::KeyNotFound);
/// ```
pub struct Cage {
    // BREAKING CHANGE WARNING: Do NOT hold the ingested bag as a plain Container.
    // Every read must go through a Sanitizer.
    data: Tainted<Container>,
    options: CageOptions,
    catalog: Catalog,
}

impl Cage {
    /// Creates a cage that owns `raw`.
    pub fn new(raw: Container, options: CageOptions, catalog: Catalog) -> Self {
        tracing::debug!(
            entries = raw.len(),
            strict = options.is_strict(),
            keep_original = options.keeps_original(),
            "cage constructed"
        );
        Self {
            data: Tainted::new(raw),
            options,
            catalog,
        }
    }

    /// Creates a cage from a caller-held bag.
    ///
    /// With `strict` set the bag is taken and the caller is left holding an
    /// empty container. Otherwise it is deep-copied, and later changes on
    /// either side are not seen by the other. A lax copy skips any entry
    /// nesting deeper than the catalog's `max_depth` and reports it.
    pub fn ingest(raw: &mut Container, options: CageOptions, catalog: Catalog) -> Self {
        let owned = if options.is_strict() {
            std::mem::take(raw)
        } else {
            copy_within_depth(raw, &catalog)
        };
        Self::new(owned, options, catalog)
    }

    /// Returns the value under `key` with `filter` applied to every leaf.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` if `key` is absent
    /// - `RecursionLimitExceeded` if the value nests too deep
    pub fn get(&self, key: &str, filter: Filter) -> Result<Verified<Value>, Error> {
        self.sanitize_with(key, &self.catalog.sanitizer(filter))
    }

    /// Like [`get`](Cage::get), with the filter chosen by name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleName` (reported) if `name` is not a filter, and
    /// otherwise the errors of [`get`](Cage::get).
    pub fn get_by_name(&self, key: &str, name: &str) -> Result<Verified<Value>, Error> {
        let filter = self.catalog.settle(self.catalog.resolve_filter(name))?;
        self.get(key, filter)
    }

    /// `get` with [`Filter::Alpha`].
    pub fn get_alpha(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::Alpha)
    }

    /// `get` with [`Filter::Alnum`].
    pub fn get_alnum(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::Alnum)
    }

    /// `get` with [`Filter::Digits`].
    pub fn get_digits(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::Digits)
    }

    /// `get` with [`Filter::Int`].
    pub fn get_int(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::Int)
    }

    /// `get` with [`Filter::Dir`].
    pub fn get_dir(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::Dir)
    }

    /// `get` with [`Filter::Rot13`].
    pub fn get_rot13(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::Rot13)
    }

    /// `get` with [`Filter::NoTags`].
    pub fn no_tags(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::NoTags)
    }

    /// `get` with [`Filter::NoTagsOrSpecial`].
    pub fn no_tags_or_special(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::NoTagsOrSpecial)
    }

    /// `get` with [`Filter::NoPath`].
    pub fn no_path(&self, key: &str) -> Result<Verified<Value>, Error> {
        self.get(key, Filter::NoPath)
    }

    /// Returns true if the value under `key` passes `validator`.
    ///
    /// A container passes only if it has at least one leaf and all of its
    /// leaves pass.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` if `key` is absent
    /// - `RecursionLimitExceeded` if the value nests too deep
    pub fn test(&self, key: &str, validator: &Validator) -> Result<bool, Error> {
        let value = self.lookup(key)?;
        self.catalog.test(value, validator)
    }

    /// Like [`test`](Cage::test), with the validator chosen by name.
    ///
    /// # Errors
    ///
    /// Returns the (reported) errors of [`Validator::from_name`], and
    /// otherwise the errors of [`test`](Cage::test).
    pub fn test_by_name(&self, key: &str, name: &str, args: &[Scalar]) -> Result<bool, Error> {
        let validator = self.catalog.settle(Validator::from_name(name, args))?;
        self.test(key, &validator)
    }

    /// Returns the unmodified value under `key` if it passes `validator`.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` if `key` is absent
    /// - `RecursionLimitExceeded` if the value nests too deep
    ///
    /// # Examples
    ///
    /// ```
    /// use input_cage::{Cage, CageOptions, Catalog, Container, Validator, Value};
    ///
    /// let get: Container = [("zip", "12345"), ("city", "Springfield")].into_iter().collect();
    /// let cage = Cage::new(get, CageOptions::default(), Catalog::default());
    ///
    /// let zip = cage.checked("zip", &Validator::Zip).unwrap();
    /// assert_eq!(zip.map(|v| v.into_inner()), Some(Value::text("12345")));
    /// assert!(cage.checked("city", &Validator::Zip).unwrap().is_none());
    /// ```
    pub fn checked(
        &self,
        key: &str,
        validator: &Validator,
    ) -> Result<Option<Verified<Value>>, Error> {
        let sanitizer = self.catalog.validator_sanitizer(validator.clone());
        match self.sanitize_with(key, &sanitizer) {
            Ok(verified) => Ok(Some(verified)),
            Err(error) if error.kind() == ErrorKind::Rejected => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Runs a host-supplied sanitizer over the value under `key`.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` if `key` is absent
    /// - `RecursionLimitExceeded` (reported) if the value nests too deep
    /// - otherwise whatever the sanitizer returns
    pub fn sanitize_with<S>(&self, key: &str, sanitizer: &S) -> Result<Verified<Value>, Error>
    where
        S: Sanitizer<Value> + ?Sized,
    {
        sanitizer.sanitize(self.tainted(key)?)
    }

    /// Escapes every leaf under `key` for a database connection.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` if `key` is absent
    /// - `RecursionLimitExceeded` (reported) if the value nests too deep
    pub fn escape(&self, key: &str, escaper: &dyn Escaper) -> Result<Verified<Value>, Error> {
        let tainted = self.tainted(key)?;
        let sanitizer = EscapeSanitizer::new(escaper, self.catalog.config().max_depth());
        self.catalog.settle(sanitizer.sanitize(tainted))
    }

    /// Returns the raw value under `key`.
    ///
    /// This is the cage's only unfiltered read path.
    ///
    /// # Errors
    ///
    /// - `NotPermitted` unless the cage was built with `keep_original`
    /// - `KeyNotFound` if `key` is absent
    pub fn get_raw(&self, key: &str) -> Result<&Value, Error> {
        if !self.options.keeps_original() {
            return Err(Error::new(
                ErrorKind::NotPermitted,
                "raw access requires the keep_original option",
            ));
        }
        self.lookup(key)
    }

    /// Returns true if `key` resolves to a value.
    pub fn key_exists(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.data.peek().len()
    }

    /// Returns true if the cage holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.peek().is_empty()
    }

    /// Returns the options the cage was built with.
    pub fn options(&self) -> CageOptions {
        self.options
    }

    /// Returns the catalog the cage applies rules with.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn lookup(&self, key: &str) -> Result<&Value, Error> {
        find(self.data.peek(), key).ok_or_else(|| Error::key_not_found(key))
    }

    // The depth check runs on the borrowed value; cloning an unbounded tree recurses.
    fn tainted(&self, key: &str) -> Result<Tainted<Value>, Error> {
        let value = self.lookup(key)?;
        let max_depth = self.catalog.config().max_depth();
        self.catalog.settle(walk::check_depth(value, max_depth))?;
        Ok(Tainted::new(value.clone()))
    }
}

fn copy_within_depth(raw: &Container, catalog: &Catalog) -> Container {
    let max_depth = catalog.config().max_depth();
    raw.iter()
        .filter(|(_, value)| catalog.settle(walk::check_depth(value, max_depth)).is_ok())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn find<'a>(bag: &'a Container, key: &str) -> Option<&'a Value> {
    bag.get(key).or_else(|| {
        if key.contains('/') {
            bag.get_path(key)
        } else {
            None
        }
    })
}

impl fmt::Debug for Cage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cage")
            .field("entries", &self.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
