/// A wrapper for data that has passed through a filter or validator.
///
/// `Verified<T>` is what a [`Cage`](crate::Cage) hands out: a value that
/// went through a controlled rule path. Unlike [`Tainted<T>`](crate::Tainted),
/// it gives ergonomic access to the value.
///
/// # Construction Invariants
///
/// **IMPORTANT:** `Verified<T>` cannot be constructed directly by external code.
/// There are no public constructors, and no `From<T>` or `Into<Verified<T>>`
/// implementations. Construction goes through a [`Sanitizer`](crate::Sanitizer).
///
/// # Examples
///
/// External callers cannot create `Verified<T>` directly:
///
/// ```compile_fail
/// use input_cage::Verified;
///
/// // This will not compile - no public constructor:
/// let verified = Verified::new("data".to_string());
/// ```
///
/// Values come out of a cage already verified:
///
/// ```
/// use input_cage::{Cage, CageOptions, Catalog, Container};
///
/// let raw: Container = [("name", "Bob<script>")].into_iter().collect();
/// let cage = Cage::new(raw, CageOptions::default(), Catalog::default());
///
/// let name = cage.get_alpha("name").unwrap();
/// assert_eq!(name.as_ref().as_text(), Some("Bobscript"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Creates a `Verified<T>` without performing validation.
    ///
    /// # Safety (Policy-Level)
    ///
    /// Restricted to this crate. Callers must have applied a rule to the
    /// value before wrapping it.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the `Verified<T>` and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
