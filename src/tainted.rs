use std::fmt;

/// A wrapper for untrusted data that must be explicitly sanitized before use.
///
/// `Tainted<T>` marks data from untrusted sources (request parameters,
/// cookies, environment) and prevents accidental use in security-sensitive
/// contexts. The value cannot be read from outside this crate; the only way
/// out is a [`Sanitizer`](crate::Sanitizer), which produces a
/// [`Verified<T>`](crate::Verified).
///
/// # Security Properties
///
/// - Does NOT implement `Deref` or any implicit conversion traits
/// - Inner value is inaccessible to external code
/// - Debug output never prints the inner value
///
/// # Examples
///
/// ```
/// use input_cage::Tainted;
///
/// let user_input = Tainted::new("'; DROP TABLE users; --".to_string());
///
/// // Debug output shows it's tainted, not what it holds
/// assert_eq!(format!("{:?}", user_input), "Tainted(..)");
///
/// // But you CANNOT use the value directly:
/// // let query = format!("SELECT * FROM users WHERE name = '{}'", user_input); // Won't compile!
/// ```
// BREAKING CHANGE WARNING: Do NOT remove Clone - cages hand out tainted copies of their data.
#[derive(Clone)]
pub struct Tainted<T> {
    // BREAKING CHANGE WARNING: This field MUST remain private.
    // Making it public bypasses the cage entirely (CWE-20: Improper Input Validation).
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Borrows the inner value.
    ///
    /// Crate-internal: cages use it for key lookups before handing a copy
    /// to a sanitizer.
    pub(crate) fn peek(&self) -> &T {
        &self.inner
    }

    /// Extracts the inner value for sanitization.
    ///
    /// BREAKING CHANGE WARNING: Changing visibility to `pub` lets external code
    /// extract raw values without going through a `Sanitizer`.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// BREAKING CHANGE WARNING: Do NOT add Deref, AsRef, Borrow, From<T>, Into<T>, or any other
// implicit conversion traits to Tainted<T>.

impl<T> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tainted(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tainted_debug_hides_value() {
        let user_input = Tainted::new("malicious input".to_string());
        let debug_output = format!("{:?}", user_input);

        assert!(debug_output.contains("Tainted"));
        assert!(!debug_output.contains("malicious input"));
    }

    #[test]
    fn tainted_prevents_direct_access() {
        let tainted = Tainted::new(42);

        // These would not compile if uncommented (good!):
        // let value = tainted.inner; // ← private field
        // let value = *tainted; // ← no Deref
        // let value: &i32 = tainted.as_ref(); // ← no AsRef

        assert_eq!(*tainted.peek(), 42);
    }

    #[test]
    fn tainted_into_inner_for_sanitizers() {
        let tainted = Tainted::new(vec![1, 2, 3]);
        assert_eq!(tainted.into_inner(), vec![1, 2, 3]);
    }

    mod proptests {
        use super::*;
        use crate::{test_utils::arb_text, Catalog, Filter, Sanitizer, Value};
        use proptest::prelude::*;

        proptest! {
            /// Property: Cloning a Tainted value results in identical sanitization outcomes
            #[test]
            fn proptest_tainted_clone_preserves_value(input in arb_text(64)) {
                let catalog = Catalog::default();
                let sanitizer = catalog.sanitizer(Filter::Alnum);

                let tainted1 = Tainted::new(Value::text(input));
                let tainted2 = tainted1.clone();

                let verified1 = sanitizer.sanitize(tainted1).expect("filters never reject scalars");
                let verified2 = sanitizer.sanitize(tainted2).expect("filters never reject scalars");

                prop_assert_eq!(verified1.as_ref(), verified2.as_ref());
            }
        }
    }
}
