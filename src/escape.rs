//! Database escaping boundary.
//!
//! The escaping algorithm belongs to the database client; this module only
//! defines the contract. A connection handle implements [`Escaper`] and the
//! cage hands it each leaf.

use std::fmt;

use crate::{walk, Error, Sanitizer, Scalar, Tainted, Value, Verified};

/// Database dialects with an escaping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `esc_mysql`
    MySql,
    /// `esc_pgsql`
    PgSql,
    /// `esc_pgsql_bytea`
    PgSqlBytea,
}

impl Dialect {
    /// Every dialect.
    pub const ALL: [Dialect; 3] = [Dialect::MySql, Dialect::PgSql, Dialect::PgSqlBytea];

    /// Returns the rule name for this dialect.
    pub fn rule_name(self) -> &'static str {
        match self {
            Dialect::MySql => "esc_mysql",
            Dialect::PgSql => "esc_pgsql",
            Dialect::PgSqlBytea => "esc_pgsql_bytea",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule_name())
    }
}

/// Escapes text for one database connection.
///
/// # Examples
///
/// ```
/// use input_cage::escape::{Dialect, Escaper};
///
/// struct Doubling;
///
/// impl Escaper for Doubling {
///     fn dialect(&self) -> Dialect {
///         Dialect::PgSql
///     }
///
///     fn escape(&self, value: &str) -> String {
///         value.replace('\'', "''")
///     }
/// }
///
/// assert_eq!(Doubling.escape("O'Brien"), "O''Brien");
/// ```
pub trait Escaper: Send + Sync {
    /// The dialect this escaper speaks.
    fn dialect(&self) -> Dialect;

    /// Escapes one string.
    fn escape(&self, value: &str) -> String;
}

/// Promotes a tainted value by escaping every leaf.
///
/// Leaves are converted to text first, so the result holds only text and
/// containers.
pub struct EscapeSanitizer<'a> {
    escaper: &'a dyn Escaper,
    max_depth: usize,
}

impl<'a> EscapeSanitizer<'a> {
    /// Creates a sanitizer over `escaper`, rejecting trees deeper than
    /// `max_depth`.
    pub fn new(escaper: &'a dyn Escaper, max_depth: usize) -> Self {
        Self { escaper, max_depth }
    }
}

impl fmt::Debug for EscapeSanitizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscapeSanitizer")
            .field("dialect", &self.escaper.dialect())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Sanitizer<Value> for EscapeSanitizer<'_> {
    fn sanitize(&self, input: Tainted<Value>) -> Result<Verified<Value>, Error> {
        let value = input.into_inner();
        let escaped = walk::map_leaves(&value, self.max_depth, &mut |leaf| {
            Scalar::Text(self.escaper.escape(&leaf.to_text()))
        })?;
        Ok(Verified::new_unchecked(escaped))
    }
}
