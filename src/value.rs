//! Input value model: scalars, containers and the union of both.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use crate::numeric::{self, Number};

/// A leaf of an input structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed 64-bit integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
}

impl Scalar {
    /// Creates a text scalar.
    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text(value.into())
    }

    /// Returns the text if this is a `Text` scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to text the way every text rule sees its input.
    ///
    /// `Null` and `false` are empty, `true` is `"1"`, floats keep 14
    /// significant digits.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null | Scalar::Bool(false) => Cow::Borrowed(""),
            Scalar::Bool(true) => Cow::Borrowed("1"),
            Scalar::Int(i) => Cow::Owned(i.to_string()),
            Scalar::Float(f) => Cow::Owned(numeric::format_float(*f)),
            Scalar::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Converts to an integer using leading-numeric-prefix truncation.
    pub fn to_int(&self) -> i64 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(b) => i64::from(*b),
            Scalar::Int(i) => *i,
            Scalar::Float(f) => numeric::float_to_int(*f),
            Scalar::Text(s) => numeric::leading_int(s),
        }
    }

    /// Returns the truthiness of the value.
    ///
    /// Empty text and `"0"` are false, as are zero numbers and `Null`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Bool(b) => *b,
            Scalar::Int(i) => *i != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Text(s) => !(s.is_empty() || s == "0"),
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Scalar::Int(i) => Some(Number::Int(*i)),
            Scalar::Float(f) => Some(Number::Float(*f)),
            Scalar::Text(s) => numeric::parse_number(s),
            Scalar::Null | Scalar::Bool(_) => None,
        }
    }

    /// Compares two scalars by their natural ordering.
    ///
    /// Numbers and numeric strings compare numerically, booleans (and `Null`
    /// against a number) compare by truthiness, everything else compares as
    /// text. Returns `None` when the values are unordered (NaN).
    ///
    /// # Examples
    ///
    /// ```
    /// use input_cage::Scalar;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Scalar::text("10").compare(&Scalar::Int(9)), Some(Ordering::Greater));
    /// assert_eq!(Scalar::text("f").compare(&Scalar::text("m")), Some(Ordering::Less));
    /// ```
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => Some(Ordering::Equal),
            (Scalar::Bool(_), _)
            | (_, Scalar::Bool(_))
            | (Scalar::Null, Scalar::Int(_) | Scalar::Float(_))
            | (Scalar::Int(_) | Scalar::Float(_), Scalar::Null) => {
                Some(self.is_truthy().cmp(&other.is_truthy()))
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b),
                _ => Some(self.to_text().as_ref().cmp(other.to_text().as_ref())),
            },
        }
    }

    /// Loose equality: the two scalars compare as equal.
    pub fn loose_eq(&self, other: &Scalar) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// A mapping from string keys to nested values.
///
/// Keys are kept in sorted order. Input from a transport is always a finite
/// tree, so a container never contains itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    entries: BTreeMap<String, Value>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one under that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Follows a `/`-separated path through nested containers.
    ///
    /// Leading and trailing separators are ignored; an empty path resolves
    /// to nothing.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.trim_matches('/').split('/');
        let first = segments.next().filter(|s| !s.is_empty())?;
        let mut current = self.entries.get(first)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the container has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Returns the next free integer index: one past the largest integer
    /// key, or 0.
    pub fn next_index(&self) -> String {
        self.entries
            .keys()
            .filter_map(|key| key.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max.saturating_add(1))
            .to_string()
    }
}

impl<K, V> FromIterator<(K, V)> for Container
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Container {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A scalar leaf or a nested container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A leaf
    Scalar(Scalar),
    /// A nested mapping
    Map(Container),
}

impl Value {
    /// Creates a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Text(value.into()))
    }

    /// Returns the scalar if this is a leaf.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Map(_) => None,
        }
    }

    /// Returns the container if this is a map.
    pub fn as_map(&self) -> Option<&Container> {
        match self {
            Value::Map(m) => Some(m),
            Value::Scalar(_) => None,
        }
    }

    /// Returns the text if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_text)
    }

    /// Returns true if this is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<Container> for Value {
    fn from(value: Container) -> Self {
        Value::Map(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Container {
        let address: Container = [("zip", "12345"), ("city", "Springfield")]
            .into_iter()
            .collect();
        let mut form = Container::new();
        form.insert("name", "Homer");
        form.insert("address", address);
        form
    }

    #[test]
    fn scalar_to_text() {
        assert_eq!(Scalar::Null.to_text(), "");
        assert_eq!(Scalar::Bool(true).to_text(), "1");
        assert_eq!(Scalar::Bool(false).to_text(), "");
        assert_eq!(Scalar::Int(-42).to_text(), "-42");
        assert_eq!(Scalar::Float(2.5).to_text(), "2.5");
        assert_eq!(Scalar::text("abc").to_text(), "abc");
    }

    #[test]
    fn scalar_to_int() {
        assert_eq!(Scalar::text("145abc").to_int(), 145);
        assert_eq!(Scalar::text("A145").to_int(), 0);
        assert_eq!(Scalar::Float(9.9).to_int(), 9);
        assert_eq!(Scalar::Bool(true).to_int(), 1);
        assert_eq!(Scalar::Null.to_int(), 0);
    }

    #[test]
    fn scalar_truthiness() {
        assert!(!Scalar::text("0").is_truthy());
        assert!(!Scalar::text("").is_truthy());
        assert!(Scalar::text("0.0").is_truthy());
        assert!(!Scalar::Int(0).is_truthy());
        assert!(Scalar::Float(0.1).is_truthy());
    }

    #[test]
    fn compare_numeric_strings_numerically() {
        assert_eq!(
            Scalar::text("10").compare(&Scalar::text("9")),
            Some(Ordering::Greater)
        );
        assert!(Scalar::text("1").loose_eq(&Scalar::text("01")));
        assert!(Scalar::text("1e1").loose_eq(&Scalar::Int(10)));
    }

    #[test]
    fn compare_text_lexicographically() {
        assert_eq!(
            Scalar::text("b").compare(&Scalar::text("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Scalar::text("abc").compare(&Scalar::Int(5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn compare_bool_by_truthiness() {
        assert!(Scalar::Bool(true).loose_eq(&Scalar::text("yes")));
        assert!(Scalar::Null.loose_eq(&Scalar::Int(0)));
        assert!(Scalar::Null.loose_eq(&Scalar::text("")));
    }

    #[test]
    fn compare_nan_is_unordered() {
        assert_eq!(Scalar::Float(f64::NAN).compare(&Scalar::Int(1)), None);
        assert!(!Scalar::Float(f64::NAN).loose_eq(&Scalar::Float(f64::NAN)));
    }

    #[test]
    fn container_get_path() {
        let form = nested();

        assert_eq!(
            form.get_path("address/zip"),
            Some(&Value::text("12345"))
        );
        assert_eq!(form.get_path("/address/city/"), Some(&Value::text("Springfield")));
        assert_eq!(form.get_path("address/street"), None);
        assert_eq!(form.get_path("name/first"), None);
        assert_eq!(form.get_path(""), None);
    }

    #[test]
    fn container_next_index() {
        let mut list = Container::new();
        assert_eq!(list.next_index(), "0");

        list.insert("0", "a");
        list.insert("7", "b");
        list.insert("name", "c");
        assert_eq!(list.next_index(), "8");
    }

    #[test]
    fn container_iterates_in_key_order() {
        let container: Container = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let keys: Vec<&str> = container.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(container.len(), 3);
    }

    #[test]
    fn value_accessors() {
        let form = nested();
        let value = Value::from(form.clone());

        assert!(value.is_map());
        assert_eq!(value.as_map(), Some(&form));
        assert_eq!(value.as_scalar(), None);
        assert_eq!(Value::text("x").as_text(), Some("x"));
        assert_eq!(Value::from(3).as_text(), None);
    }
}
