//! Recursive application of rules over nested input.
//!
//! Input trees come from the client, so recursion is bounded: the root map
//! is level 1, each nested map adds one, and a map deeper than `max_depth`
//! fails with `RecursionLimitExceeded`. A bare scalar has no levels.

use crate::{Container, Error, Scalar, Value};

/// Checks that `value` nests no deeper than `max_depth`.
///
/// Uses an explicit stack instead of recursion, so it is safe to call on a
/// tree of any depth before copying it.
///
/// # Errors
///
/// Returns `RecursionLimitExceeded` if a map in `value` lies deeper than
/// `max_depth`.
pub fn check_depth(value: &Value, max_depth: usize) -> Result<(), Error> {
    let Value::Map(root) = value else {
        return Ok(());
    };
    let mut pending = vec![(root, 1usize)];
    while let Some((map, level)) = pending.pop() {
        if level > max_depth {
            return Err(Error::recursion_limit(max_depth));
        }
        pending.extend(map.iter().filter_map(|(_, child)| match child {
            Value::Map(inner) => Some((inner, level + 1)),
            Value::Scalar(_) => None,
        }));
    }
    Ok(())
}

/// Applies `f` to every leaf, keeping the shape of `value`.
///
/// # Errors
///
/// Returns `RecursionLimitExceeded` if `value` nests deeper than `max_depth`.
///
/// # Examples
///
/// ```
/// use input_cage::{walk, Container, Scalar, Value};
///
/// let form: Container = [("a", "x1"), ("b", "2y")].into_iter().collect();
/// let digits = walk::map_leaves(&Value::from(form), 4, &mut |leaf| {
///     Scalar::text(input_cage::filter::digits(&leaf.to_text()))
/// })
/// .unwrap();
///
/// let digits = digits.as_map().unwrap();
/// assert_eq!(digits.get("a"), Some(&Value::text("1")));
/// assert_eq!(digits.get("b"), Some(&Value::text("2")));
/// ```
pub fn map_leaves<F>(value: &Value, max_depth: usize, f: &mut F) -> Result<Value, Error>
where
    F: FnMut(&Scalar) -> Scalar,
{
    match value {
        Value::Scalar(leaf) => Ok(Value::Scalar(f(leaf))),
        Value::Map(map) => map_container(map, 1, max_depth, f).map(Value::Map),
    }
}

fn map_container<F>(
    map: &Container,
    level: usize,
    max_depth: usize,
    f: &mut F,
) -> Result<Container, Error>
where
    F: FnMut(&Scalar) -> Scalar,
{
    if level > max_depth {
        return Err(Error::recursion_limit(max_depth));
    }
    let mut out = Container::new();
    for (key, child) in map {
        let mapped = match child {
            Value::Scalar(leaf) => Value::Scalar(f(leaf)),
            Value::Map(inner) => Value::Map(map_container(inner, level + 1, max_depth, f)?),
        };
        out.insert(key.as_str(), mapped);
    }
    Ok(out)
}

/// Returns true if `value` has at least one leaf and every leaf satisfies
/// `pred`.
///
/// Stops at the first failing leaf.
///
/// # Errors
///
/// Returns `RecursionLimitExceeded` if a map reached before the first
/// failing leaf nests deeper than `max_depth`.
pub fn all_leaves<P>(value: &Value, max_depth: usize, pred: &mut P) -> Result<bool, Error>
where
    P: FnMut(&Scalar) -> bool,
{
    match value {
        Value::Scalar(leaf) => Ok(pred(leaf)),
        Value::Map(map) => {
            let mut seen = 0usize;
            let passed = all_in_container(map, 1, max_depth, &mut seen, pred)?;
            Ok(passed && seen > 0)
        }
    }
}

fn all_in_container<P>(
    map: &Container,
    level: usize,
    max_depth: usize,
    seen: &mut usize,
    pred: &mut P,
) -> Result<bool, Error>
where
    P: FnMut(&Scalar) -> bool,
{
    if level > max_depth {
        return Err(Error::recursion_limit(max_depth));
    }
    for (_, child) in map {
        let passed = match child {
            Value::Scalar(leaf) => {
                *seen += 1;
                pred(leaf)
            }
            Value::Map(inner) => all_in_container(inner, level + 1, max_depth, seen, pred)?,
        };
        if !passed {
            return Ok(false);
        }
    }
    Ok(true)
}
