//! Input validation and sanitization through caged request data.
//!
//! This crate keeps untrusted input away from application code until a rule
//! has been applied to it:
//! - **Rule catalog**: Named filters that transform input and validators that
//!   check it, applied to scalars or to every leaf of nested input
//! - **Cages**: Read-only wrappers over one input bag that only hand out
//!   filtered or validated values
//! - **Taint tracking**: Raw values travel as [`Tainted<T>`] and come out as
//!   [`Verified<T>`] only through a [`Sanitizer`]
//!
//! # Core Types
//!
//! - [`Catalog`]: Applies [`Filter`]s and [`Validator`]s, reports configuration errors
//! - [`Cage`]: Filtered-only access to one [`Container`] of raw input
//! - [`Supercage`]: One cage per request [`Source`]
//! - [`Value`]: A [`Scalar`] leaf or a nested [`Container`]
//!
//! # Examples
//!
//! ```
//! use input_cage::{CageOptions, Catalog, Container, Source, Supercage, Validator, Value};
//!
//! let post: Container = [
//!     ("name", "Homer<script>alert(1)</script>"),
//!     ("email", "homer@springfield.net"),
//!     ("card", "4111 1111 1111 1111"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let cages = Supercage::new([(Source::Post, post)], CageOptions::default(), Catalog::default());
//! let form = cages.post();
//!
//! assert_eq!(form.no_tags("name").unwrap().into_inner(), Value::text("Homeralert(1)"));
//! assert_eq!(form.test("email", &Validator::Email), Ok(true));
//! assert_eq!(form.test("card", &Validator::CcNum), Ok(true));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cage;
mod catalog;
mod config;
mod error;
pub mod escape;
pub mod filter;
mod numeric;
mod report;
mod rule;
mod sanitizer;
mod supercage;
mod tainted;
pub mod validate;
mod value;
mod verified;
pub mod walk;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use cage::Cage;
pub use catalog::Catalog;
pub use config::{Backend, CageOptions, Config, NumericLocale};
pub use error::{Error, ErrorKind};
pub use report::{RecordingReporter, Report, Reporter, Severity, TracingReporter};
pub use rule::{rule_kind, Filter, RuleKind, Validator};
pub use sanitizer::{FilterSanitizer, Sanitizer, ValidatorSanitizer};
pub use supercage::{Source, Supercage};
pub use tainted::Tainted;
pub use value::{Container, Scalar, Value};
pub use verified::Verified;
