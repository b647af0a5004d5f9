//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and the cages. It
//! handles:
//! - Collecting request inputs into one [`Container`](crate::Container) per
//!   [`Source`](crate::Source)
//! - Expanding bracket names (`form[address][zip]`, `tags[]`) into nested
//!   containers
//! - Building a [`Supercage`](crate::Supercage) from the collected bags
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific code.
//!    It defines interfaces that framework-specific code can implement.
//!
//! 2. **No Filtering**: The boundary stores inputs exactly as received.
//!    Every read goes through a cage rule.
//!
//! 3. **Explicit Context**: No global state. The host builds the supercage per
//!    request and passes it along.
//!
//! # Example Flow
//!
//! ```ignore
//! // In a framework-specific integration (e.g., axum, actix):
//!
//! // 1. Collect inputs from the HTTP request
//! let mut adapter = RequestAdapter::new(request_id);
//! for (name, value) in http_req.query_pairs() {
//!     adapter.add_query_param(&name, value);
//! }
//!
//! // 2. Cage them
//! let cages = adapter.build_supercage(CageOptions::default(), catalog.clone());
//!
//! // 3. Read through rules only
//! let page = cages.get().get_int("page")?;
//! ```

mod adapter;
mod extract;

pub use adapter::{FileUpload, RequestAdapter};
pub use extract::ExtractSources;
