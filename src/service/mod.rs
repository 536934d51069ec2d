//! # Resource Services
//!
//! One service per resource. Each operation is a single async pipeline over
//! the repository: at most one read and one write, with mapping and merging
//! done synchronously in between.
//!
//! Outcomes come in three shapes: a value, nothing (`Ok(None)` or an empty
//! stream), or a [`StoreError`](crate::store::StoreError). An empty result is
//! not an error here; the HTTP layer decides what it means.

pub mod beer;
pub mod customer;

pub use beer::{BeerService, BeerStream};
pub use customer::{CustomerService, CustomerStream};

/// Whether an optional string holds at least one non-whitespace character
pub(crate) fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
