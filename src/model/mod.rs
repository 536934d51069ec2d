//! # Resource Model
//!
//! Persisted records and their externally visible transfer objects.
//! Records are what the store holds (`_id` key, snake_case fields);
//! transfer objects are the request/response bodies (camelCase fields).

pub mod beer;
pub mod customer;

pub use beer::{Beer, BeerDto};
pub use customer::{Customer, CustomerDto};
