//! # HTTP Server Module
//!
//! Request handling for the beer and customer collections over axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/beers`, `/beers/:id` - Beer collection
//! - `/customers`, `/customers/:id` - Customer collection

pub mod beer_routes;
pub mod config;
pub mod customer_routes;
pub mod errors;
pub mod health_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
