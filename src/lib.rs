//! taproom - reactive CRUD API for beers and customers
//!
//! Every request runs as one async pipeline: handler, service, repository,
//! document store, and back.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod mapper;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
