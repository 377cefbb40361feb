//! Contract service API library.
//!
//! Exposes the building blocks (config, state, error handling, lifecycle
//! engine, routes) so integration tests and the binary entrypoints can both
//! access them.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod generation;
pub mod handlers;
pub mod middleware;
pub mod provision;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
