//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where the row is exposed over HTTP, a `Serialize` response type
//! with domain types resolved.

pub mod contract;
pub mod signature;
pub mod user;
