//! Domain core for the vendor contract service.
//!
//! Pure logic with no I/O: the error taxonomy, the contract lifecycle rules,
//! amount parsing, signature payloads, the signature capture surface, the
//! content generation contract, and the identity seam consumed by the API.

pub mod amount;
pub mod capture;
pub mod content;
pub mod contract;
pub mod error;
pub mod identity;
pub mod signature;
pub mod types;
pub mod vendor;
