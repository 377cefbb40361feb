//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Session token generation and validation.
//! - [`session`] -- The `auth-token` cookie and credential extraction.
//! - [`identity`] -- [`contractly_core::identity::IdentityCheck`] backed by
//!   session tokens.

pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;
