//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the authenticated vendor from the session
//!   cookie or a Bearer token.

pub mod auth;
