//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod contract_repo;
pub mod signature_repo;
pub mod user_repo;

pub use contract_repo::ContractRepo;
pub use signature_repo::SignatureRepo;
pub use user_repo::UserRepo;
