//! Contract lifecycle engine.
//!
//! Applies the rules in [`contractly_core::contract`] against the store. All
//! operations take the authenticated vendor and never reveal whether a
//! foreign contract exists.

pub mod lifecycle;

pub use lifecycle::ContractLifecycle;
