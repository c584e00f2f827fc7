//! Mintage shared multi-token balance registry
//!
//! This crate re-exports all the components of the Mintage system.

pub use mintage_core::*;
pub use mintage_ledger::*;
pub use mintage_registry::*;
