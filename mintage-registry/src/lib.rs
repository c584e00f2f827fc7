//! Mintage registry engine
//!
//! A shared multi-token balance registry: many independent creators mint and
//! manage their own token types inside one ledger. The registry decides who
//! may administer a token (capability resolution over the identifier codec
//! plus a delegation table), supplies the remaining-mintable hook the ledger
//! enforces caps with, and can reconstruct balances and custom metadata from
//! a predecessor registry instance exactly once.
//!
//! # Key Types
//!
//! - [`SharedRegistry`]: the registry engine
//! - [`OwnershipRecord`]: one balance line imported during migration

pub mod admin;
pub mod capability;
pub mod migrate;
pub mod mint;
pub mod registry;

pub use migrate::OwnershipRecord;
pub use registry::SharedRegistry;
