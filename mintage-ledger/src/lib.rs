pub mod ledger_traits;
pub mod memory;

// Re-export the main types for convenience
pub use ledger_traits::{BalanceLedger, NullProxyResolver, ProxyResolver, RegistryReader};
pub use memory::{MemoryLedger, MemoryProxyRegistry};
