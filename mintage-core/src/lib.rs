pub mod error;
pub mod events;
pub mod id;

// Re-export the main types for convenience
pub use error::{RegistryError, RegistryResult};
pub use events::RegistryEvent;
pub use id::{AccountId, TokenId};
