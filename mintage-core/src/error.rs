use thiserror::Error;

use crate::id::{AccountId, TokenId};

/// Represents all caller-visible failures of registry operations.
///
/// Every variant aborts the whole top-level call with no partial state
/// change; callers correct their input and resubmit. There is no retry
/// machinery and no locally recoverable class.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Caller is neither the token's effective creator nor an approved proxy
    #[error("account {account} may not manage token {token}")]
    OnlyCreatorAllowed { token: TokenId, account: AccountId },

    /// Caller is neither the registry owner nor a registry-level proxy
    #[error("account {account} is not the registry owner or an owner proxy")]
    OnlyOwnerOrProxyAllowed { account: AccountId },

    /// Metadata changes require the caller to hold the token's entire capacity
    #[error("account {account} does not hold the full supply of token {token}")]
    OnlyFullTokenOwnerAllowed { token: TokenId, account: AccountId },

    /// A mint was requested with a quantity of zero
    #[error("zero quantity not allowed")]
    ZeroQuantityNotAllowed,

    /// The null account was supplied where a real recipient is required
    #[error("zero address not allowed")]
    ZeroAddressNotAllowed,

    /// The null account was supplied where a real account is required
    #[error("invalid address")]
    InvalidAddress,

    /// Migration was invoked after the predecessor pointer was cleared
    #[error("migration is disabled")]
    MigrateDisabled,

    /// A guarded mint entry point was re-entered before the outer call returned
    #[error("reentrant call into a guarded mint operation")]
    ReentrantCall,

    /// A mint would push issued supply past the cap embedded in the identifier
    #[error("supply cap exceeded for token {token}: max {max}, would have {would_have}")]
    SupplyCapExceeded {
        token: TokenId,
        max: u64,
        would_have: u64,
    },

    /// Batch token and quantity slices have different lengths
    #[error("batch length mismatch: {tokens} tokens, {amounts} amounts")]
    LengthMismatch { tokens: usize, amounts: usize },

    /// The token's metadata has been frozen and can no longer change
    #[error("URI for token {token} is permanent")]
    UriPermanent { token: TokenId },

    /// Anyhow error wrapper for error context
    #[error(transparent)]
    Context(#[from] anyhow::Error),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
