use serde::{Deserialize, Serialize};

use crate::id::{AccountId, TokenId};

/// Notifications emitted by mutating registry operations.
///
/// The registry appends these to an observable log as mutations commit; it
/// never reads them back itself. Embedders drain the log to publish change
/// notifications to whatever bus they run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// Management of a token was reassigned
    CreatorChanged {
        token: TokenId,
        new_creator: AccountId,
    },

    /// An account was granted shared-proxy rights over every creator
    SharedProxyAdded { account: AccountId },

    /// An account's shared-proxy rights were revoked
    SharedProxyRemoved { account: AccountId },

    /// The proxy-registry pointer was repointed
    ProxyRegistryChanged { address: AccountId },

    /// The migration path was irrevocably closed
    MigrationDisabled,
}
