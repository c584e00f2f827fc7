use mintage_core::error::{RegistryError, RegistryResult};
use mintage_core::events::RegistryEvent;
use mintage_core::id::{AccountId, TokenId};
use mintage_ledger::{BalanceLedger, ProxyResolver};

use crate::registry::SharedRegistry;

/// Administration operations: creator reassignment, proxy management,
/// metadata changes, and the one-way migration disable.
impl<L: BalanceLedger, P: ProxyResolver> SharedRegistry<L, P> {
    /// Reassign management of `token` to `to`.
    ///
    /// Only the current effective creator (or a proxy acting for it) may
    /// reassign, and never to the null account. The reassignment is
    /// recorded in the override table; there is no way to remove an entry,
    /// only to overwrite it with a later reassignment.
    pub fn set_creator(
        &mut self,
        caller: AccountId,
        token: TokenId,
        to: AccountId,
    ) -> RegistryResult<()> {
        self.require_creator_or_proxy(token, caller)?;
        if to.is_zero() {
            return Err(RegistryError::InvalidAddress);
        }
        self.creator_overrides_mut().insert(token, to);
        log::info!("creator of {} reassigned to {}", token, to);
        self.push_event(RegistryEvent::CreatorChanged {
            token,
            new_creator: to,
        });
        Ok(())
    }

    /// Point the per-creator proxy relation at a different proxy-registry
    /// deployment. Zero clears the pointer and disables the external half
    /// of the proxy check
    pub fn set_proxy_registry_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> RegistryResult<()> {
        self.require_owner_or_proxy(caller)?;
        self.set_proxy_registry_pointer(address);
        log::info!("proxy registry repointed to {}", address);
        self.push_event(RegistryEvent::ProxyRegistryChanged { address });
        Ok(())
    }

    /// Grant `address` proxy rights over every creator
    pub fn add_shared_proxy_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> RegistryResult<()> {
        self.require_owner_or_proxy(caller)?;
        if address.is_zero() {
            return Err(RegistryError::InvalidAddress);
        }
        self.shared_proxies_mut().insert(address);
        log::info!("shared proxy {} added", address);
        self.push_event(RegistryEvent::SharedProxyAdded { account: address });
        Ok(())
    }

    /// Revoke `address`'s shared-proxy rights
    pub fn remove_shared_proxy_address(
        &mut self,
        caller: AccountId,
        address: AccountId,
    ) -> RegistryResult<()> {
        self.require_owner_or_proxy(caller)?;
        self.shared_proxies_mut().remove(&address);
        log::info!("shared proxy {} removed", address);
        self.push_event(RegistryEvent::SharedProxyRemoved { account: address });
        Ok(())
    }

    /// Close the migration path. There is no operation that re-opens it;
    /// the transition is intentionally one-way
    pub fn disable_migrate(&mut self, caller: AccountId) -> RegistryResult<()> {
        self.require_owner_or_proxy(caller)?;
        self.clear_predecessor();
        log::info!("migration disabled");
        self.push_event(RegistryEvent::MigrationDisabled);
        Ok(())
    }

    /// Change a token's metadata URI.
    ///
    /// Creator-gated, and additionally requires the caller to hold the
    /// token's entire capacity, so metadata can only change while one
    /// account controls every unit that will ever exist
    pub fn set_uri(
        &mut self,
        caller: AccountId,
        token: TokenId,
        uri: &str,
    ) -> RegistryResult<()> {
        self.require_creator_or_proxy(token, caller)?;
        self.require_full_token_owner(token, caller)?;
        self.ledger_mut().set_uri(token, uri)
    }

    /// Change a token's metadata URI and freeze it permanently
    pub fn set_permanent_uri(
        &mut self,
        caller: AccountId,
        token: TokenId,
        uri: &str,
    ) -> RegistryResult<()> {
        self.require_creator_or_proxy(token, caller)?;
        self.require_full_token_owner(token, caller)?;
        self.ledger_mut().set_permanent_uri(token, uri)
    }
}
