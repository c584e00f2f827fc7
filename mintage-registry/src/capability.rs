use mintage_core::error::{RegistryError, RegistryResult};
use mintage_core::id::{AccountId, TokenId};
use mintage_ledger::{BalanceLedger, ProxyResolver};

use crate::registry::SharedRegistry;

/// Capability resolution: who may act as a token's manager.
///
/// Every creator-gated and administrator-gated operation funnels through the
/// checks here. They are evaluated fresh on each call; overrides, allowlist
/// membership, and the external proxy relation can all change between any
/// two invocations, so nothing is cached.
impl<L: BalanceLedger, P: ProxyResolver> SharedRegistry<L, P> {
    /// The account with management rights over `token`.
    ///
    /// A recorded reassignment wins over the creator embedded in the
    /// identifier; a zero entry is ignored rather than honored.
    pub fn effective_creator(&self, token: TokenId) -> AccountId {
        match self.creator_overrides().get(&token) {
            Some(delegate) if !delegate.is_zero() => *delegate,
            _ => token.creator(),
        }
    }

    /// Whether `operator` may act on behalf of `user`: member of the
    /// shared-proxy allowlist, or individually delegated through the
    /// configured proxy registry
    pub fn is_proxy_for_user(&self, user: AccountId, operator: AccountId) -> bool {
        if self.shared_proxies().contains(&operator) {
            return true;
        }
        let registry = self.proxy_registry_address();
        if registry.is_zero() {
            return false;
        }
        self.proxy_resolver().is_proxy_for(registry, user, operator)
    }

    /// Whether `candidate` may manage `token`: the effective creator, or a
    /// proxy acting for the effective creator
    pub fn is_creator_or_proxy(&self, token: TokenId, candidate: AccountId) -> bool {
        let creator = self.effective_creator(token);
        candidate == creator || self.is_proxy_for_user(creator, candidate)
    }

    /// Whether `candidate` may administer the registry itself: the owner,
    /// or a proxy acting for the owner
    pub fn is_owner_or_proxy(&self, candidate: AccountId) -> bool {
        candidate == self.owner() || self.is_proxy_for_user(self.owner(), candidate)
    }

    pub(crate) fn require_creator_or_proxy(
        &self,
        token: TokenId,
        caller: AccountId,
    ) -> RegistryResult<()> {
        if self.is_creator_or_proxy(token, caller) {
            Ok(())
        } else {
            Err(RegistryError::OnlyCreatorAllowed {
                token,
                account: caller,
            })
        }
    }

    pub(crate) fn require_owner_or_proxy(&self, caller: AccountId) -> RegistryResult<()> {
        if self.is_owner_or_proxy(caller) {
            Ok(())
        } else {
            Err(RegistryError::OnlyOwnerOrProxyAllowed { account: caller })
        }
    }

    /// Metadata changes require the caller to hold the token's entire
    /// capacity, measured against the cap embedded in the identifier
    pub(crate) fn require_full_token_owner(
        &self,
        token: TokenId,
        caller: AccountId,
    ) -> RegistryResult<()> {
        if self.ledger().balance_of(caller, token) == token.max_supply() {
            Ok(())
        } else {
            Err(RegistryError::OnlyFullTokenOwnerAllowed {
                token,
                account: caller,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::{acct, registry};
    use mintage_core::id::ACCOUNT_BYTES;
    use mintage_ledger::{MemoryLedger, MemoryProxyRegistry};

    #[test]
    fn test_effective_creator_defaults_to_embedded() {
        let reg = registry(1);
        let creator = acct(0xAA);
        let token = TokenId::from_parts(creator, 0, 100);

        assert_eq!(reg.effective_creator(token), creator);
        assert!(reg.is_creator_or_proxy(token, creator));
        assert!(!reg.is_creator_or_proxy(token, acct(0xBB)));
    }

    #[test]
    fn test_shared_proxy_covers_every_creator() {
        let mut reg = registry(1);
        let proxy = acct(0x99);
        reg.shared_proxies_mut().insert(proxy);

        let a = TokenId::from_parts(acct(0xAA), 0, 100);
        let b = TokenId::from_parts(acct(0xBB), 0, 100);
        assert!(reg.is_creator_or_proxy(a, proxy));
        assert!(reg.is_creator_or_proxy(b, proxy));
        assert!(reg.is_owner_or_proxy(proxy));
    }

    #[test]
    fn test_external_relation_requires_configured_registry() {
        let creator = acct(0xAA);
        let operator = acct(0xCC);

        let mut proxies = MemoryProxyRegistry::new();
        proxies.approve(creator, operator);
        let mut reg = SharedRegistry::new(
            acct(1),
            MemoryLedger::new("t"),
            proxies,
        );
        let token = TokenId::from_parts(creator, 0, 100);

        // Relation exists but no proxy registry is configured
        assert!(!reg.is_creator_or_proxy(token, operator));

        reg.set_proxy_registry_pointer(acct(0x77));
        assert!(reg.is_creator_or_proxy(token, operator));
    }

    #[test]
    fn test_zero_override_entry_is_ignored() {
        let mut reg = registry(1);
        let creator = acct(0xAA);
        let token = TokenId::from_parts(creator, 0, 100);

        // A zero entry must fall back to the embedded creator, never grant
        // the null account management rights
        reg.creator_overrides_mut()
            .insert(token, AccountId::ZERO);
        assert_eq!(reg.effective_creator(token), creator);
    }

    #[test]
    fn test_full_token_owner_gate() {
        let mut reg = registry(1);
        let creator = acct(0xAA);
        let token = TokenId::from_parts(creator, 0, 10);

        assert!(reg.require_full_token_owner(token, creator).is_err());

        reg.ledger_mut()
            .mint(creator, token, 10, &[])
            .expect("mint");
        assert!(reg.require_full_token_owner(token, creator).is_ok());

        // An account holding none of the supply fails the same gate
        let other = acct(0xBB);
        assert!(matches!(
            reg.require_full_token_owner(token, other),
            Err(RegistryError::OnlyFullTokenOwnerAllowed { .. })
        ));
    }

    #[test]
    fn test_checks_are_reevaluated_per_call() {
        let mut reg = registry(1);
        let proxy = acct(0x99);
        let token = TokenId::from_parts(acct(0xAA), 0, 100);

        reg.shared_proxies_mut().insert(proxy);
        assert!(reg.is_creator_or_proxy(token, proxy));

        reg.shared_proxies_mut().remove(&proxy);
        assert!(!reg.is_creator_or_proxy(token, proxy));
    }

    #[test]
    fn test_owner_gate() {
        let reg = registry(1);
        assert!(reg.is_owner_or_proxy(acct(1)));
        assert!(!reg.is_owner_or_proxy(acct(2)));

        let other = AccountId::new([2; ACCOUNT_BYTES]);
        assert!(matches!(
            reg.require_owner_or_proxy(other),
            Err(RegistryError::OnlyOwnerOrProxyAllowed { .. })
        ));
    }
}
