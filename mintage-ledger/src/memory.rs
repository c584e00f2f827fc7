use std::collections::{HashMap, HashSet};

use mintage_core::error::{RegistryError, RegistryResult};
use mintage_core::id::{AccountId, TokenId};

use crate::ledger_traits::{BalanceLedger, ProxyResolver, RegistryReader};

/// In-memory balance ledger, used for testing and for embedders that keep
/// the whole registry state resident.
///
/// Enforces the cap embedded in each token identifier inside the mint
/// primitives, so issued supply can never exceed `token.max_supply()` no
/// matter what sequence of mints is attempted.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    /// Balance per (holder, token) pair
    balances: HashMap<(AccountId, TokenId), u64>,
    /// Cumulative issued supply per token
    supplies: HashMap<TokenId, u64>,
    /// Custom metadata URIs
    uris: HashMap<TokenId, String>,
    /// Tokens whose metadata is frozen
    permanent: HashSet<TokenId>,
    /// Fallback URI for tokens without a custom one
    template_uri: String,
}

impl MemoryLedger {
    /// Create an empty ledger with the given template URI
    pub fn new(template_uri: impl Into<String>) -> Self {
        Self {
            template_uri: template_uri.into(),
            ..Self::default()
        }
    }

    /// Whether a token's metadata has been frozen
    pub fn is_permanent(&self, token: TokenId) -> bool {
        self.permanent.contains(&token)
    }

    /// The quantity still mintable for a token
    pub fn remaining_supply(&self, token: TokenId) -> u64 {
        token.max_supply() - self.total_supply(token)
    }

    fn checked_credit(&self, token: TokenId, amount: u64) -> RegistryResult<u64> {
        let issued = self.total_supply(token);
        let max = token.max_supply();
        let would_have = issued.saturating_add(amount);
        if would_have > max {
            return Err(RegistryError::SupplyCapExceeded {
                token,
                max,
                would_have,
            });
        }
        Ok(would_have)
    }

    fn apply_credit(&mut self, to: AccountId, token: TokenId, amount: u64) {
        *self.balances.entry((to, token)).or_insert(0) += amount;
        *self.supplies.entry(token).or_insert(0) += amount;
    }

    fn write_uri(&mut self, token: TokenId, uri: &str, freeze: bool) -> RegistryResult<()> {
        if self.permanent.contains(&token) {
            return Err(RegistryError::UriPermanent { token });
        }
        self.uris.insert(token, uri.to_string());
        if freeze {
            self.permanent.insert(token);
        }
        Ok(())
    }
}

impl RegistryReader for MemoryLedger {
    fn balance_of(&self, owner: AccountId, token: TokenId) -> u64 {
        self.balances.get(&(owner, token)).copied().unwrap_or(0)
    }

    fn total_supply(&self, token: TokenId) -> u64 {
        self.supplies.get(&token).copied().unwrap_or(0)
    }

    fn uri(&self, token: TokenId) -> String {
        self.uris
            .get(&token)
            .cloned()
            .unwrap_or_else(|| self.template_uri.clone())
    }

    fn template_uri(&self) -> String {
        self.template_uri.clone()
    }
}

impl BalanceLedger for MemoryLedger {
    fn mint(
        &mut self,
        to: AccountId,
        token: TokenId,
        amount: u64,
        data: &[u8],
    ) -> RegistryResult<()> {
        self.checked_credit(token, amount)?;
        self.apply_credit(to, token, amount);
        log::debug!(
            "minted {} of {} to {} ({} byte payload)",
            amount,
            token,
            to,
            data.len()
        );
        Ok(())
    }

    fn mint_batch(
        &mut self,
        to: AccountId,
        tokens: &[TokenId],
        amounts: &[u64],
        data: &[u8],
    ) -> RegistryResult<()> {
        if tokens.len() != amounts.len() {
            return Err(RegistryError::LengthMismatch {
                tokens: tokens.len(),
                amounts: amounts.len(),
            });
        }

        // A token may repeat within the batch, so the cap check has to run
        // against the accumulated total, not entry by entry.
        let mut planned: HashMap<TokenId, u64> = HashMap::new();
        for (token, amount) in tokens.iter().zip(amounts) {
            *planned.entry(*token).or_insert(0) += amount;
        }
        for (token, amount) in &planned {
            self.checked_credit(*token, *amount)?;
        }

        for (token, amount) in tokens.iter().zip(amounts) {
            self.apply_credit(to, *token, *amount);
        }
        log::debug!(
            "batch minted {} entries to {} ({} byte payload)",
            tokens.len(),
            to,
            data.len()
        );
        Ok(())
    }

    fn set_uri(&mut self, token: TokenId, uri: &str) -> RegistryResult<()> {
        self.write_uri(token, uri, false)
    }

    fn set_permanent_uri(&mut self, token: TokenId, uri: &str) -> RegistryResult<()> {
        self.write_uri(token, uri, true)
    }
}

/// In-memory per-creator proxy registry for testing.
///
/// Models a single proxy-registry deployment: the `registry` address passed
/// to `is_proxy_for` is not dispatched on, only required to be non-zero by
/// the caller before the relation is consulted.
#[derive(Debug, Clone, Default)]
pub struct MemoryProxyRegistry {
    delegates: HashMap<AccountId, HashSet<AccountId>>,
}

impl MemoryProxyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `operator` as a delegated proxy for `user`
    pub fn approve(&mut self, user: AccountId, operator: AccountId) {
        self.delegates.entry(user).or_default().insert(operator);
    }

    /// Remove a delegation
    pub fn revoke(&mut self, user: AccountId, operator: &AccountId) {
        if let Some(set) = self.delegates.get_mut(&user) {
            set.remove(operator);
        }
    }
}

impl ProxyResolver for MemoryProxyRegistry {
    fn is_proxy_for(&self, _registry: AccountId, user: AccountId, operator: AccountId) -> bool {
        self.delegates
            .get(&user)
            .map(|set| set.contains(&operator))
            .unwrap_or(false)
    }
}
