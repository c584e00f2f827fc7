use std::collections::{HashMap, HashSet};

use mintage_core::events::RegistryEvent;
use mintage_core::id::{AccountId, TokenId};
use mintage_ledger::{BalanceLedger, ProxyResolver, RegistryReader};

/// The shared multi-token registry engine.
///
/// Owns the delegation state (creator overrides, shared-proxy allowlist,
/// proxy-registry pointer) and drives the external collaborators: a balance
/// ledger `L` that holds balances and metadata, and a proxy resolver `P`
/// that answers the per-creator delegation relation. All mutating entry
/// points take the calling account explicitly; the registry is the single
/// authorization gate in front of the ledger's mint and metadata primitives.
pub struct SharedRegistry<L: BalanceLedger, P: ProxyResolver> {
    /// The registry administrator
    owner: AccountId,

    /// External balance ledger
    ledger: L,

    /// External per-creator proxy relation
    proxies: P,

    /// Address of the proxy-registry deployment the relation resolves
    /// through; zero disables the external half of the proxy check
    proxy_registry: AccountId,

    /// Accounts authorized to act as proxy for every creator
    shared_proxies: HashSet<AccountId>,

    /// Delegated management rights, keyed by token. Absence means the
    /// creator embedded in the identifier; entries are never removed,
    /// only overwritten
    creator_overrides: HashMap<TokenId, AccountId>,

    /// Predecessor registry the one-time migration imports from. Cleared
    /// irrevocably by `disable_migrate`
    predecessor: Option<Box<dyn RegistryReader>>,

    /// Re-entrancy flag for the guarded mint surface
    pub(crate) minting: bool,

    /// Observable notification log, drained by the embedder
    events: Vec<RegistryEvent>,
}

impl<L: BalanceLedger, P: ProxyResolver> SharedRegistry<L, P> {
    /// Create a registry with migration disabled from the start
    pub fn new(owner: AccountId, ledger: L, proxies: P) -> Self {
        Self {
            owner,
            ledger,
            proxies,
            proxy_registry: AccountId::ZERO,
            shared_proxies: HashSet::new(),
            creator_overrides: HashMap::new(),
            predecessor: None,
            minting: false,
            events: Vec::new(),
        }
    }

    /// Create a registry that may migrate once from `predecessor`
    pub fn with_predecessor(
        owner: AccountId,
        ledger: L,
        proxies: P,
        predecessor: Box<dyn RegistryReader>,
    ) -> Self {
        let mut registry = Self::new(owner, ledger, proxies);
        registry.predecessor = Some(predecessor);
        registry
    }

    /// The registry administrator
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The configured proxy-registry address (zero when unset)
    pub fn proxy_registry_address(&self) -> AccountId {
        self.proxy_registry
    }

    /// Whether the one-time migration path is still open
    pub fn migrate_enabled(&self) -> bool {
        self.predecessor.is_some()
    }

    /// Read access to the balance ledger
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the balance ledger, for embedders wiring up
    /// transfer mechanics outside this engine
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Notifications emitted so far and not yet drained
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Drain the notification log
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: RegistryEvent) {
        self.events.push(event);
    }

    pub(crate) fn proxy_resolver(&self) -> &P {
        &self.proxies
    }

    pub(crate) fn shared_proxies(&self) -> &HashSet<AccountId> {
        &self.shared_proxies
    }

    pub(crate) fn shared_proxies_mut(&mut self) -> &mut HashSet<AccountId> {
        &mut self.shared_proxies
    }

    pub(crate) fn creator_overrides(&self) -> &HashMap<TokenId, AccountId> {
        &self.creator_overrides
    }

    pub(crate) fn creator_overrides_mut(&mut self) -> &mut HashMap<TokenId, AccountId> {
        &mut self.creator_overrides
    }

    pub(crate) fn set_proxy_registry_pointer(&mut self, address: AccountId) {
        self.proxy_registry = address;
    }

    pub(crate) fn predecessor_ref(&self) -> Option<&dyn RegistryReader> {
        self.predecessor.as_deref()
    }

    pub(crate) fn clear_predecessor(&mut self) {
        self.predecessor = None;
    }

    // ---- Read accessors and ledger hooks ----

    /// The account currently entitled to manage `token`: the reassigned
    /// manager if one was recorded, else the creator embedded in the
    /// identifier. Never fails
    pub fn creator(&self, token: TokenId) -> AccountId {
        self.effective_creator(token)
    }

    /// The creator embedded in the identifier, ignoring reassignment.
    /// This is the origin hook the ledger consults for royalty-style
    /// attribution
    pub fn origin(&self, token: TokenId) -> AccountId {
        token.creator()
    }

    /// The maximum issuable supply embedded in the identifier
    pub fn max_supply(&self, token: TokenId) -> u64 {
        token.max_supply()
    }

    /// The per-creator sequence index embedded in the identifier
    pub fn index(&self, token: TokenId) -> u64 {
        token.index()
    }

    /// The quantity still mintable for `token`.
    ///
    /// This is the hook the ledger's mint enforcement consumes. Issued
    /// supply exceeding the identifier cap is a breach of the mint-path
    /// invariant, not a recoverable condition, and aborts the process.
    pub fn remaining_supply(&self, token: TokenId) -> u64 {
        token
            .max_supply()
            .checked_sub(self.ledger.total_supply(token))
            .expect("issued supply exceeds the cap embedded in the identifier")
    }
}
