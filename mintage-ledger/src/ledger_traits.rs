use mintage_core::error::RegistryResult;
use mintage_core::id::{AccountId, TokenId};

/// Read-only query surface of a registry's balance ledger.
///
/// Every registry instance, including a retired predecessor, exposes this
/// surface; the migration engine reads a predecessor exclusively through it.
pub trait RegistryReader {
    /// Get the balance an account holds of a token
    ///
    /// # Parameters
    /// * `owner` - The account to query
    /// * `token` - The token to query
    ///
    /// # Returns
    /// The quantity of `token` held by `owner` (zero when never held)
    fn balance_of(&self, owner: AccountId, token: TokenId) -> u64;

    /// Get the cumulative quantity ever minted for a token
    ///
    /// # Parameters
    /// * `token` - The token to query
    ///
    /// # Returns
    /// The issued supply of `token`
    fn total_supply(&self, token: TokenId) -> u64;

    /// Get the metadata URI for a token
    ///
    /// # Parameters
    /// * `token` - The token to query
    ///
    /// # Returns
    /// The custom URI if one was set, otherwise the template URI
    fn uri(&self, token: TokenId) -> String;

    /// Get the template URI tokens fall back to when no custom URI is set
    fn template_uri(&self) -> String;
}

/// Mutation primitives of the balance ledger.
///
/// Implementations MUST enforce the supply cap embedded in the token
/// identifier: a mint that would push `total_supply(token)` past
/// `token.max_supply()` fails with `SupplyCapExceeded` and changes nothing.
/// `mint_batch` MUST be all-or-nothing. A permanent URI freezes the token's
/// metadata; later URI writes fail with `UriPermanent`.
pub trait BalanceLedger: RegistryReader {
    /// Credit `amount` of `token` to `to`
    ///
    /// # Parameters
    /// * `to` - The receiving account
    /// * `token` - The token to credit
    /// * `amount` - The quantity to credit
    /// * `data` - Opaque payload forwarded to any transfer-acceptance hook
    ///
    /// # Returns
    /// Ok(()) if successful, Err otherwise
    fn mint(&mut self, to: AccountId, token: TokenId, amount: u64, data: &[u8])
        -> RegistryResult<()>;

    /// Credit several tokens to `to` in one atomic step
    ///
    /// # Parameters
    /// * `to` - The receiving account
    /// * `tokens` - The tokens to credit, parallel to `amounts`
    /// * `amounts` - The quantities to credit, parallel to `tokens`
    /// * `data` - Opaque payload forwarded to any transfer-acceptance hook
    ///
    /// # Returns
    /// Ok(()) if every credit applied, Err with no credit applied otherwise
    fn mint_batch(
        &mut self,
        to: AccountId,
        tokens: &[TokenId],
        amounts: &[u64],
        data: &[u8],
    ) -> RegistryResult<()>;

    /// Set the metadata URI for a token
    ///
    /// # Parameters
    /// * `token` - The token to update
    /// * `uri` - The new metadata URI
    ///
    /// # Returns
    /// Ok(()) if successful, Err if the token's URI is already permanent
    fn set_uri(&mut self, token: TokenId, uri: &str) -> RegistryResult<()>;

    /// Set the metadata URI for a token and freeze it
    ///
    /// # Parameters
    /// * `token` - The token to update
    /// * `uri` - The final metadata URI
    ///
    /// # Returns
    /// Ok(()) if successful, Err if the token's URI is already permanent
    fn set_permanent_uri(&mut self, token: TokenId, uri: &str) -> RegistryResult<()>;
}

/// Per-creator proxy relation, resolved through an external proxy registry.
///
/// The shared-proxy allowlist lives in the registry itself; this trait covers
/// the other half of the authorization union, the individually delegated
/// proxies tracked by a proxy-registry collaborator. The relation is
/// consulted fresh on every authorization check.
pub trait ProxyResolver {
    /// Whether `operator` is a delegated proxy for `user`
    ///
    /// # Parameters
    /// * `registry` - The configured proxy-registry address to resolve through
    /// * `user` - The account that may have delegated
    /// * `operator` - The candidate proxy
    ///
    /// # Returns
    /// True if the proxy registry at `registry` records the delegation
    fn is_proxy_for(&self, registry: AccountId, user: AccountId, operator: AccountId) -> bool;
}

/// The empty proxy relation: no account is a proxy for any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProxyResolver;

impl ProxyResolver for NullProxyResolver {
    fn is_proxy_for(&self, _registry: AccountId, _user: AccountId, _operator: AccountId) -> bool {
        false
    }
}
