use mintage_core::error::{RegistryError, RegistryResult};
use mintage_core::id::{AccountId, TokenId};
use mintage_ledger::{BalanceLedger, ProxyResolver};

use crate::registry::SharedRegistry;

/// Mint entry points.
///
/// Both are protected by the re-entrancy flag: the ledger's mint primitive
/// may hand control to externally-supplied code (a transfer-acceptance hook
/// on the recipient), and a nested call into this surface before the supply
/// counter settles must fail rather than proceed. The flag is cleared on
/// every exit path, normal return or failure.
impl<L: BalanceLedger, P: ProxyResolver> SharedRegistry<L, P> {
    /// Mint `quantity` of `token` to `to`.
    ///
    /// Requires the caller to be the token's effective creator or an
    /// approved proxy. The supply cap is not re-checked here; the ledger
    /// enforces it through the remaining-supply hook.
    pub fn mint_single(
        &mut self,
        caller: AccountId,
        to: AccountId,
        token: TokenId,
        quantity: u64,
        data: &[u8],
    ) -> RegistryResult<()> {
        if self.minting {
            return Err(RegistryError::ReentrantCall);
        }
        self.minting = true;
        let result = self.mint_single_guarded(caller, to, token, quantity, data);
        self.minting = false;
        result
    }

    fn mint_single_guarded(
        &mut self,
        caller: AccountId,
        to: AccountId,
        token: TokenId,
        quantity: u64,
        data: &[u8],
    ) -> RegistryResult<()> {
        self.require_creator_or_proxy(token, caller)?;
        if quantity == 0 {
            return Err(RegistryError::ZeroQuantityNotAllowed);
        }
        if to.is_zero() {
            return Err(RegistryError::ZeroAddressNotAllowed);
        }
        log::debug!("{} mints {} of {} to {}", caller, quantity, token, to);
        self.ledger_mut().mint(to, token, quantity, data)
    }

    /// Mint several tokens to `to` in one call.
    ///
    /// Authorization is checked for every entry before any mutation, so a
    /// single unauthorized token aborts the whole batch with no partial
    /// effect; the ledger's batch primitive is itself all-or-nothing.
    pub fn mint_batch(
        &mut self,
        caller: AccountId,
        to: AccountId,
        tokens: &[TokenId],
        quantities: &[u64],
        data: &[u8],
    ) -> RegistryResult<()> {
        if self.minting {
            return Err(RegistryError::ReentrantCall);
        }
        self.minting = true;
        let result = self.mint_batch_guarded(caller, to, tokens, quantities, data);
        self.minting = false;
        result
    }

    fn mint_batch_guarded(
        &mut self,
        caller: AccountId,
        to: AccountId,
        tokens: &[TokenId],
        quantities: &[u64],
        data: &[u8],
    ) -> RegistryResult<()> {
        for token in tokens {
            self.require_creator_or_proxy(*token, caller)?;
        }
        if quantities.iter().any(|quantity| *quantity == 0) {
            return Err(RegistryError::ZeroQuantityNotAllowed);
        }
        if to.is_zero() {
            return Err(RegistryError::ZeroAddressNotAllowed);
        }
        log::debug!("{} batch mints {} entries to {}", caller, tokens.len(), to);
        self.ledger_mut().mint_batch(to, tokens, quantities, data)
    }
}
