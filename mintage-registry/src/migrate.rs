use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use mintage_core::error::{RegistryError, RegistryResult};
use mintage_core::id::{AccountId, TokenId};
use mintage_ledger::{BalanceLedger, ProxyResolver};

use crate::registry::SharedRegistry;

/// One balance line to import from the predecessor registry.
///
/// Transient input to `migrate`: consumed to produce ledger mutations,
/// never persisted as its own entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    pub token: TokenId,
    pub owner: AccountId,
}

/// Staged mutation for one migrated record, fully computed before the
/// first write so the call is atomic over its own failure taxonomy
struct StagedImport {
    token: TokenId,
    owner: AccountId,
    amount: u64,
    custom_uri: Option<String>,
}

impl<L: BalanceLedger, P: ProxyResolver> SharedRegistry<L, P> {
    /// Bulk-import balances and custom metadata from the predecessor.
    ///
    /// Administrator-gated; migration is itself the authorization, so the
    /// mints here bypass the per-token creator gate. For each record the
    /// predecessor balance is re-read and minted as-is; a zero balance is a
    /// no-op, which makes resubmitting a partially stale list harmless. A
    /// predecessor URI is copied as permanent metadata only when its digest
    /// differs from the predecessor's template URI, since templated
    /// metadata is derived from this registry's own template instead.
    ///
    /// Any record naming the null account aborts the whole call before a
    /// single balance moves; the caller removes or corrects the entry and
    /// resubmits.
    pub fn migrate(
        &mut self,
        caller: AccountId,
        records: &[OwnershipRecord],
    ) -> RegistryResult<()> {
        self.require_owner_or_proxy(caller)?;
        let predecessor = self
            .predecessor_ref()
            .ok_or(RegistryError::MigrateDisabled)?;

        if records.iter().any(|record| record.owner.is_zero()) {
            return Err(RegistryError::ZeroAddressNotAllowed);
        }

        // The template URI is read once and compared by digest
        let template_digest = Sha256::digest(predecessor.template_uri().as_bytes());

        let mut staged = Vec::with_capacity(records.len());
        for record in records {
            let amount = predecessor.balance_of(record.owner, record.token);
            if amount == 0 {
                log::debug!("skipping empty balance of {} for {}", record.token, record.owner);
                continue;
            }
            let uri = predecessor.uri(record.token);
            let custom_uri =
                (Sha256::digest(uri.as_bytes()) != template_digest).then_some(uri);
            staged.push(StagedImport {
                token: record.token,
                owner: record.owner,
                amount,
                custom_uri,
            });
        }

        let imported = staged.len();
        for import in staged {
            self.ledger_mut()
                .mint(import.owner, import.token, import.amount, &[])?;
            if let Some(uri) = import.custom_uri {
                self.ledger_mut().set_permanent_uri(import.token, &uri)?;
            }
        }
        log::info!(
            "migrated {} of {} records from the predecessor registry",
            imported,
            records.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::acct;
    use mintage_ledger::{MemoryLedger, MemoryProxyRegistry, RegistryReader};

    const TEMPLATE: &str = "ipfs://template/{id}";

    fn predecessor() -> MemoryLedger {
        MemoryLedger::new(TEMPLATE)
    }

    fn migratable(
        predecessor: MemoryLedger,
    ) -> SharedRegistry<MemoryLedger, MemoryProxyRegistry> {
        SharedRegistry::with_predecessor(
            acct(1),
            MemoryLedger::new(TEMPLATE),
            MemoryProxyRegistry::new(),
            Box::new(predecessor),
        )
    }

    #[test]
    fn test_migrate_reconstructs_balances() {
        let creator = acct(0xAA);
        let holder = acct(0xBB);
        let token = TokenId::from_parts(creator, 0, 1000);

        let mut old = predecessor();
        old.mint(holder, token, 250, &[]).expect("seed");

        let mut reg = migratable(old);
        reg.migrate(acct(1), &[OwnershipRecord { token, owner: holder }])
            .expect("migrate");

        assert_eq!(reg.ledger().balance_of(holder, token), 250);
        assert_eq!(reg.ledger().total_supply(token), 250);
    }

    #[test]
    fn test_migrate_bypasses_creator_gate() {
        // The administrator is not the token's creator; migration mints
        // anyway, because the call itself is the authorization
        let creator = acct(0xAA);
        let holder = acct(0xBB);
        let token = TokenId::from_parts(creator, 0, 1000);

        let mut old = predecessor();
        old.mint(holder, token, 10, &[]).expect("seed");

        let mut reg = migratable(old);
        assert!(!reg.is_creator_or_proxy(token, acct(1)));
        reg.migrate(acct(1), &[OwnershipRecord { token, owner: holder }])
            .expect("migrate");
        assert_eq!(reg.ledger().balance_of(holder, token), 10);
    }

    #[test]
    fn test_migrate_requires_administrator() {
        let mut reg = migratable(predecessor());
        let err = reg.migrate(acct(5), &[]).unwrap_err();
        assert!(matches!(err, RegistryError::OnlyOwnerOrProxyAllowed { .. }));
    }

    #[test]
    fn test_zero_balance_is_a_no_op() {
        let token = TokenId::from_parts(acct(0xAA), 0, 1000);
        let holder = acct(0xBB);

        let mut reg = migratable(predecessor());
        reg.migrate(acct(1), &[OwnershipRecord { token, owner: holder }])
            .expect("no-op migrate");
        assert_eq!(reg.ledger().total_supply(token), 0);
    }

    #[test]
    fn test_custom_metadata_is_preserved_permanently() {
        let creator = acct(0xAA);
        let holder = acct(0xBB);
        let custom = TokenId::from_parts(creator, 0, 100);
        let templated = TokenId::from_parts(creator, 1, 100);

        let mut old = predecessor();
        old.mint(holder, custom, 1, &[]).expect("seed");
        old.mint(holder, templated, 1, &[]).expect("seed");
        old.set_uri(custom, "ipfs://one-of-a-kind").expect("seed uri");

        let mut reg = migratable(old);
        reg.migrate(
            acct(1),
            &[
                OwnershipRecord { token: custom, owner: holder },
                OwnershipRecord { token: templated, owner: holder },
            ],
        )
        .expect("migrate");

        // The custom URI came across verbatim and is frozen
        assert_eq!(reg.ledger().uri(custom), "ipfs://one-of-a-kind");
        assert!(reg.ledger().is_permanent(custom));

        // The templated token derives from this registry's own template
        assert_eq!(reg.ledger().uri(templated), TEMPLATE);
        assert!(!reg.ledger().is_permanent(templated));
    }

    #[test]
    fn test_zero_owner_aborts_whole_batch() {
        let creator = acct(0xAA);
        let holder = acct(0xBB);
        let token = TokenId::from_parts(creator, 0, 100);

        let mut old = predecessor();
        old.mint(holder, token, 40, &[]).expect("seed");

        let mut reg = migratable(old);
        let err = reg
            .migrate(
                acct(1),
                &[
                    OwnershipRecord { token, owner: holder },
                    OwnershipRecord { token, owner: AccountId::ZERO },
                ],
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::ZeroAddressNotAllowed));

        // Atomic: the valid first record was not applied either
        assert_eq!(reg.ledger().total_supply(token), 0);
        assert_eq!(reg.ledger().balance_of(holder, token), 0);
    }

    #[test]
    fn test_disable_migrate_is_final() {
        let creator = acct(0xAA);
        let holder = acct(0xBB);
        let token = TokenId::from_parts(creator, 0, 100);

        let mut old = predecessor();
        old.mint(holder, token, 40, &[]).expect("seed");

        let mut reg = migratable(old);
        reg.disable_migrate(acct(1)).expect("disable");
        assert!(!reg.migrate_enabled());

        let err = reg
            .migrate(acct(1), &[OwnershipRecord { token, owner: holder }])
            .unwrap_err();
        assert!(matches!(err, RegistryError::MigrateDisabled));
    }

    #[test]
    fn test_migrate_without_predecessor_is_disabled() {
        let mut reg = SharedRegistry::new(
            acct(1),
            MemoryLedger::new(TEMPLATE),
            MemoryProxyRegistry::new(),
        );
        let err = reg.migrate(acct(1), &[]).unwrap_err();
        assert!(matches!(err, RegistryError::MigrateDisabled));
    }
}
