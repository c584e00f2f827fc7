use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Width of an account identifier in bytes (160 bits).
pub const ACCOUNT_BYTES: usize = 20;

/// Width of the per-creator sequence index field in bytes (56 bits).
pub const INDEX_BYTES: usize = 7;

/// Width of the maximum-supply field in bytes (40 bits).
pub const SUPPLY_BYTES: usize = 5;

/// Width of a token identifier in bytes (256 bits).
pub const TOKEN_ID_BYTES: usize = ACCOUNT_BYTES + INDEX_BYTES + SUPPLY_BYTES;

// AccountId identifies a participant in the registry. It is a 20 byte
// identifier, resembling an externally-owned account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; ACCOUNT_BYTES]);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format as a hex string with a prefix of the first 6 bytes
        let prefix = hex::encode(&self.0[0..6]);
        write!(f, "acct:{}", prefix)
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        AccountId::ZERO
    }
}

impl Deref for AccountId {
    type Target = [u8; ACCOUNT_BYTES];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AccountId {
    /// The null account. Never a valid recipient, creator, or proxy.
    pub const ZERO: AccountId = AccountId([0; ACCOUNT_BYTES]);

    pub fn new(bytes: [u8; ACCOUNT_BYTES]) -> Self {
        AccountId(bytes)
    }

    /// Get a reference to the internal bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether this is the null account
    pub fn is_zero(&self) -> bool {
        self.0 == [0; ACCOUNT_BYTES]
    }
}

/// TokenId uniquely identifies a token type in the registry.
///
/// It is a 256-bit self-describing value: the identifier alone recovers the
/// token's default creator, its per-creator sequence index, and the maximum
/// quantity that may ever be issued against it. Field layout, from the most
/// significant byte:
///
/// | bytes   | field        |
/// |---------|--------------|
/// | 0..20   | creator      |
/// | 20..27  | index        |
/// | 27..32  | max supply   |
///
/// Multi-byte integer fields are big-endian. Decoding is a pure function of
/// the value: any bit pattern decodes to some (creator, index, max supply)
/// triple, and two identifiers are distinct iff their values differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId([u8; TOKEN_ID_BYTES]);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = hex::encode(&self.0[0..6]);
        write!(f, "tok:{}", prefix)
    }
}

impl Ord for TokenId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for TokenId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for TokenId {
    fn default() -> Self {
        TokenId([0; TOKEN_ID_BYTES])
    }
}

impl Deref for TokenId {
    type Target = [u8; TOKEN_ID_BYTES];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TokenId {
    pub fn new(bytes: [u8; TOKEN_ID_BYTES]) -> Self {
        TokenId(bytes)
    }

    /// Get a reference to the internal bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Pack a (creator, index, max supply) triple into an identifier.
    ///
    /// Panics if `index` does not fit in 56 bits or `max_supply` does not
    /// fit in 40 bits. Callers choosing identifiers are expected to stay
    /// inside the field widths; the decode side is total regardless.
    pub fn from_parts(creator: AccountId, index: u64, max_supply: u64) -> Self {
        assert!(index < 1 << (INDEX_BYTES * 8), "index exceeds 56 bits");
        assert!(
            max_supply < 1 << (SUPPLY_BYTES * 8),
            "max supply exceeds 40 bits"
        );

        let mut bytes = [0u8; TOKEN_ID_BYTES];
        bytes[..ACCOUNT_BYTES].copy_from_slice(creator.bytes());
        bytes[ACCOUNT_BYTES..ACCOUNT_BYTES + INDEX_BYTES]
            .copy_from_slice(&index.to_be_bytes()[8 - INDEX_BYTES..]);
        bytes[ACCOUNT_BYTES + INDEX_BYTES..]
            .copy_from_slice(&max_supply.to_be_bytes()[8 - SUPPLY_BYTES..]);
        TokenId(bytes)
    }

    /// The creator account embedded in this identifier.
    ///
    /// This is the default manager of the token; the registry may hold a
    /// reassignment on top of it.
    pub fn creator(&self) -> AccountId {
        let mut bytes = [0u8; ACCOUNT_BYTES];
        bytes.copy_from_slice(&self.0[..ACCOUNT_BYTES]);
        AccountId(bytes)
    }

    /// The per-creator sequence index embedded in this identifier.
    pub fn index(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes[8 - INDEX_BYTES..]
            .copy_from_slice(&self.0[ACCOUNT_BYTES..ACCOUNT_BYTES + INDEX_BYTES]);
        u64::from_be_bytes(bytes)
    }

    /// The maximum issuable supply embedded in this identifier.
    pub fn max_supply(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes[8 - SUPPLY_BYTES..].copy_from_slice(&self.0[ACCOUNT_BYTES + INDEX_BYTES..]);
        u64::from_be_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let creator = AccountId::new([0xAA; ACCOUNT_BYTES]);
        let id = TokenId::from_parts(creator, 3, 1000);

        assert_eq!(id.creator(), creator);
        assert_eq!(id.index(), 3);
        assert_eq!(id.max_supply(), 1000);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let id = TokenId::from_parts(AccountId::new([7; ACCOUNT_BYTES]), 42, 99);

        // Repeated decodes of the same value agree
        assert_eq!(id.creator(), id.creator());
        assert_eq!(id.index(), id.index());
        assert_eq!(id.max_supply(), id.max_supply());
    }

    #[test]
    fn test_decode_is_total() {
        // Any bit pattern decodes to some triple
        let id = TokenId::new([0xFF; TOKEN_ID_BYTES]);
        assert_eq!(id.creator(), AccountId::new([0xFF; ACCOUNT_BYTES]));
        assert_eq!(id.index(), (1 << (INDEX_BYTES * 8)) - 1);
        assert_eq!(id.max_supply(), (1 << (SUPPLY_BYTES * 8)) - 1);

        let zero = TokenId::default();
        assert_eq!(zero.creator(), AccountId::ZERO);
        assert_eq!(zero.index(), 0);
        assert_eq!(zero.max_supply(), 0);
    }

    #[test]
    fn test_distinct_pairs_distinct_ids() {
        let creator = AccountId::new([1; ACCOUNT_BYTES]);
        let other = AccountId::new([2; ACCOUNT_BYTES]);

        let a = TokenId::from_parts(creator, 1, 500);
        let b = TokenId::from_parts(creator, 2, 500);
        let c = TokenId::from_parts(other, 1, 500);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_field_boundaries() {
        // Max legal field values survive the round trip without bleeding
        // into neighboring fields
        let creator = AccountId::new([0; ACCOUNT_BYTES]);
        let id = TokenId::from_parts(
            creator,
            (1 << (INDEX_BYTES * 8)) - 1,
            (1 << (SUPPLY_BYTES * 8)) - 1,
        );

        assert_eq!(id.creator(), creator);
        assert_eq!(id.index(), (1 << (INDEX_BYTES * 8)) - 1);
        assert_eq!(id.max_supply(), (1 << (SUPPLY_BYTES * 8)) - 1);
    }

    #[test]
    #[should_panic(expected = "index exceeds 56 bits")]
    fn test_oversized_index_rejected() {
        TokenId::from_parts(AccountId::ZERO, 1 << (INDEX_BYTES * 8), 0);
    }

    #[test]
    #[should_panic(expected = "max supply exceeds 40 bits")]
    fn test_oversized_supply_rejected() {
        TokenId::from_parts(AccountId::ZERO, 0, 1 << (SUPPLY_BYTES * 8));
    }

    #[test]
    fn test_zero_account() {
        assert!(AccountId::ZERO.is_zero());
        assert!(AccountId::default().is_zero());
        assert!(!AccountId::new([1; ACCOUNT_BYTES]).is_zero());
    }

    #[test]
    fn test_display_prefix() {
        let account = AccountId::new([0xAB; ACCOUNT_BYTES]);
        assert_eq!(format!("{}", account), "acct:abababababab");

        let id = TokenId::from_parts(account, 0, 0);
        assert_eq!(format!("{}", id), "tok:abababababab");
    }

    #[test]
    fn test_serde_round_trip() {
        let id = TokenId::from_parts(AccountId::new([9; ACCOUNT_BYTES]), 17, 250);

        let json = serde_json::to_string(&id).expect("serialize");
        let back: TokenId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }
}
