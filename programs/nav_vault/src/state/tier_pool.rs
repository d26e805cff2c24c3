use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::accounting::expiry::floor_to_slot;
use crate::constants::*;
use crate::error::VaultError;
use crate::state::Tier;

/// Per-tier accounting state: the NAV accumulator plus expiry bookkeeping.
///
/// Initialized once with the vault and mutated only by deposit, withdraw,
/// early withdraw and reward distribution. Never reset.
#[account]
#[derive(Debug, PartialEq)]
pub struct TierPool {
    pub vault: Pubkey,
    pub tier: Tier,

    /// Sum of shares of all open positions in the tier.
    pub total_shares: u64,
    /// Realized NAV per share (PRECISION scale). Never decreases.
    pub effective_nav: u128,
    /// NAV increase still vesting.
    pub pending_nav_delta: u128,
    /// Timestamp the pending delta was last folded in.
    pub last_report: i64,

    pub cumulative_expired_shares: u64,
    pub last_expired_slot_updated: i64,
    /// Shares whose lock matures at a slot, keyed by slot timestamp.
    pub expired_shares_at_slot: BTreeMap<i64, u64>,
    pub cumulative_expired_shares_at_slot: BTreeMap<i64, u64>,
    /// NAV observed at slot boundaries, for historical queries.
    pub nav_checkpoints: BTreeMap<i64, u128>,

    pub bump: u8,
}

impl TierPool {
    /// Fixed part of the account: discriminator, scalars and three empty map prefixes.
    pub const BASE_LEN: usize = 8 + 32 + 1 + 8 + 16 + 16 + 8 + 8 + 8 + (4 * 3) + 1;
    const SHARE_ENTRY_LEN: usize = 8 + 8;
    const NAV_ENTRY_LEN: usize = 8 + 16;

    pub const INITIAL_LEN: usize = Self::BASE_LEN
        + INITIAL_SLOT_ENTRIES * (2 * Self::SHARE_ENTRY_LEN + Self::NAV_ENTRY_LEN);

    pub fn new(vault: Pubkey, tier: Tier, slot_size: i64, now: i64, bump: u8) -> Result<Self> {
        require!(slot_size > 0, VaultError::InvalidTierConfig);
        Ok(Self {
            vault,
            tier,
            total_shares: 0,
            effective_nav: PRECISION,
            pending_nav_delta: 0,
            last_report: now,
            cumulative_expired_shares: 0,
            last_expired_slot_updated: floor_to_slot(slot_size, now),
            expired_shares_at_slot: BTreeMap::new(),
            cumulative_expired_shares_at_slot: BTreeMap::new(),
            nav_checkpoints: BTreeMap::new(),
            bump,
        })
    }

    /// Bytes needed to serialize the pool in its current state.
    pub fn space(&self) -> usize {
        Self::BASE_LEN
            + Self::SHARE_ENTRY_LEN
                * (self.expired_shares_at_slot.len() + self.cumulative_expired_shares_at_slot.len())
            + Self::NAV_ENTRY_LEN * self.nav_checkpoints.len()
    }

    pub fn snapshot(&self) -> TierSnapshot {
        TierSnapshot {
            tier: self.tier,
            total_shares: self.total_shares,
            effective_nav: self.effective_nav,
            pending_nav_delta: self.pending_nav_delta,
            last_report: self.last_report,
        }
    }
}

/// Raw accumulator values returned by the `get_tier_snapshot` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierSnapshot {
    pub tier: Tier,
    pub total_shares: u64,
    pub effective_nav: u128,
    pub pending_nav_delta: u128,
    pub last_report: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_matches_serialized_length() {
        let mut pool = TierPool::new(Pubkey::new_unique(), Tier::OneMonth, 100, 250, 7).unwrap();
        assert_eq!(pool.last_expired_slot_updated, 200);
        assert_eq!(pool.effective_nav, PRECISION);

        pool.expired_shares_at_slot.insert(300, 10);
        pool.cumulative_expired_shares_at_slot.insert(200, 0);
        pool.cumulative_expired_shares_at_slot.insert(300, 10);
        pool.nav_checkpoints.insert(300, PRECISION);

        let serialized = pool.try_to_vec().unwrap();
        assert_eq!(pool.space(), 8 + serialized.len());
    }
}
