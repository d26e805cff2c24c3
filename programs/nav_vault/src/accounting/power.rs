use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::accounting::{mul_div, to_u64};
use crate::constants::{PRECISION, TIER_COUNT};
use crate::error::VaultError;
use crate::state::{Position, TierPool, TierRegistry};

/// Current redeemable value of `owner`'s still-locked positions.
///
/// Each position counts once; a repeated id fails with `DuplicatePosition`.
///
/// Uses the view-time NAV (vested delta included but not persisted), so it
/// can differ slightly from what a state-changing call would fold in.
pub fn lock_power<'a>(
    registry: &TierRegistry,
    pools: [&TierPool; TIER_COUNT],
    positions: impl IntoIterator<Item = &'a Position>,
    owner: &Pubkey,
    now: i64,
) -> Result<u64> {
    let mut navs = [0u128; TIER_COUNT];
    for (i, pool) in pools.iter().enumerate() {
        navs[i] = pool.effective_nav_at(registry.configs[i].unlock_duration, now)?;
    }

    let mut seen = BTreeSet::new();
    let mut power: u128 = 0;
    for position in positions {
        require_keys_eq!(position.owner, *owner, VaultError::Unauthorized);
        require!(seen.insert(position.id), VaultError::DuplicatePosition);
        require_keys_eq!(
            position.vault,
            pools[position.tier.index()].vault,
            VaultError::PositionVaultMismatch
        );
        if position.is_unlockable(now) {
            continue;
        }
        let value = mul_div(
            position.shares_amount as u128,
            navs[position.tier.index()],
            PRECISION,
        )?;
        power = power.checked_add(value).ok_or(VaultError::MathOverflow)?;
    }
    to_u64(power)
}
