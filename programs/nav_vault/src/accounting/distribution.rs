//! Splitting rewards across tiers.
//!
//! Each tier's claim is its active (not yet matured) shares weighted by its
//! boost factor. A tier's portion becomes a per-share NAV delta that vests
//! through the tier's pending queue. Dust is whatever the re-multiplied
//! deltas fail to credit, carried into the next distribution.

use anchor_lang::prelude::*;

use crate::accounting::expiry::floor_to_slot;
use crate::accounting::{mul_div, to_u64};
use crate::constants::{PRECISION, TIER_COUNT};
use crate::error::VaultError;
use crate::state::{Tier, TierPool, Vault};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionOutcome {
    /// `amount` plus the dust carried in.
    pub total_reward: u64,
    pub active_shares: [u64; TIER_COUNT],
    pub nav_deltas: [u128; TIER_COUNT],
    pub credited: u64,
    /// Dust left after this distribution.
    pub reward_dust: u64,
}

/// Distributes `amount` plus carried dust across all tiers.
///
/// `pools` must be ordered as [`Tier::ALL`]. Fails with `NoActiveShares`
/// before touching any state when no tier has active boosted shares.
pub fn distribute(
    vault: &mut Vault,
    mut pools: [&mut TierPool; TIER_COUNT],
    amount: u64,
    now: i64,
) -> Result<DistributionOutcome> {
    require!(amount > 0, VaultError::ZeroAmount);
    require!(vault.reward_source_set(), VaultError::RewardSourceNotSet);
    for (pool, tier) in pools.iter().zip(Tier::ALL) {
        require!(pool.tier == tier, VaultError::TierPoolMismatch);
    }

    let registry = vault.tiers;
    let slots = Tier::ALL.map(|tier| floor_to_slot(registry.get(tier).slot_size, now));

    let mut active_shares = [0u64; TIER_COUNT];
    for (i, pool) in pools.iter().enumerate() {
        active_shares[i] = pool.peek_active_shares(slots[i])?;
    }
    let weighted = weigh(&active_shares, &registry.configs.map(|c| c.boost_factor))?;
    let total_weighted = weighted
        .iter()
        .try_fold(0u128, |acc, w| acc.checked_add(*w))
        .ok_or(VaultError::MathOverflow)?;
    require!(total_weighted > 0, VaultError::NoActiveShares);

    for (pool, config) in pools.iter_mut().zip(registry.configs.iter()) {
        pool.update_effective_nav(config.unlock_duration, now)?;
    }
    // Walk expiry slots for real now that the call is known to proceed.
    for (i, pool) in pools.iter_mut().enumerate() {
        active_shares[i] = pool.active_shares_for_slot(registry.configs[i].slot_size, slots[i])?;
    }

    let total_reward = amount
        .checked_add(vault.reward_dust)
        .ok_or(VaultError::MathOverflow)?;

    let mut nav_deltas = [0u128; TIER_COUNT];
    let mut credited: u128 = 0;
    for (i, pool) in pools.iter_mut().enumerate() {
        let active = active_shares[i];
        if active == 0 {
            continue;
        }
        let tier_reward = mul_div(total_reward as u128, weighted[i], total_weighted)?;
        let nav_delta = mul_div(tier_reward, PRECISION, active as u128)?;
        pool.add_pending_delta(nav_delta)?;

        // Historical record only; reads always go through the accumulator.
        let projected_nav = pool
            .effective_nav
            .checked_add(pool.pending_nav_delta)
            .ok_or(VaultError::MathOverflow)?;
        let slot_size = registry.configs[i].slot_size;
        pool.record_nav_checkpoint(slots[i], projected_nav);
        pool.record_nav_checkpoint(
            slots[i].checked_add(slot_size).ok_or(VaultError::MathOverflow)?,
            projected_nav,
        );

        credited = credited
            .checked_add(mul_div(nav_delta, active as u128, PRECISION)?)
            .ok_or(VaultError::MathOverflow)?;
        nav_deltas[i] = nav_delta;
    }

    let credited = to_u64(credited)?;
    let reward_dust = total_reward
        .checked_sub(credited)
        .ok_or(VaultError::MathOverflow)?;
    vault.reward_dust = reward_dust;

    Ok(DistributionOutcome {
        total_reward,
        active_shares,
        nav_deltas,
        credited,
        reward_dust,
    })
}

fn weigh(
    active_shares: &[u64; TIER_COUNT],
    boost_factors: &[u64; TIER_COUNT],
) -> Result<[u128; TIER_COUNT]> {
    let mut weighted = [0u128; TIER_COUNT];
    for i in 0..TIER_COUNT {
        weighted[i] = (active_shares[i] as u128)
            .checked_mul(boost_factors[i] as u128)
            .ok_or(VaultError::MathOverflow)?;
    }
    Ok(weighted)
}
