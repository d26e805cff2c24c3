//! Closing positions: matured withdrawal and early exit.

use anchor_lang::prelude::*;

use crate::accounting::expiry::floor_to_slot;
use crate::accounting::{mul_div, to_u64};
use crate::constants::{PERCENT_DENOMINATOR, PRECISION};
use crate::error::VaultError;
use crate::state::{Position, TierPool, Vault};

/// Amounts settled when a position closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// NAV the shares were redeemed at.
    pub nav: u128,
    /// Value of the shares at the entry NAV.
    pub principal: u64,
    /// Value of the shares at `nav`.
    pub current_value: u64,
    /// Profit forfeited to reward dust (early exit only).
    pub penalty: u64,
    pub payout: u64,
}

fn check_position(pool: &TierPool, position: &Position) -> Result<()> {
    require_keys_eq!(position.vault, pool.vault, VaultError::PositionVaultMismatch);
    require!(position.tier == pool.tier, VaultError::TierPoolMismatch);
    Ok(())
}

/// Drops the position's shares from the tier and its maturity bucket.
fn retire_position(vault: &mut Vault, pool: &mut TierPool, position: &Position) -> Result<()> {
    let dust = pool.remove_shares(position.shares_amount)?;
    vault.add_dust(dust)?;
    pool.retire_expiry(position.unlock_timestamp, position.shares_amount)
}

fn value_at(shares: u64, nav: u128) -> Result<u64> {
    to_u64(mul_div(shares as u128, nav, PRECISION)?)
}

/// Redeems a matured position at the full current NAV.
pub fn settle_matured(
    vault: &mut Vault,
    pool: &mut TierPool,
    position: &Position,
    now: i64,
) -> Result<Settlement> {
    check_position(pool, position)?;
    require_gte!(now, position.unlock_timestamp, VaultError::UnlockNotReached);
    let config = *vault.tier_config(pool.tier);

    pool.update_effective_nav(config.unlock_duration, now)?;
    let unlock_slot = floor_to_slot(config.slot_size, position.unlock_timestamp);
    pool.realize_expired_shares_up_to(config.slot_size, unlock_slot)?;

    let nav = pool.effective_nav_at(config.unlock_duration, now)?;
    pool.record_nav_checkpoint(unlock_slot, nav);

    retire_position(vault, pool, position)?;

    let principal = value_at(position.shares_amount, position.entry_nav)?;
    let payout = value_at(position.shares_amount, nav)?;
    Ok(Settlement {
        nav,
        principal,
        current_value: payout,
        penalty: 0,
        payout,
    })
}

/// Redeems a still-locked position, forfeiting `penalty_percent` of its profit.
pub fn settle_early(
    vault: &mut Vault,
    pool: &mut TierPool,
    position: &Position,
    now: i64,
) -> Result<Settlement> {
    check_position(pool, position)?;
    require_gt!(
        position.unlock_timestamp,
        now,
        VaultError::EarlyWithdrawUnavailable
    );
    let config = *vault.tier_config(pool.tier);

    pool.update_effective_nav(config.unlock_duration, now)?;
    pool.realize_expired_shares_up_to(config.slot_size, floor_to_slot(config.slot_size, now))?;

    let nav = pool.effective_nav_at(config.unlock_duration, now)?;
    let principal = value_at(position.shares_amount, position.entry_nav)?;
    let current_value = value_at(position.shares_amount, nav)?;
    let profit = current_value.saturating_sub(principal);
    let penalty = to_u64(mul_div(
        profit as u128,
        config.penalty_percent as u128,
        PERCENT_DENOMINATOR,
    )?)?;
    let payout = current_value
        .checked_sub(penalty)
        .ok_or(VaultError::MathOverflow)?;

    // Retire against the original maturity bucket, not the current slot.
    retire_position(vault, pool, position)?;
    vault.add_dust(penalty)?;

    Ok(Settlement {
        nav,
        principal,
        current_value,
        penalty,
        payout,
    })
}
