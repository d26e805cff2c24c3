//! # NAV Vault Program
//!
//! A tiered, time-locked staking vault. Deposits buy shares of one of four
//! tiers at the tier's net asset value (NAV) per share:
//!
//! - **1 week**: 1.00x reward boost, 50% early-exit penalty on profit
//! - **1 month**: 1.25x reward boost, 40% early-exit penalty on profit
//! - **3 months**: 1.50x reward boost, 30% early-exit penalty on profit
//! - **12 months**: 2.00x reward boost, 20% early-exit penalty on profit
//!
//! ## Features
//! - Rewards pulled from a custodian and split by boosted active shares
//! - Per-tier linear unlock of fresh rewards, so a deposit made just before
//!   a distribution cannot capture it
//! - Slot-bucketed maturities: matured positions stop earning new rewards
//! - Rounding remainders and penalties carried forward as reward dust
//! - Safe math with overflow protection

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod accounting;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod test_utils;

use constants::TIER_COUNT;
use instructions::*;
use state::{PositionInfo, TierSnapshot};

#[program]
pub mod nav_vault {
    use super::*;

    /// Initializes the vault, its token account and the four tier pools.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `boost_factors` - Per-tier boosts in basis points (10_000 = 1.0x),
    ///   or `None` for the default table
    ///
    /// # Errors
    /// Returns an error if a boost is below 1.0x.
    pub fn initialize(
        ctx: Context<Initialize>,
        boost_factors: Option<[u64; TIER_COUNT]>,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, boost_factors)
    }

    /// Deposits staking tokens into a tier, opening a new position.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for deposit
    /// * `amount` - Amount of tokens to lock
    /// * `tier` - Tier index (0 = 1 week, 1 = 1 month, 2 = 3 months, 3 = 12 months)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero or worth less than one share
    /// - Invalid tier specified
    /// - Insufficient balance
    pub fn deposit(ctx: Context<Deposit>, amount: u64, tier: u8) -> Result<()> {
        instructions::deposit::handler(ctx, amount, tier)
    }

    /// Withdraws a matured position at the tier's full NAV.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller does not own the position
    /// - The position has not unlocked yet
    pub fn withdraw(ctx: Context<ClosePosition>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    /// Exits a position before it unlocks, forfeiting part of its profit.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller does not own the position
    /// - The position has already unlocked
    pub fn early_withdraw(ctx: Context<ClosePosition>) -> Result<()> {
        instructions::early_withdraw::handler(ctx)
    }

    /// Pulls rewards from the reward source and distributes them across tiers.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the vault, tier pools and token accounts
    /// * `amount` - Amount of reward tokens to pull
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Reward source is unset or mismatched
    /// - No tier has active shares
    pub fn distribute_rewards(ctx: Context<DistributeRewards>, amount: u64) -> Result<()> {
        instructions::distribute_rewards::handler(ctx, amount)
    }

    /// Admin function to set the reward custodian account.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin or the address is zero.
    pub fn set_reward_source(ctx: Context<AdminControl>, reward_source: Pubkey) -> Result<()> {
        instructions::admin::set_reward_source_handler(ctx, reward_source)
    }

    /// Admin function to change one tier's boost factor.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `tier` - Tier index
    /// * `boost_factor` - New boost in basis points
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - Invalid tier specified
    /// - Boost is below 1.0x
    pub fn set_boost_factor_per_tier(
        ctx: Context<AdminControl>,
        tier: u8,
        boost_factor: u64,
    ) -> Result<()> {
        instructions::admin::set_boost_factor_per_tier_handler(ctx, tier, boost_factor)
    }

    /// Admin function to transfer authority to a new address.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current admin
    /// - New authority is zero address
    pub fn transfer_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }

    /// Returns a copy of a position.
    pub fn get_position(ctx: Context<PositionView>) -> Result<PositionInfo> {
        instructions::views::get_position_handler(ctx)
    }

    /// Returns seconds until the position unlocks, or zero.
    pub fn time_until_unlock(ctx: Context<PositionView>) -> Result<u64> {
        instructions::views::time_until_unlock_handler(ctx)
    }

    pub fn is_unlockable(ctx: Context<PositionView>) -> Result<bool> {
        instructions::views::is_unlockable_handler(ctx)
    }

    /// Returns the tier's effective NAV including vested pending rewards.
    pub fn get_current_effective_nav(ctx: Context<TierView>, tier: u8) -> Result<u128> {
        instructions::views::get_current_effective_nav_handler(ctx, tier)
    }

    /// Returns the tier's raw accumulator values.
    pub fn get_tier_snapshot(ctx: Context<TierView>, tier: u8) -> Result<TierSnapshot> {
        instructions::views::get_tier_snapshot_handler(ctx, tier)
    }

    /// Returns the NAV checkpoint covering `timestamp`, if any.
    pub fn get_nav_checkpoint(
        ctx: Context<TierView>,
        tier: u8,
        timestamp: i64,
    ) -> Result<Option<NavCheckpoint>> {
        instructions::views::get_nav_checkpoint_handler(ctx, tier, timestamp)
    }

    pub fn get_reward_dust(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::get_reward_dust_handler(ctx)
    }

    /// Returns the current value of `owner`'s locked positions, passed as
    /// remaining accounts.
    ///
    /// # Errors
    /// Returns an error if a passed account is not a position of `owner`
    /// in this vault.
    pub fn get_user_lock_powah(ctx: Context<LockPowerView>, owner: Pubkey) -> Result<u64> {
        instructions::views::get_user_lock_powah_handler(ctx, owner)
    }
}
