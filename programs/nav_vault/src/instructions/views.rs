//! Read-only instructions. Results are returned through program return data.

use anchor_lang::prelude::*;

use crate::accounting::power::lock_power;
use crate::constants::*;
use crate::error::VaultError;
use crate::state::{Position, PositionInfo, Tier, TierPool, TierSnapshot, Vault};

/// NAV recorded for a slot boundary.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavCheckpoint {
    pub slot: i64,
    pub nav: u128,
}

#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

#[derive(Accounts)]
pub struct PositionView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        seeds = [POSITION_SEED, vault.key().as_ref(), &position.id.to_le_bytes()],
        bump = position.bump,
        has_one = vault @ VaultError::PositionVaultMismatch
    )]
    pub position: Account<'info, Position>,
}

#[derive(Accounts)]
#[instruction(tier: u8)]
pub struct TierView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump,
        constraint = Tier::try_from(tier).is_ok() @ VaultError::InvalidTier
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), &[tier]],
        bump = tier_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub tier_pool: Account<'info, TierPool>,
}

/// All four tier pools. The owner's positions are passed as remaining accounts.
#[derive(Accounts)]
pub struct LockPowerView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::OneWeek.seed().as_ref()],
        bump = one_week_pool.bump
    )]
    pub one_week_pool: Account<'info, TierPool>,

    #[account(
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::OneMonth.seed().as_ref()],
        bump = one_month_pool.bump
    )]
    pub one_month_pool: Account<'info, TierPool>,

    #[account(
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::ThreeMonths.seed().as_ref()],
        bump = three_months_pool.bump
    )]
    pub three_months_pool: Account<'info, TierPool>,

    #[account(
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::TwelveMonths.seed().as_ref()],
        bump = twelve_months_pool.bump
    )]
    pub twelve_months_pool: Account<'info, TierPool>,
}

pub fn get_position_handler(ctx: Context<PositionView>) -> Result<PositionInfo> {
    Ok(PositionInfo::from(&*ctx.accounts.position))
}

pub fn time_until_unlock_handler(ctx: Context<PositionView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.position.time_until_unlock(now))
}

pub fn is_unlockable_handler(ctx: Context<PositionView>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.position.is_unlockable(now))
}

/// Effective NAV including the vested part of the pending delta, without
/// persisting the fold.
pub fn get_current_effective_nav_handler(ctx: Context<TierView>, tier: u8) -> Result<u128> {
    let tier = Tier::try_from(tier)?;
    let now = Clock::get()?.unix_timestamp;
    let unlock_duration = ctx.accounts.vault.tier_config(tier).unlock_duration;
    ctx.accounts.tier_pool.effective_nav_at(unlock_duration, now)
}

pub fn get_tier_snapshot_handler(ctx: Context<TierView>, _tier: u8) -> Result<TierSnapshot> {
    Ok(ctx.accounts.tier_pool.snapshot())
}

/// NAV checkpoint of the slot containing `timestamp`, or the latest earlier one.
pub fn get_nav_checkpoint_handler(
    ctx: Context<TierView>,
    tier: u8,
    timestamp: i64,
) -> Result<Option<NavCheckpoint>> {
    let tier = Tier::try_from(tier)?;
    let slot_size = ctx.accounts.vault.tier_config(tier).slot_size;
    Ok(ctx
        .accounts
        .tier_pool
        .nav_checkpoint_at(slot_size, timestamp)
        .map(|(slot, nav)| NavCheckpoint { slot, nav }))
}

pub fn get_reward_dust_handler(ctx: Context<VaultView>) -> Result<u64> {
    Ok(ctx.accounts.vault.reward_dust)
}

/// Sum of the current value of `owner`'s still-locked positions.
///
/// Every position account in `remaining_accounts` must belong to `owner`
/// and this vault; unlockable ones are skipped.
pub fn get_user_lock_powah_handler(ctx: Context<LockPowerView>, owner: Pubkey) -> Result<u64> {
    let mut positions = Vec::with_capacity(ctx.remaining_accounts.len());
    for info in ctx.remaining_accounts.iter() {
        require_keys_eq!(*info.owner, crate::ID, VaultError::PositionNotFound);
        let data = info.try_borrow_data()?;
        let mut bytes: &[u8] = &data;
        let position = Position::try_deserialize(&mut bytes)
            .map_err(|_| error!(VaultError::PositionNotFound))?;
        positions.push(position);
    }

    let now = Clock::get()?.unix_timestamp;
    let accounts = &ctx.accounts;
    let power = lock_power(
        &accounts.vault.tiers,
        [
            &*accounts.one_week_pool,
            &*accounts.one_month_pool,
            &*accounts.three_months_pool,
            &*accounts.twelve_months_pool,
        ],
        positions.iter(),
        &owner,
        now,
    )?;

    msg!("Lock power of {}: {} across {} positions", owner, power, positions.len());
    Ok(power)
}
