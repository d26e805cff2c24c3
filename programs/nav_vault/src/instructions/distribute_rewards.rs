//! Distribute rewards instruction handler.
//!
//! Pulls rewards from the reward source and spreads them across the tiers
//! as pending NAV that vests over each tier's unlock duration.
//!
//! ## Security Guarantees
//! - Only the vault authority or the reward source owner can trigger a pull
//! - Pull goes through an SPL delegate allowance granted to the vault PDA
//! - Fails before any state change when no tier has active shares

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::accounting::distribution::distribute;
use crate::constants::*;
use crate::error::VaultError;
use crate::events::RewardsDistributed;
use crate::instructions::common::{lock_vault, resize_to_fit};
use crate::state::{Tier, TierPool, Vault};

/// Accounts required for a reward distribution.
#[derive(Accounts)]
pub struct DistributeRewards<'info> {
    /// Vault authority or owner of the reward source account.
    #[account(mut)]
    pub distributor: Signer<'info>,

    /// The vault.
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump,
        has_one = staking_vault @ VaultError::VaultMismatch,
        constraint = vault.reward_source_set() @ VaultError::RewardSourceNotSet
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::OneWeek.seed().as_ref()],
        bump = one_week_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub one_week_pool: Account<'info, TierPool>,

    #[account(
        mut,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::OneMonth.seed().as_ref()],
        bump = one_month_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub one_month_pool: Account<'info, TierPool>,

    #[account(
        mut,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::ThreeMonths.seed().as_ref()],
        bump = three_months_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub three_months_pool: Account<'info, TierPool>,

    #[account(
        mut,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::TwelveMonths.seed().as_ref()],
        bump = twelve_months_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub twelve_months_pool: Account<'info, TierPool>,

    /// Custodian account rewards are pulled from.
    /// SECURITY: must be the configured source and delegate to the vault PDA.
    #[account(
        mut,
        address = vault.reward_source @ VaultError::RewardSourceMismatch,
        constraint = reward_source.mint == vault.staking_mint @ VaultError::MintMismatch,
        constraint = distributor.key() == vault.authority
            || distributor.key() == reward_source.owner @ VaultError::Unauthorized
    )]
    pub reward_source: Account<'info, TokenAccount>,

    /// Vault's staking token account.
    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Distribute `amount` reward tokens plus accumulated dust.
///
/// # Arguments
/// * `ctx` - DistributeRewards accounts context
/// * `amount` - Reward tokens to pull from the reward source
///
/// # Errors
/// Returns an error if:
/// - Amount is zero
/// - Reward source is unset or does not match
/// - No tier has active shares
/// - The delegate allowance is insufficient
pub fn handler(mut ctx: Context<DistributeRewards>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    lock_vault(&mut ctx.accounts.vault, ctx.program_id)?;

    let accounts = &mut ctx.accounts;
    let outcome = distribute(
        &mut accounts.vault,
        [
            &mut *accounts.one_week_pool,
            &mut *accounts.one_month_pool,
            &mut *accounts.three_months_pool,
            &mut *accounts.twelve_months_pool,
        ],
        amount,
        now,
    )?;
    accounts.vault.last_updated = now;

    // Pull rewards through the vault PDA's delegate allowance
    let staking_mint_key = accounts.vault.staking_mint;
    let seeds = &[VAULT_SEED, staking_mint_key.as_ref(), &[accounts.vault.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: accounts.reward_source.to_account_info(),
        to: accounts.staking_vault.to_account_info(),
        authority: accounts.vault.to_account_info(),
    };
    let cpi_program = accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    for pool in [
        &accounts.one_week_pool,
        &accounts.one_month_pool,
        &accounts.three_months_pool,
        &accounts.twelve_months_pool,
    ] {
        resize_to_fit(pool, &accounts.distributor, &accounts.system_program)?;
    }
    accounts.vault.leave();

    emit!(RewardsDistributed {
        vault: accounts.vault.key(),
        amount,
        nav_deltas: outcome.nav_deltas,
        reward_dust: outcome.reward_dust,
        timestamp: now,
    });

    msg!(
        "Distributed {} ({} incl. dust), credited {}",
        amount,
        outcome.total_reward,
        outcome.credited
    );
    for (tier, (shares, delta)) in Tier::ALL
        .iter()
        .zip(outcome.active_shares.iter().zip(outcome.nav_deltas.iter()))
    {
        msg!("{:?}: active={} nav_delta={}", tier, shares, delta);
    }
    msg!("Reward dust: {}", outcome.reward_dust);

    Ok(())
}
