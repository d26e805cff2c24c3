/// Initialize instruction handler.
///
/// Creates the vault, its staking token vault and the four tier pools.
///
/// ## Security Guarantees
/// - Token vault is a PDA owned by the vault PDA
/// - Mint address is locked to vault state permanently
/// - Tier table validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::state::{Tier, TierPool, TierRegistry, Vault};

/// Accounts required for vault initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will own the vault.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The vault account to be created.
    /// SECURITY: PDA derived from VAULT_SEED + mint ensures one vault per token.
    #[account(
        init,
        payer = authority,
        space = Vault::LEN,
        seeds = [VAULT_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// Holds principal and pulled rewards.
    /// SECURITY: PDA with the vault as token authority.
    #[account(
        init,
        payer = authority,
        seeds = [TOKEN_VAULT_SEED, vault.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = vault
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = authority,
        space = TierPool::INITIAL_LEN,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::OneWeek.seed().as_ref()],
        bump
    )]
    pub one_week_pool: Account<'info, TierPool>,

    #[account(
        init,
        payer = authority,
        space = TierPool::INITIAL_LEN,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::OneMonth.seed().as_ref()],
        bump
    )]
    pub one_month_pool: Account<'info, TierPool>,

    #[account(
        init,
        payer = authority,
        space = TierPool::INITIAL_LEN,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::ThreeMonths.seed().as_ref()],
        bump
    )]
    pub three_months_pool: Account<'info, TierPool>,

    #[account(
        init,
        payer = authority,
        space = TierPool::INITIAL_LEN,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), Tier::TwelveMonths.seed().as_ref()],
        bump
    )]
    pub twelve_months_pool: Account<'info, TierPool>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new vault.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `boost_factors` - Per-tier boost in basis points, or `None` for the defaults
pub fn handler(ctx: Context<Initialize>, boost_factors: Option<[u64; TIER_COUNT]>) -> Result<()> {
    // === INPUT VALIDATION ===

    let mut tiers = TierRegistry::default();
    if let Some(boosts) = boost_factors {
        for (tier, boost) in Tier::ALL.into_iter().zip(boosts) {
            tiers.set_boost_factor(tier, boost)?;
        }
    }
    tiers.validate()?;

    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();

    // === STATE INITIALIZATION ===

    let vault = &mut ctx.accounts.vault;
    vault.authority = ctx.accounts.authority.key();
    vault.staking_mint = ctx.accounts.staking_mint.key();
    vault.staking_vault = ctx.accounts.staking_vault.key();
    vault.reward_source = Pubkey::default();
    vault.tiers = tiers;
    vault.reward_dust = 0;
    vault.next_position_id = 0;
    vault.entered = false;
    vault.created_at = now;
    vault.last_updated = now;
    vault.bump = ctx.bumps.vault;
    vault.vault_bump = ctx.bumps.staking_vault;

    let bumps = [
        ctx.bumps.one_week_pool,
        ctx.bumps.one_month_pool,
        ctx.bumps.three_months_pool,
        ctx.bumps.twelve_months_pool,
    ];
    let pools = [
        &mut ctx.accounts.one_week_pool,
        &mut ctx.accounts.one_month_pool,
        &mut ctx.accounts.three_months_pool,
        &mut ctx.accounts.twelve_months_pool,
    ];
    for ((pool, tier), bump) in pools.into_iter().zip(Tier::ALL).zip(bumps) {
        let slot_size = tiers.get(tier).slot_size;
        pool.set_inner(TierPool::new(vault_key, tier, slot_size, now, bump)?);
    }

    msg!("NAV vault initialized");
    msg!("Admin: {}", ctx.accounts.authority.key());
    msg!("Mint: {}", ctx.accounts.staking_mint.key());
    for tier in Tier::ALL {
        let config = tiers.get(tier);
        msg!(
            "{:?}: slot={}s boost={}bp penalty={}% unlock={}s",
            tier,
            config.slot_size,
            config.boost_factor,
            config.penalty_percent,
            config.unlock_duration
        );
    }

    Ok(())
}
