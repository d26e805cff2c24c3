//! Deposit instruction handler.
//!
//! Locks staking tokens into a tier and opens a position priced at the
//! tier's current effective NAV.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::accounting::deposit::open_position;
use crate::constants::*;
use crate::error::VaultError;
use crate::events::Deposited;
use crate::instructions::common::{lock_vault, resize_to_fit};
use crate::state::{Position, Tier, TierPool, Vault};

/// Accounts required for a deposit.
#[derive(Accounts)]
#[instruction(amount: u64, tier: u8)]
pub struct Deposit<'info> {
    /// The depositor, who owns the new position.
    #[account(
        mut,
        constraint = Tier::try_from(tier).is_ok() @ VaultError::InvalidTier
    )]
    pub user: Signer<'info>,

    /// The vault.
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump,
        has_one = staking_vault @ VaultError::VaultMismatch,
        has_one = staking_mint @ VaultError::MintMismatch
    )]
    pub vault: Account<'info, Vault>,

    /// Accumulators for the chosen tier.
    #[account(
        mut,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), &[tier]],
        bump = tier_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub tier_pool: Account<'info, TierPool>,

    /// The position being opened, addressed by the vault's next position id.
    #[account(
        init,
        payer = user,
        space = Position::LEN,
        seeds = [POSITION_SEED, vault.key().as_ref(), &vault.next_position_id.to_le_bytes()],
        bump
    )]
    pub position: Account<'info, Position>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for the staking token.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ VaultError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ VaultError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Vault's staking token account.
    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Deposit tokens into a tier.
///
/// # Arguments
/// * `ctx` - Deposit accounts context
/// * `amount` - Amount of staking tokens to lock
/// * `tier` - Tier index (0=1 week, 1=1 month, 2=3 months, 3=12 months)
pub fn handler(ctx: Context<Deposit>, amount: u64, tier: u8) -> Result<()> {
    let tier = Tier::try_from(tier)?;
    require!(ctx.accounts.tier_pool.tier == tier, VaultError::TierPoolMismatch);

    let now = Clock::get()?.unix_timestamp;
    lock_vault(&mut ctx.accounts.vault, ctx.program_id)?;

    let opened = open_position(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.tier_pool,
        amount,
        now,
    )?;
    ctx.accounts.vault.last_updated = now;

    let vault_key = ctx.accounts.vault.key();
    let owner = ctx.accounts.user.key();
    let position = &mut ctx.accounts.position;
    position.vault = vault_key;
    position.owner = owner;
    position.id = opened.id;
    position.shares_amount = opened.shares;
    position.start_timestamp = opened.start_timestamp;
    position.unlock_timestamp = opened.unlock_timestamp;
    position.tier = tier;
    position.entry_nav = opened.entry_nav;
    position.bump = ctx.bumps.position;

    // Transfer tokens from user to vault
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.staking_vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    resize_to_fit(
        &ctx.accounts.tier_pool,
        &ctx.accounts.user,
        &ctx.accounts.system_program,
    )?;
    ctx.accounts.vault.leave();

    emit!(Deposited {
        vault: vault_key,
        owner,
        position_id: opened.id,
        tier: tier.index() as u8,
        amount,
        shares: opened.shares,
        entry_nav: opened.entry_nav,
        unlock_timestamp: opened.unlock_timestamp,
    });

    msg!("Deposited {} tokens into {:?}", amount, tier);
    msg!(
        "Position {}: {} shares at NAV {}, unlocks at {}",
        opened.id,
        opened.shares,
        opened.entry_nav,
        opened.unlock_timestamp
    );

    Ok(())
}
