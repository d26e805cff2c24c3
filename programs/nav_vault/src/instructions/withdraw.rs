//! Withdraw instruction handler.
//!
//! Redeems a matured position at the tier's full NAV and closes it.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::accounting::withdrawal::settle_matured;
use crate::constants::*;
use crate::error::VaultError;
use crate::events::Withdrawn;
use crate::instructions::common::{lock_vault, resize_to_fit};
use crate::state::{Position, TierPool, Vault};

/// Accounts required to close a position, matured or not.
#[derive(Accounts)]
pub struct ClosePosition<'info> {
    /// The position owner.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The vault.
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump,
        has_one = staking_vault @ VaultError::VaultMismatch,
        has_one = staking_mint @ VaultError::MintMismatch
    )]
    pub vault: Account<'info, Vault>,

    /// The position being closed. Rent goes back to the owner.
    #[account(
        mut,
        close = owner,
        seeds = [POSITION_SEED, vault.key().as_ref(), &position.id.to_le_bytes()],
        bump = position.bump,
        has_one = owner @ VaultError::Unauthorized,
        has_one = vault @ VaultError::PositionVaultMismatch
    )]
    pub position: Account<'info, Position>,

    /// Accumulators for the position's tier.
    #[account(
        mut,
        seeds = [TIER_POOL_SEED, vault.key().as_ref(), position.tier.seed().as_ref()],
        bump = tier_pool.bump,
        has_one = vault @ VaultError::TierPoolMismatch
    )]
    pub tier_pool: Account<'info, TierPool>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// Owner's token account receiving the payout.
    #[account(
        mut,
        constraint = owner_token_account.mint == staking_mint.key() @ VaultError::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ VaultError::Unauthorized
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// Vault's staking token account.
    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

impl<'info> ClosePosition<'info> {
    /// Pays `amount` from the staking vault to the owner, signed by the vault PDA.
    pub fn pay_owner(&self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let staking_mint_key = self.vault.staking_mint;
        let seeds = &[VAULT_SEED, staking_mint_key.as_ref(), &[self.vault.bump]];
        let signer_seeds = &[&seeds[..]];

        let cpi_accounts = Transfer {
            from: self.staking_vault.to_account_info(),
            to: self.owner_token_account.to_account_info(),
            authority: self.vault.to_account_info(),
        };
        let cpi_program = self.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, amount)
    }
}

/// Withdraw a matured position.
///
/// # Arguments
/// * `ctx` - ClosePosition accounts context
///
/// # Errors
/// `UnlockNotReached` while the position is still locked.
pub fn handler(ctx: Context<ClosePosition>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    lock_vault(&mut ctx.accounts.vault, ctx.program_id)?;

    let settlement = settle_matured(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.tier_pool,
        &ctx.accounts.position,
        now,
    )?;
    ctx.accounts.vault.last_updated = now;

    ctx.accounts.pay_owner(settlement.payout)?;
    resize_to_fit(
        &ctx.accounts.tier_pool,
        &ctx.accounts.owner,
        &ctx.accounts.system_program,
    )?;
    ctx.accounts.vault.leave();

    let position = &ctx.accounts.position;
    emit!(Withdrawn {
        vault: position.vault,
        owner: position.owner,
        position_id: position.id,
        tier: position.tier.index() as u8,
        shares: position.shares_amount,
        nav: settlement.nav,
        payout: settlement.payout,
    });

    msg!(
        "Withdrew position {}: {} shares at NAV {}",
        position.id,
        position.shares_amount,
        settlement.nav
    );
    msg!("Payout: {} (principal {})", settlement.payout, settlement.principal);

    Ok(())
}
