/// Admin instruction handlers.
///
/// Handles authority-only configuration of the vault.
///
/// ## Security Guarantees
/// - All admin functions require signer == vault.authority
/// - PDA validation ensures correct vault
/// - Parameter bounds checking

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::VaultError;
use crate::events::{AuthorityTransferred, BoostFactorPerTierUpdated, RewardSourceUpdated};
use crate::state::{Tier, Vault};

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority must match vault.authority (has_one constraint)
/// - Vault PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    /// SECURITY: Must be signer AND match vault.authority.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The vault to modify.
    /// SECURITY: PDA validation + has_one authority.
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.staking_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized
    )]
    pub vault: Account<'info, Vault>,
}

/// Point the vault at the custodian account rewards are pulled from.
///
/// The custodian must separately approve the vault PDA as delegate for
/// `distribute_rewards` to succeed.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `reward_source` - Token account holding rewards
pub fn set_reward_source_handler(ctx: Context<AdminControl>, reward_source: Pubkey) -> Result<()> {
    require!(reward_source != Pubkey::default(), VaultError::ZeroAddress);

    let vault = &mut ctx.accounts.vault;
    let previous = vault.reward_source;
    vault.reward_source = reward_source;
    vault.last_updated = Clock::get()?.unix_timestamp;

    emit!(RewardSourceUpdated {
        vault: vault.key(),
        previous,
        reward_source,
    });

    msg!("Reward source updated: {} -> {}", previous, reward_source);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Change the reward weight of one tier.
///
/// # Security
/// - Only vault.authority can call this
/// - Boost may not fall below 1.0x (BOOST_BASE)
/// - Only affects distributions made after the change
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `tier` - Tier index
/// * `boost_factor` - New boost in basis points
pub fn set_boost_factor_per_tier_handler(
    ctx: Context<AdminControl>,
    tier: u8,
    boost_factor: u64,
) -> Result<()> {
    let tier = Tier::try_from(tier)?;

    let vault = &mut ctx.accounts.vault;
    let previous = vault.tiers.set_boost_factor(tier, boost_factor)?;
    vault.last_updated = Clock::get()?.unix_timestamp;

    emit!(BoostFactorPerTierUpdated {
        vault: vault.key(),
        tier: tier.index() as u8,
        previous,
        boost_factor,
    });

    msg!(
        "{:?} boost updated: {}bp -> {}bp",
        tier,
        previous,
        boost_factor
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Transfer admin authority to a new address.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_authority` - New admin pubkey
pub fn transfer_authority_handler(
    ctx: Context<AdminControl>,
    new_authority: Pubkey,
) -> Result<()> {
    require!(new_authority != Pubkey::default(), VaultError::ZeroAddress);

    let vault = &mut ctx.accounts.vault;
    let previous = vault.authority;
    vault.authority = new_authority;
    vault.last_updated = Clock::get()?.unix_timestamp;

    emit!(AuthorityTransferred {
        vault: vault.key(),
        previous,
        authority: new_authority,
    });

    msg!("Authority transferred: {} -> {}", previous, new_authority);

    Ok(())
}
