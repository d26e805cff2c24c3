//! Helpers shared by instruction handlers.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_lang::AccountsExit;

use crate::state::{TierPool, Vault};

/// Enters the vault's reentrancy guard and persists the flag immediately,
/// so a nested invocation during a token CPI sees it.
pub fn lock_vault(vault: &mut Account<'_, Vault>, program_id: &Pubkey) -> Result<()> {
    vault.enter()?;
    vault.exit(program_id)
}

/// Grows a tier pool account to fit its slot bookkeeping, funding rent from `payer`.
///
/// Must run after the pool was mutated and before the instruction returns.
/// A single instruction can grow an account by at most 10 KiB.
pub fn resize_to_fit<'info>(
    pool: &Account<'info, TierPool>,
    payer: &Signer<'info>,
    system_program: &Program<'info, System>,
) -> Result<()> {
    let info = pool.to_account_info();
    let required = pool.space();
    if info.data_len() >= required {
        return Ok(());
    }

    let rent_due = Rent::get()?
        .minimum_balance(required)
        .saturating_sub(info.lamports());
    if rent_due > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                system_program::Transfer {
                    from: payer.to_account_info(),
                    to: info.clone(),
                },
            ),
            rent_due,
        )?;
    }
    info.realloc(required, false)?;

    msg!("Tier pool {:?} resized to {} bytes", pool.tier, required);
    Ok(())
}
