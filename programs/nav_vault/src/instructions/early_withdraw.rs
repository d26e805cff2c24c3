//! Early withdraw instruction handler.

use anchor_lang::prelude::*;

use crate::accounting::withdrawal::settle_early;
use crate::events::EarlyWithdraw;
use crate::instructions::common::{lock_vault, resize_to_fit};
use crate::instructions::withdraw::ClosePosition;

/// Exit a position before it unlocks.
///
/// A tier-specific share of the profit over the entry NAV is forfeited to
/// reward dust; principal is never penalized.
///
/// # Errors
/// `EarlyWithdrawUnavailable` once the position has unlocked.
pub fn handler(ctx: Context<ClosePosition>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    lock_vault(&mut ctx.accounts.vault, ctx.program_id)?;

    let settlement = settle_early(
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
    emit!(EarlyWithdraw {
        vault: position.vault,
        owner: position.owner,
        position_id: position.id,
        tier: position.tier.index() as u8,
        shares: position.shares_amount,
        nav: settlement.nav,
        principal: settlement.principal,
        penalty: settlement.penalty,
        payout: settlement.payout,
    });

    msg!(
        "Early exit of position {} ({:?}), {}s before unlock",
        position.id,
        position.tier,
        position.time_until_unlock(now)
    );
    msg!(
        "Value {} - penalty {} = payout {}",
        settlement.current_value,
        settlement.penalty,
        settlement.payout
    );

    Ok(())
}
