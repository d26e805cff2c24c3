//! Share-count rescaling of the pending NAV delta.
//!
//! `pending_nav_delta` is stored per share. When `total_shares` changes the
//! delta is re-expressed over the new share count so the absolute locked
//! reward stays the same; rounding loss goes to reward dust.

use anchor_lang::prelude::*;

use crate::accounting::{mul_div, to_u64};
use crate::constants::PRECISION;
use crate::error::VaultError;
use crate::state::TierPool;

impl TierPool {
    /// Rescales the pending delta from `previous_total` to `new_total` shares.
    /// Returns the reward amount that became dust.
    pub fn rescale_pending(&mut self, previous_total: u64, new_total: u64) -> Result<u64> {
        if self.pending_nav_delta == 0 {
            return Ok(0);
        }
        if previous_total == 0 {
            // No shares could have been credited with the delta.
            if new_total == 0 {
                self.pending_nav_delta = 0;
            }
            return Ok(0);
        }

        let locked_before = mul_div(self.pending_nav_delta, previous_total as u128, PRECISION)?;

        if new_total == 0 {
            self.pending_nav_delta = 0;
            return to_u64(locked_before);
        }

        let rescaled = mul_div(locked_before, PRECISION, new_total as u128)?;
        let locked_after = mul_div(rescaled, new_total as u128, PRECISION)?;
        let dust = locked_before
            .checked_sub(locked_after)
            .ok_or(VaultError::MathOverflow)?;

        self.pending_nav_delta = rescaled;
        to_u64(dust)
    }

    /// Adds shares to the tier, rescaling the pending delta first.
    pub fn add_shares(&mut self, shares: u64) -> Result<u64> {
        let previous = self.total_shares;
        let next = previous.checked_add(shares).ok_or(VaultError::MathOverflow)?;
        let dust = self.rescale_pending(previous, next)?;
        self.total_shares = next;
        Ok(dust)
    }

    /// Removes shares from the tier, rescaling the pending delta first.
    pub fn remove_shares(&mut self, shares: u64) -> Result<u64> {
        let previous = self.total_shares;
        let next = previous.checked_sub(shares).ok_or(VaultError::MathOverflow)?;
        let dust = self.rescale_pending(previous, next)?;
        self.total_shares = next;
        Ok(dust)
    }
}
