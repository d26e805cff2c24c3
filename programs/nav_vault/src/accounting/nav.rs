//! Linear locked-profit unlocking.
//!
//! A distribution never moves `effective_nav` directly. It adds to
//! `pending_nav_delta`, which vests linearly over the tier's unlock duration
//! and is folded into `effective_nav` by [`TierPool::update_effective_nav`].
//! Every state-changing operation on a tier calls that first, so entry and
//! exit prices never include value that has not vested yet.

use anchor_lang::prelude::*;

use crate::accounting::mul_div;
use crate::error::VaultError;
use crate::state::TierPool;

impl TierPool {
    /// Portion of the pending delta vested between `last_report` and `now`.
    pub fn unlocked_delta(&self, unlock_duration: i64, now: i64) -> Result<u128> {
        if self.pending_nav_delta == 0 || now <= self.last_report {
            return Ok(0);
        }
        let elapsed = now
            .checked_sub(self.last_report)
            .ok_or(VaultError::MathOverflow)?;
        if elapsed >= unlock_duration {
            return Ok(self.pending_nav_delta);
        }
        mul_div(
            self.pending_nav_delta,
            elapsed as u128,
            unlock_duration as u128,
        )
    }

    /// Realized NAV plus whatever has vested by `now`. Does not persist anything.
    pub fn effective_nav_at(&self, unlock_duration: i64, now: i64) -> Result<u128> {
        let unlocked = self.unlocked_delta(unlock_duration, now)?;
        Ok(self
            .effective_nav
            .checked_add(unlocked)
            .ok_or(VaultError::MathOverflow)?)
    }

    /// Folds the vested part of the pending delta into `effective_nav`.
    ///
    /// `last_report` moves to `now` even on a partial fold, so the remainder
    /// vests over a full `unlock_duration` measured from here. Returns the
    /// amount folded in.
    pub fn update_effective_nav(&mut self, unlock_duration: i64, now: i64) -> Result<u128> {
        if now <= self.last_report {
            return Ok(0);
        }
        if self.pending_nav_delta == 0 {
            self.last_report = now;
            return Ok(0);
        }

        let unlocked = self.unlocked_delta(unlock_duration, now)?;
        self.effective_nav = self
            .effective_nav
            .checked_add(unlocked)
            .ok_or(VaultError::MathOverflow)?;
        self.pending_nav_delta = self
            .pending_nav_delta
            .checked_sub(unlocked)
            .ok_or(VaultError::MathOverflow)?;
        self.last_report = now;

        Ok(unlocked)
    }

    /// Adds a freshly distributed per-share delta to the vesting queue.
    pub fn add_pending_delta(&mut self, nav_delta: u128) -> Result<()> {
        self.pending_nav_delta = self
            .pending_nav_delta
            .checked_add(nav_delta)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }
}
