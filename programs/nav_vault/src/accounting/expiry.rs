//! Expiry slot tracking.
//!
//! Shares are bucketed by the slot at which their lock matures. A running
//! cumulative total of matured shares is realized lazily, slot by slot, so
//! active shares for any slot are `total_shares - cumulative_at(slot)`
//! without iterating positions.
//!
//! Only the cumulative snapshot of the last realized slot is kept, and
//! emptied buckets are dropped, so the share bookkeeping stays proportional
//! to the number of distinct open maturities.
//!
//! Realization walks every slot elapsed since the last realized slot. After
//! a long idle period that walk (and the NAV checkpoints it records) is
//! proportional to the idle time; nothing caps it.

use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::state::TierPool;

/// Start of the slot containing `t`.
pub fn floor_to_slot(slot_size: i64, t: i64) -> i64 {
    t.div_euclid(slot_size) * slot_size
}

/// First slot boundary strictly after `t`, even when `t` is itself a boundary.
pub fn ceil_to_slot(slot_size: i64, t: i64) -> Result<i64> {
    Ok(floor_to_slot(slot_size, t)
        .checked_add(slot_size)
        .ok_or(VaultError::MathOverflow)?)
}

impl TierPool {
    /// Brings the cumulative expired-share counter up to `target_slot`,
    /// snapshotting it and checkpointing NAV at every slot visited.
    pub fn realize_expired_shares_up_to(&mut self, slot_size: i64, target_slot: i64) -> Result<()> {
        let last = self.last_expired_slot_updated;
        if target_slot <= last {
            if target_slot == last {
                self.snapshot_cumulative(last, self.cumulative_expired_shares);
            }
            return Ok(());
        }

        let mut cumulative = self.cumulative_expired_shares;
        let mut slot = last;
        while slot < target_slot {
            slot = slot.checked_add(slot_size).ok_or(VaultError::MathOverflow)?;
            let expired = self.expired_shares_at_slot.get(&slot).copied().unwrap_or(0);
            cumulative = cumulative
                .checked_add(expired)
                .ok_or(VaultError::MathOverflow)?;
            self.record_nav_checkpoint(slot, self.effective_nav);
        }

        self.snapshot_cumulative(slot, cumulative);
        self.cumulative_expired_shares = cumulative;
        self.last_expired_slot_updated = slot;
        Ok(())
    }

    /// Replaces the cumulative snapshots with the single one at `slot`.
    fn snapshot_cumulative(&mut self, slot: i64, cumulative: u64) {
        self.cumulative_expired_shares_at_slot.clear();
        self.cumulative_expired_shares_at_slot.insert(slot, cumulative);
    }

    /// Shares in buckets strictly after `from` and up to `to`.
    fn bucketed_between(&self, from: i64, to: i64) -> Result<u64> {
        if from >= to {
            return Ok(0);
        }
        Ok(self
            .expired_shares_at_slot
            .range(from.saturating_add(1)..=to)
            .try_fold(0u64, |acc, (_, shares)| acc.checked_add(*shares))
            .ok_or(VaultError::MathOverflow)?)
    }

    /// Active (not yet matured) shares at `slot`, realizing up to it first.
    pub fn active_shares_for_slot(&mut self, slot_size: i64, slot: i64) -> Result<u64> {
        self.realize_expired_shares_up_to(slot_size, slot)?;
        self.peek_active_shares(slot)
    }

    /// Same result as [`Self::active_shares_for_slot`] without persisting the walk.
    pub fn peek_active_shares(&self, slot: i64) -> Result<u64> {
        let last = self.last_expired_slot_updated;
        let cumulative = self.cumulative_expired_shares;
        let expired = if slot < last {
            cumulative
                .checked_sub(self.bucketed_between(slot, last)?)
                .ok_or(VaultError::MathOverflow)?
        } else if slot == last {
            self.cumulative_expired_shares_at_slot
                .get(&last)
                .copied()
                .unwrap_or(cumulative)
        } else {
            cumulative
                .checked_add(self.bucketed_between(last, slot)?)
                .ok_or(VaultError::MathOverflow)?
        };
        Ok(self.total_shares.saturating_sub(expired))
    }

    /// Registers shares that mature at `unlock_slot`.
    pub fn register_expiry(&mut self, unlock_slot: i64, shares: u64) -> Result<()> {
        let bucket = self.expired_shares_at_slot.entry(unlock_slot).or_insert(0);
        *bucket = bucket.checked_add(shares).ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Removes a closed position's shares from its maturity bucket.
    ///
    /// If the bucket was already realized, the cumulative counter is reduced
    /// to match and realization rewinds to `unlock_slot`; later slots are
    /// re-walked on the next realization.
    pub fn retire_expiry(&mut self, unlock_slot: i64, shares: u64) -> Result<()> {
        let in_bucket = self
            .expired_shares_at_slot
            .get(&unlock_slot)
            .copied()
            .unwrap_or(0);
        let retired = in_bucket.min(shares);
        if retired == 0 {
            return Ok(());
        }
        if in_bucket == retired {
            self.expired_shares_at_slot.remove(&unlock_slot);
        } else {
            self.expired_shares_at_slot
                .insert(unlock_slot, in_bucket - retired);
        }

        let last = self.last_expired_slot_updated;
        if unlock_slot > last {
            return Ok(());
        }

        let cumulative = self
            .cumulative_expired_shares
            .checked_sub(retired)
            .ok_or(VaultError::MathOverflow)?;
        let at_slot = cumulative
            .checked_sub(self.bucketed_between(unlock_slot, last)?)
            .ok_or(VaultError::MathOverflow)?;

        self.snapshot_cumulative(unlock_slot, at_slot);
        self.cumulative_expired_shares = at_slot;
        self.last_expired_slot_updated = unlock_slot;
        Ok(())
    }

    /// Records `nav` at `slot`, never lowering an existing checkpoint.
    pub fn record_nav_checkpoint(&mut self, slot: i64, nav: u128) {
        let checkpoint = self.nav_checkpoints.entry(slot).or_insert(nav);
        *checkpoint = (*checkpoint).max(nav);
    }

    /// Latest NAV checkpoint at or before the slot containing `t`.
    pub fn nav_checkpoint_at(&self, slot_size: i64, t: i64) -> Option<(i64, u128)> {
        self.nav_checkpoints
            .range(..=floor_to_slot(slot_size, t))
            .next_back()
            .map(|(slot, nav)| (*slot, *nav))
    }
}
