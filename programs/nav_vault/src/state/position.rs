use anchor_lang::prelude::*;

use crate::state::Tier;

/// A locked deposit. Created by `deposit`, never mutated, closed by
/// exactly one of `withdraw` or `early_withdraw`.
#[account]
#[derive(Debug, PartialEq)]
pub struct Position {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub id: u64,

    pub shares_amount: u64,
    pub start_timestamp: i64,
    /// Tier slot boundary strictly after `start_timestamp`.
    pub unlock_timestamp: i64,
    pub tier: Tier,
    /// Tier NAV at deposit time, after realizing any due unlock.
    pub entry_nav: u128,

    pub bump: u8,
}

impl Position {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 1 + 16 + 1;

    pub fn is_unlockable(&self, now: i64) -> bool {
        now >= self.unlock_timestamp
    }

    pub fn time_until_unlock(&self, now: i64) -> u64 {
        self.unlock_timestamp.saturating_sub(now).max(0) as u64
    }
}

/// Read-only copy of a position returned by the `get_position` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct PositionInfo {
    pub id: u64,
    pub owner: Pubkey,
    pub shares_amount: u64,
    pub start_timestamp: i64,
    pub unlock_timestamp: i64,
    pub tier: Tier,
    pub entry_nav: u128,
}

impl From<&Position> for PositionInfo {
    fn from(position: &Position) -> Self {
        Self {
            id: position.id,
            owner: position.owner,
            shares_amount: position.shares_amount,
            start_timestamp: position.start_timestamp,
            unlock_timestamp: position.unlock_timestamp,
            tier: position.tier,
            entry_nav: position.entry_nav,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::new_position;

    #[test]
    fn unlock_countdown_saturates_at_zero() {
        let position = new_position(Tier::OneWeek, 100, 1_000, 5_000);
        assert_eq!(position.time_until_unlock(1_000), 4_000);
        assert!(!position.is_unlockable(4_999));
        assert!(position.is_unlockable(5_000));
        assert_eq!(position.time_until_unlock(9_000), 0);
    }
}
