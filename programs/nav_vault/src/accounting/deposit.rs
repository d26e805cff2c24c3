//! Opening positions.

use anchor_lang::prelude::*;

use crate::accounting::expiry::ceil_to_slot;
use crate::accounting::{mul_div, to_u64};
use crate::constants::PRECISION;
use crate::error::VaultError;
use crate::state::{TierPool, Vault};

/// Terms of a newly opened position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenedPosition {
    pub id: u64,
    pub shares: u64,
    pub entry_nav: u128,
    pub start_timestamp: i64,
    pub unlock_timestamp: i64,
}

/// Prices `amount` into shares of `pool`'s tier and registers their expiry.
///
/// The entry NAV is taken after folding in everything vested by `now`, and
/// excludes whatever is still pending.
pub fn open_position(
    vault: &mut Vault,
    pool: &mut TierPool,
    amount: u64,
    now: i64,
) -> Result<OpenedPosition> {
    require!(amount > 0, VaultError::ZeroAmount);
    let config = *vault.tier_config(pool.tier);

    let unlock_timestamp = ceil_to_slot(config.slot_size, now)?;

    pool.update_effective_nav(config.unlock_duration, now)?;
    let entry_nav = pool.effective_nav_at(config.unlock_duration, now)?;

    let shares = to_u64(mul_div(amount as u128, PRECISION, entry_nav)?)?;
    require!(shares > 0, VaultError::ZeroShares);

    let dust = pool.add_shares(shares)?;
    vault.add_dust(dust)?;
    pool.register_expiry(unlock_timestamp, shares)?;

    let id = vault.allocate_position_id()?;

    Ok(OpenedPosition {
        id,
        shares,
        entry_nav,
        start_timestamp: now,
        unlock_timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Tier;
    use crate::test_utils::{assert_vault_error, new_pool, new_vault};

    const DAY: i64 = crate::constants::SECONDS_PER_DAY;

    #[test]
    fn first_deposit_prices_at_one() {
        let mut vault = new_vault();
        let mut pool = new_pool(Tier::OneWeek, 0);
        let now = 3 * DAY;

        let opened = open_position(&mut vault, &mut pool, 100, now).unwrap();

        assert_eq!(opened.entry_nav, PRECISION);
        assert_eq!(opened.shares, 100);
        assert_eq!(opened.unlock_timestamp, 7 * DAY);
        assert_eq!(opened.start_timestamp, now);
        assert_eq!(opened.id, 0);
        assert_eq!(pool.total_shares, 100);
        assert_eq!(pool.expired_shares_at_slot.get(&(7 * DAY)), Some(&100));
        assert_eq!(vault.next_position_id, 1);
    }

    #[test]
    fn deposit_on_slot_boundary_locks_for_a_full_slot() {
        let mut vault = new_vault();
        let mut pool = new_pool(Tier::OneWeek, 0);
        let opened = open_position(&mut vault, &mut pool, 100, 7 * DAY).unwrap();
        assert_eq!(opened.unlock_timestamp, 14 * DAY);
    }

    #[test]
    fn zero_amount_is_rejected_without_mutation() {
        let mut vault = new_vault();
        let mut pool = new_pool(Tier::OneWeek, 0);
        let (vault_before, pool_before) = (vault.clone(), pool.clone());

        assert_vault_error(
            open_position(&mut vault, &mut pool, 0, DAY),
            VaultError::ZeroAmount,
        );
        assert_eq!(vault, vault_before);
        assert_eq!(pool, pool_before);
    }

    #[test]
    fn entry_nav_excludes_unvested_delta() {
        let mut vault = new_vault();
        let mut pool = new_pool(Tier::OneWeek, 0);
        let unlock = vault.tier_config(Tier::OneWeek).unlock_duration;
        pool.total_shares = 1_000;
        pool.pending_nav_delta = PRECISION;

        let opened = open_position(&mut vault, &mut pool, 1_000, unlock / 2).unwrap();

        // Half vested and folded, the other half stays pending.
        assert_eq!(opened.entry_nav, PRECISION + PRECISION / 2);
        assert_eq!(pool.effective_nav, opened.entry_nav);
        assert_eq!(opened.shares, 666);
        // 500 units still locked, now spread over 1_666 shares.
        assert_eq!(pool.pending_nav_delta, 500 * PRECISION / 1_666);
    }

    #[test]
    fn deposit_too_small_for_a_share_is_rejected() {
        let mut vault = new_vault();
        let mut pool = new_pool(Tier::OneWeek, 0);
        pool.total_shares = 10;
        pool.effective_nav = 3 * PRECISION;
        assert_vault_error(
            open_position(&mut vault, &mut pool, 2, DAY),
            VaultError::ZeroShares,
        );
    }
}
