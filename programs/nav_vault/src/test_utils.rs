use std::fmt::Debug;

use anchor_lang::prelude::*;

use crate::accounting::deposit::OpenedPosition;
use crate::constants::{PRECISION, TIER_COUNT};
use crate::error::VaultError;
use crate::state::{Position, Tier, TierConfig, TierPool, TierRegistry, Vault};

pub fn vault_key() -> Pubkey {
    Pubkey::new_from_array([9; 32])
}

pub fn depositor() -> Pubkey {
    Pubkey::new_from_array([7; 32])
}

pub fn new_vault() -> Vault {
    Vault {
        authority: Pubkey::new_from_array([1; 32]),
        staking_mint: Pubkey::new_from_array([2; 32]),
        staking_vault: Pubkey::new_from_array([3; 32]),
        reward_source: Pubkey::new_from_array([4; 32]),
        tiers: TierRegistry::default(),
        reward_dust: 0,
        next_position_id: 0,
        entered: false,
        last_updated: 0,
        created_at: 0,
        vault_bump: 255,
        bump: 254,
    }
}

pub fn new_pool(tier: Tier, now: i64) -> TierPool {
    let slot_size = TierConfig::default_for(tier).slot_size;
    TierPool::new(vault_key(), tier, slot_size, now, 0).unwrap()
}

pub fn new_pools(now: i64) -> [TierPool; TIER_COUNT] {
    Tier::ALL.map(|tier| new_pool(tier, now))
}

pub fn new_position(tier: Tier, shares: u64, start: i64, unlock: i64) -> Position {
    Position {
        vault: vault_key(),
        owner: depositor(),
        id: 0,
        shares_amount: shares,
        start_timestamp: start,
        unlock_timestamp: unlock,
        tier,
        entry_nav: PRECISION,
        bump: 0,
    }
}

pub fn position_from(pool: &TierPool, opened: &OpenedPosition) -> Position {
    Position {
        vault: pool.vault,
        owner: depositor(),
        id: opened.id,
        shares_amount: opened.shares,
        start_timestamp: opened.start_timestamp,
        unlock_timestamp: opened.unlock_timestamp,
        tier: pool.tier,
        entry_nav: opened.entry_nav,
        bump: 0,
    }
}

pub fn assert_vault_error<T: Debug>(result: Result<T>, expected: VaultError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                u32::from(expected),
                "expected {expected:?}, got {}",
                e.error_name
            );
        }
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}
