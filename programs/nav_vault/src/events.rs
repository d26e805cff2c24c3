//! Events emitted by the NAV vault program.

use anchor_lang::prelude::*;

use crate::constants::TIER_COUNT;

#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub position_id: u64,
    pub tier: u8,
    pub amount: u64,
    pub shares: u64,
    pub entry_nav: u128,
    pub unlock_timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub position_id: u64,
    pub tier: u8,
    pub shares: u64,
    pub nav: u128,
    pub payout: u64,
}

#[event]
pub struct EarlyWithdraw {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub position_id: u64,
    pub tier: u8,
    pub shares: u64,
    pub nav: u128,
    pub principal: u64,
    pub penalty: u64,
    pub payout: u64,
}

#[event]
pub struct RewardsDistributed {
    pub vault: Pubkey,
    pub amount: u64,
    pub nav_deltas: [u128; TIER_COUNT],
    pub reward_dust: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardSourceUpdated {
    pub vault: Pubkey,
    pub previous: Pubkey,
    pub reward_source: Pubkey,
}

#[event]
pub struct BoostFactorPerTierUpdated {
    pub vault: Pubkey,
    pub tier: u8,
    pub previous: u64,
    pub boost_factor: u64,
}

#[event]
pub struct AuthorityTransferred {
    pub vault: Pubkey,
    pub previous: Pubkey,
    pub authority: Pubkey,
}
