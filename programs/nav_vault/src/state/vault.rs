use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::state::{Tier, TierConfig, TierRegistry};

#[account]
#[derive(Debug, PartialEq)]
pub struct Vault {
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_vault: Pubkey,
    /// Custodian token account rewards are pulled from; default means unset.
    pub reward_source: Pubkey,

    pub tiers: TierRegistry,

    /// Rounding remainders and forfeited penalties, folded into the next distribution.
    pub reward_dust: u64,
    pub next_position_id: u64,

    /// Set while a state-changing instruction is executing.
    pub entered: bool,

    pub last_updated: i64,
    pub created_at: i64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl Vault {
    pub const LEN: usize = 8
        + (32 * 4)
        + TierRegistry::LEN
        + (8 * 2)
        + 1
        + (8 * 2)
        + 2;

    pub fn tier_config(&self, tier: Tier) -> &TierConfig {
        self.tiers.get(tier)
    }

    pub fn reward_source_set(&self) -> bool {
        self.reward_source != Pubkey::default()
    }

    /// Marks the vault as executing. Fails if it already is.
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.entered, VaultError::Reentrancy);
        self.entered = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.entered = false;
    }

    pub fn add_dust(&mut self, amount: u64) -> Result<()> {
        self.reward_dust = self
            .reward_dust
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    pub fn allocate_position_id(&mut self) -> Result<u64> {
        let id = self.next_position_id;
        self.next_position_id = id.checked_add(1).ok_or(VaultError::MathOverflow)?;
        Ok(id)
    }
}
