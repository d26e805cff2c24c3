use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::VaultError;

/// Lock-duration category. Each tier has its own share pool and NAV.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    OneWeek,
    OneMonth,
    ThreeMonths,
    TwelveMonths,
}

impl Tier {
    pub const ALL: [Tier; TIER_COUNT] = [
        Tier::OneWeek,
        Tier::OneMonth,
        Tier::ThreeMonths,
        Tier::TwelveMonths,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-byte seed component for the tier's pool PDA.
    pub fn seed(self) -> [u8; 1] {
        [self as u8]
    }
}

impl TryFrom<u8> for Tier {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        Tier::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| error!(VaultError::InvalidTier))
    }
}

/// Static per-tier parameters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierConfig {
    /// Slot size in seconds; unlock timestamps are aligned to it.
    pub slot_size: i64,
    /// Reward weight in basis points (10_000 = 1.0x).
    pub boost_factor: u64,
    /// Share of early-exit profit forfeited, 0-100.
    pub penalty_percent: u8,
    /// Seconds over which a distributed NAV delta vests.
    pub unlock_duration: i64,
}

impl TierConfig {
    pub const LEN: usize = 8 + 8 + 1 + 8;

    pub fn default_for(tier: Tier) -> Self {
        let i = tier.index();
        Self {
            slot_size: defaults::SLOT_SIZES[i],
            boost_factor: defaults::BOOST_FACTORS[i],
            penalty_percent: defaults::PENALTY_PERCENTS[i],
            unlock_duration: defaults::UNLOCK_DURATIONS[i],
        }
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.slot_size > 0, VaultError::InvalidTierConfig);
        require!(self.unlock_duration >= 0, VaultError::InvalidTierConfig);
        require!(
            self.penalty_percent as u128 <= PERCENT_DENOMINATOR,
            VaultError::InvalidTierConfig
        );
        require!(self.boost_factor >= BOOST_BASE, VaultError::InvalidBoostFactor);
        Ok(())
    }
}

/// Fixed-size configuration table indexed by tier.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierRegistry {
    pub configs: [TierConfig; TIER_COUNT],
}

impl Default for TierRegistry {
    fn default() -> Self {
        Self {
            configs: Tier::ALL.map(TierConfig::default_for),
        }
    }
}

impl TierRegistry {
    pub const LEN: usize = TierConfig::LEN * TIER_COUNT;

    pub fn get(&self, tier: Tier) -> &TierConfig {
        &self.configs[tier.index()]
    }

    /// Updates a tier's boost factor. Only future distributions see it.
    pub fn set_boost_factor(&mut self, tier: Tier, boost_factor: u64) -> Result<u64> {
        require!(boost_factor >= BOOST_BASE, VaultError::InvalidBoostFactor);
        let config = &mut self.configs[tier.index()];
        let previous = config.boost_factor;
        config.boost_factor = boost_factor;
        Ok(previous)
    }

    pub fn validate(&self) -> Result<()> {
        self.configs.iter().try_for_each(TierConfig::validate)
    }
}
