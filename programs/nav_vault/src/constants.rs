//! Program constants for the NAV vault.
//!
//! Seeds, fixed-point scales and the default tier table used when a vault
//! is initialized.

/// Seed for deriving the vault PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for deriving the staking token vault PDA
pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";

/// Seed for deriving per-tier pool PDAs
pub const TIER_POOL_SEED: &[u8] = b"tier_pool";

/// Seed for deriving position PDAs
pub const POSITION_SEED: &[u8] = b"position";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Fixed-point scale for NAV values and pending NAV deltas (10^18 = 1.0)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Boost factor scale in basis points (10_000 = 1.0x)
pub const BOOST_BASE: u64 = 10_000;

/// Penalty percentages are expressed out of 100
pub const PERCENT_DENOMINATOR: u128 = 100;

/// Number of lock tiers
pub const TIER_COUNT: usize = 4;

/// Default tier table, indexed by `Tier::index()`.
pub mod defaults {
    use super::SECONDS_PER_DAY;

    /// Slot sizes (lock durations): 7, 30, 90 and 365 days
    pub const SLOT_SIZES: [i64; 4] = [
        7 * SECONDS_PER_DAY,
        30 * SECONDS_PER_DAY,
        90 * SECONDS_PER_DAY,
        365 * SECONDS_PER_DAY,
    ];

    /// Boost factors in basis points: 1.00x, 1.25x, 1.50x, 2.00x
    pub const BOOST_FACTORS: [u64; 4] = [10_000, 12_500, 15_000, 20_000];

    /// Early-exit penalty on profit, in percent
    pub const PENALTY_PERCENTS: [u8; 4] = [50, 40, 30, 20];

    /// Locked-profit unlock durations: 1, 3, 7 and 14 days
    pub const UNLOCK_DURATIONS: [i64; 4] = [
        SECONDS_PER_DAY,
        3 * SECONDS_PER_DAY,
        7 * SECONDS_PER_DAY,
        14 * SECONDS_PER_DAY,
    ];
}

/// Initial space reserved for a tier pool's slot bookkeeping, in map entries.
pub const INITIAL_SLOT_ENTRIES: usize = 16;
