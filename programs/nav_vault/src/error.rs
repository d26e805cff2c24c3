//! Error types for the NAV vault program.
//!
//! Every failure is a distinct code so callers can tell a retryable
//! precondition from a bad input.
//!
//! ## Error Code Groups
//! `#[error_code]` numbers variants in declaration order from 6000.
//! - 6000-6005: Input validation errors
//! - 6006-6010: Position / ownership errors
//! - 6011-6012: Time/lock errors
//! - 6013-6015: Distribution errors
//! - 6016-6018: Math/overflow errors
//! - 6019-6021: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the NAV vault program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum VaultError {
    // ========== Input Validation Errors (6000-6005) ==========

    /// [6000] Cannot deposit or distribute a zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6001] The zero address is not a valid reward source or authority.
    #[msg("Address must not be the zero address")]
    ZeroAddress,

    /// [6002] The specified tier is not valid.
    #[msg("Invalid tier specified (must be 0=OneWeek, 1=OneMonth, 2=ThreeMonths, 3=TwelveMonths)")]
    InvalidTier,

    /// [6003] Boost factors must be at least 1.0x.
    #[msg("Boost factor must be at least 10000 basis points (1.0x)")]
    InvalidBoostFactor,

    /// [6004] The deposit is too small to mint a single share at the current NAV.
    #[msg("Deposit would mint zero shares")]
    ZeroShares,

    /// [6005] Tier configuration is unusable (zero slot size or out-of-range penalty).
    #[msg("Invalid tier configuration")]
    InvalidTierConfig,

    // ========== Position / Ownership Errors (6006-6010) ==========

    /// [6006] The position does not exist or was already closed.
    #[msg("Position not found")]
    PositionNotFound,

    /// [6007] The position belongs to another vault.
    #[msg("Position does not belong to this vault")]
    PositionVaultMismatch,

    /// [6008] The same position was supplied more than once.
    #[msg("Position supplied more than once")]
    DuplicatePosition,

    /// [6009] Caller is not authorized for this position or admin action.
    #[msg("Unauthorized")]
    Unauthorized,

    /// [6010] A vault operation was re-entered while already executing.
    #[msg("Reentrant call rejected")]
    Reentrancy,

    // ========== Time/Lock Errors (6011-6012) ==========

    /// [6011] The position's unlock timestamp has not been reached.
    #[msg("Unlock timestamp not reached - use early withdraw or wait")]
    UnlockNotReached,

    /// [6012] The position is already unlocked; use a regular withdraw.
    #[msg("Early withdraw unavailable - position is already unlocked")]
    EarlyWithdrawUnavailable,

    // ========== Distribution Errors (6013-6015) ==========

    /// [6013] No tier has active boosted shares to receive rewards.
    #[msg("No active shares to distribute rewards to")]
    NoActiveShares,

    /// [6014] Reward source has not been configured.
    #[msg("Reward source not set")]
    RewardSourceNotSet,

    /// [6015] The supplied reward account is not the configured reward source.
    #[msg("Reward source account mismatch")]
    RewardSourceMismatch,

    // ========== Math/Overflow Errors (6016-6018) ==========

    /// [6016] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6017] Division by zero attempted.
    #[msg("Division by zero attempted")]
    DivisionByZero,

    /// [6018] Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,

    // ========== Account Validation Errors (6019-6021) ==========

    /// [6019] The provided mint does not match the vault's staking token.
    #[msg("Token mint mismatch - wrong token for this vault")]
    MintMismatch,

    /// [6020] The provided token vault does not match the vault's staking vault.
    #[msg("Staking vault address mismatch")]
    VaultMismatch,

    /// [6021] The tier pool does not belong to this vault or tier.
    #[msg("Tier pool does not match vault or tier")]
    TierPoolMismatch,
}
