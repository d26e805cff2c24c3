//! Tiered NAV accounting engine.
//!
//! Everything here operates on account structs with the clock passed in,
//! so the instruction handlers stay thin and the math is testable off-chain.
//!
//! - [`nav`]: linear locked-profit unlocking per tier
//! - [`expiry`]: slot bucketing of matured shares
//! - [`rescale`]: keeping the absolute locked reward intact across share changes
//! - [`distribution`]: boosted reward split across tiers
//! - [`deposit`] / [`withdrawal`]: position lifecycle
//! - [`power`]: aggregate redeemable value of an owner's positions

pub mod deposit;
pub mod distribution;
pub mod expiry;
pub mod nav;
pub mod power;
pub mod rescale;
pub mod withdrawal;

#[cfg(test)]
mod properties;

use anchor_lang::prelude::*;

use crate::error::VaultError;

/// `floor(a * b / denominator)` in u128 with overflow checks.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator != 0, VaultError::DivisionByZero);
    let product = a.checked_mul(b).ok_or(VaultError::MathOverflow)?;
    Ok(product / denominator)
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(VaultError::ConversionOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_vault_error;

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div(10, 3, 4).unwrap(), 7);
        assert_vault_error(mul_div(1, 1, 0), VaultError::DivisionByZero);
        assert_vault_error(mul_div(u128::MAX, 2, 1), VaultError::MathOverflow);
        assert_vault_error(to_u64(u64::MAX as u128 + 1), VaultError::ConversionOverflow);
    }
}
