//! Instruction handlers for the NAV vault program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod common;
pub mod deposit;
pub mod distribute_rewards;
pub mod early_withdraw;
pub mod initialize;
pub mod views;
pub mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use distribute_rewards::*;
pub use initialize::*;
pub use views::*;
pub use withdraw::*;
