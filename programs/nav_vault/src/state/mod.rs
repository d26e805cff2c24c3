//! State structures for the NAV vault program.
//!
//! This module defines all account structures used to store program state.

pub mod position;
pub mod tier;
pub mod tier_pool;
pub mod vault;

pub use position::*;
pub use tier::*;
pub use tier_pool::*;
pub use vault::*;
