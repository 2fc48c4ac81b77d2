//! Shared primitive aliases used throughout the crate.

pub use alloy::primitives::{Address, B256, Bytes, ChainId, U256};
pub use rust_decimal::Decimal;
