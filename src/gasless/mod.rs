//! Client surface for the gasless relay API.
//!
//! Four request/response operations, no local state:
//! - `price`: indicative pricing, nothing to sign
//! - `quote`: firm pricing plus the approval/trade payloads to sign
//! - `submit`: signed payloads in, polling key out
//! - `status`: settlement progress for a submitted trade

mod client;
mod config;
pub mod types;

pub use client::RelayClient;
pub use config::RelayConfig;
