//! End-to-end swap execution on top of the relay client.
//!
//! One [`SwapOrchestrator::run`] call walks the whole pipeline:
//! - convert human amounts and fetch a firm quote
//! - resolve how the sale gets approved (permit, on-chain, or nothing)
//! - route each payload to its signer and submit
//! - poll settlement until confirmed or the budget runs out

mod approval;
mod orchestrator;
mod params;
mod policy;
mod signing;

pub use approval::ApprovalAction;
pub use orchestrator::{SwapOrchestrator, SwapOutcome};
pub use params::{DEFAULT_SLIPPAGE_BPS, SwapParams};
pub use policy::{DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, PollPolicy};
pub use signing::SigningCoordinator;
