//! Wire types for the gasless relay API.

pub mod request;
pub mod response;

pub use request::{QuoteRequest, SignedPayload, SubmitRequest};
pub use response::{
    AllowanceIssue, BalanceIssue, Issues, KnownStatus, PriceEstimate, Quote, SettlementTx,
    SignPayload, StatusSnapshot, SubmissionRecord, TradeStatus,
};
