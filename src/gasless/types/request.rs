//! Request bodies and query parameters for the relay's gasless endpoints.

use alloy::dyn_abi::TypedData;
use bon::Builder;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::codec::NormalizedSignature;
use crate::types::{Address, B256, ChainId, U256};

/// Query parameters shared by `/gasless/price` and `/gasless/quote`.
///
/// The chain id is appended by the client from its configuration, never by
/// the caller.
#[serde_as]
#[derive(Builder, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub sell_token: Address,
    pub buy_token: Address,
    /// Sell amount in the token's base units.
    #[serde_as(as = "DisplayFromStr")]
    pub sell_amount: U256,
    /// Account the settlement executes for; the smart account, not the
    /// owning key.
    pub taker: Address,
    /// Tolerated slippage in basis points; the relay default applies when
    /// omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage_bps: Option<u16>,
}

/// `POST /gasless/submit` body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub chain_id: ChainId,
    /// Signed permit; omitted entirely when approval went on-chain or was
    /// not needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval: Option<SignedPayload>,
    pub trade: SignedPayload,
}

/// A relay payload together with its normalized signature, echoing the
/// quote's `type`, `hash`, and `eip712` verbatim.
#[derive(Clone, Debug, Serialize)]
pub struct SignedPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub hash: B256,
    pub eip712: TypedData,
    pub signature: NormalizedSignature,
}
