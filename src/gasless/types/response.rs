//! Response bodies returned by the relay's gasless endpoints.
//!
//! Amount fields arrive as decimal strings and are decoded into [`U256`];
//! typed-data payloads are decoded straight into [`TypedData`] so their
//! signing hash can be recomputed locally.

use std::fmt;

use alloy::dyn_abi::TypedData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use strum_macros::Display;

use crate::Result;
use crate::codec::NormalizedSignature;
use crate::error::Error;
use crate::gasless::types::request::SignedPayload;
use crate::types::{Address, B256, U256};

/// A priced swap the relay has committed to settle.
///
/// Produced once per attempt by [`RelayClient::quote`](crate::gasless::RelayClient::quote)
/// and never mutated afterwards.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Contract that must be allowed to move the sell token.
    pub allowance_target: Address,
    /// Permit typed data, present when the sell token supports off-chain
    /// approval. Absent for tokens that require an on-chain `approve`.
    pub approval: Option<SignPayload>,
    /// Trade authorization typed data; always present on a liquid quote.
    pub trade: SignPayload,
    /// Pre-submission diagnostics reported by the relay.
    pub issues: Option<Issues>,
    #[serde_as(as = "DisplayFromStr")]
    pub sell_amount: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub buy_amount: U256,
    /// Worst-case buy amount after slippage.
    #[serde_as(as = "DisplayFromStr")]
    pub min_buy_amount: U256,
    pub sell_token: Address,
    pub buy_token: Address,
    pub liquidity_available: bool,
    /// Relay-assigned correlation id for support follow-up.
    pub zid: String,
}

impl Quote {
    /// Rejects a quote the relay marked unfillable. A full quote body can
    /// still carry `liquidityAvailable: false`, so the flag is checked even
    /// when the trade payloads decoded.
    pub(crate) fn ensure_liquid(&self) -> Result<()> {
        if self.liquidity_available {
            return Ok(());
        }
        Err(no_liquidity_error(Some(self.zid.as_str())))
    }
}

/// Indicative pricing from `/gasless/price`; carries no signable payloads.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    #[serde_as(as = "DisplayFromStr")]
    pub sell_amount: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub buy_amount: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub min_buy_amount: U256,
    pub sell_token: Address,
    pub buy_token: Address,
    pub liquidity_available: bool,
    pub zid: String,
}

impl PriceEstimate {
    pub(crate) fn ensure_liquid(&self) -> Result<()> {
        if self.liquidity_available {
            return Ok(());
        }
        Err(no_liquidity_error(Some(self.zid.as_str())))
    }
}

/// Pre-submission diagnostics attached to a quote.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issues {
    /// Present when the taker's current allowance will not cover the sale.
    pub allowance: Option<AllowanceIssue>,
    /// Present when the taker's balance will not cover the sale.
    pub balance: Option<BalanceIssue>,
    #[serde(default)]
    pub simulation_incomplete: bool,
}

/// The taker's current allowance is below the sell amount.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceIssue {
    /// Allowance currently granted.
    #[serde_as(as = "DisplayFromStr")]
    pub actual: U256,
    /// Contract that needs the allowance.
    pub spender: Address,
}

/// The taker's current balance is below the sell amount.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceIssue {
    pub token: Address,
    #[serde_as(as = "DisplayFromStr")]
    pub actual: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub expected: U256,
}

/// EIP-712 material the relay asks the taker to sign.
///
/// `kind` is the relay's discriminant (`"permit"` or a settlement
/// transaction type) and is echoed verbatim on submission, so it is kept as
/// the raw string rather than a closed enum.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignPayload {
    #[serde(rename = "type")]
    pub kind: String,
    /// Signing hash the relay claims for `eip712`; verified locally before
    /// any signature is produced.
    pub hash: B256,
    pub eip712: TypedData,
}

impl SignPayload {
    #[must_use]
    pub fn is_permit(&self) -> bool {
        self.kind.eq_ignore_ascii_case("permit")
    }

    /// Recomputes the EIP-712 signing hash from the typed data.
    pub fn signing_hash(&self) -> Result<B256> {
        self.eip712
            .eip712_signing_hash()
            .map_err(|e| Error::validation(format!("cannot hash relay typed data: {e}")))
    }

    /// Pairs this payload with its normalized signature for submission.
    #[must_use]
    pub fn signed(&self, signature: NormalizedSignature) -> SignedPayload {
        SignedPayload {
            kind: self.kind.clone(),
            hash: self.hash,
            eip712: self.eip712.clone(),
            signature,
        }
    }
}

/// Receipt for an accepted submission; `trade_hash` is the polling key.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub trade_hash: B256,
    #[serde(rename = "type")]
    pub kind: String,
    pub zid: String,
}

/// Point-in-time settlement state; superseded by each new poll.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: TradeStatus,
    /// On-chain transactions the relay has broadcast for this trade.
    #[serde(default)]
    pub transactions: Vec<SettlementTx>,
    pub zid: Option<String>,
}

/// A transaction the relay broadcast while settling a trade.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTx {
    pub hash: B256,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Relay-reported trade status.
///
/// The vocabulary is open-ended on the wire, so the raw string is kept and
/// matched case-insensitively; [`TradeStatus::known`] classifies the values
/// the relay currently documents.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradeStatus(String);

/// Statuses the relay currently documents.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum KnownStatus {
    Pending,
    Submitted,
    Succeeded,
    Confirmed,
    Failed,
}

impl TradeStatus {
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies the raw status, tolerating any letter casing.
    #[must_use]
    pub fn known(&self) -> Option<KnownStatus> {
        match self.0.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(KnownStatus::Pending),
            "submitted" => Some(KnownStatus::Submitted),
            "succeeded" => Some(KnownStatus::Succeeded),
            "confirmed" => Some(KnownStatus::Confirmed),
            "failed" => Some(KnownStatus::Failed),
            _ => None,
        }
    }

    /// The terminal success state; the only status that stops polling early.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self.known(), Some(KnownStatus::Confirmed))
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `/gasless/quote` wire response: either a firm quote or a bare
/// liquidity-unavailable marker carrying only the correlation id.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum QuoteResponse {
    Available(Box<Quote>),
    NoLiquidity(NoLiquidity),
}

/// `/gasless/price` wire response, same split as [`QuoteResponse`].
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceResponse {
    Available(Box<PriceEstimate>),
    NoLiquidity(NoLiquidity),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoLiquidity {
    pub liquidity_available: bool,
    pub zid: Option<String>,
}

fn no_liquidity_error(zid: Option<&str>) -> Error {
    match zid {
        Some(zid) => Error::liquidity(format!("no liquidity available for this pair (zid {zid})")),
        None => Error::liquidity("no liquidity available for this pair"),
    }
}

impl NoLiquidity {
    fn into_error(self) -> Error {
        no_liquidity_error(self.zid.as_deref())
    }
}

impl QuoteResponse {
    pub(crate) fn into_quote(self) -> Result<Quote> {
        match self {
            QuoteResponse::Available(quote) => {
                quote.ensure_liquid()?;
                Ok(*quote)
            }
            // A liquid body that still failed to match `Quote` is a decode
            // problem, not a missing route.
            QuoteResponse::NoLiquidity(marker) if marker.liquidity_available => Err(Error::decode(
                "quote response advertised liquidity but lacked trade payloads",
            )),
            QuoteResponse::NoLiquidity(marker) => Err(marker.into_error()),
        }
    }
}

impl PriceResponse {
    pub(crate) fn into_price(self) -> Result<PriceEstimate> {
        match self {
            PriceResponse::Available(price) => {
                price.ensure_liquid()?;
                Ok(*price)
            }
            PriceResponse::NoLiquidity(marker) if marker.liquidity_available => Err(Error::decode(
                "price response advertised liquidity but was missing amounts",
            )),
            PriceResponse::NoLiquidity(marker) => Err(marker.into_error()),
        }
    }
}
