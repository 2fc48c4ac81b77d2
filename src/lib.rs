//! Gasless swap client for 0x-style relay APIs.
//!
//! The relay prices a swap, sponsors its gas, and settles it on chain; the
//! taker only produces signatures. This crate covers the whole flow:
//!
//! - [`gasless::RelayClient`]: typed client for the relay's four endpoints
//!   (price, quote, submit, status)
//! - [`swap::SwapOrchestrator`]: quote, approval resolution, dual-identity
//!   signing, submission, and settlement polling behind one call
//! - [`SmartAccount`]: the seam for plugging in the contract wallet that
//!   takes the trade and executes sponsored approvals
//!
//! Enable the `tracing` feature for structured logs of wire traffic and
//! swap state transitions.

mod account;
mod codec;
mod error;
pub mod gasless;
pub mod swap;
pub mod types;

use reqwest::Client as ReqwestClient;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

pub use account::{AccountCall, AccountReceipt, OwnerSigner, SmartAccount};
pub use codec::{NormalizedSignature, SignatureScheme};
pub use error::{Error, Kind};

use crate::types::ChainId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Ethereum mainnet.
pub const ETHEREUM: ChainId = 1;
/// OP Mainnet.
pub const OPTIMISM: ChainId = 10;
/// BNB Smart Chain.
pub const BNB: ChainId = 56;
/// Polygon PoS.
pub const POLYGON: ChainId = 137;
/// Base.
pub const BASE: ChainId = 8453;
/// Arbitrum One.
pub const ARBITRUM: ChainId = 42161;
/// Avalanche C-Chain.
pub const AVALANCHE: ChainId = 43114;
/// Linea.
pub const LINEA: ChainId = 59144;
/// Blast.
pub const BLAST: ChainId = 81457;
/// Scroll.
pub const SCROLL: ChainId = 534352;

static SUPPORTED_CHAINS: phf::Map<u64, &'static str> = phf::phf_map! {
    1_u64 => "Ethereum",
    10_u64 => "Optimism",
    56_u64 => "BNB Smart Chain",
    137_u64 => "Polygon",
    8453_u64 => "Base",
    42161_u64 => "Arbitrum One",
    43114_u64 => "Avalanche",
    59144_u64 => "Linea",
    81457_u64 => "Blast",
    534352_u64 => "Scroll",
};

/// Human-readable name of a chain the relay serves, or `None` for chains it
/// does not.
#[must_use]
pub fn chain_name(chain_id: ChainId) -> Option<&'static str> {
    SUPPORTED_CHAINS.get(&chain_id).copied()
}

/// Sends a prepared request and decodes the JSON response.
///
/// Extra headers are merged on top of whatever the request already carries.
/// Non-2xx statuses become [`Kind::Status`] errors with the raw body kept
/// for the caller.
pub(crate) async fn request<T: DeserializeOwned>(
    client: &ReqwestClient,
    mut request: reqwest::Request,
    headers: Option<HeaderMap>,
) -> Result<T> {
    if let Some(headers) = headers {
        request.headers_mut().extend(headers);
    }

    let response = client.execute(request).await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::status(status.as_u16(), body));
    }

    let bytes = response.bytes().await?;
    deserialize_body(&bytes)
}

#[cfg(not(feature = "tracing"))]
fn deserialize_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Tracing build: logs response fields the types silently drop and reports
/// the JSON path of whatever failed to decode.
#[cfg(feature = "tracing")]
fn deserialize_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    let mut track = serde_path_to_error::Track::new();
    let tracked = serde_path_to_error::Deserializer::new(&mut json, &mut track);
    serde_ignored::deserialize(tracked, |path| {
        tracing::debug!(%path, "ignoring unrecognized response field");
    })
    .map_err(|e| {
        let path = track.path().to_string();
        Error::decode(format!("response did not match at `{path}`: {e}"))
    })
}
