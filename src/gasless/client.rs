use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method};
use secrecy::ExposeSecret as _;
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::gasless::config::RelayConfig;
use crate::gasless::types::request::{QuoteRequest, SignedPayload, SubmitRequest};
use crate::gasless::types::response::{
    PriceEstimate, PriceResponse, Quote, QuoteResponse, StatusSnapshot, SubmissionRecord,
};
use crate::types::{B256, ChainId};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("0x-api-key");
const VERSION_HEADER: HeaderName = HeaderName::from_static("0x-version");
const API_VERSION: &str = "v2";

/// Stateless HTTP facade over the relay's gasless endpoints.
///
/// One instance serves one chain; every request carries the fixed header
/// set (`accept`, API key, API version). Retry policy deliberately lives in
/// the orchestrator, not here.
#[derive(Clone, Debug)]
pub struct RelayClient {
    host: Url,
    chain_id: ChainId,
    headers: HeaderMap,
    client: ReqwestClient,
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> Result<Self> {
        Self::with_client(config, ReqwestClient::new())
    }

    /// Creates a client reusing an existing HTTP connection pool.
    pub fn with_client(config: RelayConfig, client: ReqwestClient) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| Error::validation("relay API key contains invalid header characters"))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        Ok(Self {
            host: config.host,
            chain_id: config.chain_id,
            headers,
            client,
        })
    }

    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Fetches indicative pricing without committing the relay to settle.
    pub async fn price(&self, request: &QuoteRequest) -> Result<PriceEstimate> {
        let request = self
            .client
            .request(Method::GET, self.endpoint("gasless/price")?)
            .query(&[("chainId", self.chain_id)])
            .query(request)
            .build()?;

        let response: PriceResponse =
            crate::request(&self.client, request, Some(self.headers.clone())).await?;
        response.into_price()
    }

    /// Fetches a firm quote with signable approval and trade payloads.
    ///
    /// A response reporting no liquidity becomes a
    /// [`Kind::Liquidity`](crate::Kind::Liquidity) error so callers can
    /// present "no route" rather than a transport failure.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let request = self
            .client
            .request(Method::GET, self.endpoint("gasless/quote")?)
            .query(&[("chainId", self.chain_id)])
            .query(request)
            .build()?;

        let response: QuoteResponse =
            crate::request(&self.client, request, Some(self.headers.clone())).await?;
        response.into_quote()
    }

    /// Submits the signed trade, plus the signed permit when one was
    /// produced, and returns the polling key.
    pub async fn submit(
        &self,
        approval: Option<SignedPayload>,
        trade: SignedPayload,
    ) -> Result<SubmissionRecord> {
        let body = SubmitRequest {
            chain_id: self.chain_id,
            approval,
            trade,
        };
        let request = self
            .client
            .request(Method::POST, self.endpoint("gasless/submit")?)
            .json(&body)
            .build()?;

        crate::request(&self.client, request, Some(self.headers.clone())).await
    }

    /// Fetches the current settlement status for a submitted trade.
    pub async fn status(&self, trade_hash: B256) -> Result<StatusSnapshot> {
        let request = self
            .client
            .request(
                Method::GET,
                self.endpoint(&format!("gasless/status/{trade_hash}"))?,
            )
            .query(&[("chainId", self.chain_id)])
            .build()?;

        crate::request(&self.client, request, Some(self.headers.clone())).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.host.join(path)?)
    }
}
