use std::slice;

use tokio::time::sleep;

use crate::Result;
use crate::account::AccountCall;
use crate::codec::{NormalizedSignature, SignatureScheme};
use crate::error::Error;
use crate::gasless::RelayClient;
use crate::gasless::types::request::QuoteRequest;
use crate::gasless::types::response::{Quote, StatusSnapshot, SubmissionRecord, TradeStatus};
use crate::swap::approval::ApprovalAction;
use crate::swap::params::SwapParams;
use crate::swap::policy::PollPolicy;
use crate::swap::signing::SigningCoordinator;
use crate::types::B256;

/// Where a swap ended up once the orchestrator stopped watching it.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum SwapOutcome {
    /// The relay reported the trade confirmed on chain.
    Confirmed {
        record: SubmissionRecord,
        /// The snapshot that reported confirmation, transactions included.
        status: StatusSnapshot,
    },
    /// The poll budget ran out before a confirmation; the trade may still
    /// settle on its own.
    Unconfirmed {
        record: SubmissionRecord,
        /// Last status the relay reported, if any poll succeeded.
        last_status: Option<TradeStatus>,
    },
}

impl SwapOutcome {
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, SwapOutcome::Confirmed { .. })
    }

    /// The submission receipt, whichever way the watch ended.
    #[must_use]
    pub const fn record(&self) -> &SubmissionRecord {
        match self {
            SwapOutcome::Confirmed { record, .. } | SwapOutcome::Unconfirmed { record, .. } => {
                record
            }
        }
    }

    /// Hash identifying the trade with the relay, usable for later lookups.
    #[must_use]
    pub fn trade_hash(&self) -> B256 {
        self.record().trade_hash
    }
}

/// Drives one gasless swap end to end.
///
/// The sequence is strictly linear: quote, resolve approval, sign, submit,
/// poll. Each stage consumes the previous stage's output and any failure
/// aborts the run; nothing is retried here, since a fresh quote is cheaper
/// and safer than resubmitting stale signed payloads.
#[derive(Clone, Debug)]
pub struct SwapOrchestrator {
    relay: RelayClient,
    signing: SigningCoordinator,
    poll: PollPolicy,
}

impl SwapOrchestrator {
    #[must_use]
    pub fn new(relay: RelayClient, signing: SigningCoordinator) -> Self {
        Self::with_poll_policy(relay, signing, PollPolicy::default())
    }

    #[must_use]
    pub fn with_poll_policy(relay: RelayClient, signing: SigningCoordinator, poll: PollPolicy) -> Self {
        Self {
            relay,
            signing,
            poll,
        }
    }

    #[must_use]
    pub const fn relay(&self) -> &RelayClient {
        &self.relay
    }

    #[must_use]
    pub const fn signing(&self) -> &SigningCoordinator {
        &self.signing
    }

    /// Quotes and executes a swap in one go.
    ///
    /// The smart account is the taker; sold tokens leave the owner EOA's
    /// balance via the signed permit or the standing allowance.
    pub async fn run(&self, params: &SwapParams) -> Result<SwapOutcome> {
        params.validate()?;
        let request = QuoteRequest::builder()
            .sell_token(params.sell_token)
            .buy_token(params.buy_token)
            .sell_amount(params.sell_amount_base_units()?)
            .taker(self.signing.account_address())
            .slippage_bps(params.slippage_bps)
            .build();
        let quote = self.relay.quote(&request).await?;
        self.execute_quote(&quote).await
    }

    /// Executes a quote obtained earlier, for callers that inspect pricing
    /// before committing.
    ///
    /// Fails with [`Kind::Liquidity`](crate::Kind::Liquidity) before any
    /// signing when the quote was marked unfillable.
    pub async fn execute_quote(&self, quote: &Quote) -> Result<SwapOutcome> {
        quote.ensure_liquid()?;
        #[cfg(feature = "tracing")]
        if let Some(issue) = quote.issues.as_ref().and_then(|issues| issues.balance.as_ref()) {
            tracing::warn!(
                token = %issue.token,
                actual = %issue.actual,
                expected = %issue.expected,
                "taker balance is below the sell amount; settlement may revert"
            );
        }

        let approval = match ApprovalAction::resolve(quote) {
            ApprovalAction::Permit(payload) => {
                let raw = self.signing.sign_permit(payload).await?;
                let signature = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)?;
                Some(payload.signed(signature))
            }
            ApprovalAction::Onchain(call) => {
                self.approve_onchain(&call).await?;
                None
            }
            ApprovalAction::NotRequired => None,
        };

        let raw = self.signing.sign_trade(&quote.trade).await?;
        let signature = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)?;
        let record = self.relay.submit(approval, quote.trade.signed(signature)).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            trade_hash = %record.trade_hash,
            zid = %record.zid,
            "trade submitted, watching for settlement"
        );
        self.poll_settlement(record).await
    }

    /// Runs the sponsored `approve` through the smart account and waits for
    /// it to land before the trade is submitted against the new allowance.
    async fn approve_onchain(&self, call: &AccountCall) -> Result<()> {
        let account = self.signing.account();
        let operation = account.execute(slice::from_ref(call)).await?;
        let receipt = account.wait_for_receipt(operation).await?;
        if !receipt.success {
            return Err(Error::account(format!(
                "approval transaction {hash} reverted",
                hash = receipt.transaction_hash.unwrap_or(receipt.operation_hash),
            )));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(operation = %receipt.operation_hash, "on-chain approval landed");
        Ok(())
    }

    /// Polls the relay until the trade confirms or the budget runs out.
    ///
    /// Only a confirmed status stops the watch early; every other status,
    /// failure states included, is re-polled since the relay may still
    /// replace or retry the transaction.
    async fn poll_settlement(&self, record: SubmissionRecord) -> Result<SwapOutcome> {
        let mut last_status = None;
        for attempt in 1..=self.poll.max_attempts() {
            let snapshot = self.relay.status(record.trade_hash).await?;
            if snapshot.status.is_confirmed() {
                return Ok(SwapOutcome::Confirmed {
                    record,
                    status: snapshot,
                });
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt,
                status = %snapshot.status,
                trade_hash = %record.trade_hash,
                "trade not confirmed yet"
            );
            last_status = Some(snapshot.status);
            if attempt < self.poll.max_attempts() {
                sleep(self.poll.interval()).await;
            }
        }
        Ok(SwapOutcome::Unconfirmed {
            record,
            last_status,
        })
    }
}
