//! Quotes and executes a small USDC -> WETH swap on Base.
//!
//! ```sh
//! GASLESS_API_KEY=... OWNER_PRIVATE_KEY=0x... ACCOUNT_PRIVATE_KEY=0x... \
//!     cargo run --example swap
//! ```
//!
//! The account here is a plain EOA standing in for a contract wallet, so
//! only permit-capable sell tokens work; a token that needs an on-chain
//! approval will abort with an account error.

#![expect(clippy::print_stdout, reason = "command-line demo reports on stdout")]

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use gasless_swap_sdk::gasless::types::SignPayload;
use gasless_swap_sdk::gasless::{RelayClient, RelayConfig};
use gasless_swap_sdk::swap::{SigningCoordinator, SwapOrchestrator, SwapOutcome, SwapParams};
use gasless_swap_sdk::types::{Address, B256};
use gasless_swap_sdk::{AccountCall, AccountReceipt, Error, OwnerSigner, Result, SmartAccount};
use rust_decimal_macros::dec;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

const BASE_USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
const BASE_WETH: &str = "0x4200000000000000000000000000000000000006";

/// EOA pretending to be a smart account, good enough for permit-path swaps.
struct DemoAccount {
    signer: alloy::signers::local::PrivateKeySigner,
}

#[async_trait]
impl SmartAccount for DemoAccount {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_payload(&self, payload: &SignPayload) -> Result<String> {
        use alloy::signers::Signer as _;

        let signature = self.signer.sign_hash(&payload.signing_hash()?).await?;
        Ok(alloy::hex::encode_prefixed(signature.as_bytes()))
    }

    async fn execute(&self, _calls: &[AccountCall]) -> Result<B256> {
        Err(Error::account(
            "demo account cannot send transactions; sell a token with permit support",
        ))
    }

    async fn wait_for_receipt(&self, _operation: B256) -> Result<AccountReceipt> {
        Err(Error::account("demo account never has pending operations"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = std::env::var("GASLESS_API_HOST").unwrap_or_else(|_| "https://api.0x.org/".to_owned());
    let api_key = std::env::var("GASLESS_API_KEY").context("GASLESS_API_KEY is required")?;
    let owner_key = std::env::var("OWNER_PRIVATE_KEY").context("OWNER_PRIVATE_KEY is required")?;
    let account_key =
        std::env::var("ACCOUNT_PRIVATE_KEY").context("ACCOUNT_PRIVATE_KEY is required")?;

    let relay = RelayClient::new(RelayConfig::from_raw(&host, &api_key, gasless_swap_sdk::BASE)?)?;
    let owner = OwnerSigner::from_raw(&SecretString::from(owner_key))?;
    let account = DemoAccount {
        signer: account_key.parse().context("ACCOUNT_PRIVATE_KEY is not a valid key")?,
    };
    let signing = SigningCoordinator::new(owner, Arc::new(account));
    let orchestrator = SwapOrchestrator::new(relay, signing);

    let params = SwapParams::builder()
        .sell_token(BASE_USDC.parse()?)
        .buy_token(BASE_WETH.parse()?)
        .sell_amount(dec!(1.5))
        .sell_token_decimals(6)
        .build();

    println!(
        "selling 1.5 USDC for WETH on Base, taker {taker}",
        taker = orchestrator.signing().account_address()
    );

    match orchestrator.run(&params).await? {
        SwapOutcome::Confirmed { record, status } => {
            println!("confirmed: trade {hash}", hash = record.trade_hash);
            for tx in &status.transactions {
                println!("  settled by {hash} at {time}", hash = tx.hash, time = tx.timestamp);
            }
        }
        SwapOutcome::Unconfirmed { record, last_status } => {
            println!(
                "gave up waiting on trade {hash}; last status: {status}",
                hash = record.trade_hash,
                status = last_status.map_or_else(|| "unknown".to_owned(), |s| s.to_string()),
            );
        }
        _ => println!("swap finished in an unrecognized state"),
    }

    Ok(())
}
