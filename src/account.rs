//! Signing identities for a swap run.
//!
//! Two identities with non-interchangeable roles: the owning
//! externally-owned account ([`OwnerSigner`]) authorizes permits because
//! token permit schemes are scoped to the holder's ordinary key, while the
//! smart account ([`SmartAccount`]) authorizes the trade and executes any
//! sponsored on-chain calls. Account derivation, deployment, and user
//! operation plumbing belong to the account-abstraction provider behind the
//! trait, not to this crate.

use std::str::FromStr as _;

use alloy::primitives::hex;
use alloy::signers::Signer as _;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};

use crate::Result;
use crate::error::Error;
use crate::gasless::types::response::SignPayload;
use crate::types::{Address, B256, Bytes, U256};

/// A single call executed through the smart account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountCall {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Receipt for a sponsored user operation.
#[derive(Clone, Debug)]
pub struct AccountReceipt {
    pub operation_hash: B256,
    /// Hash of the transaction that carried the operation, when known.
    pub transaction_hash: Option<B256>,
    pub success: bool,
}

/// Smart-account collaborator supplied by an account-abstraction provider.
///
/// `sign_payload` returns the 65-byte compact signature as `0x`-prefixed
/// hex; how the account produces it (ERC-1271, ERC-6492 wrapping, session
/// keys) is opaque here.
#[async_trait]
pub trait SmartAccount: Send + Sync {
    /// The deployed (or counterfactual) account address; used as the taker.
    fn address(&self) -> Address;

    /// Signs relay typed data with the account's signing mechanism.
    async fn sign_payload(&self, payload: &SignPayload) -> Result<String>;

    /// Executes calls through the account, gas-sponsored, returning the
    /// user operation hash.
    async fn execute(&self, calls: &[AccountCall]) -> Result<B256>;

    /// Waits until the operation lands and returns its receipt.
    async fn wait_for_receipt(&self, operation: B256) -> Result<AccountReceipt>;
}

/// The owning externally-owned account.
///
/// Only signs permit digests; trade payloads go through [`SmartAccount`]
/// and there is deliberately no way to route one through the owner key.
#[derive(Clone, Debug)]
pub struct OwnerSigner {
    signer: PrivateKeySigner,
}

impl OwnerSigner {
    #[must_use]
    pub const fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Parses the owner key from app-level configuration.
    pub fn from_raw(private_key: &SecretString) -> Result<Self> {
        PrivateKeySigner::from_str(private_key.expose_secret())
            .map_err(|e| Error::validation(format!("invalid owner private key: {e}")))
            .map(Self::new)
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs a 32-byte digest, returning the compact signature as hex.
    pub(crate) async fn sign_digest(&self, digest: &B256) -> Result<String> {
        let signature = self.signer.sign_hash(digest).await?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }
}
