use std::fmt;
use std::sync::Arc;

use crate::Result;
use crate::account::{OwnerSigner, SmartAccount};
use crate::error::Error;
use crate::gasless::types::response::SignPayload;
use crate::types::{Address, B256};

/// Routes each relay payload to the identity that must sign it.
///
/// Permits prove token ownership and are signed by the owner EOA; trade
/// authorizations are signed by the smart account, whose wallet decides the
/// scheme (EIP-1271 contract signatures included). Every payload's claimed
/// hash is recomputed from its typed data before either key touches it.
#[derive(Clone)]
pub struct SigningCoordinator {
    owner: OwnerSigner,
    account: Arc<dyn SmartAccount>,
}

impl SigningCoordinator {
    #[must_use]
    pub fn new(owner: OwnerSigner, account: Arc<dyn SmartAccount>) -> Self {
        Self { owner, account }
    }

    /// Address of the EOA that owns the tokens being sold.
    #[must_use]
    pub fn owner_address(&self) -> Address {
        self.owner.address()
    }

    /// Address of the smart account that executes and takes the trade.
    #[must_use]
    pub fn account_address(&self) -> Address {
        self.account.address()
    }

    pub(crate) fn account(&self) -> &Arc<dyn SmartAccount> {
        &self.account
    }

    /// Signs a permit payload with the owner key.
    pub async fn sign_permit(&self, payload: &SignPayload) -> Result<String> {
        let digest = verify_payload_digest(payload)?;
        self.owner.sign_digest(&digest).await
    }

    /// Signs a trade payload through the smart account.
    pub async fn sign_trade(&self, payload: &SignPayload) -> Result<String> {
        verify_payload_digest(payload)?;
        self.account.sign_payload(payload).await
    }
}

impl fmt::Debug for SigningCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCoordinator")
            .field("owner", &self.owner.address())
            .field("account", &self.account.address())
            .finish()
    }
}

/// Recomputes the payload's signing hash and checks it against the hash the
/// relay claimed. A mismatch means the typed data and the hash tell two
/// different stories, and nothing gets signed.
fn verify_payload_digest(payload: &SignPayload) -> Result<B256> {
    let computed = payload.signing_hash()?;
    if computed != payload.hash {
        return Err(Error::validation(format!(
            "relay hash {claimed} for `{kind}` payload does not match computed {computed}",
            claimed = payload.hash,
            kind = payload.kind,
        )));
    }
    Ok(computed)
}
