use alloy::sol;
use alloy::sol_types::SolCall as _;

use crate::account::AccountCall;
use crate::gasless::types::response::{Quote, SignPayload};
use crate::types::{Address, U256};

sol! {
    /// Minimal ERC-20 surface for the on-chain approval fallback.
    function approve(address spender, uint256 amount) external returns (bool);
}

/// How token movement gets authorized for one quote.
///
/// Permit beats the on-chain fallback whenever the relay offers one: the
/// permit rides along with the submission, costs no extra round trip, and
/// is signed by the owner key rather than executed by the account.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ApprovalAction<'quote> {
    /// Off-chain permit, to be signed as typed data by the owning EOA.
    Permit(&'quote SignPayload),
    /// Sponsored on-chain `approve`, executed through the smart account.
    Onchain(AccountCall),
    /// The standing allowance already covers the sale.
    NotRequired,
}

impl<'quote> ApprovalAction<'quote> {
    /// Decides the approval mechanism from the quote's payloads and
    /// diagnostics.
    #[must_use]
    pub fn resolve(quote: &'quote Quote) -> Self {
        if let Some(approval) = &quote.approval {
            return ApprovalAction::Permit(approval);
        }
        match quote.issues.as_ref().and_then(|issues| issues.allowance.as_ref()) {
            Some(issue) if issue.actual < quote.sell_amount => ApprovalAction::Onchain(
                approve_call(quote.sell_token, issue.spender, quote.sell_amount),
            ),
            _ => ApprovalAction::NotRequired,
        }
    }

    /// Whether this action costs an on-chain transaction.
    #[must_use]
    pub const fn needs_onchain_approval(&self) -> bool {
        matches!(self, ApprovalAction::Onchain(_))
    }

    /// The permit payload to sign, when permit-based approval applies.
    #[must_use]
    pub const fn permit_payload(&self) -> Option<&'quote SignPayload> {
        match self {
            ApprovalAction::Permit(payload) => Some(*payload),
            ApprovalAction::Onchain(_) | ApprovalAction::NotRequired => None,
        }
    }
}

/// Encodes `approve(spender, amount)` against the sell token.
fn approve_call(token: Address, spender: Address, amount: U256) -> AccountCall {
    let data = approveCall { spender, amount }.abi_encode();
    AccountCall {
        to: token,
        value: U256::ZERO,
        data: data.into(),
    }
}
