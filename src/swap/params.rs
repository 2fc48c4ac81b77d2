use bon::Builder;
use rust_decimal::Decimal;

use crate::Result;
use crate::error::Error;
use crate::types::{Address, U256};

/// Default slippage tolerance in basis points.
pub const DEFAULT_SLIPPAGE_BPS: u16 = 100;

/// Highest scale a [`Decimal`] can carry, and so the highest token decimals
/// this conversion can serve.
const MAX_DECIMAL_SCALE: u32 = 28;

/// What to swap, expressed in human units.
///
/// `sell_amount` is a decimal token amount (`1.5` USDC, not `1500000`);
/// [`SwapParams::sell_amount_base_units`] converts it using the sell token's
/// decimals before anything touches the wire.
#[derive(Builder, Clone, Debug)]
pub struct SwapParams {
    pub sell_token: Address,
    pub buy_token: Address,
    pub sell_amount: Decimal,
    pub sell_token_decimals: u32,
    #[builder(default = DEFAULT_SLIPPAGE_BPS)]
    pub slippage_bps: u16,
}

impl SwapParams {
    /// Checks the parameters before any request is built from them.
    pub fn validate(&self) -> Result<()> {
        if self.sell_amount <= Decimal::ZERO {
            return Err(Error::validation("sell amount must be positive"));
        }
        if self.sell_token_decimals > MAX_DECIMAL_SCALE {
            return Err(Error::validation(format!(
                "token decimals {decimals} exceed the supported maximum of {MAX_DECIMAL_SCALE}",
                decimals = self.sell_token_decimals,
            )));
        }
        if self.slippage_bps > 10_000 {
            return Err(Error::validation(format!(
                "slippage of {bps} bps exceeds 100%",
                bps = self.slippage_bps,
            )));
        }
        Ok(())
    }

    /// Converts the human sell amount into base units of the sell token.
    ///
    /// Trailing zeros are fine; digits beyond the token's decimals are not,
    /// since they cannot be represented on chain.
    pub fn sell_amount_base_units(&self) -> Result<U256> {
        let normalized = self.sell_amount.normalize();
        let scale = normalized.scale();
        if scale > self.sell_token_decimals {
            return Err(Error::validation(format!(
                "sell amount carries {scale} decimal places but the token only has {decimals}",
                decimals = self.sell_token_decimals,
            )));
        }
        let mut scaled = normalized;
        scaled.rescale(self.sell_token_decimals);
        if scaled.scale() != self.sell_token_decimals {
            return Err(Error::validation(format!(
                "sell amount does not fit at {decimals} decimals",
                decimals = self.sell_token_decimals,
            )));
        }
        let mantissa = u128::try_from(scaled.mantissa())
            .map_err(|_| Error::validation("sell amount must be positive"))?;
        Ok(U256::from(mantissa))
    }
}
