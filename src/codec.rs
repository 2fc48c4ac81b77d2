//! Normalization of compact ECDSA signatures into the relay wire encoding.
//!
//! Signers hand back 65 raw bytes (`r || s || v`); the relay wants the
//! pieces split out, with `r` and `s` rendered as exactly 64 hex characters
//! each.
//! Big-integer hex formatting drops leading zero bytes, and a stripped
//! component is rejected as malformed by strict relay-side validators, so
//! every component is re-padded to full width here.

use alloy::primitives::hex;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::Result;
use crate::error::Error;
use crate::types::U256;

/// Hex characters in one 32-byte signature component.
const COMPONENT_HEX_CHARS: usize = 64;
/// Hex characters in a compact signature: `r || s || v`.
const SIGNATURE_HEX_CHARS: usize = 130;

/// Signature scheme discriminant understood by the relay.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum SignatureScheme {
    /// EIP-712 typed-data signature.
    Eip712 = 2,
    /// Legacy `eth_sign` personal-message signature.
    EthSign = 3,
}

/// A compact ECDSA signature decomposed into the relay's submission encoding.
///
/// Invariant: `r` and `s` are always `0x` followed by exactly 64 hex
/// characters. Components longer than 64 characters cannot be produced from
/// a valid 65-byte input and are not defensively re-checked.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSignature {
    pub r: String,
    pub s: String,
    pub v: u8,
    pub recovery_param: u8,
    pub signature_type: SignatureScheme,
}

impl NormalizedSignature {
    /// Splits a 65-byte compact signature into padded `(r, s, v)` components.
    ///
    /// `raw` must be `0x` followed by exactly 130 hex characters. The final
    /// byte is the recovery marker `v` (`27`/`28`, or the bare parity
    /// `0`/`1`); `recovery_param` is derived as `1 - (v mod 2)`, so an odd
    /// `v` maps to recovery parameter `0`.
    ///
    /// Fails with [`Kind::Signature`](crate::Kind::Signature) on any other
    /// length or on non-hex input. A malformed signature is fatal for the
    /// attempt; retrying would sign and fail identically.
    pub fn normalize(raw: &str, signature_type: SignatureScheme) -> Result<Self> {
        let digits = raw
            .strip_prefix("0x")
            .ok_or_else(|| Error::signature("raw signature must be 0x-prefixed hex"))?;
        if digits.len() != SIGNATURE_HEX_CHARS {
            return Err(Error::signature(format!(
                "expected a 65-byte compact signature ({SIGNATURE_HEX_CHARS} hex chars), got {}",
                digits.len()
            )));
        }
        let bytes = hex::decode(digits)
            .map_err(|e| Error::signature(format!("invalid signature hex: {e}")))?;

        // Length is checked above, so both component slices are exact.
        let r = U256::from_be_slice(&bytes[..32]);
        let s = U256::from_be_slice(&bytes[32..64]);
        let v = bytes[64];

        Ok(Self {
            r: pad_hex32(&format!("{r:x}")),
            s: pad_hex32(&format!("{s:x}")),
            v,
            recovery_param: 1 - (v % 2),
            signature_type,
        })
    }
}

/// Left-pads a hex component to exactly 64 characters, `0x`-prefixed.
///
/// Accepts the component with or without a `0x` prefix; already-full-width
/// components pass through unchanged, so re-padding is idempotent.
pub(crate) fn pad_hex32(component: &str) -> String {
    let digits = component.strip_prefix("0x").unwrap_or(component);
    let width = COMPONENT_HEX_CHARS;
    format!("0x{digits:0>width$}")
}

#[cfg(test)]
mod tests {
    use super::{NormalizedSignature, SignatureScheme, pad_hex32};

    /// `r` with three leading zero bytes, `s` ordinary, `v = 27`.
    fn raw_with_zero_prefixed_r() -> String {
        let r = format!("000000{}", "ab".repeat(29));
        let s = "cd".repeat(32);
        format!("0x{r}{s}1b")
    }

    #[test]
    fn splits_components_and_pads_r() {
        let raw = raw_with_zero_prefixed_r();
        let sig = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)
            .expect("well-formed signature");

        assert_eq!(sig.r.len(), 66, "r must be 0x + 64 hex chars");
        assert_eq!(sig.s.len(), 66, "s must be 0x + 64 hex chars");
        assert_eq!(sig.r, format!("0x000000{}", "ab".repeat(29)));
        assert_eq!(sig.s, format!("0x{}", "cd".repeat(32)));
        assert_eq!(sig.v, 27);
        assert_eq!(sig.recovery_param, 0);
    }

    #[test]
    fn zero_component_pads_to_full_width() {
        let raw = format!("0x{}{}1c", "00".repeat(32), "11".repeat(32));
        let sig = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)
            .expect("well-formed signature");

        assert_eq!(sig.r, format!("0x{}", "0".repeat(64)));
        assert_eq!(sig.v, 28);
        assert_eq!(sig.recovery_param, 1);
    }

    #[test]
    fn recovery_param_follows_v_parity() {
        for (v, expected) in [(27_u8, 0_u8), (28, 1), (0, 1), (1, 0)] {
            let raw = format!("0x{}{}{v:02x}", "aa".repeat(32), "bb".repeat(32));
            let sig = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)
                .expect("well-formed signature");
            assert_eq!(sig.v, v);
            assert_eq!(
                sig.recovery_param, expected,
                "recovery param for v={v} must be 1 - (v mod 2)"
            );
        }
    }

    #[test]
    fn padding_is_idempotent() {
        let once = pad_hex32("abc");
        assert_eq!(once, format!("0x{}abc", "0".repeat(61)));
        assert_eq!(pad_hex32(&once), once, "re-padding must not grow the component");
    }

    #[test]
    fn stripped_components_repad_to_original_bytes() {
        let raw = raw_with_zero_prefixed_r();
        let sig = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)
            .expect("well-formed signature");

        // Simulate a signer library trimming leading zeros, then re-pad.
        let stripped = sig.r.trim_start_matches("0x").trim_start_matches('0');
        assert!(stripped.len() < 64, "fixture must actually exercise padding");
        assert_eq!(pad_hex32(stripped), sig.r, "re-padding must restore the bytes");
    }

    #[test]
    fn rejects_wrong_length() {
        let short = format!("0x{}", "ab".repeat(64));
        let err = NormalizedSignature::normalize(&short, SignatureScheme::Eip712)
            .expect_err("64 bytes is not a compact signature");
        assert_eq!(err.kind(), crate::Kind::Signature);

        let long = format!("0x{}", "ab".repeat(66));
        NormalizedSignature::normalize(&long, SignatureScheme::Eip712)
            .expect_err("66 bytes is not a compact signature");
    }

    #[test]
    fn rejects_missing_prefix_and_bad_hex() {
        let unprefixed = format!("{}{}1b", "aa".repeat(32), "bb".repeat(32));
        NormalizedSignature::normalize(&unprefixed, SignatureScheme::Eip712)
            .expect_err("prefix is mandatory");

        let garbage = format!("0xzz{}", "ab".repeat(64));
        NormalizedSignature::normalize(&garbage, SignatureScheme::EthSign)
            .expect_err("non-hex input must fail");
    }

    #[test]
    fn wire_names_match_relay_contract() {
        let raw = raw_with_zero_prefixed_r();
        let sig = NormalizedSignature::normalize(&raw, SignatureScheme::Eip712)
            .expect("well-formed signature");
        let value = serde_json::to_value(&sig).expect("serializable");

        let object = value.as_object().expect("signature serializes as an object");
        for key in ["r", "s", "v", "recoveryParam", "signatureType"] {
            assert!(object.contains_key(key), "wire object must carry `{key}`");
        }
        assert_eq!(value["signatureType"], 2, "EIP-712 scheme is wire value 2");
    }
}
