use std::error::Error as StdError;
use std::fmt;

use crate::types::ChainId;

/// Discriminates error classes without exposing representation details.
///
/// Use [`Error::kind`] to branch on failure class, e.g. to distinguish a
/// relay rejection ([`Kind::Status`]) from a route that simply does not
/// exist ([`Kind::Liquidity`]).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// The relay answered with a non-2xx HTTP status.
    Status,
    /// The request never produced a usable response (connect, TLS, body read).
    Transport,
    /// A URL could not be parsed or joined.
    Url,
    /// A response body could not be decoded into the expected shape.
    Serde,
    /// Caller-supplied input failed validation.
    Validation,
    /// A raw signature was not a well-formed 65-byte compact encoding.
    Signature,
    /// The relay reported that no liquidity is available for the pair.
    Liquidity,
    /// The signing key rejected an operation.
    Signer,
    /// The smart-account collaborator failed to sign or execute.
    Account,
}

impl Kind {
    const fn as_str(self) -> &'static str {
        match self {
            Kind::Status => "status",
            Kind::Transport => "transport",
            Kind::Url => "url",
            Kind::Serde => "serde",
            Kind::Validation => "validation",
            Kind::Signature => "signature",
            Kind::Liquidity => "liquidity",
            Kind::Signer => "signer",
            Kind::Account => "account",
        }
    }
}

/// Error type shared by every fallible operation in this crate.
#[derive(Debug)]
pub struct Error {
    kind: Kind,
    message: Option<String>,
    status: Option<u16>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
        }
    }

    fn with_message(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(kind)
        }
    }

    fn with_source(kind: Kind, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(kind)
        }
    }

    /// A non-2xx relay response, preserving the HTTP status and body text.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::with_message(Kind::Status, body)
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(Kind::Validation, message)
    }

    #[must_use]
    pub fn signature(message: impl Into<String>) -> Self {
        Self::with_message(Kind::Signature, message)
    }

    #[must_use]
    pub fn liquidity(message: impl Into<String>) -> Self {
        Self::with_message(Kind::Liquidity, message)
    }

    #[must_use]
    pub fn account(message: impl Into<String>) -> Self {
        Self::with_message(Kind::Account, message)
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::with_message(Kind::Serde, message)
    }

    #[must_use]
    pub fn unsupported_chain(chain_id: ChainId) -> Self {
        Self::with_message(
            Kind::Validation,
            format!("chain id {chain_id} is not supported by the gasless relay"),
        )
    }

    /// The class of failure.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// The HTTP status code, when the failure is a relay rejection.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// The message or response body attached to this error, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self.kind, Kind::Status)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if let Some(status) = self.status {
            write!(f, " ({status})")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::with_source(Kind::Transport, source)
    }
}

impl From<url::ParseError> for Error {
    fn from(source: url::ParseError) -> Self {
        Self::with_source(Kind::Url, source)
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::with_source(Kind::Serde, source)
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(source: alloy::signers::Error) -> Self {
        Self::with_source(Kind::Signer, source)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Kind};

    #[test]
    fn status_errors_keep_code_and_body() {
        let err = Error::status(429, "rate limited");
        assert_eq!(err.kind(), Kind::Status, "kind should be Status");
        assert_eq!(err.status_code(), Some(429), "code should survive");
        assert_eq!(err.message(), Some("rate limited"), "body should survive");
        assert!(err.is_status(), "is_status should agree with the kind");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::liquidity("no route for pair");
        assert_eq!(err.to_string(), "liquidity: no route for pair");

        let err = Error::status(500, "boom");
        assert_eq!(err.to_string(), "status (500): boom");
    }

    #[test]
    fn unsupported_chain_names_the_chain() {
        let err = Error::unsupported_chain(99_999);
        assert_eq!(err.kind(), Kind::Validation, "kind should be Validation");
        assert!(
            err.to_string().contains("99999"),
            "message should carry the offending chain id"
        );
    }
}
