use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::types::ChainId;

/// Connection settings for the gasless relay.
///
/// Construction validates the chain against the relay's supported set, so a
/// held config is always usable. Core logic never reads ambient process
/// state; everything arrives through this object.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub host: Url,
    pub api_key: SecretString,
    pub chain_id: ChainId,
}

impl RelayConfig {
    pub fn new(host: Url, api_key: SecretString, chain_id: ChainId) -> Result<Self> {
        if crate::chain_name(chain_id).is_none() {
            return Err(Error::unsupported_chain(chain_id));
        }
        Ok(Self {
            host,
            api_key,
            chain_id,
        })
    }

    /// Builds a config from string inputs, typically app-level settings.
    pub fn from_raw(host: &str, api_key: &str, chain_id: ChainId) -> Result<Self> {
        Self::new(
            Url::parse(host)?,
            SecretString::from(api_key.to_owned()),
            chain_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::RelayConfig;
    use crate::{BASE, Kind};

    #[test]
    fn accepts_supported_chains() {
        let config = RelayConfig::from_raw("https://relay.example.org", "key", BASE)
            .expect("base is supported");
        assert_eq!(config.chain_id, BASE);
    }

    #[test]
    fn rejects_unknown_chains_and_bad_hosts() {
        let err = RelayConfig::from_raw("https://relay.example.org", "key", 424_242)
            .expect_err("unknown chain must be rejected");
        assert_eq!(err.kind(), Kind::Validation);

        let err = RelayConfig::from_raw("not a url", "key", BASE)
            .expect_err("host must parse as a URL");
        assert_eq!(err.kind(), Kind::Url);
    }
}
