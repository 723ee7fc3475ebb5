//! Dial-plan normalization for outbound numbers.
//!
//! The origination service wants E.164-style numbers. Owners enter local
//! forms ("010-1234-5678"), so the client rewrites the national trunk digit
//! to the configured country prefix before dialing.

use crate::config::ClientConfig;
use crate::error::CallError;

/// Country/trunk prefix pair taken from [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct DialPlan {
    country_prefix: String,
    trunk_prefix: String,
}

impl DialPlan {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            country_prefix: config.country_prefix.clone(),
            trunk_prefix: config.trunk_prefix.clone(),
        }
    }

    /// Rewrite a raw owner-entered number for dialing.
    ///
    /// Separator characters (whitespace, hyphens) are stripped first. Then:
    /// an already `+`-prefixed number passes through unchanged; a number
    /// starting with the national trunk digit has that digit replaced by the
    /// country prefix; anything else gets the country prefix prepended
    /// verbatim. The last branch can produce numbers the provider rejects
    /// (e.g. "21012345678" becomes "+8221012345678") — the provider error is
    /// surfaced through the normal failure path rather than guessed at here.
    pub fn normalize(&self, raw: &str) -> Result<String, CallError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if cleaned.is_empty() {
            return Err(CallError::EmptyNumber);
        }

        if cleaned.starts_with('+') {
            return Ok(cleaned);
        }

        if let Some(rest) = cleaned.strip_prefix(&self.trunk_prefix) {
            return Ok(format!("{}{}", self.country_prefix, rest));
        }

        Ok(format!("{}{}", self.country_prefix, cleaned))
    }
}
