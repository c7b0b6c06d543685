//! Sources of the personal access token used to authenticate API calls.
//!
//! The core only ever asks a [`CredentialProvider`] for the current token; an
//! absent or blank token means "not signed in" and no request is sent.

use std::fmt;

/// Environment variable read by [`EnvToken::default`].
pub const TOKEN_ENV_VAR: &str = "UP_API_TOKEN";

/// Supplies the bearer token for API requests.
pub trait CredentialProvider: Send + Sync {
    /// The current token, if any.
    fn token(&self) -> Option<String>;
}

/// A token held in memory.
#[derive(Clone)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A provider that never has a token.
    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.0.is_some() { "<redacted>" } else { "<none>" };
        f.debug_tuple("StaticToken").field(&shown).finish()
    }
}

/// Reads the token from an environment variable on every call, so a token
/// updated while the app runs is picked up by the next request.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl CredentialProvider for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// Returns the token only when it is present and non-blank.
pub(crate) fn usable_token(provider: &dyn CredentialProvider) -> Option<String> {
    provider
        .token()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
