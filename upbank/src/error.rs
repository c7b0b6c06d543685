use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpError {
    #[error("no API token configured")]
    MissingCredential,

    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("failed to decode {context}: {cause}")]
    Decode { context: String, cause: String },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, UpError>;

/// Cloneable classification of an [`UpError`], carried by collection states
/// and fetch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    InvalidUrl,
    Timeout,
    Connection,
    /// HTTP 401: the token is invalid or expired.
    Unauthorized,
    Http(u16),
    Decode,
}

impl UpError {
    pub(crate) fn invalid_url(url: &str, reason: impl ToString) -> Self {
        UpError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(context: impl Into<String>, cause: impl ToString) -> Self {
        UpError::Decode {
            context: context.into(),
            cause: cause.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UpError::MissingCredential => ErrorKind::MissingCredential,
            UpError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            UpError::Timeout(_) => ErrorKind::Timeout,
            UpError::Connection(_) | UpError::Client(_) => ErrorKind::Connection,
            UpError::Http { status: 401, .. } => ErrorKind::Unauthorized,
            UpError::Http { status, .. } => ErrorKind::Http(*status),
            UpError::Decode { .. } => ErrorKind::Decode,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Text suitable for showing to the person using the app.
    pub fn user_message(&self) -> String {
        match self {
            UpError::MissingCredential => {
                "You must provide a valid API key to access this endpoint, add your API key in Settings."
                    .to_string()
            }
            UpError::InvalidUrl { .. } => "The URL used to fetch data was invalid.".to_string(),
            UpError::Timeout(_) => "The server took too long to respond.".to_string(),
            UpError::Connection(_) | UpError::Client(_) => {
                "Could not connect to the server.".to_string()
            }
            UpError::Http { status: 401, .. } => {
                "The server returned a 401, check your API key is up to date in Settings."
                    .to_string()
            }
            UpError::Http { status, .. } => {
                format!("The server returned an error with status code {status}.")
            }
            UpError::Decode { cause, .. } => {
                format!("There was an error decoding the response from the server: {cause}")
            }
        }
    }
}
