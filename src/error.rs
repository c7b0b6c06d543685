use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Up(#[from] upbank::UpError),

    #[error("no account with id {0}")]
    UnknownAccount(String),

    #[error("nothing to export for account {0}")]
    NothingToExport(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message shown to the user on stderr.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Up(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
