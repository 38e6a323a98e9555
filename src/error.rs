use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnoopError>;

#[derive(Error, Debug)]
pub enum SnoopError {
    #[error("Configuration error: {0}")]
    Config(String),
    /// The API answered, but not with a success status.
    #[error("got status code: {status} ({url})")]
    Status { status: u16, url: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Precondition failed: {0}")]
    Precondition(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Chart error: {0}")]
    Chart(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
impl SnoopError {
    /// Both non-success statuses and network failures abort a fetch.
    pub fn is_transport(&self) -> bool {
        matches!(self, SnoopError::Status { .. } | SnoopError::Transport(_))
    }
}

impl From<ureq::Error> for SnoopError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => SnoopError::Status {
                status,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(transport) => SnoopError::Transport(transport.to_string()),
        }
    }
}
