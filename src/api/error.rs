use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected response {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Transport> for ApiError {
    fn from(transport: ureq::Transport) -> Self {
        Self::Transport(transport.to_string())
    }
}
