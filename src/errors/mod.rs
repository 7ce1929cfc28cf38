use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Story not found: {0}")]
    NotFound(u64),

    // Channel errors from the Telegram bindings
    #[error("Channel error: {0}")]
    Channel(String),
}

impl From<channels::ChannelError> for RelayError {
    fn from(err: channels::ChannelError) -> Self {
        RelayError::Channel(err.to_string())
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
