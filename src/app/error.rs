use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendlineError {
    #[error("Authentication failed: {status}")]
    Auth { status: u16 },

    #[error("API call failed: {status}")]
    Request { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TrendlineError>;
