//! Error types for the CoinTrack aggregation core

use thiserror::Error;

/// Errors that can occur when fetching data from an external API
#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint URL failed to construct (fixed templates, defensively checked)
    #[error("Bad URL: {0}")]
    BadUrl(String),

    /// Server answered with a non-200 status
    #[error("Bad response: HTTP {status}")]
    BadResponse { status: u16 },

    /// JSON body did not match the expected shape on a required field
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    /// Connectivity-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors that can occur in the durable on-device stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not parse
    #[error("Store file corrupt: {0}")]
    Corrupt(String),
}

impl FetchError {
    /// Creates a DecodeFailure error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Creates a BadResponse error from a status code
    pub fn bad_response(status: u16) -> Self {
        Self::BadResponse { status }
    }
}
