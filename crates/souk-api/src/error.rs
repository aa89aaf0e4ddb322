use thiserror::Error;

/// Failures reaching or decoding marketplace data.
///
/// Statuses are not distinguished further on purpose; callers treat every
/// variant as one failed load and retry by asking again, never automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[cfg(feature = "http")]
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[cfg(feature = "http")]
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode payload from {location}: {source}")]
    Decode {
        location: String,
        source: serde_json::Error,
    },

    #[cfg(feature = "fs")]
    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        source: std::io::Error,
    },

    #[cfg(feature = "http")]
    #[error("invalid marketplace origin {origin}: {source}")]
    InvalidOrigin {
        origin: String,
        source: url::ParseError,
    },
}
