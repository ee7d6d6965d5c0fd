use thiserror::Error;

/// Why a gallery load did not produce remote data.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The request never completed (offline, CORS, DNS, ...).
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("invalid gallery document: {0}")]
    Parse(#[from] serde_json::Error),
}
