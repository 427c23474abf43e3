#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Issue tracker returned HTTP {0}")]
    Status(u16),

    #[error("Invalid issue payload: {0}")]
    Decode(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
