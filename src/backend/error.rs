use thiserror::Error;

/// A remote call that could not be completed.
///
/// Shared by the catalog fetch and the compile call: both are a single HTTP
/// round trip and fail in the same ways.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status code {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to fetch compiler catalog: {0}")]
    Fetch(#[from] TransportError),

    #[error("Compiler catalog fetch timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Failure to obtain a [`CompileResult`](crate::request::CompileResult).
///
/// Source code that fails to compile is not an error; it is a result with
/// `success == false`.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Compilation request could not be completed: {0}")]
    Transport(#[from] TransportError),

    #[error("Compilation request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl CompileError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CompileError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
