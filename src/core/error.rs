use thiserror::Error;

/// Transport-level failure for a single page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. } | FetchError::HttpStatus { url, .. } => url,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("no results: {0}")]
    NoResults(String),

    /// Per-chapter failure during a fan-out. Recorded as a skipped chapter,
    /// never returned as the outcome of an operation.
    #[error("skipped '{chapter}': {source}")]
    PartialFetch {
        chapter: String,
        #[source]
        source: FetchError,
    },
}

pub type Result<T> = std::result::Result<T, ScoutError>;
