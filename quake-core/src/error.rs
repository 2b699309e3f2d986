use thiserror::Error;

/// Failure classes produced while fetching and decoding the feed.
///
/// Every failure is turned into one of these values at the boundary where it
/// happens; none of them is allowed to escape as a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The base endpoint string is not a syntactically valid URL.
    #[error("malformed endpoint '{endpoint}': {reason}")]
    MalformedEndpoint { endpoint: String, reason: String },

    /// DNS failure, refused or reset connection, or a broken read.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with anything other than 200.
    #[error("server responded with HTTP status {code}")]
    HttpStatus { code: u16 },

    /// The connect or read phase exceeded its fixed budget.
    #[error("request timed out")]
    Timeout,

    /// The body was not JSON or had no `features` array.
    #[error("could not parse earthquake feed: {0}")]
    Parse(String),
}

impl FetchError {
    /// True when the failure means the device could not reach the service at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Timeout)
    }

    /// Short stable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MalformedEndpoint { .. } => "malformed_endpoint",
            FetchError::Network(_) => "network",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::Timeout => "timeout",
            FetchError::Parse(_) => "parse",
        }
    }
}
