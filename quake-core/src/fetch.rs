use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::{fmt::Debug, time::Duration};

use crate::error::FetchError;

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Anything that can turn a request URL into the raw feed text.
#[async_trait]
pub trait FeedSource: Send + Sync + Debug {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Single-attempt HTTP GET with fixed connect and read timeouts.
///
/// The response (and the connection it holds) is owned by `fetch` and dropped
/// on every return path, including a failed body read.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeouts(CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    pub fn with_timeouts(connect: Duration, read: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .connect_timeout(connect)
            .read_timeout(read)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl FeedSource for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let res = self.http.get(url.clone()).send().await.map_err(classify)?;

        let status = res.status();
        if status != StatusCode::OK {
            let err = FetchError::HttpStatus { code: status.as_u16() };
            tracing::error!(%url, kind = err.kind(), code = status.as_u16(), "feed request rejected");
            return Err(err);
        }

        let bytes = res.bytes().await.map_err(classify)?;
        tracing::debug!(%url, len = bytes.len(), "feed body received");

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    let classified = if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(truncate(&err.to_string()))
    };

    tracing::error!(kind = classified.kind(), error = %err, "feed request failed");
    classified
}

fn truncate(message: &str) -> String {
    const MAX: usize = 200;
    match message.char_indices().nth(MAX) {
        Some((at, _)) => format!("{}...", &message[..at]),
        None => message.to_string(),
    }
}
