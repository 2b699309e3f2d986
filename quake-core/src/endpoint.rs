use reqwest::Url;

use crate::{error::FetchError, model::QuakeQuery};

/// USGS FDSN event query endpoint.
pub const USGS_EVENT_QUERY: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Appends `params` to `base` in the given order, percent-encoding names and
/// values. Existing query pairs on `base` are kept. Only http and https bases
/// are accepted.
pub fn build_url_with(base: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    let malformed = |reason: String| FetchError::MalformedEndpoint {
        endpoint: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| malformed(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!("unsupported scheme '{}'", url.scheme())));
    }

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params {
            pairs.append_pair(name, value);
        }
    }

    tracing::debug!(%url, "built request url");
    Ok(url)
}

/// Request URL for a feed query against `base`.
pub fn build_url(base: &str, query: &QuakeQuery) -> Result<Url, FetchError> {
    build_url_with(base, &query.params())
}
