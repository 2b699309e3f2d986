use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    endpoint::build_url,
    error::FetchError,
    fetch::{FeedSource, HttpFetcher},
    model::{DisplayZone, QuakeQuery, QuakeRecord},
    parse::QuakeParser,
};

/// Demo record: magnitude 0.0 at 2019-07-23 01:59 UTC.
const SAMPLE_MAGNITUDE: f64 = 0.0;
const SAMPLE_PLACE: &str = "#Test Data of Test Data Location#";
const SAMPLE_TIME_MS: i64 = 1_563_847_140_000;
const SAMPLE_URL: &str = "https://www.google.co.in";

/// What one pipeline run produced. `failure` is `None` on a clean fetch,
/// even when `records` is empty.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub records: Vec<QuakeRecord>,
    pub failure: Option<FetchError>,
}

impl PipelineOutcome {
    fn failed(err: FetchError) -> Self {
        Self { records: Vec::new(), failure: Some(err) }
    }
}

/// Build URL, fetch, parse: one self-contained unit of work per run.
///
/// Cloning is cheap; clones share the underlying [`FeedSource`].
#[derive(Debug, Clone)]
pub struct FetchPipeline {
    endpoint: String,
    source: Arc<dyn FeedSource>,
    parser: QuakeParser,
    sample_record: bool,
}

impl FetchPipeline {
    pub fn new(endpoint: impl Into<String>, source: Arc<dyn FeedSource>, zone: DisplayZone) -> Self {
        Self {
            endpoint: endpoint.into(),
            source,
            parser: QuakeParser::new(zone),
            sample_record: false,
        }
    }

    /// Pipeline backed by a real [`HttpFetcher`] with the default timeouts.
    pub fn http(endpoint: impl Into<String>, zone: DisplayZone) -> Result<Self, FetchError> {
        Ok(Self::new(endpoint, Arc::new(HttpFetcher::new()?), zone))
    }

    /// Append the fixed demo record to every successful run.
    pub fn with_sample_record(mut self, enabled: bool) -> Self {
        self.sample_record = enabled;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn run(&self, query: &QuakeQuery) -> PipelineOutcome {
        let url = match build_url(&self.endpoint, query) {
            Ok(url) => url,
            Err(err) => {
                tracing::error!(error = %err, "cannot build feed request");
                return PipelineOutcome::failed(err);
            }
        };

        let body = match self.source.fetch(&url).await {
            Ok(body) => body,
            Err(err) => return PipelineOutcome::failed(err),
        };

        let parsed = self.parser.parse(&body);
        if let Some(err) = parsed.failure {
            return PipelineOutcome::failed(err);
        }

        let mut records = parsed.records;
        if self.sample_record {
            records.push(QuakeRecord::new(
                SAMPLE_MAGNITUDE,
                SAMPLE_PLACE,
                SAMPLE_TIME_MS,
                SAMPLE_URL,
                &self.parser.zone(),
            ));
        }

        PipelineOutcome { records, failure: None }
    }

    /// Runs the pipeline on a background task. `query` is captured as a
    /// snapshot; the caller should not start another run until this one
    /// resolves.
    pub fn spawn(&self, query: QuakeQuery) -> JoinHandle<PipelineOutcome> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.run(&query).await })
    }
}
