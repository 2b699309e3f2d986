//! Core library for the `quake` CLI.
//!
//! This crate defines:
//! - Request URL construction for the USGS event query service
//! - A single-attempt HTTP fetcher with fixed timeouts
//! - Lenient decoding of the GeoJSON feed into display-ready records
//! - The fetch pipeline tying those together, and persisted settings
//!
//! It is used by `quake-cli`, but can also be reused by other front ends.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod model;
pub mod parse;
pub mod pipeline;

pub use config::{Config, pipeline_from_config};
pub use endpoint::{USGS_EVENT_QUERY, build_url, build_url_with};
pub use error::FetchError;
pub use fetch::{FeedSource, HttpFetcher};
pub use model::{DisplayZone, QuakeQuery, QuakeRecord, Severity};
pub use parse::{ParsedFeed, QuakeParser};
pub use pipeline::{FetchPipeline, PipelineOutcome};
