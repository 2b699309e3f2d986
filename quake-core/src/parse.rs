//! Lenient decoding of the USGS GeoJSON feed.
//!
//! Only the feed envelope is strict: the body must be a JSON object with a
//! `features` array. Inside each feature the four properties are read
//! best-effort, so a missing or retyped field degrades that one record to a
//! zero value instead of failing the batch. This keeps the client working
//! when the upstream schema drifts.

use serde_json::{Map, Value};

use crate::{
    error::FetchError,
    model::{DisplayZone, QuakeRecord},
};

/// Result of decoding one feed body.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub records: Vec<QuakeRecord>,
    /// Set when the body was not a usable feed; `records` is then empty.
    pub failure: Option<FetchError>,
}

#[derive(Debug, Clone, Default)]
pub struct QuakeParser {
    zone: DisplayZone,
}

impl QuakeParser {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Decodes `json` into records in feed order. Blank input yields no
    /// records and no failure.
    pub fn parse(&self, json: &str) -> ParsedFeed {
        if json.trim().is_empty() {
            return ParsedFeed::default();
        }

        let features = match feature_array(json) {
            Ok(features) => features,
            Err(reason) => {
                tracing::error!(%reason, "problem parsing the earthquake feed");
                return ParsedFeed { records: Vec::new(), failure: Some(FetchError::Parse(reason)) };
            }
        };

        let records: Vec<QuakeRecord> =
            features.iter().enumerate().map(|(i, f)| self.record(i, f)).collect();

        tracing::debug!(count = records.len(), "parsed earthquake feed");
        ParsedFeed { records, failure: None }
    }

    fn record(&self, index: usize, feature: &Value) -> QuakeRecord {
        let empty = Map::new();
        let properties = match feature.get("properties").and_then(Value::as_object) {
            Some(properties) => properties,
            None => {
                tracing::warn!(index, "feature has no properties object");
                &empty
            }
        };

        let magnitude = lenient_f64(properties.get("mag")).unwrap_or_else(|| {
            tracing::warn!(index, "feature has no usable magnitude");
            0.0
        });
        let place = lenient_string(properties.get("place"));
        let url = lenient_string(properties.get("url"));
        let time = lenient_i64(properties.get("time")).unwrap_or_else(|| {
            tracing::warn!(index, "feature has no usable time");
            0
        });

        QuakeRecord::new(magnitude, place, time, url, &self.zone)
    }
}

fn feature_array(json: &str) -> Result<Vec<Value>, String> {
    let mut doc: Value =
        serde_json::from_str(json).map_err(|e| format!("invalid JSON: {e}"))?;

    match doc.get_mut("features").map(Value::take) {
        Some(Value::Array(features)) => Ok(features),
        Some(_) => Err("`features` is not an array".to_string()),
        None => Err("no `features` array in feed".to_string()),
    }
}

fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
