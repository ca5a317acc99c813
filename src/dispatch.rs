use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::{self, RegionMetrics};
use crate::telemetry::Dataset;

// ─── Request ─────────────────────────────────────────────────────

/// One query from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricsRequest {
    /// Region names as typed by the caller; duplicates and unknowns allowed.
    pub regions: Vec<String>,
    #[serde(deserialize_with = "lax_integer")]
    pub threshold_ms: i64,
}

/// Accepts `150`, `150.0` and `"150"`; rejects `150.5`.
fn lax_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntegerLike {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match IntegerLike::deserialize(deserializer)? {
        IntegerLike::Int(v) => Ok(v),
        IntegerLike::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        IntegerLike::Float(v) => Err(de::Error::custom(format!(
            "expected a whole number, got {v}"
        ))),
        IntegerLike::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            de::Error::custom(format!("expected an integer, got {s:?}"))
        }),
    }
}

// ─── Per-region result ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RegionResult {
    Metrics(RegionMetrics),
    /// `name` is the caller's spelling, not the lower-cased lookup key.
    NotFound { name: String },
}

impl RegionResult {
    pub fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_owned(),
        }
    }

    pub fn metrics(&self) -> Option<&RegionMetrics> {
        match self {
            Self::Metrics(m) => Some(m),
            Self::NotFound { .. } => None,
        }
    }

    /// The message carried by the `error` entry, if this is one.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Metrics(_) => None,
            Self::NotFound { name } => Some(format!("No data found for region '{name}'")),
        }
    }
}

impl Serialize for RegionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Metrics(m) => m.serialize(serializer),
            Self::NotFound { .. } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &self.error_message())?;
                map.end()
            }
        }
    }
}

// ─── Response ────────────────────────────────────────────────────

/// Region → result mapping that serializes in first-insertion order.
///
/// Re-inserting an existing key replaces the value but keeps the key's
/// original position, so a repeated region shows up once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsResponse {
    entries: Vec<(String, RegionResult)>,
}

impl MetricsResponse {
    pub fn insert(&mut self, region: String, result: RegionResult) {
        match self.entries.iter_mut().find(|(k, _)| *k == region) {
            Some((_, slot)) => *slot = result,
            None => self.entries.push((region, result)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionResult)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
impl MetricsResponse {
    pub fn get(&self, region: &str) -> Option<&RegionResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == region)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MetricsResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (region, result) in &self.entries {
            map.serialize_entry(region, result)?;
        }
        map.end()
    }
}

// ─── Dispatcher ──────────────────────────────────────────────────

/// Compute one result per requested region, in request order.
pub fn handle(request: &MetricsRequest, dataset: &Dataset) -> MetricsResponse {
    let mut response = MetricsResponse::default();

    for region in &request.regions {
        let records = dataset.records_for(region);
        debug!(region = %region, matched = records.len(), "region lookup");

        let result = if records.is_empty() {
            RegionResult::not_found(region)
        } else {
            RegionResult::Metrics(metrics::compute(records, request.threshold_ms))
        };
        response.insert(region.clone(), result);
    }

    response
}
