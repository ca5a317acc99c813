use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One observed sample. Fields other than these three are dropped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Always lower-case once deserialized.
    #[serde(deserialize_with = "lowercase")]
    pub region: String,
    #[serde(deserialize_with = "coerce_f64")]
    pub latency_ms: f64,
    /// Percentage (0–100), not clamped.
    #[serde(deserialize_with = "coerce_f64")]
    pub uptime_pct: f64,
}

impl TelemetryRecord {
    pub fn new(region: &str, latency_ms: f64, uptime_pct: f64) -> Self {
        Self {
            region: region.to_lowercase(),
            latency_ms,
            uptime_pct,
        }
    }
}

// ─── Field coercion ──────────────────────────────────────────────

fn lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.to_lowercase())
}

/// Accepts a JSON number or a numeric string (`"12.5"`), like a float cast.
/// `null` becomes NaN and is treated as a missing sample downstream.
fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberLike {
        Number(f64),
        Text(String),
    }

    match Option::<NumberLike>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(NumberLike::Number(v)) => Ok(v),
        Some(NumberLike::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
            de::Error::custom(format!("could not convert string to float: {s:?}"))
        }),
    }
}
