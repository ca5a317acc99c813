pub mod record;

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

pub use record::TelemetryRecord;

// ─── Errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("telemetry file not readable at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse telemetry data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returned to every caller once the startup load has failed.
#[derive(Debug, Clone, Error)]
#[error("telemetry dataset unavailable: {reason}")]
pub struct DatasetUnavailable {
    pub reason: String,
}

// ─── Dataset ─────────────────────────────────────────────────────

/// Immutable, region-indexed view over every loaded record.
/// Records keep their file order inside each region.
#[derive(Debug, Default)]
pub struct Dataset {
    by_region: HashMap<String, Vec<TelemetryRecord>>,
    len: usize,
}

impl Dataset {
    pub fn new(records: Vec<TelemetryRecord>) -> Self {
        let len = records.len();
        let mut by_region: HashMap<String, Vec<TelemetryRecord>> = HashMap::new();
        for rec in records {
            by_region.entry(rec.region.clone()).or_default().push(rec);
        }
        Self { by_region, len }
    }

    /// Parse a JSON array of record objects.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let records: Vec<TelemetryRecord> = serde_json::from_str(raw)?;
        Ok(Self::new(records))
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distinct region names, sorted.
    pub fn regions(&self) -> Vec<&str> {
        self.by_region
            .keys()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All records whose region matches `region` case-insensitively.
    pub fn records_for(&self, region: &str) -> &[TelemetryRecord] {
        self.by_region
            .get(&region.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ─── Lifecycle ───────────────────────────────────────────────────

/// Outcome of the one-shot startup load, held for the process lifetime.
#[derive(Debug)]
pub enum DatasetState {
    Ready(Dataset),
    Unavailable { reason: String },
}

impl DatasetState {
    /// Load `path`, logging the outcome. Never panics on bad data.
    pub fn load(path: &Path) -> Self {
        match Dataset::load(path) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    warn!(path = %path.display(), "telemetry dataset has no records");
                }
                info!(
                    path = %path.display(),
                    records = dataset.len(),
                    regions = dataset.regions().len(),
                    "telemetry dataset loaded"
                );
                Self::Ready(dataset)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "telemetry dataset unavailable");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn dataset(&self) -> Result<&Dataset, DatasetUnavailable> {
        match self {
            Self::Ready(dataset) => Ok(dataset),
            Self::Unavailable { reason } => Err(DatasetUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl From<Dataset> for DatasetState {
    fn from(dataset: Dataset) -> Self {
        Self::Ready(dataset)
    }
}
