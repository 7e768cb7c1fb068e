use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use strum_macros::Display;

use crate::error::{RError, RResult};

pub const DEFAULT_DATASET: &str = "unified_routes.json";

/// Transport mode of a single segment record. Kinds the upstream
/// reconciliation does not produce map to `Unknown` instead of failing the
/// whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(from = "String")]
#[strum(serialize_all = "lowercase")]
pub enum SegmentKind {
    Train,
    Flight,
    Unknown,
}

impl From<String> for SegmentKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "train" => Self::Train,
            "flight" => Self::Flight,
            _ => Self::Unknown,
        }
    }
}

/// One row of the unified segment list produced by the upstream
/// preprocessor. Train and flight datasets are already reconciled into this
/// shape; the optimizer treats the file as an immutable snapshot.
///
/// The upstream data is ragged: last stops of a train run carry no
/// destination, flight rows may lack clock times, and numeric fields can be
/// null. All of that is representable here and resolved at graph build time.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub unique_id: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub cost_inr: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub train_name: Option<String>,
    #[serde(default)]
    pub airline: Option<String>,
}

impl SegmentRecord {
    /// Display name of the underlying service: the train name for trains,
    /// the airline for flights.
    pub fn display_name(&self) -> &str {
        let name = match self.kind {
            SegmentKind::Train => self.train_name.as_deref(),
            SegmentKind::Flight => self.airline.as_deref(),
            SegmentKind::Unknown => None,
        };
        name.unwrap_or("N/A")
    }
}

/// Reads the unified segment list. A missing file is reported with the
/// fixed caller-visible message; a present but unreadable file surfaces as
/// an io/serde error.
pub fn load_segments(path: &Path) -> RResult<Vec<SegmentRecord>> {
    if !path.exists() {
        return Err(RError::DatasetMissing(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let records = serde_json::from_reader(reader)?;
    Ok(records)
}
