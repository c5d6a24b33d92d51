// Raw pitch-tracking CSV loading.
//
// Reads TrackMan-style session exports into loosely-typed `RawTable`s. Every
// column is optional and extra columns are ignored; the Normalizer decides
// what a usable pitch is. A file with broken CSV structure is rejected as a
// whole so one bad export can't leak half its rows into the canonical table.

use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_PLATE_LOC_SIDE: &str = "PlateLocSide";
pub const COL_PLATE_LOC_HEIGHT: &str = "PlateLocHeight";
pub const COL_REL_POS_SIDE: &str = "RelPosSide";
pub const COL_REL_POS_HEIGHT: &str = "RelPosHeight";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {source_id}: {source}")]
    Csv {
        source_id: String,
        source: csv::Error,
    },

    #[error("data directory not found: {}", path.display())]
    MissingDir { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One CSV row as exported by the tracking system. Numeric cells that can't
/// be parsed are read as `None` rather than failing the row.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(non_snake_case)]
pub struct RawPitchRow {
    /// Kept as text so ids like `0042` survive untouched.
    #[serde(default)]
    pub Pitcher: Option<String>,
    #[serde(default)]
    pub TaggedPitchType: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub RelSpeed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub SpinRate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub InducedVertBreak: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub HorzBreak: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub VertRelAngle: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub HorzRelAngle: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub PlateLocSide: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub PlateLocHeight: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub RelPosSide: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub RelPosHeight: Option<f64>,
    #[serde(default)]
    pub BatterSide: Option<String>,
    #[serde(default)]
    pub Date: Option<String>,
}

/// All rows of one source plus the header set it was read with.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub source_id: String,
    pub columns: HashSet<String>,
    pub rows: Vec<RawPitchRow>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }
}

/// A source that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub source_id: String,
    pub reason: String,
}

/// Outcome of scanning a data directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub tables: Vec<RawTable>,
    pub failures: Vec<SkippedSource>,
}

// ---------------------------------------------------------------------------
// Reader-based loading
// ---------------------------------------------------------------------------

/// Read one raw table. Any structural CSV problem (ragged rows, bad UTF-8)
/// fails the whole table.
pub fn read_table<R: Read>(source_id: &str, rdr: R) -> Result<RawTable, IngestError> {
    let csv_err = |e: csv::Error| IngestError::Csv {
        source_id: source_id.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let columns: HashSet<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = reader
        .deserialize::<RawPitchRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    Ok(RawTable {
        source_id: source_id.to_string(),
        columns,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Path-based loading
// ---------------------------------------------------------------------------

/// Load a single CSV file. The source id is the file name.
pub fn load_file(path: &Path) -> Result<RawTable, IngestError> {
    let source_id = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    read_table(&source_id, file)
}

/// Load every `*.csv` file in `dir`, in file-name order.
///
/// Files that fail to load are logged and reported in
/// [`ScanResult::failures`]; they never stop the scan.
pub fn scan_dir(dir: &Path) -> Result<ScanResult, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::MissingDir {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut result = ScanResult::default();
    for path in paths {
        match load_file(&path) {
            Ok(table) => {
                info!("loaded {} ({} rows)", table.source_id, table.rows.len());
                result.tables.push(table);
            }
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                result.failures.push(SkippedSource {
                    source_id: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
