// Normalizer: raw session tables -> one canonical pitch table.
//
// Per table: tag rows with their source, scale position columns from meters
// to centimeters (once, here and nowhere else), resolve pitch-type aliases,
// and parse dates. Rows without a usable date are dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::io::Read;
use tracing::{debug, warn};

use crate::filter::PitchFilter;
use crate::ingest::{
    self, RawPitchRow, RawTable, SkippedSource, COL_PLATE_LOC_HEIGHT, COL_PLATE_LOC_SIDE,
    COL_REL_POS_HEIGHT, COL_REL_POS_SIDE,
};
use crate::pitch::{canonical_label, BatterSide, PitchRecord};

/// Meters to centimeters.
const POSITION_SCALE: f64 = 100.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

// ---------------------------------------------------------------------------
// Canonical table
// ---------------------------------------------------------------------------

/// The unified, cleaned pitch dataset. Rebuilt from scratch on every reload.
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    records: Vec<PitchRecord>,
    dropped_rows: usize,
}

impl CanonicalTable {
    pub fn records(&self) -> &[PitchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw rows discarded because their date was missing or unparseable.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Distinct pitcher ids, sorted as text.
    pub fn pitchers(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.pitcher.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct source files, sorted.
    pub fn source_files(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.source_file.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows matching `filter`, in table order.
    pub fn filter(&self, filter: &PitchFilter) -> Vec<&PitchRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }
}

/// Result of [`normalize_sources`]: the table plus any sources that were
/// left out because they could not be parsed.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub table: CanonicalTable,
    pub skipped: Vec<SkippedSource>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Build the canonical table from raw tables, in input order.
///
/// Inputs are only borrowed. Because this takes `RawTable`s, an already
/// canonical table can never be scaled a second time.
pub fn normalize(raw_tables: &[RawTable]) -> CanonicalTable {
    let mut records = Vec::with_capacity(raw_tables.iter().map(|t| t.rows.len()).sum());
    let mut dropped_rows = 0;

    for table in raw_tables {
        let scale = PositionScaling::for_table(table);
        let before = records.len();

        for row in &table.rows {
            match normalize_row(row, &table.source_id, &scale) {
                Some(record) => records.push(record),
                None => dropped_rows += 1,
            }
        }

        debug!(
            "normalized {}: kept {} of {} rows",
            table.source_id,
            records.len() - before,
            table.rows.len()
        );
    }

    if dropped_rows > 0 {
        debug!("dropped {} rows with missing or unparseable dates", dropped_rows);
    }

    CanonicalTable {
        records,
        dropped_rows,
    }
}

/// Read and normalize several raw sources. A source that fails to parse is
/// skipped and reported; the others are still normalized.
pub fn normalize_sources<I, S, R>(sources: I) -> NormalizeReport
where
    I: IntoIterator<Item = (S, R)>,
    S: AsRef<str>,
    R: Read,
{
    let mut tables = Vec::new();
    let mut skipped = Vec::new();

    for (source_id, reader) in sources {
        let source_id = source_id.as_ref();
        match ingest::read_table(source_id, reader) {
            Ok(table) => tables.push(table),
            Err(e) => {
                warn!("skipping source {}: {}", source_id, e);
                skipped.push(SkippedSource {
                    source_id: source_id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    NormalizeReport {
        table: normalize(&tables),
        skipped,
    }
}

/// Parse a tracking-export date cell. Accepts plain dates, dates with a time
/// of day, and RFC 3339 timestamps; returns `None` for anything else.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Which position columns a table carries and therefore must be scaled.
struct PositionScaling {
    plate_loc_side: bool,
    plate_loc_height: bool,
    release_pos_side: bool,
    release_pos_height: bool,
}

impl PositionScaling {
    fn for_table(table: &RawTable) -> Self {
        PositionScaling {
            plate_loc_side: table.has_column(COL_PLATE_LOC_SIDE),
            plate_loc_height: table.has_column(COL_PLATE_LOC_HEIGHT),
            release_pos_side: table.has_column(COL_REL_POS_SIDE),
            release_pos_height: table.has_column(COL_REL_POS_HEIGHT),
        }
    }
}

/// NaN cells count as missing, like empty ones.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

fn to_cm(value: Option<f64>, column_present: bool) -> Option<f64> {
    if column_present {
        present(value).map(|m| m * POSITION_SCALE)
    } else {
        None
    }
}

fn normalize_row(row: &RawPitchRow, source_id: &str, scale: &PositionScaling) -> Option<PitchRecord> {
    let date = row.Date.as_deref().and_then(parse_date)?;

    Some(PitchRecord {
        pitcher: row.Pitcher.clone().unwrap_or_default(),
        pitch_type: canonical_label(row.TaggedPitchType.as_deref().unwrap_or_default()).to_string(),
        release_speed: present(row.RelSpeed),
        spin_rate: present(row.SpinRate),
        induced_vert_break: present(row.InducedVertBreak),
        horz_break: present(row.HorzBreak),
        vert_release_angle: present(row.VertRelAngle),
        horz_release_angle: present(row.HorzRelAngle),
        plate_loc_side: to_cm(row.PlateLocSide, scale.plate_loc_side),
        plate_loc_height: to_cm(row.PlateLocHeight, scale.plate_loc_height),
        release_pos_side: to_cm(row.RelPosSide, scale.release_pos_side),
        release_pos_height: to_cm(row.RelPosHeight, scale.release_pos_height),
        batter_side: row.BatterSide.as_deref().and_then(BatterSide::from_label),
        date,
        source_file: source_id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
