// Aggregator: per-pitch-type summary statistics for a filtered subset.
//
// Groups rows by canonical pitch type, computes counts, usage share, and
// mean/max measurements, and orders the result by the fixed taxonomy.
// Pitch types outside the taxonomy get no row but still count towards the
// usage denominator.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::pitch::{PitchRecord, PitchType};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One row of the summary table.
///
/// Measurements keep full precision; rounding happens only in
/// [`SummaryColumn::cell`]. A mean is `None` when no pitch in the group had
/// that measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchSummary {
    pub pitch_type: PitchType,
    pub count: usize,
    /// `count / total rows in the input`, in 0.0..=1.0.
    pub usage: f64,
    pub avg_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub spin_rate: Option<f64>,
    pub induced_vert_break: Option<f64>,
    pub horz_break: Option<f64>,
    pub vert_release_angle: Option<f64>,
    pub horz_release_angle: Option<f64>,
}

impl PitchSummary {
    /// Usage share with the raw count, e.g. `23.5% (47)`.
    pub fn usage_label(&self) -> String {
        format!("{:.1}% ({})", self.usage * 100.0, self.count)
    }
}

/// Display columns of the summary table, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryColumn {
    PitchType,
    Usage,
    AvgSpeed,
    MaxSpeed,
    SpinRate,
    InducedVertBreak,
    HorzBreak,
    VertRelAngle,
    HorzRelAngle,
}

impl SummaryColumn {
    pub const ALL: [SummaryColumn; 9] = [
        SummaryColumn::PitchType,
        SummaryColumn::Usage,
        SummaryColumn::AvgSpeed,
        SummaryColumn::MaxSpeed,
        SummaryColumn::SpinRate,
        SummaryColumn::InducedVertBreak,
        SummaryColumn::HorzBreak,
        SummaryColumn::VertRelAngle,
        SummaryColumn::HorzRelAngle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SummaryColumn::PitchType => "Pitch Type",
            SummaryColumn::Usage => "Usage (Count)",
            SummaryColumn::AvgSpeed => "Avg Speed (km/h)",
            SummaryColumn::MaxSpeed => "Max Speed (km/h)",
            SummaryColumn::SpinRate => "Spin Rate (rpm)",
            SummaryColumn::InducedVertBreak => "Induced Vert Break (cm)",
            SummaryColumn::HorzBreak => "Horz Break (cm)",
            SummaryColumn::VertRelAngle => "Vert Release Angle (deg)",
            SummaryColumn::HorzRelAngle => "Horz Release Angle (deg)",
        }
    }

    /// Compact header for narrow panels.
    pub fn short_label(&self) -> &'static str {
        match self {
            SummaryColumn::PitchType => "Type",
            SummaryColumn::Usage => "Usage",
            SummaryColumn::AvgSpeed => "Avg",
            SummaryColumn::MaxSpeed => "Max",
            SummaryColumn::SpinRate => "Spin",
            SummaryColumn::InducedVertBreak => "IVB",
            SummaryColumn::HorzBreak => "HB",
            SummaryColumn::VertRelAngle => "VRA",
            SummaryColumn::HorzRelAngle => "HRA",
        }
    }

    /// Formatted cell text. Numbers use one decimal place; missing values
    /// render as `-`.
    pub fn cell(&self, row: &PitchSummary) -> String {
        match self {
            SummaryColumn::PitchType => row.pitch_type.label().to_string(),
            SummaryColumn::Usage => row.usage_label(),
            SummaryColumn::AvgSpeed => format_stat(row.avg_speed),
            SummaryColumn::MaxSpeed => format_stat(row.max_speed),
            SummaryColumn::SpinRate => format_stat(row.spin_rate),
            SummaryColumn::InducedVertBreak => format_stat(row.induced_vert_break),
            SummaryColumn::HorzBreak => format_stat(row.horz_break),
            SummaryColumn::VertRelAngle => format_stat(row.vert_release_angle),
            SummaryColumn::HorzRelAngle => format_stat(row.horz_release_angle),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Summarize a filtered subset. Empty input gives an empty result.
pub fn summarize(rows: &[&PitchRecord]) -> Vec<PitchSummary> {
    if rows.is_empty() {
        return Vec::new();
    }
    let total = rows.len() as f64;

    // BTreeMap over PitchType iterates in taxonomy order.
    let mut groups: BTreeMap<PitchType, GroupAcc> = BTreeMap::new();
    for row in rows {
        if let Some(pt) = row.taxonomy_type() {
            groups.entry(pt).or_default().push(row);
        }
    }

    groups
        .into_iter()
        .map(|(pitch_type, acc)| PitchSummary {
            pitch_type,
            count: acc.count,
            usage: acc.count as f64 / total,
            avg_speed: acc.speed.mean(),
            max_speed: acc.max_speed,
            spin_rate: acc.spin.mean(),
            induced_vert_break: acc.ivb.mean(),
            horz_break: acc.hb.mean(),
            vert_release_angle: acc.vra.mean(),
            horz_release_angle: acc.hra.mean(),
        })
        .collect()
}

/// Rows whose pitch type has no summary row. Together with the summary
/// counts this always adds up to `rows.len()`.
pub fn uncategorized_count(rows: &[&PitchRecord]) -> usize {
    rows.iter().filter(|r| r.taxonomy_type().is_none()).count()
}

/// One-decimal display form of a statistic.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Accumulators
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MeanAcc {
    sum: f64,
    n: usize,
}

impl MeanAcc {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

#[derive(Debug, Default)]
struct GroupAcc {
    count: usize,
    speed: MeanAcc,
    max_speed: Option<f64>,
    spin: MeanAcc,
    ivb: MeanAcc,
    hb: MeanAcc,
    vra: MeanAcc,
    hra: MeanAcc,
}

impl GroupAcc {
    fn push(&mut self, row: &PitchRecord) {
        self.count += 1;
        self.speed.push(row.release_speed);
        if let Some(v) = row.release_speed {
            self.max_speed = Some(self.max_speed.map_or(v, |m| m.max(v)));
        }
        self.spin.push(row.spin_rate);
        self.ivb.push(row.induced_vert_break);
        self.hb.push(row.horz_break);
        self.vra.push(row.vert_release_angle);
        self.hra.push(row.horz_release_angle);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
