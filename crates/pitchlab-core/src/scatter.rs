// Scatter-plot series: per-pitch-type point clouds for the chart views.
//
// Unlike the summary table, labels outside the taxonomy are plotted too
// (after the taxonomy types, alphabetically).

use std::collections::BTreeMap;

use crate::pitch::{PitchRecord, PitchType};

/// Which pair of measurements a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterKind {
    /// Horizontal break vs induced vertical break, cm.
    Movement,
    /// Horizontal vs vertical release angle, degrees.
    ReleaseAngle,
    /// Release side vs release height, cm.
    ReleasePoint,
    /// Plate location side vs height, cm.
    PlateLocation,
}

impl ScatterKind {
    pub const ALL: [ScatterKind; 4] = [
        ScatterKind::Movement,
        ScatterKind::ReleaseAngle,
        ScatterKind::ReleasePoint,
        ScatterKind::PlateLocation,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ScatterKind::Movement => "Movement [cm]",
            ScatterKind::ReleaseAngle => "Release Angle [deg]",
            ScatterKind::ReleasePoint => "Release Point [cm]",
            ScatterKind::PlateLocation => "Plate Location [cm]",
        }
    }

    pub fn x_label(&self) -> &'static str {
        match self {
            ScatterKind::Movement => "Horz Break",
            ScatterKind::ReleaseAngle => "Horz Angle",
            ScatterKind::ReleasePoint => "Side",
            ScatterKind::PlateLocation => "Side",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ScatterKind::Movement => "IVB",
            ScatterKind::ReleaseAngle => "Vert Angle",
            ScatterKind::ReleasePoint => "Height",
            ScatterKind::PlateLocation => "Height",
        }
    }

    /// Fixed axis range for the x axis.
    pub fn x_bounds(&self) -> [f64; 2] {
        match self {
            ScatterKind::Movement => [-80.0, 80.0],
            ScatterKind::ReleaseAngle => [-6.0, 6.0],
            ScatterKind::ReleasePoint => [-150.0, 150.0],
            ScatterKind::PlateLocation => [-80.0, 80.0],
        }
    }

    /// Fixed axis range for the y axis.
    pub fn y_bounds(&self) -> [f64; 2] {
        match self {
            ScatterKind::Movement => [-80.0, 80.0],
            ScatterKind::ReleaseAngle => [-6.0, 6.0],
            ScatterKind::ReleasePoint => [0.0, 300.0],
            ScatterKind::PlateLocation => [-20.0, 140.0],
        }
    }

    /// Message shown when a subset has nothing to plot for this kind.
    pub fn empty_message(&self) -> &'static str {
        match self {
            ScatterKind::Movement => "No movement data.",
            ScatterKind::ReleaseAngle => "No release angle data.",
            ScatterKind::ReleasePoint => "No release position data in these sessions.",
            ScatterKind::PlateLocation => "No plate location data in these sessions.",
        }
    }

    fn point(&self, r: &PitchRecord) -> Option<(f64, f64)> {
        let (x, y) = match self {
            ScatterKind::Movement => (r.horz_break, r.induced_vert_break),
            ScatterKind::ReleaseAngle => (r.horz_release_angle, r.vert_release_angle),
            ScatterKind::ReleasePoint => (r.release_pos_side, r.release_pos_height),
            ScatterKind::PlateLocation => (r.plate_loc_side, r.plate_loc_height),
        };
        Some((x?, y?))
    }
}

/// Points for one pitch type.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    /// `None` for labels outside the taxonomy.
    pub pitch_type: Option<PitchType>,
    pub points: Vec<(f64, f64)>,
}

/// Build one series per pitch type with at least one plottable point.
/// An empty result means there is nothing to draw for `kind`.
pub fn scatter_series(rows: &[&PitchRecord], kind: ScatterKind) -> Vec<ScatterSeries> {
    let mut known: BTreeMap<PitchType, Vec<(f64, f64)>> = BTreeMap::new();
    let mut other: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();

    for row in rows {
        let Some(point) = kind.point(row) else {
            continue;
        };
        match row.taxonomy_type() {
            Some(pt) => known.entry(pt).or_default().push(point),
            None => other.entry(row.pitch_type.as_str()).or_default().push(point),
        }
    }

    let known = known.into_iter().map(|(pt, points)| ScatterSeries {
        label: pt.label().to_string(),
        pitch_type: Some(pt),
        points,
    });
    let other = other.into_iter().map(|(label, points)| ScatterSeries {
        label: if label.is_empty() {
            "(untagged)".to_string()
        } else {
            label.to_string()
        },
        pitch_type: None,
        points,
    });
    known.chain(other).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
