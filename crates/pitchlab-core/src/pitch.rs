// Canonical pitch model: pitch-type taxonomy, batter side, and the
// normalized per-pitch record every downstream view reads from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw label some tracking exports use for the four-seam fastball.
pub const FOUR_SEAM_ALIAS: &str = "FourSeamFastBall";

/// Pitch types that get a row in the summary table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchType {
    Fastball,
    Slider,
    Cutter,
    Curveball,
    Splitter,
    ChangeUp,
    Sinker,
    TwoSeamFastBall,
}

impl PitchType {
    /// Every taxonomy member, in summary-table order.
    pub const ALL: [PitchType; 8] = [
        PitchType::Fastball,
        PitchType::Slider,
        PitchType::Cutter,
        PitchType::Curveball,
        PitchType::Splitter,
        PitchType::ChangeUp,
        PitchType::Sinker,
        PitchType::TwoSeamFastBall,
    ];

    /// Parse a canonical label. Exact, case-sensitive match; aliases must
    /// already have been resolved with [`canonical_label`].
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Fastball" => Some(PitchType::Fastball),
            "Slider" => Some(PitchType::Slider),
            "Cutter" => Some(PitchType::Cutter),
            "Curveball" => Some(PitchType::Curveball),
            "Splitter" => Some(PitchType::Splitter),
            "ChangeUp" => Some(PitchType::ChangeUp),
            "Sinker" => Some(PitchType::Sinker),
            "TwoSeamFastBall" => Some(PitchType::TwoSeamFastBall),
            _ => None,
        }
    }

    /// The label as it appears in tracking exports.
    pub fn label(&self) -> &'static str {
        match self {
            PitchType::Fastball => "Fastball",
            PitchType::Slider => "Slider",
            PitchType::Cutter => "Cutter",
            PitchType::Curveball => "Curveball",
            PitchType::Splitter => "Splitter",
            PitchType::ChangeUp => "ChangeUp",
            PitchType::Sinker => "Sinker",
            PitchType::TwoSeamFastBall => "TwoSeamFastBall",
        }
    }

    /// Position in the taxonomy.
    pub fn sort_order(&self) -> u8 {
        match self {
            PitchType::Fastball => 0,
            PitchType::Slider => 1,
            PitchType::Cutter => 2,
            PitchType::Curveball => 3,
            PitchType::Splitter => 4,
            PitchType::ChangeUp => 5,
            PitchType::Sinker => 6,
            PitchType::TwoSeamFastBall => 7,
        }
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve label aliases. Only `FourSeamFastBall` is rewritten; everything
/// else (including unknown labels) passes through untouched.
pub fn canonical_label(raw: &str) -> &str {
    if raw == FOUR_SEAM_ALIAS {
        PitchType::Fastball.label()
    } else {
        raw
    }
}

/// Handedness of the batter faced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatterSide {
    Left,
    Right,
}

impl BatterSide {
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "Left" => Some(BatterSide::Left),
            "Right" => Some(BatterSide::Right),
            _ => None,
        }
    }
}

/// One thrown pitch after normalization.
///
/// Position columns (`plate_loc_*`, `release_pos_*`) are in centimeters.
/// Breaks are in centimeters and angles in degrees as exported. Every
/// measurement is optional: a missing column or an unreadable cell is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchRecord {
    pub pitcher: String,
    /// Canonical label. May be outside the taxonomy.
    pub pitch_type: String,
    pub release_speed: Option<f64>,
    pub spin_rate: Option<f64>,
    pub induced_vert_break: Option<f64>,
    pub horz_break: Option<f64>,
    pub vert_release_angle: Option<f64>,
    pub horz_release_angle: Option<f64>,
    pub plate_loc_side: Option<f64>,
    pub plate_loc_height: Option<f64>,
    pub release_pos_side: Option<f64>,
    pub release_pos_height: Option<f64>,
    pub batter_side: Option<BatterSide>,
    pub date: NaiveDate,
    pub source_file: String,
}

impl PitchRecord {
    /// `YYYY-MM-DD` form of [`PitchRecord::date`], used as the date filter key.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The taxonomy member this pitch belongs to, if any.
    pub fn taxonomy_type(&self) -> Option<PitchType> {
        PitchType::from_label(&self.pitch_type)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
