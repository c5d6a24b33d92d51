// Row predicates behind the athlete / session-file / date selectors.
//
// An empty selection on a dimension means "don't filter on it".

use std::collections::BTreeSet;

use crate::pitch::PitchRecord;

/// The active selection. Pitcher ids compare as exact strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PitchFilter {
    pub pitcher: Option<String>,
    pub files: BTreeSet<String>,
    pub dates: BTreeSet<String>,
}

impl PitchFilter {
    pub fn for_pitcher(pitcher: impl Into<String>) -> Self {
        PitchFilter {
            pitcher: Some(pitcher.into()),
            ..Default::default()
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates = dates.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, record: &PitchRecord) -> bool {
        if let Some(ref pitcher) = self.pitcher {
            if record.pitcher != *pitcher {
                return false;
            }
        }
        if !self.files.is_empty() && !self.files.contains(&record.source_file) {
            return false;
        }
        if !self.dates.is_empty() && !self.dates.contains(&record.date_key()) {
            return false;
        }
        true
    }

    /// Whether any file or date narrowing is active (as opposed to showing
    /// the pitcher's whole history).
    pub fn is_narrowed(&self) -> bool {
        !self.files.is_empty() || !self.dates.is_empty()
    }
}

/// Session files containing pitches by `pitcher`, sorted ascending.
pub fn files_for(records: &[PitchRecord], pitcher: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.pitcher == pitcher)
        .map(|r| r.source_file.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Date keys on which `pitcher` threw, most recent first.
pub fn dates_for(records: &[PitchRecord], pitcher: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.pitcher == pitcher)
        .map(|r| r.date_key())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
