// End-to-end pipeline tests: fixture CSVs -> canonical table -> summaries.

use std::path::PathBuf;

use pitchlab_core::filter::{dates_for, files_for, PitchFilter};
use pitchlab_core::ingest::{self, scan_dir};
use pitchlab_core::normalize::{normalize, normalize_sources, CanonicalTable};
use pitchlab_core::pitch::{PitchRecord, PitchType};
use pitchlab_core::scatter::{scatter_series, ScatterKind};
use pitchlab_core::summary::{summarize, uncategorized_count, SummaryColumn};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn load_fixtures() -> CanonicalTable {
    let scan = scan_dir(&fixtures_dir()).expect("fixtures dir should exist");
    normalize(&scan.tables)
}

#[test]
fn scan_skips_ragged_file_and_keeps_the_rest() {
    let scan = scan_dir(&fixtures_dir()).unwrap();
    let loaded: Vec<&str> = scan.tables.iter().map(|t| t.source_id.as_str()).collect();
    assert_eq!(loaded, vec!["session_0401.csv", "session_0408.csv"]);
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].source_id, "ragged.csv");
}

#[test]
fn canonical_table_shape() {
    let table = load_fixtures();
    assert_eq!(table.len(), 8);
    assert_eq!(table.dropped_rows(), 1);
    assert_eq!(table.pitchers(), vec!["0042", "42"]);
    assert_eq!(
        table.source_files(),
        vec!["session_0401.csv", "session_0408.csv"]
    );
    assert!(table
        .records()
        .iter()
        .all(|r| r.pitch_type != "FourSeamFastBall"));
}

#[test]
fn position_columns_scaled_where_present() {
    let table = load_fixtures();
    let first = &table.records()[0];
    assert!((first.plate_loc_side.unwrap() - 10.0).abs() < 1e-9);
    assert!((first.release_pos_height.unwrap() - 178.0).abs() < 1e-9);

    let later: Vec<&PitchRecord> = table
        .records()
        .iter()
        .filter(|r| r.source_file == "session_0408.csv")
        .collect();
    assert!(later.iter().all(|r| r.plate_loc_side.is_none()));
}

#[test]
fn full_history_summary() {
    let table = load_fixtures();
    let rows = table.filter(&PitchFilter::for_pitcher("0042"));
    assert_eq!(rows.len(), 7);

    let summary = summarize(&rows);
    let types: Vec<PitchType> = summary.iter().map(|s| s.pitch_type).collect();
    assert_eq!(
        types,
        vec![PitchType::Fastball, PitchType::Slider, PitchType::ChangeUp]
    );

    let fastball = &summary[0];
    assert_eq!(fastball.count, 3);
    assert_eq!(fastball.avg_speed, Some(147.0));
    assert_eq!(fastball.max_speed, Some(149.0));
    assert_eq!(fastball.usage_label(), "42.9% (3)");

    let slider = &summary[1];
    assert_eq!(slider.count, 2);
    assert_eq!(slider.avg_speed, Some(128.0));
    assert_eq!(slider.spin_rate, Some(2525.0));
    assert_eq!(slider.usage_label(), "28.6% (2)");

    assert_eq!(summary[2].usage_label(), "14.3% (1)");

    let counted: usize = summary.iter().map(|s| s.count).sum();
    assert_eq!(counted + uncategorized_count(&rows), rows.len());
}

#[test]
fn file_and_date_filters_narrow_the_summary() {
    let table = load_fixtures();
    let records = table.records();

    assert_eq!(
        files_for(records, "0042"),
        vec!["session_0401.csv", "session_0408.csv"]
    );
    assert_eq!(dates_for(records, "0042"), vec!["2024-04-08", "2024-04-01"]);

    let by_file = PitchFilter::for_pitcher("0042").with_files(["session_0408.csv"]);
    let summary = summarize(&table.filter(&by_file));
    let usage: Vec<String> = summary.iter().map(|s| s.usage_label()).collect();
    assert_eq!(usage, vec!["33.3% (1)", "33.3% (1)", "33.3% (1)"]);

    let by_date = PitchFilter::for_pitcher("0042").with_dates(["2024-04-01"]);
    assert_eq!(table.filter(&by_date).len(), 4);
}

#[test]
fn leading_zero_ids_stay_distinct() {
    let table = load_fixtures();
    assert_eq!(table.filter(&PitchFilter::for_pitcher("42")).len(), 1);
    assert_eq!(table.filter(&PitchFilter::for_pitcher("0042")).len(), 7);
}

#[test]
fn release_point_missing_for_sessions_without_it() {
    let table = load_fixtures();
    let filter = PitchFilter::for_pitcher("0042").with_files(["session_0408.csv"]);
    let rows = table.filter(&filter);
    assert!(scatter_series(&rows, ScatterKind::ReleasePoint).is_empty());
    assert!(!scatter_series(&rows, ScatterKind::Movement).is_empty());
}

#[test]
fn empty_subset_renders_nothing() {
    let table = load_fixtures();
    let rows = table.filter(&PitchFilter::for_pitcher("nobody"));
    assert!(rows.is_empty());
    assert!(summarize(&rows).is_empty());
}

#[test]
fn spec_example_from_raw_rows() {
    let csv_data = "\
Pitcher,TaggedPitchType,RelSpeed,Date
42,Fastball,150.0,2024-06-01
42,Fastball,152.0,2024-06-01
42,Slider,130.0,2024-06-01";
    let report = normalize_sources(vec![("one.csv", csv_data.as_bytes())]);
    let rows = report.table.filter(&PitchFilter::for_pitcher("42"));
    let summary = summarize(&rows);

    let cells: Vec<Vec<String>> = summary
        .iter()
        .map(|s| {
            [
                SummaryColumn::PitchType,
                SummaryColumn::Usage,
                SummaryColumn::AvgSpeed,
                SummaryColumn::MaxSpeed,
            ]
            .iter()
            .map(|c| c.cell(s))
            .collect()
        })
        .collect();
    assert_eq!(
        cells,
        vec![
            vec!["Fastball", "66.7% (2)", "151.0", "152.0"],
            vec!["Slider", "33.3% (1)", "130.0", "130.0"],
        ]
    );
}

#[test]
fn single_file_load_uses_file_name_as_source() {
    let table = ingest::load_file(&fixtures_dir().join("session_0408.csv")).unwrap();
    assert_eq!(table.source_id, "session_0408.csv");
    assert_eq!(table.rows.len(), 3);
}
