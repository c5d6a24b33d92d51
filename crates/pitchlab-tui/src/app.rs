// Application state and command handling.
//
// Holds the canonical table and the user's current selection. Nothing is
// cached: views call `rows_a()` / `rows_b()` on every render and aggregate
// the result fresh.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use pitchlab_core::auth::{AccessGate, AuthSession, AuthState};
use pitchlab_core::config::{Config, StartupMode};
use pitchlab_core::export::{write_report, SummaryReport};
use pitchlab_core::filter::{dates_for, files_for, PitchFilter};
use pitchlab_core::ingest::{scan_dir, SkippedSource};
use pitchlab_core::normalize::{normalize, CanonicalTable};
use pitchlab_core::pitch::PitchRecord;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Which report screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Movement and release-angle plots plus the summary table.
    Report,
    /// Every plot kind for one pitcher plus the summary table.
    Single,
    /// Two pitchers side by side.
    Compare,
}

impl AnalysisMode {
    pub fn next(self) -> Self {
        match self {
            AnalysisMode::Report => AnalysisMode::Single,
            AnalysisMode::Single => AnalysisMode::Compare,
            AnalysisMode::Compare => AnalysisMode::Report,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::Report => "Report",
            AnalysisMode::Single => "Single",
            AnalysisMode::Compare => "Compare",
        }
    }
}

impl From<StartupMode> for AnalysisMode {
    fn from(mode: StartupMode) -> Self {
        match mode {
            StartupMode::Report => AnalysisMode::Report,
            StartupMode::Single => AnalysisMode::Single,
            StartupMode::Compare => AnalysisMode::Compare,
        }
    }
}

/// Sidebar list that receives cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarFocus {
    PitcherA,
    Files,
    Dates,
    PitcherB,
}

impl SidebarFocus {
    /// Next list in Tab order. Pitcher B only exists in compare mode.
    pub fn next(self, mode: AnalysisMode) -> Self {
        match self {
            SidebarFocus::PitcherA => SidebarFocus::Files,
            SidebarFocus::Files => SidebarFocus::Dates,
            SidebarFocus::Dates if mode == AnalysisMode::Compare => SidebarFocus::PitcherB,
            SidebarFocus::Dates | SidebarFocus::PitcherB => SidebarFocus::PitcherA,
        }
    }

    pub fn prev(self, mode: AnalysisMode) -> Self {
        match self {
            SidebarFocus::PitcherA if mode == AnalysisMode::Compare => SidebarFocus::PitcherB,
            SidebarFocus::PitcherA => SidebarFocus::Dates,
            SidebarFocus::Files => SidebarFocus::PitcherA,
            SidebarFocus::Dates => SidebarFocus::Files,
            SidebarFocus::PitcherB => SidebarFocus::Dates,
        }
    }
}

/// Actions the input layer asks the app to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
    Reload,
    Export,
    SubmitPassword,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub table: CanonicalTable,
    /// Sources left out of the last load.
    pub skipped: Vec<SkippedSource>,
    /// Set when the data directory itself could not be read.
    pub load_error: Option<String>,
    gate: AccessGate,
    pub session: AuthSession,
    pub password_input: String,
    pub mode: AnalysisMode,
    pub pitchers: Vec<String>,
    pub pitcher_a: usize,
    pub pitcher_b: usize,
    pub selected_files: BTreeSet<String>,
    pub selected_dates: BTreeSet<String>,
    pub focus: SidebarFocus,
    pub file_cursor: usize,
    pub date_cursor: usize,
    /// One-line feedback for the last action (export path, reload result).
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    /// Build state around an already normalized table.
    pub fn new(config: Config, table: CanonicalTable, skipped: Vec<SkippedSource>) -> Self {
        let gate = AccessGate::new(config.access_password().map(str::to_string));
        let session = gate.start_session();
        let mode = AnalysisMode::from(config.display.mode);
        let pitchers = table.pitchers();

        AppState {
            config,
            table,
            skipped,
            load_error: None,
            gate,
            session,
            password_input: String::new(),
            mode,
            pitchers,
            pitcher_a: 0,
            pitcher_b: 0,
            selected_files: BTreeSet::new(),
            selected_dates: BTreeSet::new(),
            focus: SidebarFocus::PitcherA,
            file_cursor: 0,
            date_cursor: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Scan the configured data directory and build state from it. A missing
    /// or unreadable directory yields an empty table and a visible message.
    pub fn load(config: Config) -> Self {
        let (table, skipped, load_error) = load_table(Path::new(&config.data.dir));
        let mut app = AppState::new(config, table, skipped);
        app.load_error = load_error;
        app
    }

    // -- Access --

    pub fn is_locked(&self) -> bool {
        !self.session.is_granted()
    }

    pub fn auth_state(&self) -> AuthState {
        self.session.state()
    }

    // -- Selection --

    pub fn current_pitcher_a(&self) -> Option<&str> {
        self.pitchers.get(self.pitcher_a).map(String::as_str)
    }

    pub fn current_pitcher_b(&self) -> Option<&str> {
        self.pitchers.get(self.pitcher_b).map(String::as_str)
    }

    /// Session files available for pitcher A.
    pub fn file_options(&self) -> Vec<String> {
        self.current_pitcher_a()
            .map(|p| files_for(self.table.records(), p))
            .unwrap_or_default()
    }

    /// Dates available for pitcher A, most recent first.
    pub fn date_options(&self) -> Vec<String> {
        self.current_pitcher_a()
            .map(|p| dates_for(self.table.records(), p))
            .unwrap_or_default()
    }

    /// Pitcher A with the active file/date selection.
    pub fn filter_a(&self) -> Option<PitchFilter> {
        self.current_pitcher_a().map(|p| {
            PitchFilter::for_pitcher(p)
                .with_files(self.selected_files.iter().cloned())
                .with_dates(self.selected_dates.iter().cloned())
        })
    }

    pub fn rows_a(&self) -> Vec<&PitchRecord> {
        match self.filter_a() {
            Some(filter) => self.table.filter(&filter),
            None => Vec::new(),
        }
    }

    /// Pitcher B's whole history. File/date selections are drawn from
    /// pitcher A's sessions and don't apply here.
    pub fn rows_b(&self) -> Vec<&PitchRecord> {
        match self.current_pitcher_b() {
            Some(p) => self.table.filter(&PitchFilter::for_pitcher(p)),
            None => Vec::new(),
        }
    }

    pub fn is_narrowed(&self) -> bool {
        self.filter_a().is_some_and(|f| f.is_narrowed())
    }

    pub fn select_pitcher_a(&mut self, index: usize) {
        if index >= self.pitchers.len() || index == self.pitcher_a {
            return;
        }
        self.pitcher_a = index;
        self.clear_filters();
    }

    pub fn select_pitcher_b(&mut self, index: usize) {
        if index < self.pitchers.len() {
            self.pitcher_b = index;
        }
    }

    pub fn clear_filters(&mut self) {
        self.selected_files.clear();
        self.selected_dates.clear();
        self.file_cursor = 0;
        self.date_cursor = 0;
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn set_mode(&mut self, mode: AnalysisMode) {
        self.mode = mode;
        if mode != AnalysisMode::Compare && self.focus == SidebarFocus::PitcherB {
            self.focus = SidebarFocus::PitcherA;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.mode);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.mode);
    }

    /// Move the cursor of the focused list. In a pitcher list the cursor is
    /// the selection.
    pub fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            SidebarFocus::PitcherA => {
                let index = step(self.pitcher_a, delta, self.pitchers.len());
                self.select_pitcher_a(index);
            }
            SidebarFocus::PitcherB => {
                let index = step(self.pitcher_b, delta, self.pitchers.len());
                self.select_pitcher_b(index);
            }
            SidebarFocus::Files => {
                self.file_cursor = step(self.file_cursor, delta, self.file_options().len());
            }
            SidebarFocus::Dates => {
                self.date_cursor = step(self.date_cursor, delta, self.date_options().len());
            }
        }
    }

    /// Toggle the file or date under the cursor.
    pub fn toggle_selection(&mut self) {
        match self.focus {
            SidebarFocus::Files => {
                if let Some(file) = self.file_options().get(self.file_cursor).cloned() {
                    toggle(&mut self.selected_files, file);
                }
            }
            SidebarFocus::Dates => {
                if let Some(date) = self.date_options().get(self.date_cursor).cloned() {
                    toggle(&mut self.selected_dates, date);
                }
            }
            SidebarFocus::PitcherA | SidebarFocus::PitcherB => {}
        }
    }

    // -- Commands --

    pub fn handle_command(&mut self, cmd: UserCommand) {
        match cmd {
            UserCommand::Quit => self.should_quit = true,
            UserCommand::Reload => self.reload(),
            UserCommand::Export => self.export_summary(),
            UserCommand::SubmitPassword => {
                let input = std::mem::take(&mut self.password_input);
                match self.gate.attempt(&mut self.session, &input) {
                    AuthState::Granted => info!("access granted"),
                    _ => warn!("rejected password attempt"),
                }
            }
        }
    }

    /// Rebuild the canonical table from disk. Pitcher selections survive by
    /// id; file/date selections are kept only while still valid.
    pub fn reload(&mut self) {
        let (table, skipped, load_error) = load_table(Path::new(&self.config.data.dir));
        let previous_a = self.current_pitcher_a().map(str::to_string);
        let previous_b = self.current_pitcher_b().map(str::to_string);

        self.table = table;
        self.skipped = skipped;
        self.load_error = load_error;
        self.pitchers = self.table.pitchers();
        self.pitcher_a = position_of(&self.pitchers, previous_a.as_deref());
        self.pitcher_b = position_of(&self.pitchers, previous_b.as_deref());

        let files: BTreeSet<String> = self.file_options().into_iter().collect();
        let dates: BTreeSet<String> = self.date_options().into_iter().collect();
        self.selected_files.retain(|f| files.contains(f));
        self.selected_dates.retain(|d| dates.contains(d));
        self.file_cursor = self.file_cursor.min(files.len().saturating_sub(1));
        self.date_cursor = self.date_cursor.min(dates.len().saturating_sub(1));

        info!(
            "reloaded {} pitches for {} pitchers",
            self.table.len(),
            self.pitchers.len()
        );
        self.status_message = Some(format!("Reloaded {} pitches", self.table.len()));
    }

    fn export_summary(&mut self) {
        let Some(filter) = self.filter_a() else {
            self.status_message = Some("Nothing to export".to_string());
            return;
        };
        let pitcher = filter.pitcher.clone().unwrap_or_default();
        let rows = self.table.filter(&filter);
        let report = SummaryReport::build(&pitcher, &filter, &rows);

        self.status_message = Some(match write_report(Path::new(&self.config.export.dir), &report) {
            Ok(path) => format!("Exported {}", path.display()),
            Err(e) => {
                warn!("export failed: {}", e);
                format!("Export failed: {e}")
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_table(dir: &Path) -> (CanonicalTable, Vec<SkippedSource>, Option<String>) {
    match scan_dir(dir) {
        Ok(scan) => {
            let table = normalize(&scan.tables);
            info!(
                "loaded {} pitches from {} files ({} skipped, {} rows without a date)",
                table.len(),
                scan.tables.len(),
                scan.failures.len(),
                table.dropped_rows()
            );
            (table, scan.failures, None)
        }
        Err(e) => {
            warn!("could not load data: {}", e);
            (CanonicalTable::default(), Vec::new(), Some(e.to_string()))
        }
    }
}

/// Clamp `index + delta` into `0..len`.
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(len - 1)
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn position_of(items: &[String], wanted: Option<&str>) -> usize {
    wanted
        .and_then(|w| items.iter().position(|i| i == w))
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pitchlab_core::config::{
        AccessConfig, CredentialsConfig, DataConfig, DisplayConfig, ExportConfig,
    };
    use pitchlab_core::normalize::normalize_sources;

    pub(crate) const SAMPLE_CSV: &str = "\
Pitcher,TaggedPitchType,RelSpeed,SpinRate,InducedVertBreak,HorzBreak,VertRelAngle,HorzRelAngle,Date,RelPosSide,RelPosHeight
0042,Fastball,150.0,2300,48.0,-22.0,-1.2,2.0,2024-04-01,-0.5,1.8
0042,Fastball,152.0,2320,50.0,-20.0,-1.0,2.2,2024-04-01,-0.5,1.8
0042,Slider,130.0,2500,5.0,30.0,-0.5,1.5,2024-04-08,-0.5,1.8
17,Curveball,115.0,2700,-30.0,-15.0,1.5,-1.0,2024-04-08,0.6,1.7";

    pub(crate) fn test_config(data_dir: &str, password: Option<&str>) -> Config {
        Config {
            data: DataConfig {
                dir: data_dir.to_string(),
            },
            display: DisplayConfig::default(),
            export: ExportConfig {
                dir: std::env::temp_dir()
                    .join("pitchlab_app_exports")
                    .display()
                    .to_string(),
            },
            credentials: CredentialsConfig {
                access: password.map(|p| AccessConfig {
                    password: p.to_string(),
                }),
            },
        }
    }

    pub(crate) fn sample_app() -> AppState {
        let report = normalize_sources(vec![
            ("first.csv", SAMPLE_CSV.as_bytes()),
            (
                "second.csv",
                "Pitcher,TaggedPitchType,RelSpeed,Date\n0042,ChangeUp,125.0,2024-04-15\n"
                    .as_bytes(),
            ),
        ]);
        AppState::new(test_config("unused", None), report.table, report.skipped)
    }

    #[test]
    fn new_state_selects_first_pitcher() {
        let app = sample_app();
        assert_eq!(app.pitchers, vec!["0042", "17"]);
        assert_eq!(app.current_pitcher_a(), Some("0042"));
        assert_eq!(app.mode, AnalysisMode::Report);
        assert!(!app.is_locked());
        assert_eq!(app.rows_a().len(), 4);
    }

    #[test]
    fn file_and_date_options_follow_pitcher_a() {
        let mut app = sample_app();
        assert_eq!(app.file_options(), vec!["first.csv", "second.csv"]);
        assert_eq!(
            app.date_options(),
            vec!["2024-04-15", "2024-04-08", "2024-04-01"]
        );

        app.select_pitcher_a(1);
        assert_eq!(app.file_options(), vec!["first.csv"]);
        assert_eq!(app.date_options(), vec!["2024-04-08"]);
    }

    #[test]
    fn toggling_files_narrows_rows() {
        let mut app = sample_app();
        app.focus = SidebarFocus::Files;
        app.move_cursor(1);
        app.toggle_selection();
        assert!(app.is_narrowed());
        assert_eq!(app.rows_a().len(), 1);

        app.toggle_selection();
        assert!(!app.is_narrowed());
        assert_eq!(app.rows_a().len(), 4);
    }

    #[test]
    fn toggling_dates_narrows_rows() {
        let mut app = sample_app();
        app.focus = SidebarFocus::Dates;
        app.move_cursor(2);
        app.toggle_selection();
        assert_eq!(app.selected_dates.iter().next().map(String::as_str), Some("2024-04-01"));
        assert_eq!(app.rows_a().len(), 2);
    }

    #[test]
    fn changing_pitcher_clears_filters() {
        let mut app = sample_app();
        app.selected_files.insert("first.csv".into());
        app.focus = SidebarFocus::PitcherA;
        app.move_cursor(1);
        assert_eq!(app.current_pitcher_a(), Some("17"));
        assert!(app.selected_files.is_empty());
    }

    #[test]
    fn pitcher_b_ignores_filters() {
        let mut app = sample_app();
        app.set_mode(AnalysisMode::Compare);
        app.selected_files.insert("second.csv".into());
        app.select_pitcher_b(0);
        assert_eq!(app.rows_a().len(), 1);
        assert_eq!(app.rows_b().len(), 4);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut app = sample_app();
        app.focus = SidebarFocus::Files;
        app.move_cursor(-3);
        assert_eq!(app.file_cursor, 0);
        app.move_cursor(10);
        assert_eq!(app.file_cursor, 1);
    }

    #[test]
    fn focus_cycle_depends_on_mode() {
        let mut app = sample_app();
        let mut seen = vec![app.focus];
        for _ in 0..3 {
            app.focus_next();
            seen.push(app.focus);
        }
        assert_eq!(
            seen,
            vec![
                SidebarFocus::PitcherA,
                SidebarFocus::Files,
                SidebarFocus::Dates,
                SidebarFocus::PitcherA
            ]
        );

        app.set_mode(AnalysisMode::Compare);
        app.focus_prev();
        assert_eq!(app.focus, SidebarFocus::PitcherB);

        app.set_mode(AnalysisMode::Report);
        assert_eq!(app.focus, SidebarFocus::PitcherA);
    }

    #[test]
    fn mode_cycles() {
        let mut app = sample_app();
        app.cycle_mode();
        assert_eq!(app.mode, AnalysisMode::Single);
        app.cycle_mode();
        assert_eq!(app.mode, AnalysisMode::Compare);
        app.cycle_mode();
        assert_eq!(app.mode, AnalysisMode::Report);
    }

    #[test]
    fn password_flow() {
        let report = normalize_sources(vec![("first.csv", SAMPLE_CSV.as_bytes())]);
        let mut app = AppState::new(test_config("unused", Some("pitch123")), report.table, vec![]);
        assert!(app.is_locked());
        assert_eq!(app.auth_state(), AuthState::Locked);

        app.password_input = "nope".into();
        app.handle_command(UserCommand::SubmitPassword);
        assert!(app.is_locked());
        assert_eq!(app.auth_state(), AuthState::Rejected);
        assert!(app.password_input.is_empty());

        app.password_input = "pitch123".into();
        app.handle_command(UserCommand::SubmitPassword);
        assert!(!app.is_locked());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = sample_app();
        app.handle_command(UserCommand::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn load_with_missing_dir_is_empty_with_message() {
        let dir = std::env::temp_dir().join("pitchlab_app_missing_dir");
        let _ = std::fs::remove_dir_all(&dir);
        let app = AppState::load(test_config(&dir.display().to_string(), None));
        assert!(app.table.is_empty());
        assert!(app.load_error.is_some());
        assert!(app.rows_a().is_empty());
    }

    #[test]
    fn reload_rebuilds_and_keeps_selection() {
        let dir = std::env::temp_dir().join("pitchlab_app_reload");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.csv"), SAMPLE_CSV).unwrap();

        let mut app = AppState::load(test_config(&dir.display().to_string(), None));
        assert_eq!(app.table.len(), 4);
        app.select_pitcher_a(1);
        assert_eq!(app.current_pitcher_a(), Some("17"));

        std::fs::write(
            dir.join("b.csv"),
            "Pitcher,TaggedPitchType,RelSpeed,Date\n0001,Sinker,140.0,2024-05-01\n",
        )
        .unwrap();
        app.handle_command(UserCommand::Reload);

        assert_eq!(app.table.len(), 5);
        assert_eq!(app.pitchers, vec!["0001", "0042", "17"]);
        assert_eq!(app.current_pitcher_a(), Some("17"));
        assert!(app.status_message.is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_writes_file_and_reports_path() {
        let mut app = sample_app();
        app.handle_command(UserCommand::Export);
        let msg = app.status_message.clone().unwrap();
        assert!(msg.starts_with("Exported "), "got {msg}");
        let path = msg.trim_start_matches("Exported ");
        assert!(Path::new(path).exists());
        let _ = std::fs::remove_file(path);
    }
}
