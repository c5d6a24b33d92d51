// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns the AppState for the lifetime of the session. Key presses
// mutate it directly or produce a UserCommand; every render tick draws the
// current state from scratch at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use pitchlab_core::pitch::PitchRecord;
use pitchlab_core::scatter::ScatterKind;

use crate::app::{AnalysisMode, AppState};
use layout::{build_layout, split_compare, split_report, split_single};

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw one frame: the login prompt while locked, the dashboard otherwise.
pub fn render_frame(frame: &mut Frame, app: &AppState) {
    let layout = build_layout(frame.area());

    if app.is_locked() {
        widgets::login::render(frame, layout.main_panel.union(layout.sidebar), app);
        widgets::help_bar::render(frame, layout.help_bar, true);
        return;
    }

    widgets::status_bar::render(frame, layout.status_bar, app);
    widgets::sidebar::render(frame, layout.sidebar, app);
    render_main_panel(frame, layout.main_panel, app);
    widgets::help_bar::render(frame, layout.help_bar, false);
}

fn render_main_panel(frame: &mut Frame, area: Rect, app: &AppState) {
    if app.table.is_empty() {
        render_notice(frame, area, &no_data_message(app));
        return;
    }

    let rows_a = app.rows_a();
    if rows_a.is_empty() && app.mode != AnalysisMode::Compare {
        render_notice(frame, area, "No pitches match the current selection.");
        return;
    }

    match app.mode {
        AnalysisMode::Report => {
            let split = split_report(area);
            let kinds = [ScatterKind::Movement, ScatterKind::ReleaseAngle];
            for (kind, plot) in kinds.iter().zip(split.plots.iter()) {
                widgets::scatter::render(frame, *plot, &rows_a, *kind);
            }
            widgets::summary_table::render(frame, split.table, "Summary", &rows_a, false);
        }
        AnalysisMode::Single => {
            let split = split_single(area);
            for (kind, plot) in ScatterKind::ALL.iter().zip(split.plots.iter()) {
                widgets::scatter::render(frame, *plot, &rows_a, *kind);
            }
            widgets::summary_table::render(frame, split.table, "Summary", &rows_a, false);
        }
        AnalysisMode::Compare => {
            let rows_b = app.rows_b();
            let [col_a, col_b] = split_compare(area);
            let columns = [
                (col_a, app.current_pitcher_a(), rows_a, app.is_narrowed()),
                (col_b, app.current_pitcher_b(), rows_b, false),
            ];
            for (col, pitcher, rows, narrowed) in columns {
                render_compare_header(frame, col.header, pitcher, narrowed);
                render_compare_column(frame, col.plot, col.table, &rows);
            }
        }
    }
}

fn render_compare_header(frame: &mut Frame, area: Rect, pitcher: Option<&str>, narrowed: bool) {
    let scope = if narrowed { "filtered" } else { "all sessions" };
    let text = match pitcher {
        Some(p) => format!(" {} ({})", p, scope),
        None => " No pitcher".to_string(),
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::Yellow),
    )));
    frame.render_widget(paragraph, area);
}

fn render_compare_column(frame: &mut Frame, plot: Rect, table: Rect, rows: &[&PitchRecord]) {
    if rows.is_empty() {
        render_notice(frame, plot.union(table), "No pitches match the current selection.");
        return;
    }
    widgets::scatter::render(frame, plot, rows, ScatterKind::Movement);
    widgets::summary_table::render(frame, table, "Summary", rows, true);
}

fn render_notice(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(format!("  {}", text))
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn no_data_message(app: &AppState) -> String {
    match &app.load_error {
        Some(e) => format!("Could not load data: {}", e),
        None => format!("No CSV files found in {}.", app.config.data.dir),
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the dashboard until the user quits.
pub async fn run(mut app: AppState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut app) {
                            app.handle_command(cmd);
                        }
                        if app.should_quit {
                            info!("quit requested");
                            break Ok(());
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize is picked up by the next draw.
                    }
                    Some(Err(e)) => {
                        warn!("terminal input error: {}", e);
                        break Err(anyhow::Error::from(e));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &app)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    let _ = ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
