// Status bar widget: pitcher, data scope, mode and load counts.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AnalysisMode, AppState};

/// Render the status bar into the given area.
///
/// Layout: [pitcher (scope)] | [mode tabs] | [load counts] | [last message]
pub fn render(frame: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = Vec::new();

    spans.push(Span::styled(
        format!(" {} ", pitcher_heading(app)),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(mode_spans(app.mode));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        load_summary(app),
        Style::default().fg(Color::White),
    ));

    if let Some(msg) = app.load_error.as_ref().or(app.status_message.as_ref()) {
        let color = if app.load_error.is_some() {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// `0042 (all sessions)` or `0042 (filtered)`.
pub fn pitcher_heading(app: &AppState) -> String {
    match app.current_pitcher_a() {
        Some(p) if app.is_narrowed() => format!("{} (filtered)", p),
        Some(p) => format!("{} (all sessions)", p),
        None => "No pitcher".to_string(),
    }
}

/// Mode indicator with the active mode highlighted.
pub fn mode_spans(active: AnalysisMode) -> Vec<Span<'static>> {
    let modes = [
        (AnalysisMode::Report, "1:Report"),
        (AnalysisMode::Single, "2:Single"),
        (AnalysisMode::Compare, "3:Compare"),
    ];

    let mut spans = Vec::new();
    for (mode, label) in modes {
        let style = if mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

fn load_summary(app: &AppState) -> String {
    let mut text = format!("{} pitches", app.table.len());
    if !app.skipped.is_empty() {
        text.push_str(&format!(", {} files skipped", app.skipped.len()));
    }
    if app.table.dropped_rows() > 0 {
        text.push_str(&format!(", {} rows without date", app.table.dropped_rows()));
    }
    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
