// Help bar widget: key hints for the current screen.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("m/1-3", "mode"),
    ("Tab", "focus"),
    ("↑↓", "move"),
    ("Space", "toggle"),
    ("c", "clear"),
    ("r", "reload"),
    ("e", "export"),
    ("q", "quit"),
];

const LOGIN_KEYS: &[(&str, &str)] = &[("Enter", "submit"), ("Esc", "clear"), ("Ctrl+C", "quit")];

pub fn render(frame: &mut Frame, area: Rect, locked: bool) {
    let keys = if locked { LOGIN_KEYS } else { DASHBOARD_KEYS };
    let paragraph =
        Paragraph::new(Line::from(hint_spans(keys))).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn hint_spans(keys: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in keys {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(Color::White),
        ));
    }
    spans
}
