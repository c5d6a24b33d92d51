// Login widget: centered password prompt shown while the session is locked.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use pitchlab_core::auth::AuthState;

use crate::app::AppState;

pub fn render(frame: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered(area, 44, 7);
    frame.render_widget(Clear, popup);

    let masked = "*".repeat(app.password_input.chars().count());
    let mut lines = vec![
        Line::from("Enter the team password to continue."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Password: "),
            Span::styled(masked, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
    ];
    if app.auth_state() == AuthState::Rejected {
        lines.push(Line::from(Span::styled(
            "Incorrect password.",
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("pitchlab"),
    );
    frame.render_widget(paragraph, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
