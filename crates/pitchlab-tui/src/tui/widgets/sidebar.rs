// Sidebar widget: pitcher, session file and date lists.
//
// Pitcher lists mark the current selection; file and date lists show a
// checkbox per entry and a cursor when focused. Pitcher B is only shown in
// compare mode.

use std::collections::BTreeSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{AnalysisMode, AppState, SidebarFocus};

use super::focused_border_style;

pub fn render(frame: &mut Frame, area: Rect, app: &AppState) {
    let compare = app.mode == AnalysisMode::Compare;
    let constraints: Vec<Constraint> = if compare {
        vec![
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ]
    } else {
        vec![
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ]
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let pitcher_title = if compare { "Pitcher A" } else { "Pitcher" };
    render_pitchers(
        frame,
        sections[0],
        pitcher_title,
        &app.pitchers,
        app.pitcher_a,
        app.focus == SidebarFocus::PitcherA,
    );

    let files = app.file_options();
    render_checklist(
        frame,
        sections[1],
        "Sessions",
        &files,
        &app.selected_files,
        app.file_cursor,
        app.focus == SidebarFocus::Files,
    );

    let dates = app.date_options();
    render_checklist(
        frame,
        sections[2],
        "Dates",
        &dates,
        &app.selected_dates,
        app.date_cursor,
        app.focus == SidebarFocus::Dates,
    );

    if compare {
        render_pitchers(
            frame,
            sections[3],
            "Pitcher B",
            &app.pitchers,
            app.pitcher_b,
            app.focus == SidebarFocus::PitcherB,
        );
    }
}

fn render_pitchers(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    pitchers: &[String],
    selected: usize,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focused_border_style(focused, Style::default()))
        .title(format!("{} ({})", title, pitchers.len()));

    if pitchers.is_empty() {
        let paragraph = Paragraph::new("  No pitchers.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = pitchers
        .iter()
        .map(|p| ListItem::new(p.clone()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("● ");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_checklist(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    options: &[String],
    checked: &BTreeSet<String>,
    cursor: usize,
    focused: bool,
) {
    let title = if checked.is_empty() {
        format!("{} (all)", title)
    } else {
        format!("{} ({}/{})", title, checked.len(), options.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focused_border_style(focused, Style::default()))
        .title(title);

    if options.is_empty() {
        let paragraph = Paragraph::new("  Nothing to select.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = options
        .iter()
        .map(|o| ListItem::new(checklist_line(o, checked.contains(o))))
        .collect();

    let mut list = List::new(items).block(block);
    let mut state = ListState::default();
    if focused {
        list = list
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        state.select(Some(cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// `[x] name` or `[ ] name`.
pub fn checklist_line(option: &str, checked: bool) -> String {
    format!("[{}] {}", if checked { 'x' } else { ' ' }, option)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
