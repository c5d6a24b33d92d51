// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +------------+-------------------------------------+
// | Sidebar    | Main Panel                          |
// | (28 cols)  |  report:  [movement | angle]        |
// |            |           [summary table   ]        |
// |            |  single:  [2 x 2 plots     ]        |
// |            |           [summary table   ]        |
// |            |  compare: [A column | B column]     |
// +------------+-------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the selection sidebar.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: pitcher, scope, mode, load counts.
    pub status_bar: Rect,
    /// Left column: pitcher, file and date lists.
    pub sidebar: Rect,
    /// Mode-dependent plots and tables.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(vertical[1]);

    AppLayout {
        status_bar: vertical[0],
        sidebar: horizontal[0],
        main_panel: horizontal[1],
        help_bar: vertical[2],
    }
}

/// Plots on top, summary table below.
#[derive(Debug, Clone)]
pub struct PlotsAndTable {
    pub plots: Vec<Rect>,
    pub table: Rect,
}

/// Report view: two plots side by side over the table.
pub fn split_report(area: Rect) -> PlotsAndTable {
    let (top, table) = split_plots_table(area);
    let plots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(top);
    PlotsAndTable {
        plots: plots.to_vec(),
        table,
    }
}

/// Single view: a 2 x 2 grid of plots over the table.
pub fn split_single(area: Rect) -> PlotsAndTable {
    let (top, table) = split_plots_table(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(top);

    let mut plots = Vec::with_capacity(4);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        plots.extend(cols.iter().copied());
    }
    PlotsAndTable { plots, table }
}

/// Compare view: two columns, each a header line, one plot and a table.
pub fn split_compare(area: Rect) -> [CompareColumn; 2] {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    [compare_column(cols[0]), compare_column(cols[1])]
}

#[derive(Debug, Clone, Copy)]
pub struct CompareColumn {
    pub header: Rect,
    pub plot: Rect,
    pub table: Rect,
}

fn compare_column(area: Rect) -> CompareColumn {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(55),
            Constraint::Min(4),
        ])
        .split(area);
    CompareColumn {
        header: parts[0],
        plot: parts[1],
        table: parts[2],
    }
}

fn split_plots_table(area: Rect) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Min(5)])
        .split(area);
    (parts[0], parts[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
