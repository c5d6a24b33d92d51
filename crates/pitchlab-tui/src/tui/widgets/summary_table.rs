// Summary table widget: one row per pitch type with usage and averages.
//
// Aggregates the rows it is given on every render.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use pitchlab_core::pitch::PitchRecord;
use pitchlab_core::summary::{summarize, uncategorized_count, PitchSummary, SummaryColumn};

use super::{pitch_color, pitch_glyph};

/// Render the summary of `rows`. `compact` switches to short headers for
/// the half-width compare columns.
pub fn render(frame: &mut Frame, area: Rect, title: &str, rows: &[&PitchRecord], compact: bool) {
    let summary = summarize(rows);
    let other = uncategorized_count(rows);

    let mut block_title = format!("{} ({} pitches)", title, rows.len());
    if other > 0 {
        block_title.push_str(&format!(", {} other", other));
    }
    let block = Block::default().borders(Borders::ALL).title(block_title);

    if summary.is_empty() {
        let paragraph = Paragraph::new("  No pitches in the current selection.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(SummaryColumn::ALL.iter().map(|c| {
        Cell::from(if compact { c.short_label() } else { c.label() })
    }))
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = summary.iter().map(summary_row).collect();
    let widths: Vec<Constraint> = SummaryColumn::ALL
        .iter()
        .map(|c| column_width(*c, compact))
        .collect();

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn summary_row(summary: &PitchSummary) -> Row<'static> {
    let cells = SummaryColumn::ALL.iter().map(|col| match col {
        SummaryColumn::PitchType => {
            let pt = Some(summary.pitch_type);
            Cell::from(Line::from(vec![
                Span::styled(
                    format!("{} ", pitch_glyph(pt)),
                    Style::default().fg(pitch_color(pt)),
                ),
                Span::raw(col.cell(summary)),
            ]))
        }
        _ => Cell::from(col.cell(summary)),
    });
    Row::new(cells.collect::<Vec<_>>())
}

/// Column width: the header or the widest expected cell, whichever is
/// larger.
fn column_width(column: SummaryColumn, compact: bool) -> Constraint {
    let header = if compact {
        column.short_label()
    } else {
        column.label()
    };
    let cell = match column {
        SummaryColumn::PitchType => 17, // glyph + "TwoSeamFastBall"
        SummaryColumn::Usage => 12,     // "100.0% (999)"
        _ => 6,
    };
    Constraint::Length(header.chars().count().max(cell) as u16)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
