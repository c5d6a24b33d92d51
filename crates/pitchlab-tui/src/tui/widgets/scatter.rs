// Scatter plot widget: one colored point cloud per pitch type.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use pitchlab_core::pitch::PitchRecord;
use pitchlab_core::scatter::{scatter_series, ScatterKind};

use super::pitch_color;

/// Render the `kind` plot of `rows`. When no row has both coordinates the
/// plot is replaced by a short notice.
pub fn render(frame: &mut Frame, area: Rect, rows: &[&PitchRecord], kind: ScatterKind) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(kind.title());

    let series = scatter_series(rows, kind);
    if series.is_empty() {
        let paragraph = Paragraph::new(format!("  {}", kind.empty_message()))
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(format!("{} ({})", s.label, s.points.len()))
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(pitch_color(s.pitch_type)))
                .data(&s.points)
        })
        .collect();

    let x_bounds = kind.x_bounds();
    let y_bounds = kind.y_bounds();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(kind.x_label())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(kind.y_label())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

/// Low, middle and high tick labels.
pub fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let [lo, hi] = bounds;
    let mid = (lo + hi) / 2.0;
    [lo, mid, hi]
        .iter()
        .map(|v| Span::raw(format!("{:.0}", v)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
