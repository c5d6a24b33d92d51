// TUI widget modules for each dashboard panel, plus shared styling.

pub mod help_bar;
pub mod login;
pub mod scatter;
pub mod sidebar;
pub mod status_bar;
pub mod summary_table;

use ratatui::style::{Color, Style};

use pitchlab_core::pitch::PitchType;

/// Highlight the border of the panel that has keyboard focus.
pub fn focused_border_style(focused: bool, base: Style) -> Style {
    if focused {
        base.fg(Color::Cyan)
    } else {
        base
    }
}

/// Plot and table color for a pitch type. Labels outside the taxonomy are
/// gray.
pub fn pitch_color(pitch_type: Option<PitchType>) -> Color {
    match pitch_type {
        Some(PitchType::Fastball) => Color::Rgb(255, 75, 75),
        Some(PitchType::Slider) => Color::Rgb(30, 144, 255),
        Some(PitchType::Cutter) => Color::Rgb(255, 20, 147),
        Some(PitchType::Curveball) => Color::Rgb(50, 205, 50),
        Some(PitchType::Splitter) => Color::Rgb(64, 224, 208),
        Some(PitchType::ChangeUp) => Color::Rgb(138, 43, 226),
        Some(PitchType::Sinker) => Color::Rgb(255, 165, 0),
        Some(PitchType::TwoSeamFastBall) => Color::Rgb(255, 140, 0),
        None => Color::Rgb(128, 128, 128),
    }
}

/// Legend glyph drawn next to a pitch type name.
pub fn pitch_glyph(pitch_type: Option<PitchType>) -> &'static str {
    match pitch_type {
        Some(PitchType::Fastball) | Some(PitchType::TwoSeamFastBall) => "●",
        Some(PitchType::Slider) | Some(PitchType::Cutter) => "◀",
        Some(PitchType::Curveball) => "▲",
        Some(PitchType::Splitter) | Some(PitchType::ChangeUp) | Some(PitchType::Sinker) => "▼",
        None => "■",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_border_is_cyan() {
        assert_eq!(focused_border_style(true, Style::default()).fg, Some(Color::Cyan));
        assert_eq!(focused_border_style(false, Style::default()).fg, None);
    }

    #[test]
    fn every_pitch_type_has_a_distinct_color() {
        let colors: std::collections::HashSet<String> = PitchType::ALL
            .iter()
            .map(|pt| format!("{:?}", pitch_color(Some(*pt))))
            .collect();
        assert_eq!(colors.len(), PitchType::ALL.len());
        assert!(!colors.contains(&format!("{:?}", pitch_color(None))));
    }
}
