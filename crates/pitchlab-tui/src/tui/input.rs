// Keyboard input handling and command dispatch.
//
// Selection changes (mode, focus, cursors, toggles) are applied to the
// AppState directly. Actions with side effects are returned as a
// UserCommand for the caller to run.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AnalysisMode, AppState, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` for quit, reload, export and password
/// submission. Returns `None` when the key was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, app: &mut AppState) -> Option<UserCommand> {
    // On Windows crossterm reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits, locked or not.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if app.is_locked() {
        return handle_login_key(key_event, app);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('r') => Some(UserCommand::Reload),
        KeyCode::Char('e') => Some(UserCommand::Export),
        KeyCode::Char('m') => {
            app.cycle_mode();
            None
        }
        KeyCode::Char('1') => {
            app.set_mode(AnalysisMode::Report);
            None
        }
        KeyCode::Char('2') => {
            app.set_mode(AnalysisMode::Single);
            None
        }
        KeyCode::Char('3') => {
            app.set_mode(AnalysisMode::Compare);
            None
        }
        KeyCode::Tab => {
            app.focus_next();
            None
        }
        KeyCode::BackTab => {
            app.focus_prev();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_cursor(-1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_cursor(1);
            None
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selection();
            None
        }
        KeyCode::Char('c') => {
            app.clear_filters();
            None
        }
        _ => None,
    }
}

/// Password entry: printable characters, Backspace, Enter to submit, Esc to
/// clear.
fn handle_login_key(key_event: KeyEvent, app: &mut AppState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => Some(UserCommand::SubmitPassword),
        KeyCode::Backspace => {
            app.password_input.pop();
            None
        }
        KeyCode::Esc => {
            app.password_input.clear();
            None
        }
        KeyCode::Char(c) => {
            app.password_input.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
