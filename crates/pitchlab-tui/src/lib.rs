// Library root: exposes the app state and TUI so integration tests can
// drive them without a terminal.

pub mod app;
pub mod tui;
