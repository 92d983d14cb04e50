//! edlist TUI crate — the education list page rendered in the terminal.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::{App, Focus};

use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use edlist_core::RootView;
use ratatui::{Terminal, prelude::CrosstermBackend};

/// Put the terminal back the way we found it. Errors are ignored so this can
/// run from the panic hook.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
}

/// Run the page until the user quits. Returns the view so callers can
/// inspect what was entered.
pub fn run(root: RootView) -> Result<RootView> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(entries = root.panel().len(), "ui started");
    let mut app = App::new(root);
    let result = app.run(&mut terminal);

    restore_terminal();
    terminal.show_cursor()?;

    tracing::info!(entries = app.root.panel().len(), "ui stopped");
    result.map(|()| app.root)
}
