use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    Paste(String),
    Tick,
}

/// What a key press asks for, before the focused widget interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    Save,
    Reset,
    FocusNext,
    FocusPrev,
    Up,
    Down,
    Top,
    Bottom,
    Activate,
    Cancel,
    Backspace,
    ClearField,
    Insert(char),
}

fn normalize_event(event: Event) -> AppEvent {
    match event {
        // Release/repeat events would double every keystroke on some platforms.
        Event::Key(key) if key.kind != KeyEventKind::Press => AppEvent::Tick,
        Event::Key(key) => AppEvent::Key(key),
        Event::Mouse(mouse) => AppEvent::Mouse(mouse),
        Event::Resize(width, height) => AppEvent::Resize { width, height },
        Event::Paste(text) => AppEvent::Paste(text),
        _ => AppEvent::Tick,
    }
}

pub fn next_event(timeout: Duration) -> Result<AppEvent> {
    if !event::poll(timeout)? {
        return Ok(AppEvent::Tick);
    }

    Ok(normalize_event(event::read()?))
}

/// Translate a key press. Plain characters always come back as `Insert`;
/// the app decides whether `q` means quit or a letter.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let cmd = match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('s') if ctrl => Command::Save,
        KeyCode::Char('r') if ctrl => Command::Reset,
        KeyCode::Char('u') if ctrl => Command::ClearField,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Command::Insert(c),
        KeyCode::F(1) => Command::ToggleHelp,
        KeyCode::Tab => Command::FocusNext,
        KeyCode::BackTab => Command::FocusPrev,
        KeyCode::Up => Command::Up,
        KeyCode::Down => Command::Down,
        KeyCode::Home => Command::Top,
        KeyCode::End => Command::Bottom,
        KeyCode::Enter => Command::Activate,
        KeyCode::Esc => Command::Cancel,
        KeyCode::Backspace => Command::Backspace,
        _ => return None,
    };
    Some(cmd)
}
