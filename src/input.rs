//! Keyboard input mapping for the interactive view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Begin playback and rendering
    Start,
    /// Freeze and copy, or resume
    Capture,
    /// Leave the view
    Quit,
    /// Key not bound
    None,
}

/// Map a key event to an action.
///
/// Bindings:
/// - s / Enter: start
/// - c / Space: capture
/// - q / Esc / Ctrl+C: quit
///
/// Release and repeat events are ignored so one press is one action.
pub fn handle_key_event(event: KeyEvent) -> KeyAction {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match code {
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => KeyAction::Start,
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char(' ') => KeyAction::Capture,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
