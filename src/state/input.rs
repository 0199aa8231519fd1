//! Input Module - crossterm event conversion
//!
//! Desktop hosts running in a terminal get their key presses from crossterm.
//! This module turns those into our [`KeyboardEvent`]s so they can drive the
//! edit dialog like any other platform input layer.
//!
//! # Example
//!
//! ```ignore
//! use borealis_core::state::input::poll_input;
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_input(Duration::from_millis(16)) {
//!         dialog.handle_input(event, &mut clipboard);
//!     }
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    poll, read,
};

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};

/// Input delivered to a text-entry host.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A key press, release or repeat.
    Key(KeyboardEvent),
    /// Committed text from an IME or a bracketed paste.
    Text(String),
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::SUPER, mods.contains(KeyModifiers::SUPER));
    out
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for input with timeout.
/// Returns None on timeout or for events a text host does not care about.
pub fn poll_input(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if !poll(timeout)? {
        return Ok(None);
    }
    Ok(convert_event(read()?))
}

pub fn convert_event(event: CrosstermEvent) -> Option<InputEvent> {
    match event {
        CrosstermEvent::Key(key) => Some(InputEvent::Key(convert_key_event(key))),
        // Bracketed paste arrives as one text blob
        CrosstermEvent::Paste(text) => Some(InputEvent::Text(text)),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
