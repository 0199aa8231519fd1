//! Keyboard Module - Key events and edit action mapping
//!
//! Platform input layers deliver [`KeyboardEvent`]s using the toolkit's key
//! names ("a", "Enter", "ArrowLeft", ...). [`EditAction::from_key`] turns a
//! press into the text-editing operation it stands for.
//!
//! # Bindings
//!
//! | Key                      | Action           |
//! |--------------------------|------------------|
//! | printable char           | `Insert`         |
//! | Backspace                | `DeleteBackward` |
//! | ArrowLeft / ArrowRight   | `Left` / `Right` |
//! | Home / End               | `Home` / `End`   |
//! | Ctrl+C / Ctrl+V          | `Copy` / `Paste` |
//! | Enter / Escape           | `Submit` / `Cancel` |
//!
//! On macOS the copy/paste modifier is Super (Cmd) instead of Ctrl.

bitflags::bitflags! {
    /// Keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Modifier that turns C/V into copy/paste on this platform.
#[cfg(target_os = "macos")]
pub const CLIPBOARD_MODIFIER: Modifiers = Modifiers::SUPER;
#[cfg(not(target_os = "macos"))]
pub const CLIPBOARD_MODIFIER: Modifiers = Modifiers::CTRL;

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
            state: KeyState::Press,
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press and auto-repeat both count as input.
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }

    /// The key as a single printable char, if it is one.
    fn printable(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

// =============================================================================
// EDIT ACTIONS
// =============================================================================

/// A text-editing operation requested by the input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    Insert(String),
    DeleteBackward,
    Left,
    Right,
    Home,
    End,
    Copy,
    Paste,
    Submit,
    Cancel,
}

impl EditAction {
    /// Map a key press to an edit action. Releases map to nothing.
    pub fn from_key(event: &KeyboardEvent) -> Option<Self> {
        if !event.is_press() {
            return None;
        }

        if let Some(ch) = event.printable() {
            let held = event.modifiers - Modifiers::SHIFT;
            if held == CLIPBOARD_MODIFIER {
                return match ch.to_ascii_lowercase() {
                    'c' => Some(Self::Copy),
                    'v' => Some(Self::Paste),
                    _ => None,
                };
            }
            // Don't consume other modified chars
            if !held.is_empty() {
                return None;
            }
            return Some(Self::Insert(ch.to_string()));
        }

        match event.key.as_str() {
            "Backspace" => Some(Self::DeleteBackward),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Enter" => Some(Self::Submit),
            "Escape" => Some(Self::Cancel),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
