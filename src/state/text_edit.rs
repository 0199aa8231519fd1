//! Text Edit Buffer - Bounded, codepoint-addressed text entry
//!
//! Backs the IME dialog. Raw text events may deliver several codepoints at
//! once; the cursor either sits on a codepoint offset or in the "append"
//! position at the end.
//!
//! # Rules
//!
//! - Offsets count codepoints, never bytes
//! - The codepoint count never exceeds `max_length`; oversized inserts are cut
//! - Text-changed listeners run before the mutating call returns
//! - After `submit()` or `cancel()` every operation is a no-op
//!
//! # Example
//!
//! ```ignore
//! use borealis_core::state::text_edit::{CursorPosition, TextEditBuffer};
//!
//! let mut buffer = TextEditBuffer::with_text("abc", 32);
//! buffer.move_cursor_home();
//! buffer.move_cursor_right();
//! buffer.insert("X");
//! assert_eq!(buffer.content(), "aXbc");
//! assert_eq!(buffer.cursor(), CursorPosition::Offset(2));
//! ```

use super::clipboard::Clipboard;
use super::utf8;

// =============================================================================
// TYPES
// =============================================================================

/// Where the next insert lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorPosition {
    /// Before the codepoint at this index.
    Offset(usize),
    /// Append position after the last codepoint.
    #[default]
    AtEnd,
}

/// Editing session state. `Submitted` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Open,
    Submitted,
    Cancelled,
}

/// Called with the full content after every successful mutation.
pub type TextChangedCallback = Box<dyn FnMut(&str)>;
/// Called with the new cursor whenever it moves.
pub type CursorChangedCallback = Box<dyn FnMut(CursorPosition)>;
pub type SubmitCallback = Box<dyn FnOnce(String)>;
pub type CancelCallback = Box<dyn FnOnce()>;

// =============================================================================
// TEXT EDIT BUFFER
// =============================================================================

/// Length-capped text with a codepoint cursor and change listeners.
pub struct TextEditBuffer {
    content: String,
    /// Codepoints in `content`.
    length: usize,
    cursor: CursorPosition,
    max_length: usize,
    state: EditState,
    text_listeners: Vec<TextChangedCallback>,
    cursor_listeners: Vec<CursorChangedCallback>,
    submit_listeners: Vec<SubmitCallback>,
    cancel_listeners: Vec<CancelCallback>,
}

impl TextEditBuffer {
    /// Empty buffer accepting up to `max_length` codepoints, cursor at the end.
    pub fn new(max_length: usize) -> Self {
        Self {
            content: String::new(),
            length: 0,
            cursor: CursorPosition::AtEnd,
            max_length,
            state: EditState::Open,
            text_listeners: Vec::new(),
            cursor_listeners: Vec::new(),
            submit_listeners: Vec::new(),
            cancel_listeners: Vec::new(),
        }
    }

    /// Buffer seeded with `initial`, cut down to `max_length` codepoints.
    pub fn with_text(initial: &str, max_length: usize) -> Self {
        let mut buffer = Self::new(max_length);
        buffer.content = utf8::truncate_codepoints(initial, max_length).to_string();
        buffer.length = utf8::codepoint_count(&buffer.content);
        buffer
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener run with the content after every edit.
    pub fn on_text_changed<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.text_listeners.push(Box::new(callback));
    }

    /// Register a listener run when the cursor value changes.
    pub fn on_cursor_changed<F>(&mut self, callback: F)
    where
        F: FnMut(CursorPosition) + 'static,
    {
        self.cursor_listeners.push(Box::new(callback));
    }

    /// Register a one-shot listener receiving the submitted text.
    pub fn on_submit<F>(&mut self, callback: F)
    where
        F: FnOnce(String) + 'static,
    {
        self.submit_listeners.push(Box::new(callback));
    }

    /// Register a one-shot listener run on cancel.
    pub fn on_cancel<F>(&mut self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel_listeners.push(Box::new(callback));
    }

    fn notify_text_changed(&mut self) {
        for listener in self.text_listeners.iter_mut() {
            listener(&self.content);
        }
    }

    fn set_cursor(&mut self, cursor: CursorPosition) {
        if self.cursor == cursor {
            return;
        }
        self.cursor = cursor;
        for listener in self.cursor_listeners.iter_mut() {
            listener(cursor);
        }
    }

    fn teardown(&mut self) {
        self.text_listeners.clear();
        self.cursor_listeners.clear();
        self.submit_listeners.clear();
        self.cancel_listeners.clear();
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Insert text at the cursor, keeping at most `remaining()` codepoints of it.
    pub fn insert(&mut self, text: &str) {
        if !self.is_open() || text.is_empty() {
            return;
        }

        let remaining = self.remaining();
        if remaining == 0 {
            return;
        }

        let text = utf8::truncate_codepoints(text, remaining);
        let inserted = utf8::codepoint_count(text);

        match self.cursor {
            CursorPosition::Offset(index) => {
                let index = index.min(self.length);
                let at = utf8::byte_offset(&self.content, index);
                self.content.insert_str(at, text);
                self.length += inserted;
                self.set_cursor(CursorPosition::Offset(index + inserted));
            }
            CursorPosition::AtEnd => {
                self.content.push_str(text);
                self.length += inserted;
            }
        }

        self.notify_text_changed();
    }

    /// Insert raw bytes from a platform text event.
    ///
    /// Malformed sequences decode to U+FFFD, one codepoint each.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        self.insert(&text);
    }

    /// Remove the codepoint before the cursor (Backspace).
    pub fn delete_before_cursor(&mut self) {
        if !self.is_open() || self.content.is_empty() {
            return;
        }

        match self.cursor {
            CursorPosition::Offset(index) => {
                let index = index.min(self.length);
                if index == 0 {
                    return;
                }
                let start = utf8::byte_offset(&self.content, index - 1);
                self.content.remove(start);
                self.length -= 1;
                self.set_cursor(CursorPosition::Offset(index - 1));
            }
            CursorPosition::AtEnd => {
                self.content.pop();
                self.length -= 1;
            }
        }

        self.notify_text_changed();
    }

    // -------------------------------------------------------------------------
    // Cursor movement
    // -------------------------------------------------------------------------

    /// Step left. From `AtEnd` this lands on the last codepoint; at
    /// `Offset(0)` nothing moves.
    pub fn move_cursor_left(&mut self) {
        if !self.is_open() {
            return;
        }
        match self.cursor {
            CursorPosition::AtEnd => {
                let last = self.length.saturating_sub(1);
                self.set_cursor(CursorPosition::Offset(last));
            }
            CursorPosition::Offset(index) if index > 0 => {
                self.set_cursor(CursorPosition::Offset(index - 1));
            }
            CursorPosition::Offset(_) => {}
        }
    }

    /// Step right. Reaching the end of the text switches to `AtEnd`.
    pub fn move_cursor_right(&mut self) {
        if !self.is_open() {
            return;
        }
        if let CursorPosition::Offset(index) = self.cursor {
            let next = index + 1;
            if next >= self.length {
                self.set_cursor(CursorPosition::AtEnd);
            } else {
                self.set_cursor(CursorPosition::Offset(next));
            }
        }
    }

    /// Jump before the first codepoint.
    pub fn move_cursor_home(&mut self) {
        if self.is_open() {
            self.set_cursor(CursorPosition::Offset(0));
        }
    }

    /// Jump to the append position.
    pub fn move_cursor_end(&mut self) {
        if self.is_open() {
            self.set_cursor(CursorPosition::AtEnd);
        }
    }

    // -------------------------------------------------------------------------
    // Clipboard
    // -------------------------------------------------------------------------

    /// Publish the whole content. Empty content leaves the clipboard alone.
    pub fn copy_to_clipboard(&self, clipboard: &mut dyn Clipboard) {
        if self.is_open() && !self.content.is_empty() {
            clipboard.set_text(&self.content);
        }
    }

    /// Paste through `insert`, so the length cap applies.
    pub fn paste_from_clipboard(&mut self, clipboard: &dyn Clipboard) {
        if !self.is_open() {
            return;
        }
        if let Some(text) = clipboard.get_text() {
            self.insert(&text);
        }
    }

    // -------------------------------------------------------------------------
    // Terminal operations
    // -------------------------------------------------------------------------

    /// Hand the content to submit listeners and close the session.
    ///
    /// Returns the submitted text, or None if the session was already closed.
    pub fn submit(&mut self) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.state = EditState::Submitted;

        let listeners = std::mem::take(&mut self.submit_listeners);
        for listener in listeners {
            listener(self.content.clone());
        }
        self.teardown();
        Some(self.content.clone())
    }

    /// Close the session without yielding content.
    pub fn cancel(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state = EditState::Cancelled;

        let listeners = std::mem::take(&mut self.cancel_listeners);
        for listener in listeners {
            listener();
        }
        self.teardown();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current cursor, `AtEnd` unless the user moved it.
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Cursor as a codepoint index, with `AtEnd` resolved to the length.
    pub fn cursor_index(&self) -> usize {
        match self.cursor {
            CursorPosition::Offset(index) => index.min(self.length),
            CursorPosition::AtEnd => self.length,
        }
    }

    /// Length in codepoints.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Codepoint cap fixed at construction.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Codepoints that can still be inserted.
    pub fn remaining(&self) -> usize {
        self.max_length.saturating_sub(self.length)
    }

    /// Session state; anything but `Open` is final.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Whether edits are still accepted.
    pub fn is_open(&self) -> bool {
        self.state == EditState::Open
    }

    /// Counter shown under the text, e.g. "3/32".
    pub fn count_text(&self) -> String {
        format!("{}/{}", self.length, self.max_length)
    }
}

impl std::fmt::Debug for TextEditBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEditBuffer")
            .field("content", &self.content)
            .field("cursor", &self.cursor)
            .field("max_length", &self.max_length)
            .field("state", &self.state)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
