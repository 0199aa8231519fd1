//! Clipboard Module - Copy/paste seam for text entry
//!
//! The platform clipboard is an external collaborator. Editing code talks to
//! it through the [`Clipboard`] trait; hosts without a system clipboard use
//! [`InternalClipboard`], which keeps text in a per-thread buffer.
//!
//! # Example
//!
//! ```ignore
//! use borealis_core::state::clipboard::{self, Clipboard, InternalClipboard};
//!
//! let mut board = InternalClipboard;
//! board.set_text("Hello, World!");
//! assert_eq!(board.get_text().as_deref(), Some("Hello, World!"));
//!
//! // Free functions reach the same buffer
//! if let Some(text) = clipboard::paste() {
//!     println!("Pasted: {}", text);
//! }
//! ```

use std::cell::RefCell;

// =============================================================================
// Trait
// =============================================================================

/// Access to a text clipboard.
pub trait Clipboard {
    /// Publish text. Empty strings leave the clipboard untouched.
    fn set_text(&mut self, text: &str);

    /// Current clipboard text, if any.
    fn get_text(&self) -> Option<String>;

    fn has_text(&self) -> bool {
        self.get_text().is_some()
    }
}

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Clipboard backed by the per-thread buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct InternalClipboard;

impl Clipboard for InternalClipboard {
    fn set_text(&mut self, text: &str) {
        copy(text);
    }

    fn get_text(&self) -> Option<String> {
        paste()
    }
}

/// Copy text to the internal buffer. Empty strings are ignored.
pub fn copy(text: &str) {
    if text.is_empty() {
        return;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
}

/// Most recently copied text, or None.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

/// Forget the stored text.
pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

// =============================================================================
// Tests
// =============================================================================
