//! Edit Text Dialog - On-screen text entry (IME) host
//!
//! Owns one [`TextEditBuffer`] and turns platform input into edits on it.
//! Everything the render layer needs (text, "N/max" counter, cursor, header
//! and hint) is published through signals. The buffer's listeners keep text
//! and cursor current; the counter is refreshed after each applied action.
//!
//! # Flow
//!
//! ```text
//! platform input ─► handle_input / handle_key ─► EditAction ─► TextEditBuffer
//!                                                               │
//!                                   text / count / cursor ◄─────┘
//! ```
//!
//! [`open_for_text`] and [`open_for_number`] build a dialog whose submit
//! delivers a string or a parsed integer to the caller.

use spark_signals::{Signal, signal};
use unicode_width::UnicodeWidthStr;

use crate::error::{Error, Result};
use crate::state::clipboard::Clipboard;
use crate::state::input::InputEvent;
use crate::state::keyboard::{EditAction, KeyboardEvent};
use crate::state::text_edit::{CursorPosition, EditState, TextEditBuffer};
use crate::state::utf8;
use crate::theme::Style;

// =============================================================================
// REQUEST
// =============================================================================

/// Parameters for opening a text-entry dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeRequest {
    pub header: String,
    /// Hint shown under the header.
    pub sub_text: String,
    /// Codepoint cap. `None` uses the style default.
    pub max_length: Option<usize>,
    pub initial_text: String,
}

impl ImeRequest {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn sub_text(mut self, sub_text: impl Into<String>) -> Self {
        self.sub_text = sub_text.into();
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn initial_text(mut self, initial_text: impl Into<String>) -> Self {
        self.initial_text = initial_text.into();
        self
    }
}

// =============================================================================
// DIALOG
// =============================================================================

/// IME dialog state: the edit buffer plus its render signals.
pub struct EditTextDialog {
    buffer: TextEditBuffer,
    separator: String,
    header: Signal<String>,
    hint: Signal<String>,
    text: Signal<String>,
    count_text: Signal<String>,
    cursor: Signal<CursorPosition>,
}

impl EditTextDialog {
    /// Build a dialog for `request`, falling back to `style` for the cap.
    pub fn new(style: &Style, request: &ImeRequest) -> Self {
        let max_length = request.max_length.unwrap_or(style.ime.max_length);
        let separator = style.ime.count_separator.clone();
        let mut buffer = TextEditBuffer::with_text(&request.initial_text, max_length);

        let text = signal(buffer.content().to_string());
        let count_text = signal(format_count(buffer.len(), &separator, max_length));
        let cursor = signal(buffer.cursor());

        let text_sink = text.clone();
        buffer.on_text_changed(move |content| {
            text_sink.set(content.to_string());
        });

        let cursor_sink = cursor.clone();
        buffer.on_cursor_changed(move |position| {
            cursor_sink.set(position);
        });

        Self {
            buffer,
            separator,
            header: signal(request.header.clone()),
            hint: signal(request.sub_text.clone()),
            text,
            count_text,
            cursor,
        }
    }

    /// Log the session start. The platform layer starts text input here.
    pub fn open(&self) {
        tracing::info!(header = %self.header.get(), "IME dialog opened");
    }

    pub fn on_submit<F>(&mut self, callback: F)
    where
        F: FnOnce(String) + 'static,
    {
        self.buffer.on_submit(callback);
    }

    pub fn on_cancel<F>(&mut self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.buffer.on_cancel(callback);
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route one platform input event. Returns true if it was consumed.
    pub fn handle_input(&mut self, event: InputEvent, clipboard: &mut dyn Clipboard) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(&key, clipboard),
            InputEvent::Text(text) => self.handle_text_input(&text),
        }
    }

    /// Committed text from the IME. Empty commits are ignored.
    pub fn handle_text_input(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.apply(EditAction::Insert(text.to_string()), &mut NoClipboard)
    }

    /// Map a key press to an edit action and apply it.
    pub fn handle_key(&mut self, event: &KeyboardEvent, clipboard: &mut dyn Clipboard) -> bool {
        match EditAction::from_key(event) {
            Some(action) => self.apply(action, clipboard),
            None => false,
        }
    }

    /// Apply an edit action. Returns false once the dialog is closed.
    pub fn apply(&mut self, action: EditAction, clipboard: &mut dyn Clipboard) -> bool {
        if !self.buffer.is_open() {
            return false;
        }

        match action {
            EditAction::Insert(text) => self.buffer.insert(&text),
            EditAction::DeleteBackward => self.buffer.delete_before_cursor(),
            EditAction::Left => self.buffer.move_cursor_left(),
            EditAction::Right => self.buffer.move_cursor_right(),
            EditAction::Home => self.buffer.move_cursor_home(),
            EditAction::End => self.buffer.move_cursor_end(),
            EditAction::Copy => self.buffer.copy_to_clipboard(clipboard),
            EditAction::Paste => self.buffer.paste_from_clipboard(clipboard),
            EditAction::Submit => {
                tracing::debug!("IME dialog submitted");
                self.buffer.submit();
            }
            EditAction::Cancel => {
                tracing::debug!("IME dialog cancelled");
                self.buffer.cancel();
            }
        }
        self.refresh_count();
        true
    }

    fn refresh_count(&self) {
        let count = format_count(self.buffer.len(), &self.separator, self.buffer.max_length());
        if self.count_text.get() != count {
            self.count_text.set(count);
        }
    }

    /// Submit the current text. None once the dialog has closed.
    pub fn submit(&mut self) -> Option<String> {
        self.buffer.submit()
    }

    /// Close without submitting.
    pub fn cancel(&mut self) {
        self.buffer.cancel();
    }

    // -------------------------------------------------------------------------
    // Render state
    // -------------------------------------------------------------------------

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn count_text(&self) -> String {
        self.count_text.get()
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor.get()
    }

    pub fn header(&self) -> String {
        self.header.get()
    }

    pub fn hint(&self) -> String {
        self.hint.get()
    }

    pub fn set_header(&self, header: impl Into<String>) {
        self.header.set(header.into());
    }

    pub fn set_hint(&self, hint: impl Into<String>) {
        self.hint.set(hint.into());
    }

    pub fn text_signal(&self) -> Signal<String> {
        self.text.clone()
    }

    pub fn count_signal(&self) -> Signal<String> {
        self.count_text.clone()
    }

    pub fn cursor_signal(&self) -> Signal<CursorPosition> {
        self.cursor.clone()
    }

    /// Display column of the cursor, for placing the IME candidate window.
    pub fn cursor_column(&self) -> usize {
        let content = self.buffer.content();
        let end = utf8::byte_offset(content, self.buffer.cursor_index());
        content[..end].width()
    }

    pub fn state(&self) -> EditState {
        self.buffer.state()
    }

    pub fn is_open(&self) -> bool {
        self.buffer.is_open()
    }

    pub fn buffer(&self) -> &TextEditBuffer {
        &self.buffer
    }
}

fn format_count(len: usize, separator: &str, max_length: usize) -> String {
    format!("{}{}{}", len, separator, max_length)
}

/// Stand-in for inserts, which never touch the clipboard.
struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) {}

    fn get_text(&self) -> Option<String> {
        None
    }
}

// =============================================================================
// IME ENTRY POINTS
// =============================================================================

/// Dialog whose submit hands non-empty text to `f`.
pub fn open_for_text<F>(style: &Style, request: &ImeRequest, f: F) -> EditTextDialog
where
    F: FnOnce(String) + 'static,
{
    let mut dialog = EditTextDialog::new(style, request);
    dialog.on_submit(move |text| {
        if !text.is_empty() {
            f(text);
        }
    });
    dialog.open();
    dialog
}

/// Dialog whose submit parses the text as an integer and hands it to `f`.
///
/// Empty text is ignored; unparsable text is logged and dropped.
pub fn open_for_number<F>(style: &Style, request: &ImeRequest, f: F) -> EditTextDialog
where
    F: FnOnce(i64) + 'static,
{
    let mut dialog = EditTextDialog::new(style, request);
    dialog.on_submit(move |text| {
        if text.is_empty() {
            return;
        }
        match parse_number(&text) {
            Ok(value) => f(value),
            Err(err) => tracing::error!("{}", err),
        }
    });
    dialog.open();
    dialog
}

/// Parse user-entered text as a signed integer, ignoring surrounding spaces.
pub fn parse_number(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|source| Error::InvalidNumber {
            input: text.to_string(),
            source,
        })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clipboard::{self, InternalClipboard};
    use crate::state::keyboard::{CLIPBOARD_MODIFIER, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dialog(initial: &str, max: usize) -> EditTextDialog {
        let request = ImeRequest::new("Name").max_length(max).initial_text(initial);
        EditTextDialog::new(&Style::default(), &request)
    }

    fn press(dialog: &mut EditTextDialog, key: &str) -> bool {
        dialog.handle_key(&KeyboardEvent::new(key), &mut InternalClipboard)
    }

    #[test]
    fn test_initial_state() {
        let d = dialog("abc", 10);
        assert_eq!(d.text(), "abc");
        assert_eq!(d.count_text(), "3/10");
        assert_eq!(d.cursor(), CursorPosition::AtEnd);
        assert_eq!(d.header(), "Name");
        assert!(d.is_open());
    }

    #[test]
    fn test_default_max_from_style() {
        let d = EditTextDialog::new(&Style::default(), &ImeRequest::new("x"));
        assert_eq!(d.count_text(), "0/32");
    }

    #[test]
    fn test_typing_updates_signals() {
        let mut d = dialog("", 4);
        let text = d.text_signal();

        d.handle_text_input("日本");
        assert_eq!(text.get(), "日本");
        assert_eq!(d.count_text(), "2/4");

        d.handle_text_input("語です");
        assert_eq!(d.text(), "日本語で");
        assert_eq!(d.count_text(), "4/4");
    }

    #[test]
    fn test_key_editing() {
        let mut d = dialog("abc", 10);
        assert!(press(&mut d, "Home"));
        assert_eq!(d.cursor(), CursorPosition::Offset(0));
        press(&mut d, "ArrowRight");
        press(&mut d, "X");
        assert_eq!(d.text(), "aXbc");
        assert_eq!(d.cursor(), CursorPosition::Offset(2));

        press(&mut d, "Backspace");
        assert_eq!(d.text(), "abc");

        press(&mut d, "End");
        assert_eq!(d.cursor(), CursorPosition::AtEnd);
        assert!(!press(&mut d, "ArrowUp"));
    }

    #[test]
    fn test_counter_tracks_multibyte_edits() {
        let mut d = dialog("日本語", 10);
        let count = d.count_signal();

        press(&mut d, "Backspace");
        assert_eq!(d.text(), "日本");
        assert_eq!(count.get(), "2/10");

        press(&mut d, "Home");
        d.handle_text_input("🚀");
        assert_eq!(d.text(), "🚀日本");
        assert_eq!(count.get(), "3/10");
        assert_eq!(d.buffer().len(), 3);
    }

    #[test]
    fn test_clipboard_shortcuts() {
        clipboard::clear();
        let mut board = InternalClipboard;
        let mut d = dialog("copy", 6);

        let copy = KeyboardEvent::with_modifiers("c", CLIPBOARD_MODIFIER);
        assert!(d.handle_key(&copy, &mut board));
        assert_eq!(clipboard::paste().as_deref(), Some("copy"));

        let paste = KeyboardEvent::with_modifiers("v", CLIPBOARD_MODIFIER);
        d.handle_key(&paste, &mut board);
        assert_eq!(d.text(), "copyco");

        let alt = KeyboardEvent::with_modifiers("v", Modifiers::ALT);
        assert!(!d.handle_key(&alt, &mut board));
    }

    #[test]
    fn test_input_event_routing() {
        let mut d = dialog("", 10);
        let mut board = InternalClipboard;
        assert!(d.handle_input(InputEvent::Text("hi".to_string()), &mut board));
        assert!(!d.handle_input(InputEvent::Text(String::new()), &mut board));
        assert!(d.handle_input(InputEvent::Key(KeyboardEvent::new("Backspace")), &mut board));
        assert_eq!(d.text(), "h");
    }

    #[test]
    fn test_enter_submits_once() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let s = submitted.clone();
        let mut d = dialog("ok", 10);
        d.on_submit(move |text| s.borrow_mut().push(text));

        assert!(press(&mut d, "Enter"));
        assert_eq!(d.state(), EditState::Submitted);
        assert!(!press(&mut d, "Enter"));
        assert!(!press(&mut d, "a"));

        assert_eq!(*submitted.borrow(), vec!["ok".to_string()]);
        assert_eq!(d.text(), "ok");
    }

    #[test]
    fn test_escape_cancels() {
        let cancelled = Rc::new(RefCell::new(false));
        let c = cancelled.clone();
        let mut d = dialog("draft", 10);
        d.on_cancel(move || *c.borrow_mut() = true);

        press(&mut d, "Escape");
        assert!(*cancelled.borrow());
        assert_eq!(d.state(), EditState::Cancelled);
        assert_eq!(d.submit(), None);
    }

    #[test]
    fn test_cursor_column_uses_display_width() {
        let mut d = dialog("a日本", 10);
        assert_eq!(d.cursor_column(), 5);
        press(&mut d, "ArrowLeft");
        assert_eq!(d.cursor_column(), 3);
        press(&mut d, "Home");
        assert_eq!(d.cursor_column(), 0);
    }

    #[test]
    fn test_open_for_text_skips_empty() {
        let got = Rc::new(RefCell::new(None));
        let g = got.clone();
        let mut d = open_for_text(&Style::default(), &ImeRequest::new("t"), move |t| {
            *g.borrow_mut() = Some(t)
        });
        d.submit();
        assert!(got.borrow().is_none());

        let g = got.clone();
        let mut d = open_for_text(&Style::default(), &ImeRequest::new("t"), move |t| {
            *g.borrow_mut() = Some(t)
        });
        d.handle_text_input("name");
        d.submit();
        assert_eq!(got.borrow().as_deref(), Some("name"));
    }

    #[test]
    fn test_open_for_number() {
        let got = Rc::new(RefCell::new(None));
        let g = got.clone();
        let request = ImeRequest::new("Age").initial_text(" 42 ");
        let mut d = open_for_number(&Style::default(), &request, move |n| {
            *g.borrow_mut() = Some(n)
        });
        d.submit();
        assert_eq!(*got.borrow(), Some(42));
    }

    #[test]
    fn test_open_for_number_rejects_garbage() {
        let got = Rc::new(RefCell::new(None));
        let g = got.clone();
        let request = ImeRequest::new("Age").initial_text("4x2");
        let mut d = open_for_number(&Style::default(), &request, move |n| {
            *g.borrow_mut() = Some(n)
        });
        d.submit();
        assert!(got.borrow().is_none());
        assert_eq!(d.state(), EditState::Submitted);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("-17").unwrap(), -17);
        assert!(matches!(
            parse_number("twelve"),
            Err(Error::InvalidNumber { ref input, .. }) if input == "twelve"
        ));
        assert!(parse_number("").is_err());
    }
}
