//! # borealis-core
//!
//! Notification timing, IME text editing and main-thread marshalling for
//! Switch-style UIs.
//!
//! Platform layers (windowing, graphics, input devices) stay outside this
//! crate. They feed it raw input events and a per-frame tick; the views here
//! publish what to draw through [spark-signals](https://crates.io/crates/spark-signals).
//!
//! ## Architecture
//!
//! ```text
//! input events ──► EditTextDialog ──► TextEditBuffer ──► text / cursor signals
//! frame tick   ──► NotificationManager ──► Animatable ──► position / alpha signals
//! worker thread ──► SyncHandle ──► MainThreadQueue::drain (UI thread) ──► views
//! ```
//!
//! ## Modules
//!
//! - [`state`] - Timer sequences, easing, text buffer, clipboard, keyboard, sync queue
//! - [`views`] - Notification manager, edit text dialog, progress view
//! - [`theme`] - Style metrics passed into views
//! - [`error`] - Errors for the fallible edges

pub mod error;
pub mod state;
pub mod theme;
pub mod views;

pub use error::{Error, Result};

pub use state::{
    AnimationState, Animatable, Clipboard, CursorPosition, EasingFunction, EditAction,
    EditState, InputEvent, InternalClipboard, KeyState, KeyboardEvent, MainThreadQueue,
    Modifiers, Step, SyncHandle, TextEditBuffer,
};

pub use theme::Style;

pub use views::{
    EditTextDialog, ImeRequest, LoaderConfig, Notification, NotificationManager,
    ProgressDisplay, ProgressLoader, ProgressView, open_for_number, open_for_text,
};
