//! State Module - Runtime state components
//!
//! - **Animate** - Step sequences eased over time, driven per frame
//! - **Text edit** - Bounded UTF-8 buffer with a codepoint cursor
//! - **Clipboard** - Copy/paste seam with an internal fallback
//! - **Keyboard / Input** - Key events, edit action mapping, crossterm bridge
//! - **Sync** - Bounded queue marshalling worker results onto the UI thread

pub mod animate;
pub mod clipboard;
pub mod easing;
pub mod input;
pub mod keyboard;
pub mod sync;
pub mod text_edit;
pub mod utf8;

pub use animate::{AnimationState, Animatable, Step};
pub use clipboard::{Clipboard, InternalClipboard};
pub use easing::EasingFunction;
pub use input::InputEvent;
pub use keyboard::{EditAction, KeyState, KeyboardEvent, Modifiers};
pub use sync::{MainThreadQueue, SyncHandle};
pub use text_edit::{CursorPosition, EditState, TextEditBuffer};
