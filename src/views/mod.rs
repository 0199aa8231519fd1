//! Views - Hosts that own the state components and publish render state
//!
//! - **Notification** - Timed toasts driven by `Animatable`
//! - **Edit text dialog** - IME entry around `TextEditBuffer`
//! - **Progress** - Loading bar fed from a worker via the main-thread queue

pub mod edit_text_dialog;
pub mod notification;
pub mod progress;

pub use edit_text_dialog::{EditTextDialog, ImeRequest, open_for_number, open_for_text, parse_number};
pub use notification::{Notification, NotificationManager};
pub use progress::{LoaderConfig, ProgressDisplay, ProgressLoader, ProgressView};
