//! Notification Manager - Timed toasts sliding in from the screen edge
//!
//! Each call to [`NotificationManager::notify`] stacks a new notification on
//! top. Its timer slides it in over `notification_show`, holds it for
//! `notification_timeout`, then slides it back out; once that finishes the
//! manager drops it on the next advance.
//!
//! Position and opacity are published as signals so the render layer can
//! read them every frame.
//!
//! # Example
//!
//! ```ignore
//! use borealis_core::views::notification::NotificationManager;
//! use borealis_core::theme::Style;
//! use std::time::Duration;
//!
//! let mut manager = NotificationManager::new(Style::default());
//! manager.notify("Saved");
//!
//! // Once per frame
//! manager.advance(Duration::from_millis(16));
//! for n in manager.notifications() {
//!     draw(n.text(), n.translation_x(), n.alpha());
//! }
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{Signal, signal};

use crate::state::animate::Animatable;
use crate::state::easing::EasingFunction;
use crate::theme::Style;

// =============================================================================
// NOTIFICATION
// =============================================================================

pub struct Notification {
    id: u64,
    text: String,
    timer: Animatable,
    translation_x: Signal<f32>,
    alpha: Signal<f32>,
    done: Rc<Cell<bool>>,
}

impl Notification {
    fn new(id: u64, text: String, style: &Style) -> Self {
        let slide = style.notification.slide;
        let show = style.animations.notification_show_ms;
        let timeout = style.animations.notification_timeout_ms;

        let translation_x = signal(slide);
        let alpha = signal(alpha_for(slide, slide));
        let done = Rc::new(Cell::new(false));

        let mut timer = Animatable::new(slide);
        timer.add_step(0.0, show, EasingFunction::QuadraticOut);
        timer.add_step(0.0, timeout, EasingFunction::Linear);
        timer.add_step(slide, show, EasingFunction::QuadraticOut);

        let tick_x = translation_x.clone();
        let tick_alpha = alpha.clone();
        timer.set_tick_callback(move |position| {
            tick_x.set(position);
            tick_alpha.set(alpha_for(position, slide));
        });

        let end_done = done.clone();
        timer.set_end_callback(move |_finished| end_done.set(true));

        Self {
            id,
            text,
            timer,
            translation_x,
            alpha,
            done,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Horizontal offset from the resting position.
    pub fn translation_x(&self) -> f32 {
        self.translation_x.get()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    pub fn translation_x_signal(&self) -> Signal<f32> {
        self.translation_x.clone()
    }

    pub fn alpha_signal(&self) -> Signal<f32> {
        self.alpha.clone()
    }

    pub fn timer(&self) -> &Animatable {
        &self.timer
    }

    /// The slide-out finished; the manager removes it on the next advance.
    pub fn is_done(&self) -> bool {
        self.done.get()
    }
}

/// Fully opaque at rest, transparent when slid out by `slide`.
fn alpha_for(position: f32, slide: f32) -> f32 {
    if slide == 0.0 {
        return 1.0;
    }
    (1.0 - position / slide).clamp(0.0, 1.0)
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("timer", &self.timer)
            .finish()
    }
}

// =============================================================================
// MANAGER
// =============================================================================

/// Column of notifications anchored to the right edge of the window.
pub struct NotificationManager {
    style: Style,
    /// Newest first.
    notifications: Vec<Notification>,
    next_id: u64,
}

impl NotificationManager {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            notifications: Vec::new(),
            next_id: 0,
        }
    }

    /// Show a notification. Returns its id.
    pub fn notify(&mut self, text: impl Into<String>) -> u64 {
        let text = text.into();
        tracing::debug!("Showing notification \"{}\"", text);

        let id = self.next_id;
        self.next_id += 1;

        let mut notification = Notification::new(id, text, &self.style);
        notification.timer.start();
        self.notifications.insert(0, notification);
        id
    }

    /// Advance every timer by `delta` and drop finished notifications.
    /// Returns how many were removed.
    pub fn advance(&mut self, delta: Duration) -> usize {
        for notification in self.notifications.iter_mut() {
            notification.timer.advance(delta);
        }

        let before = self.notifications.len();
        self.notifications.retain(|n| {
            if n.is_done() {
                tracing::trace!(id = n.id, "notification dismissed");
            }
            !n.is_done()
        });
        before - self.notifications.len()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.style.notification.width
    }

    pub fn padding(&self) -> f32 {
        self.style.notification.padding
    }

    /// Panel offset from the left edge of the window.
    pub fn translation_x(&self) -> f32 {
        self.style.window_width - self.style.notification.width
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl Drop for NotificationManager {
    fn drop(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.timer.stop();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run(manager: &mut NotificationManager, total_ms: u64, step_ms: u64) {
        let mut elapsed = 0;
        while elapsed < total_ms {
            manager.advance(ms(step_ms));
            elapsed += step_ms;
        }
    }

    #[test]
    fn test_notify_starts_off_screen() {
        let mut manager = NotificationManager::new(Style::default());
        let id = manager.notify("Hello");

        let n = manager.get(id).unwrap();
        assert_eq!(n.text(), "Hello");
        assert_eq!(n.translation_x(), 275.0);
        assert_eq!(n.alpha(), 0.0);
        assert!(n.timer().is_running());
    }

    #[test]
    fn test_newest_on_top() {
        let mut manager = NotificationManager::new(Style::default());
        manager.notify("first");
        manager.notify("second");

        let texts: Vec<_> = manager.notifications().iter().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn test_slides_in_and_holds() {
        let mut manager = NotificationManager::new(Style::default());
        let id = manager.notify("Hi");

        manager.advance(ms(100));
        let n = manager.get(id).unwrap();
        assert!(n.translation_x() > 0.0 && n.translation_x() < 275.0);
        assert!(n.alpha() > 0.0 && n.alpha() < 1.0);

        manager.advance(ms(150));
        let n = manager.get(id).unwrap();
        assert_eq!(n.translation_x(), 0.0);
        assert_eq!(n.alpha(), 1.0);

        manager.advance(ms(3000));
        assert_eq!(manager.get(id).unwrap().alpha(), 1.0);
    }

    #[test]
    fn test_removed_after_full_cycle() {
        let mut manager = NotificationManager::new(Style::default());
        manager.notify("bye");

        // 250 + 4000 + 250
        run(&mut manager, 4490, 10);
        assert_eq!(manager.len(), 1);

        let removed = manager.advance(ms(10));
        assert_eq!(removed, 1);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_staggered_notifications() {
        let mut manager = NotificationManager::new(Style::default());
        manager.notify("a");
        run(&mut manager, 1000, 20);
        manager.notify("b");

        run(&mut manager, 3500, 20);
        let texts: Vec<_> = manager.notifications().iter().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["b"]);

        run(&mut manager, 1000, 20);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_custom_style() {
        let mut style = Style::default();
        style.animations.notification_show_ms = 0;
        style.animations.notification_timeout_ms = 100;
        let mut manager = NotificationManager::new(style);
        let id = manager.notify("quick");

        manager.advance(ms(0));
        assert_eq!(manager.get(id).unwrap().alpha(), 1.0);

        manager.advance(ms(100));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_panel_geometry() {
        let manager = NotificationManager::new(Style::default());
        assert_eq!(manager.width(), 280.0);
        assert_eq!(manager.padding(), 16.0);
        assert_eq!(manager.translation_x(), 1000.0);
    }

    #[test]
    fn test_alpha_for_zero_slide() {
        assert_eq!(alpha_for(0.0, 0.0), 1.0);
        assert_eq!(alpha_for(137.5, 275.0), 0.5);
    }
}
