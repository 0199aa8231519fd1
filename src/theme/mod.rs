//! Style metrics for the toolkit's views.
//!
//! A [`Style`] is a plain value passed into view constructors; there is no
//! global style table. Metrics can be read and overridden by their dotted
//! toolkit name (`"brls/notification/width"`), so hosts loading a style sheet
//! need no knowledge of the struct layout.
//!
//! # Example
//!
//! ```rust
//! use borealis_core::theme::Style;
//!
//! let mut style = Style::default();
//! assert_eq!(style.metric("brls/notification/width"), Some(280.0));
//!
//! assert!(style.set_metric("brls/animations/notification_timeout", 2000.0));
//! assert_eq!(style.animations.notification_timeout_ms, 2000);
//! ```

// =============================================================================
// Metric groups
// =============================================================================

/// Notification panel geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotificationMetrics {
    pub width: f32,
    pub padding: f32,
    /// Horizontal distance a notification slides in from.
    pub slide: f32,
}

impl Default for NotificationMetrics {
    fn default() -> Self {
        Self {
            width: 280.0,
            padding: 16.0,
            slide: 275.0,
        }
    }
}

/// Animation timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationMetrics {
    /// Slide in/out duration.
    pub notification_show_ms: i32,
    /// How long a notification stays fully visible.
    pub notification_timeout_ms: i32,
}

impl Default for AnimationMetrics {
    fn default() -> Self {
        Self {
            notification_show_ms: 250,
            notification_timeout_ms: 4000,
        }
    }
}

/// Text entry defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImeMetrics {
    /// Codepoint cap used when the caller gives none.
    pub max_length: usize,
    /// Separator of the "N/max" counter.
    pub count_separator: String,
}

impl Default for ImeMetrics {
    fn default() -> Self {
        Self {
            max_length: 32,
            count_separator: "/".to_string(),
        }
    }
}

// =============================================================================
// Style
// =============================================================================

/// Everything a view needs to lay itself out and animate.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Logical window width the notification panel is anchored to.
    pub window_width: f32,
    pub notification: NotificationMetrics,
    pub animations: AnimationMetrics,
    pub ime: ImeMetrics,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            notification: NotificationMetrics::default(),
            animations: AnimationMetrics::default(),
            ime: ImeMetrics::default(),
        }
    }
}

/// Metric names understood by [`Style::metric`] and [`Style::set_metric`].
pub const METRIC_NAMES: &[&str] = &[
    "brls/window/width",
    "brls/notification/width",
    "brls/notification/padding",
    "brls/notification/slide",
    "brls/animations/notification_show",
    "brls/animations/notification_timeout",
    "brls/ime/max_length",
];

impl Style {
    /// Look up a metric by toolkit name.
    pub fn metric(&self, name: &str) -> Option<f32> {
        let value = match name {
            "brls/window/width" => self.window_width,
            "brls/notification/width" => self.notification.width,
            "brls/notification/padding" => self.notification.padding,
            "brls/notification/slide" => self.notification.slide,
            "brls/animations/notification_show" => self.animations.notification_show_ms as f32,
            "brls/animations/notification_timeout" => {
                self.animations.notification_timeout_ms as f32
            }
            "brls/ime/max_length" => self.ime.max_length as f32,
            _ => return None,
        };
        Some(value)
    }

    /// Override a metric by name. Returns false for unknown names.
    ///
    /// Millisecond and length metrics are truncated toward zero; negative
    /// lengths become zero.
    pub fn set_metric(&mut self, name: &str, value: f32) -> bool {
        match name {
            "brls/window/width" => self.window_width = value,
            "brls/notification/width" => self.notification.width = value,
            "brls/notification/padding" => self.notification.padding = value,
            "brls/notification/slide" => self.notification.slide = value,
            "brls/animations/notification_show" => {
                self.animations.notification_show_ms = value as i32
            }
            "brls/animations/notification_timeout" => {
                self.animations.notification_timeout_ms = value as i32
            }
            "brls/ime/max_length" => self.ime.max_length = value.max(0.0) as usize,
            _ => {
                tracing::warn!(name, "unknown style metric");
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
