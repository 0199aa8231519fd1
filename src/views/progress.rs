//! Progress display and a background loader that reports through the
//! main-thread queue.
//!
//! The loader's worker thread never touches [`ProgressView`]. Every update
//! is posted as a task and applied when the run-loop drains the queue.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use spark_signals::{Signal, signal};

use crate::error::{Error, Result};
use crate::state::sync::SyncHandle;

// =============================================================================
// DISPLAY
// =============================================================================

/// Horizontal bar filled to a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressDisplay {
    percentage: f32,
}

impl ProgressDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignored when `current > max` or `max <= 0`.
    pub fn set_progress(&mut self, current: i32, max: i32) {
        if current > max || max <= 0 {
            return;
        }
        self.percentage = (current as i64 * 100 / max as i64) as f32;
    }

    pub fn set_progress_f32(&mut self, current: f32, max: f32) {
        if current > max || max <= 0.0 {
            return;
        }
        self.percentage = current * 100.0 / max;
    }

    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// Length of the filled part of a bar `width` wide.
    pub fn filled_width(&self, width: f32) -> f32 {
        width * self.percentage / 100.0
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// UI-owned loading screen state.
pub struct ProgressView {
    display: ProgressDisplay,
    label: Signal<String>,
    value: i32,
    max: i32,
    finished: bool,
}

impl ProgressView {
    pub fn new(max: i32) -> Self {
        let mut display = ProgressDisplay::new();
        display.set_progress(0, max);
        Self {
            display,
            label: signal("Loading...".to_string()),
            value: 0,
            max,
            finished: false,
        }
    }

    pub fn update_progress(&mut self, value: i32) {
        self.value = value;
        self.display.set_progress(value, self.max);
        self.label
            .set(format!("Loading... {}%", self.display.percentage() as i32));
    }

    pub fn finish_loading(&mut self) {
        self.value = self.max;
        self.display.set_progress(self.max, self.max);
        self.label.set("Loading... 100%".to_string());
        self.finished = true;
    }

    pub fn display(&self) -> &ProgressDisplay {
        &self.display
    }

    pub fn label(&self) -> String {
        self.label.get()
    }

    pub fn label_signal(&self) -> Signal<String> {
        self.label.clone()
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

// =============================================================================
// LOADER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub max: i32,
    pub step: i32,
    pub interval: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max: 1000,
            step: 10,
            interval: Duration::from_millis(50),
        }
    }
}

const WORKER_NAME: &str = "brls-progress";

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Worker thread simulating incremental loading.
pub struct ProgressLoader {
    handle: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
}

impl ProgressLoader {
    /// Spawn the worker. Updates land in the view each time the queue drains.
    pub fn spawn(sync: SyncHandle<ProgressView>, config: LoaderConfig) -> Result<Self> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let handle = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || Self::run(sync, config, flag))?;

        tracing::debug!(max = config.max, step = config.step, "progress loader started");
        Ok(Self {
            handle: Some(handle),
            cancelled,
        })
    }

    fn run(sync: SyncHandle<ProgressView>, config: LoaderConfig, cancelled: Arc<AtomicBool>) {
        let step = config.step.max(1);
        let mut value = 0;

        while value < config.max {
            if cancelled.load(Ordering::SeqCst) {
                tracing::debug!(value, "progress loader cancelled");
                return;
            }
            value = value.saturating_add(step).min(config.max);
            if sync.post(move |view| view.update_progress(value)).is_err() {
                return;
            }
            thread::sleep(config.interval);
        }

        if cancelled.load(Ordering::SeqCst) {
            return;
        }
        if sync.post(|view| view.finish_loading()).is_ok() {
            tracing::debug!("progress loader finished");
        }
    }

    /// Ask the worker to stop at its next iteration.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }

    /// Wait for the worker to exit.
    ///
    /// A panic on the worker is logged and returned as
    /// [`Error::WorkerPanicked`]; the view then never receives its finish.
    pub fn join(mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!(thread = WORKER_NAME, %message, "progress loader panicked");
            Error::WorkerPanicked {
                name: WORKER_NAME.to_string(),
                message,
            }
        })
    }
}

impl Drop for ProgressLoader {
    fn drop(&mut self) {
        // Not joined: the worker may be blocked on a full queue owned by the caller
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

// =============================================================================
// TESTS
// =============================================================================
