//! Animation Timer - Step sequences driven by the host run-loop
//!
//! An [`Animatable`] moves a single `f32` through an ordered list of timed
//! steps. Each step eases from the previous endpoint to its own target over
//! its duration. The timer never schedules itself: the owner calls
//! [`Animatable::advance`] once per frame with the elapsed time.
//!
//! # Pattern
//!
//! - `reset(initial)` then one `add_step` per segment
//! - Tick callback receives the interpolated value on every advance
//! - End callback fires once, with `true`, after the last step
//! - `stop()` silences the timer without firing the end callback
//!
//! # Example
//!
//! ```ignore
//! use borealis_core::state::animate::Animatable;
//! use borealis_core::state::easing::EasingFunction;
//! use std::time::Duration;
//!
//! let mut timer = Animatable::new(275.0);
//! timer.add_step(0.0, 250, EasingFunction::QuadraticOut);
//! timer.add_step(0.0, 4000, EasingFunction::Linear);
//! timer.add_step(275.0, 250, EasingFunction::QuadraticOut);
//! timer.set_tick_callback(|x| println!("x = {}", x));
//! timer.set_end_callback(|finished| println!("done: {}", finished));
//! timer.start();
//!
//! // Once per frame
//! timer.advance(Duration::from_millis(16));
//! ```

use std::time::Duration;

use super::easing::EasingFunction;

// =============================================================================
// TYPES
// =============================================================================

/// Called with the current value after every advance.
pub type TickCallback = Box<dyn FnMut(f32)>;

/// Called once when the sequence completes. The flag is `true` on natural finish.
pub type EndCallback = Box<dyn FnMut(bool)>;

/// Lifecycle of an animation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
    Finished,
}

/// One segment of a sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub target: f32,
    pub duration_ms: u32,
    pub easing: EasingFunction,
}

impl Step {
    /// Length of this step.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }
}

// =============================================================================
// ANIMATABLE
// =============================================================================

/// A value animated through a sequence of eased steps.
pub struct Animatable {
    steps: Vec<Step>,
    current_step: usize,
    /// Endpoint of the previous step, start of the current one.
    step_origin: f32,
    value: f32,
    /// Time spent in the current step, at full `Duration` precision.
    elapsed_in_step: Duration,
    state: AnimationState,
    halted: bool,
    tick_callback: Option<TickCallback>,
    end_callback: Option<EndCallback>,
}

impl Animatable {
    /// Create an idle timer holding `initial`, with no steps and no callbacks.
    pub fn new(initial: f32) -> Self {
        Self {
            steps: Vec::new(),
            current_step: 0,
            step_origin: initial,
            value: initial,
            elapsed_in_step: Duration::ZERO,
            state: AnimationState::Idle,
            halted: false,
            tick_callback: None,
            end_callback: None,
        }
    }

    /// Set the value and drop all steps. Callbacks are kept.
    pub fn reset(&mut self, initial: f32) {
        self.steps.clear();
        self.current_step = 0;
        self.step_origin = initial;
        self.value = initial;
        self.elapsed_in_step = Duration::ZERO;
        self.state = AnimationState::Idle;
        self.halted = false;
    }

    /// Append a step. Negative durations are clamped to zero.
    pub fn add_step(&mut self, target: f32, duration_ms: i32, easing: EasingFunction) {
        self.steps.push(Step {
            target,
            duration_ms: duration_ms.max(0) as u32,
            easing,
        });
    }

    /// Replace the callback run with the current value after every advance.
    pub fn set_tick_callback<F>(&mut self, callback: F)
    where
        F: FnMut(f32) + 'static,
    {
        self.tick_callback = Some(Box::new(callback));
    }

    /// Replace the callback run once when the last step completes.
    pub fn set_end_callback<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.end_callback = Some(Box::new(callback));
    }

    /// Begin consuming steps.
    ///
    /// Only valid from `Idle`. A sequence without steps finishes right here.
    pub fn start(&mut self) {
        if self.state != AnimationState::Idle || self.halted {
            return;
        }

        self.state = AnimationState::Running;
        if self.steps.is_empty() {
            self.finish();
        }
    }

    /// Halt ticking. No callback fires after this, the state is left as is.
    pub fn stop(&mut self) {
        self.halted = true;
    }

    /// Advance the sequence by `delta`.
    ///
    /// Time left over after a step ends is carried into the next one. No
    /// fraction of `delta` is dropped, so once the summed deltas reach
    /// [`total_duration`](Self::total_duration) the sequence has finished.
    ///
    /// # Arguments
    ///
    /// * `delta` - Time since the previous advance, typically one frame
    pub fn advance(&mut self, delta: Duration) {
        if self.state != AnimationState::Running || self.halted {
            return;
        }

        self.elapsed_in_step = self.elapsed_in_step.saturating_add(delta);

        while let Some(step) = self.steps.get(self.current_step).copied() {
            let duration = step.duration();
            if self.elapsed_in_step >= duration {
                self.elapsed_in_step -= duration;
                self.step_origin = step.target;
                self.value = step.target;
                self.current_step += 1;
            } else {
                let t = (self.elapsed_in_step.as_secs_f64() / duration.as_secs_f64()) as f32;
                let eased = step.easing.apply(t);
                self.value = self.step_origin + (step.target - self.step_origin) * eased;
                break;
            }
        }

        if let Some(tick) = self.tick_callback.as_mut() {
            tick(self.value);
        }

        if self.current_step >= self.steps.len() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.state = AnimationState::Finished;
        self.elapsed_in_step = Duration::ZERO;
        if let Some(end) = self.end_callback.as_mut() {
            end(true);
        }
    }

    /// Current interpolated value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Lifecycle state. A stopped timer keeps reporting `Running`.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Running and not stopped.
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running && !self.halted
    }

    /// Whether [`stop`](Self::stop) was called since the last reset.
    pub fn is_stopped(&self) -> bool {
        self.halted
    }

    /// Steps in the order they run.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Sum of all step durations.
    pub fn total_duration(&self) -> Duration {
        let ms: u64 = self.steps.iter().map(|s| s.duration_ms as u64).sum();
        Duration::from_millis(ms)
    }
}

impl Default for Animatable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl std::fmt::Debug for Animatable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animatable")
            .field("steps", &self.steps)
            .field("current_step", &self.current_step)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("halted", &self.halted)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
