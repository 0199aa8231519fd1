//! Main-Thread Queue - Marshal work from background threads onto the UI
//!
//! UI state has a single writer: the run-loop thread. Worker threads never
//! touch it. Instead they post closures through a [`SyncHandle`]; the
//! run-loop calls [`MainThreadQueue::drain`] once per frame and runs them
//! against the state it owns.
//!
//! # Pattern
//!
//! - The queue is bounded; `post` blocks a producer while it is full
//! - `try_post` never blocks and reports `QueueFull` / `QueueDisconnected`
//! - Tasks run in FIFO order, on the draining thread only
//! - A drain runs what was pending when it began; later posts wait a frame
//!
//! # Example
//!
//! ```ignore
//! use borealis_core::state::sync::MainThreadQueue;
//!
//! let queue = MainThreadQueue::<u32>::new(64);
//! let handle = queue.handle();
//!
//! std::thread::spawn(move || {
//!     handle.post(|count| *count += 1).ok();
//! });
//!
//! // Once per frame, on the UI thread
//! let mut count = 0;
//! queue.drain(&mut count);
//! ```

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

use crate::error::{Error, Result};

/// A unit of work run against UI-owned state `S`.
pub type Task<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Default queue depth.
pub const DEFAULT_CAPACITY: usize = 256;

// =============================================================================
// QUEUE (consumer side)
// =============================================================================

/// Consumer end, owned by the run-loop.
pub struct MainThreadQueue<S> {
    tx: Sender<Task<S>>,
    rx: Receiver<Task<S>>,
}

impl<S> MainThreadQueue<S> {
    /// Create a queue holding up to `capacity` tasks (at least one).
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self { tx, rx }
    }

    /// Producer handle for worker threads.
    pub fn handle(&self) -> SyncHandle<S> {
        SyncHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run the tasks pending at entry against `state`. Returns how many ran.
    ///
    /// Tasks posted while draining wait for the next call, so one frame's
    /// drain is bounded even with a producer that never pauses.
    pub fn drain(&self, state: &mut S) -> usize {
        let pending = self.rx.len();
        let mut ran = 0;
        for task in self.rx.try_iter().take(pending) {
            task(state);
            ran += 1;
        }
        if ran > 0 {
            tracing::trace!(ran, "drained main-thread tasks");
        }
        ran
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Whether no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Maximum number of queued tasks before `post` blocks.
    pub fn capacity(&self) -> usize {
        self.rx.capacity().unwrap_or(DEFAULT_CAPACITY)
    }
}

impl<S> Default for MainThreadQueue<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// =============================================================================
// HANDLE (producer side)
// =============================================================================

/// Cloneable producer end. `Send` regardless of `S`.
pub struct SyncHandle<S> {
    tx: Sender<Task<S>>,
}

impl<S> Clone for SyncHandle<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S> SyncHandle<S> {
    /// Post a task, blocking while the queue is full.
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.tx.send(Box::new(task)).map_err(|_| {
            tracing::debug!("main-thread queue gone, dropping task");
            Error::QueueDisconnected
        })
    }

    /// Post a task without blocking.
    pub fn try_post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.tx.try_send(Box::new(task)).map_err(|err| match err {
            TrySendError::Full(_) => Error::QueueFull,
            TrySendError::Disconnected(_) => Error::QueueDisconnected,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_drain_runs_in_order() {
        let queue = MainThreadQueue::<Vec<u32>>::new(8);
        let handle = queue.handle();
        for i in 0..5 {
            handle.post(move |v| v.push(i)).unwrap();
        }
        assert_eq!(queue.pending(), 5);

        let mut seen = Vec::new();
        assert_eq!(queue.drain(&mut seen), 5);
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
        assert_eq!(queue.drain(&mut seen), 0);
    }

    #[test]
    fn test_try_post_full() {
        let queue = MainThreadQueue::<u32>::new(2);
        let handle = queue.handle();
        handle.try_post(|n| *n += 1).unwrap();
        handle.try_post(|n| *n += 1).unwrap();

        assert!(matches!(handle.try_post(|n| *n += 1), Err(Error::QueueFull)));

        let mut n = 0;
        queue.drain(&mut n);
        assert_eq!(n, 2);
        assert!(handle.try_post(|n| *n += 1).is_ok());
    }

    #[test]
    fn test_post_after_queue_dropped() {
        let queue = MainThreadQueue::<u32>::new(2);
        let handle = queue.handle();
        drop(queue);

        assert!(matches!(handle.post(|_| {}), Err(Error::QueueDisconnected)));
        assert!(matches!(handle.try_post(|_| {}), Err(Error::QueueDisconnected)));
    }

    #[test]
    fn test_tasks_posted_during_drain_wait_for_next_frame() {
        let queue = MainThreadQueue::<Vec<u32>>::new(8);
        let handle = queue.handle();
        let inner = handle.clone();
        handle
            .post(move |v| {
                v.push(1);
                inner.post(|v| v.push(2)).unwrap();
            })
            .unwrap();

        let mut seen = Vec::new();
        assert_eq!(queue.drain(&mut seen), 1);
        assert_eq!(seen, vec![1]);
        assert_eq!(queue.pending(), 1);

        assert_eq!(queue.drain(&mut seen), 1);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let queue = MainThreadQueue::<u32>::new(0);
        assert_eq!(queue.capacity(), 1);
    }

    #[test]
    fn test_cross_thread_posts() {
        let queue = MainThreadQueue::<u32>::new(4);
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = queue.handle();
                thread::spawn(move || {
                    for _ in 0..25 {
                        handle.post(|n| *n += 1).unwrap();
                    }
                })
            })
            .collect();

        // Keep draining so blocked producers make progress
        let mut total = 0;
        while workers.iter().any(|w| !w.is_finished()) {
            queue.drain(&mut total);
            thread::yield_now();
        }
        for worker in workers {
            worker.join().unwrap();
        }
        queue.drain(&mut total);

        assert_eq!(total, 100);
    }
}
