//! Error types for the fallible edges of the toolkit.
//!
//! The editing and animation cores never fail. Errors only come from parsing
//! user-entered text, spawning workers and posting to the main-thread queue.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse input {input:?}, did you enter a valid integer?")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Main-thread queue is full")]
    QueueFull,

    #[error("Main-thread queue is disconnected")]
    QueueDisconnected,

    #[error("Worker thread {name:?} panicked: {message}")]
    WorkerPanicked { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
