// rfpoller/src/error.rs

use thiserror::Error;

/// Crate-wide error type.
///
/// Absence of a device is an expected outcome and is modelled as
/// [`Error::NotFound`] / [`Error::Timeout`]; the discovery stages consume
/// these instead of propagating them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no device responded")]
    NotFound,

    #[error("operation timed out")]
    Timeout,

    #[error("collision detected")]
    Collision,

    #[error("bad request: {0}")]
    Request(&'static str),

    #[error("io error: {0}")]
    Io(String),

    #[error("protocol error: {0}")]
    Protocol(&'static str),

    #[error("invalid frame length: at most {max} bytes, got {actual}")]
    FrameLength { max: usize, actual: usize },

    #[error("invalid identifier length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("wrong state: {0}")]
    WrongState(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
