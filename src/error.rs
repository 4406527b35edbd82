use thiserror::Error;

/// Errors surfaced by the public API.
///
/// Only categories 1 ("invalid argument"), 3 ("capacity exhausted") and 4 ("concurrent access
/// detected") appear here. Category 2 (internal consistency violations: negative reference
/// counts, stack underflow, a corrupted hash chain) are programming errors in the engine itself;
/// they are checked with `debug_assert!` in debug builds and are not part of this enum, because a
/// correctly sequenced, safe caller can never observe one.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("variable index {index} out of range (0..{variable_count})")]
    InvalidVariableIndex { index: u32, variable_count: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node id space exhausted and the table could not grow further")]
    CapacityExhausted,

    #[error("concurrent or reentrant access to the engine was detected")]
    ConcurrentAccess,
}

pub type Result<T> = std::result::Result<T, Error>;
