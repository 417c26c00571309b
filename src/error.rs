use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Failed to read trace: {0}")]
    TraceError(#[from] TraceError),

    #[error("Memory error: {0}")]
    MemoryError(#[from] MemoryError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    UsageError(String),
}

/// Errors raised while building a hierarchy from its configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} capacity must be positive")]
    ZeroCapacity(&'static str),

    #[error("{0} line size must be positive")]
    ZeroLineSize(&'static str),

    #[error("{level} line size ({line_size} B) exceeds its capacity ({capacity} B)")]
    LineLargerThanCapacity {
        level: &'static str,
        line_size: u64,
        capacity: u64,
    },

    #[error("Failed to load configuration file '{0}': {1}")]
    LoadError(PathBuf, String),
}

/// Errors related to reading instruction traces
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file '{0}': {1}")]
    FileReadError(PathBuf, #[source] std::io::Error),

    #[error("Invalid address '{token}' at line {line}")]
    InvalidAddress { line: usize, token: String },

    #[error("Invalid size '{token}' at line {line}")]
    InvalidSize { line: usize, token: String },

    #[error("Invalid format at line {line}: expected 'kind address [size]'")]
    InvalidFormat { line: usize },
}

/// Errors related to memory state consistency
#[derive(Error, Debug, PartialEq)]
pub enum MemoryError {
    #[error(
        "{level} holds {lines} lines of {line_size} B, exceeding its capacity of {capacity} B"
    )]
    CapacityExceeded {
        level: &'static str,
        lines: usize,
        line_size: u64,
        capacity: u64,
    },

    #[error("{level} line at {block_address:#x} was stamped at {last_used}, after clock {clock}")]
    TimestampFromFuture {
        level: &'static str,
        block_address: u64,
        last_used: u64,
        clock: u64,
    },
}

/// Type alias for Result with SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;
