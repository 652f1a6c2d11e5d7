//! Error handling for the framesort library
//!
//! The failure surface of a render-queue sort is deliberately narrow: genuine
//! allocator failure while growing the scratch buffer is fatal (the process
//! aborts inside the allocator; there is no degraded mode that can sort
//! without a same-size auxiliary buffer), so the recoverable taxonomy below
//! covers only what can be detected before touching the allocator.

use thiserror::Error;

/// Main error type for the framesort library
#[derive(Error, Debug)]
pub enum FramesortError {
    /// A scratch reservation that cannot be satisfied on any host
    /// (byte size overflows the allocatable range)
    #[error("Scratch reservation impossible: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Invalid input data supplied by the caller
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },
}

impl FramesortError {
    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::OutOfMemory { .. } => false,
            Self::Configuration { .. } => true,
            Self::InvalidData { .. } => false,
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::OutOfMemory { .. } => "memory",
            Self::Configuration { .. } => "config",
            Self::InvalidData { .. } => "data",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FramesortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FramesortError::out_of_memory(usize::MAX);
        assert_eq!(err.category(), "memory");
        assert!(!err.is_recoverable());

        let err = FramesortError::configuration("prefetch_distance must be non-zero");
        assert_eq!(err.category(), "config");
        assert!(err.is_recoverable());

        let err = FramesortError::invalid_data("corrupt sort key");
        assert_eq!(err.category(), "data");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = FramesortError::out_of_memory(1 << 40);
        let display = format!("{}", err);
        assert!(display.contains("Scratch reservation impossible"));
        assert!(display.contains(&(1usize << 40).to_string()));

        let config_err = FramesortError::configuration("bad distance");
        let config_display = format!("{}", config_err);
        assert!(config_display.contains("Invalid configuration"));
        assert!(config_display.contains("bad distance"));
    }

    #[test]
    fn test_error_debug() {
        let err = FramesortError::invalid_data("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidData"));
        assert!(debug_str.contains("debug test"));
    }
}
