//! Error handling for the oscilloscope core
//!
//! This module defines the error type and a Result alias used by the
//! analysis, configuration and shell modules. Waveform synthesis is total
//! and never returns an error.

use thiserror::Error;

/// Main error type for oscilloscope operations
#[derive(Error, Debug)]
pub enum ScopeError {
    /// A caller supplied an argument outside the operation's domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors related to configuration loading/saving/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScopeError>,
    },
}

impl ScopeError {
    /// Shorthand for an [`ScopeError::InvalidArgument`]
    pub fn invalid(message: impl Into<String>) -> Self {
        ScopeError::InvalidArgument(message.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScopeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True if this error (or the error it wraps) is an invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            ScopeError::InvalidArgument(_) => true,
            ScopeError::WithContext { source, .. } => source.is_invalid_argument(),
            _ => false,
        }
    }
}

/// Result type alias for oscilloscope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
