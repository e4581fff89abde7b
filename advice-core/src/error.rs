//! Error types for advice operations.
//!
//! Two kinds of failure flow through this crate:
//!
//! - **Registration failures** are produced by the engine itself when a
//!   registration or a call names a member that is missing, not callable, or
//!   callable with the wrong calling convention.
//! - **Raised failures** come from user code (base methods and interceptors).
//!   They are wrapped once into [`AdviceError::Raised`] where they are produced
//!   and then travel through every composition layer untouched.
//!
//! Errors reported by an asynchronous method through its
//! [`Completion`](crate::Completion) are data, not `AdviceError`s.

use thiserror::Error;

/// The main error type for all advice operations.
///
/// # Examples
///
/// ```rust
/// use advice_core::error::AdviceError;
///
/// let error = AdviceError::lookup("save");
/// assert_eq!(error.to_string(), "No method named 'save' on target");
/// assert_eq!(error.category(), "lookup");
/// ```
#[derive(Error, Debug)]
pub enum AdviceError {
    /// No member is bound to the requested name
    #[error("No method named '{method}' on target")]
    Lookup {
        /// The name that failed to resolve
        method: String,
    },

    /// The member exists but cannot be called the way the operation needs
    #[error("Member '{method}' is not a {expected} (found {found})")]
    NotCallable {
        /// The name that was resolved
        method: String,
        /// Kind of member the operation needed
        expected: &'static str,
        /// Kind of member actually bound to the name
        found: &'static str,
    },

    /// A registration operation was used on a target the mixin was never applied to
    #[error("Operation '{operation}' is not installed on target; apply the mixin first")]
    NotAdvised {
        /// Name of the missing operation member
        operation: String,
    },

    /// Failure raised by a base method or an interceptor
    #[error(transparent)]
    Raised(#[from] anyhow::Error),

    /// Configuration errors (unreadable or malformed config files)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors while persisting configuration
    #[error("IO error: {source}")]
    Io {
        #[from]
        /// The underlying IO error
        source: std::io::Error,
    },
}

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file has invalid format
    #[error("Invalid configuration format in {path}: {reason}")]
    InvalidFormat { path: String, reason: String },
}

/// Convenience type alias for Results using AdviceError.
pub type AdviceResult<T> = Result<T, AdviceError>;

impl AdviceError {
    /// Create a raised failure from a message.
    ///
    /// This is the usual way for base methods and interceptors to fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use advice_core::error::AdviceError;
    ///
    /// let error = AdviceError::raised("disk full");
    /// assert_eq!(error.to_string(), "disk full");
    /// ```
    pub fn raised<M>(message: M) -> Self
    where
        M: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        Self::Raised(anyhow::Error::msg(message))
    }

    /// Create a lookup error for a missing member.
    pub fn lookup(method: impl Into<String>) -> Self {
        Self::Lookup {
            method: method.into(),
        }
    }

    /// Get the error category for this error.
    pub fn category(&self) -> &'static str {
        match self {
            AdviceError::Lookup { .. } => "lookup",
            AdviceError::NotCallable { .. } => "not_callable",
            AdviceError::NotAdvised { .. } => "not_advised",
            AdviceError::Raised(_) => "raised",
            AdviceError::Config(_) => "config",
            AdviceError::Io { .. } => "io",
        }
    }
}
