//! Error types for the Galaxy3D spatial engine
//!
//! This module defines the error types used at the engine, façade and
//! construction-validation layers. The octree itself reports its single
//! failure mode (an object that fits nowhere) as a boolean.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Degenerate geometry (inverted box, negative radius, non-finite values)
    InvalidRegion(String),

    /// No model registered under the given id
    UnknownModel(String),

    /// No live instance for the given id or key
    UnknownInstance(String),

    /// Model already has its maximum number of instances
    InstanceLimit(String),

    /// Initialization failed (engine, subsystems)
    InitializationFailed(String),

    /// Internal failure (poisoned lock, etc.)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRegion(msg) => write!(f, "Invalid region: {}", msg),
            Error::UnknownModel(id) => write!(f, "Unknown model: {}", id),
            Error::UnknownInstance(id) => write!(f, "Unknown instance: {}", id),
            Error::InstanceLimit(msg) => write!(f, "Instance limit reached: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR entry and evaluate to an `Error`
///
/// The first form builds an `Error::BackendError` from the formatted message.
/// The second form takes an explicit variant constructor.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::Scene", "Model '{}' not found", id);
/// let err = engine_err!(Error::UnknownModel, "galaxy3d::Scene", "{}", id);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:path, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::BackendError(message)
    }};
}

/// Log an ERROR entry and return `Err` from the enclosing function
///
/// Accepts the same two forms as `engine_err!`.
#[macro_export]
macro_rules! engine_bail {
    ($variant:path, $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($variant, $source, $($arg)*))
    };
    ($source:expr, $($arg:tt)*) => {
        // Expanded inline: forwarding an `expr` fragment into `engine_err!`
        // would make its `$variant:path` arm fail to parse.
        return Err({
            let message = format!($($arg)*);
            $crate::engine_error!($source, "{}", message);
            $crate::galaxy3d::Error::BackendError(message)
        })
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
