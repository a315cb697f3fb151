//! Error types for graph traversal.
//!
//! Three families, kept deliberately separate:
//! - [`WalkError`]: misuse of the walker lifecycle, plus visitor faults
//!   surfaced through [`crate::GraphWalker::walk`].
//! - [`VisitError`]: a fault raised by a visitor. Aborts the walk; the walker
//!   does not catch or retry it.
//! - [`FieldReadError`]: a field accessor failure. Expected and recoverable;
//!   the walker skips the field and continues.

use thiserror::Error;

// ============================================================================
// Visitor faults
// ============================================================================

/// Fault raised by a [`crate::Visitor`] while observing an object.
///
/// A visitor fault ends the walk immediately and surfaces to the caller as
/// [`WalkError::Visitor`]. The walker is left finished and cannot be reused.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct VisitError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl VisitError {
    /// Create a fault from a message.
    pub fn new(message: impl Into<String>) -> Self {
        VisitError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a fault wrapping an underlying error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        VisitError {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// ============================================================================
// Walk lifecycle errors
// ============================================================================

/// Errors surfaced by [`crate::GraphWalker`].
///
/// The lifecycle variants are caller bugs: a walker instance is configured
/// before its single walk and is inert afterwards.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The walker has already run. Instances are single-use.
    #[error("walker has already run; construct a new walker for another pass")]
    AlreadyRun,

    /// Ignored types can only be configured before the walk starts.
    #[error("ignored types can only be added before the walk starts")]
    ConfigAfterRun,

    /// A visitor fault ended the walk.
    #[error("visitor fault: {0}")]
    Visitor(#[from] VisitError),
}

// ============================================================================
// Field access errors
// ============================================================================

/// Errors produced by field accessors during object expansion.
///
/// The walker swallows these: a single unreadable field never aborts the
/// traversal of the rest of the graph. Swallowed failures are logged at
/// trace level.
#[derive(Debug, Error)]
pub enum FieldReadError {
    /// The accessor was handed an object of the wrong runtime type.
    #[error("expected a {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The field exists but its value cannot be produced right now.
    #[error("field {field} on {owner} is not readable")]
    Unreadable {
        owner: &'static str,
        field: &'static str,
    },
}

impl FieldReadError {
    /// Create a type-mismatch error.
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        FieldReadError::TypeMismatch { expected, found }
    }

    /// Create an unreadable-field error.
    pub fn unreadable(owner: &'static str, field: &'static str) -> Self {
        FieldReadError::Unreadable { owner, field }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_error_display() {
        let err = VisitError::new("quota exceeded");
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn visit_error_keeps_source() {
        let io = std::io::Error::other("disk full");
        let err = VisitError::with_source("export failed", io);
        assert_eq!(err.to_string(), "export failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn walk_error_wraps_visitor_fault() {
        let err = WalkError::from(VisitError::new("boom"));
        assert_eq!(err.to_string(), "visitor fault: boom");
    }

    #[test]
    fn field_read_error_display() {
        let err = FieldReadError::type_mismatch("Record", "Widget");
        assert_eq!(err.to_string(), "expected a Record, found Widget");

        let err = FieldReadError::unreadable("Record", "items");
        assert_eq!(err.to_string(), "field items on Record is not readable");
    }
}
