//! # Validation Observers
//!
//! An [`Observer`] is handed to an [`Engine`](crate::Engine) to watch a
//! traversal as it happens. All methods default to no-ops so an
//! implementation only overrides what it needs. Observers see events; they
//! cannot change the result.

use crate::error::FieldError;
use crate::path::FieldPath;
use crate::schema::Outcome;
use crate::shape::Shape;

/// Receives traversal events from the engine.
pub trait Observer: Send + Sync {
    /// A value at `path` was classified.
    fn on_shape(&self, _path: &FieldPath, _shape: Shape) {}

    /// A pipeline at `path` finished with `outcome`.
    fn on_outcome(&self, _path: &FieldPath, _outcome: &Outcome) {}

    /// A field error was recorded.
    fn on_error(&self, _error: &FieldError) {}
}

/// Forwards traversal events to `tracing` at `trace` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_shape(&self, path: &FieldPath, shape: Shape) {
        tracing::trace!(path = %path, shape = %shape, "classified value");
    }

    fn on_outcome(&self, path: &FieldPath, outcome: &Outcome) {
        tracing::trace!(path = %path, outcome = outcome.kind(), "pipeline finished");
    }

    fn on_error(&self, error: &FieldError) {
        tracing::trace!(field = %error.field, message = %error.message, "field error");
    }
}
