//! Visitor interfaces for graph traversal.
//!
//! A [`Visitor`] receives each surviving object exactly once, in visitation
//! order, on the walking thread. Side effects (collection, masking,
//! validation, export staging) are entirely the visitor's business; the
//! walker only observes the graph and delegates.
//!
//! [`FnVisitor`] adapts an infallible closure. [`DispatchVisitor`] routes
//! observations to per-type visitors with a default fallback.

mod dispatch;

pub use dispatch::DispatchVisitor;

use crate::error::VisitError;
use crate::node::Node;

/// Callback capability invoked once per distinct visited object.
pub trait Visitor {
    /// Observe one object.
    ///
    /// `object` is always a plain object: never null, never a scalar, never
    /// a container. Returning an error aborts the walk; the error surfaces
    /// unmodified to the caller of [`crate::GraphWalker::walk`].
    fn visit(&mut self, object: &dyn Node) -> Result<(), VisitError>;
}

/// [`Visitor`] adapter for infallible closures.
///
/// ```
/// use graphwalk::FnVisitor;
///
/// let mut count = 0usize;
/// let mut visitor = FnVisitor::new(|_| count += 1);
/// # let _ = &mut visitor;
/// ```
pub struct FnVisitor<F>(F);

impl<F: FnMut(&dyn Node)> FnVisitor<F> {
    /// Wrap a closure.
    pub fn new(callback: F) -> Self {
        FnVisitor(callback)
    }
}

impl<F: FnMut(&dyn Node)> Visitor for FnVisitor<F> {
    fn visit(&mut self, object: &dyn Node) -> Result<(), VisitError> {
        (self.0)(object);
        Ok(())
    }
}
