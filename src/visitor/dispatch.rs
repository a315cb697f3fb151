//! Per-type visitor routing.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::VisitError;
use crate::node::Node;
use crate::visitor::{FnVisitor, Visitor};

/// Routes each observed object to a visitor registered for its exact
/// runtime type, falling back to a default (initially a no-op).
///
/// Lookup is by exact [`TypeId`]; there is no structural or trait-based
/// matching. The composed value is itself a [`Visitor`], so it plugs
/// directly into a [`crate::GraphWalker`].
///
/// ```
/// use graphwalk::{DispatchVisitor, FnVisitor};
///
/// let dispatch = DispatchVisitor::new()
///     .with_visitor::<String>(FnVisitor::new(|_| println!("a string")))
///     .with_default(FnVisitor::new(|_| println!("something else")));
/// # let _ = dispatch;
/// ```
pub struct DispatchVisitor {
    routes: HashMap<TypeId, Box<dyn Visitor>>,
    fallback: Box<dyn Visitor>,
}

impl DispatchVisitor {
    /// Create a dispatcher whose default route does nothing.
    pub fn new() -> Self {
        DispatchVisitor {
            routes: HashMap::new(),
            fallback: Box::new(FnVisitor::new(|_: &dyn Node| {})),
        }
    }

    /// Route objects of exact type `T` to `visitor`.
    pub fn with_visitor<T: Any>(mut self, visitor: impl Visitor + 'static) -> Self {
        self.routes.insert(TypeId::of::<T>(), Box::new(visitor));
        self
    }

    /// Replace the default route.
    pub fn with_default(mut self, visitor: impl Visitor + 'static) -> Self {
        self.fallback = Box::new(visitor);
        self
    }
}

impl Default for DispatchVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for DispatchVisitor {
    fn visit(&mut self, object: &dyn Node) -> Result<(), VisitError> {
        match self.routes.get_mut(&object.as_any().type_id()) {
            Some(visitor) => visitor.visit(object),
            None => self.fallback.visit(object),
        }
    }
}
