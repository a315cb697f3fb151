//! The breadth-first traversal engine.
//!
//! [`GraphWalker`] drives a single walk over an object graph: it seeds a
//! FIFO frontier with the root, then repeatedly pops the head, hands it to
//! the visitor, enumerates its fields through the introspector, and feeds
//! each field value back through the consider step. Containers unwrap
//! transparently; cycles and shared sub-objects are cut off by the
//! identity-keyed seen set.
//!
//! # Lifecycle
//!
//! An engine moves `Fresh → Running → Finished` and never back. Ignored
//! types can be added while `Fresh`; [`GraphWalker::walk`] runs once and
//! leaves the engine `Finished` whether it completed or a visitor fault
//! ended it early. Any later walk or configuration call fails with a
//! [`WalkError`].
//!
//! # Ordering
//!
//! Visits happen in breadth-first discovery order: children of one parent
//! in field/element enumeration order, parents before the objects they
//! introduced.

use std::any::{Any, TypeId};
use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::error::WalkError;
use crate::identity::{IdentityKey, IdentitySet};
use crate::introspect::Introspector;
use crate::node::{Node, Shape};
use crate::visitor::Visitor;

// ============================================================================
// Walk state
// ============================================================================

/// Engine lifecycle state, checked at every mutating entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Fresh,
    Running,
    Finished,
}

// ============================================================================
// Frontier
// ============================================================================

/// Per-walk traversal state: the pending queue plus the seen set.
///
/// An identity enters `seen` the moment it is first scheduled and never
/// leaves, so a key is in at most one place at a time: the pending queue
/// holds the subset of seen objects that still await their visit, and
/// containers and primitive buffers are seen without ever being queued.
#[derive(Default)]
struct Frontier<'g> {
    pending: VecDeque<&'g dyn Node>,
    seen: IdentitySet,
}

impl<'g> Frontier<'g> {
    /// Record an identity. Returns `false` if it was already scheduled or
    /// handled.
    fn admit(&mut self, key: IdentityKey) -> bool {
        self.seen.insert(key)
    }

    fn enqueue(&mut self, value: &'g dyn Node) {
        self.pending.push_back(value);
    }

    fn pop(&mut self) -> Option<&'g dyn Node> {
        self.pending.pop_front()
    }
}

// ============================================================================
// GraphWalker
// ============================================================================

/// Single-use breadth-first object graph walker.
///
/// Constructed with a [`Visitor`] and an [`Introspector`], optionally
/// configured with extra ignored types, walked exactly once, then inert.
///
/// The default ignored types are `String`, `&'static str`, `bool`, and the
/// primitive numeric types: common leaf values whose fields are never worth
/// expanding. Numeric and boolean values are already dropped as scalars
/// before the type check; their entries keep the set meaningful for values
/// that arrive behind an indirection.
///
/// ```
/// use graphwalk::{graph_node, FnVisitor, GraphWalker, TypeRegistry};
///
/// struct Doc {
///     title: String,
///     sections: Vec<Doc>,
/// }
///
/// graph_node! {
///     Doc { title, sections }
/// }
///
/// let doc = Doc {
///     title: "root".to_string(),
///     sections: vec![Doc { title: "intro".to_string(), sections: Vec::new() }],
/// };
///
/// let mut count = 0usize;
/// let mut walker = GraphWalker::new(
///     FnVisitor::new(|_| count += 1),
///     TypeRegistry::new().with::<Doc>(),
/// );
/// walker.walk(&doc).unwrap();
/// drop(walker);
/// assert_eq!(count, 2);
/// ```
pub struct GraphWalker<V, I> {
    visitor: V,
    introspector: I,
    ignored: HashSet<TypeId>,
    state: WalkState,
}

impl<V: Visitor, I: Introspector> GraphWalker<V, I> {
    /// Create a walker with the default ignored types.
    pub fn new(visitor: V, introspector: I) -> Self {
        GraphWalker {
            visitor,
            introspector,
            ignored: default_ignored_types(),
            state: WalkState::Fresh,
        }
    }

    /// Treat `T` as an opaque leaf: never visited, never expanded.
    ///
    /// Idempotent. Legal only before the walk starts.
    pub fn add_ignored_type<T: Any>(&mut self) -> Result<(), WalkError> {
        if self.state != WalkState::Fresh {
            return Err(WalkError::ConfigAfterRun);
        }
        self.ignored.insert(TypeId::of::<T>());
        Ok(())
    }

    /// Walk the graph reachable from `root`.
    ///
    /// Every object reachable through fields, array elements, collection
    /// elements, and map values (never map keys) that is not a scalar and
    /// not of an ignored type is passed to the visitor exactly once, in
    /// breadth-first discovery order. Field-read failures are skipped; a
    /// visitor fault ends the walk and surfaces as [`WalkError::Visitor`].
    ///
    /// The engine is left finished on any outcome; a second call fails with
    /// [`WalkError::AlreadyRun`].
    pub fn walk(&mut self, root: &dyn Node) -> Result<(), WalkError> {
        self.begin()?;
        debug!(root = root.type_name(), "starting object graph walk");
        let result = self.run(root);
        self.state = WalkState::Finished;
        result
    }

    /// Borrow the visitor, e.g. to inspect what it collected mid-flight.
    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Recover the visitor after the walk.
    pub fn into_visitor(self) -> V {
        self.visitor
    }

    fn begin(&mut self) -> Result<(), WalkError> {
        match self.state {
            WalkState::Fresh => {
                self.state = WalkState::Running;
                Ok(())
            }
            WalkState::Running | WalkState::Finished => Err(WalkError::AlreadyRun),
        }
    }

    fn run(&mut self, root: &dyn Node) -> Result<(), WalkError> {
        let mut frontier = Frontier::default();
        self.consider(&mut frontier, root);

        let mut visited: u64 = 0;
        while let Some(object) = frontier.pop() {
            trace!(ty = object.type_name(), "visiting");
            self.visitor.visit(object)?;
            visited += 1;

            for slot in self.introspector.fields_of(object.as_any().type_id()) {
                match self.introspector.read(slot, object) {
                    Ok(Some(value)) => self.consider(&mut frontier, value),
                    Ok(None) => {}
                    Err(err) => {
                        trace!(field = %slot, error = %err, "field read failed; skipping");
                    }
                }
            }
        }

        debug!(visited, "object graph walk finished");
        Ok(())
    }

    /// Decide what to do with one encountered value: drop it, record it,
    /// expand it, or queue it for a visit.
    fn consider<'g>(&self, frontier: &mut Frontier<'g>, value: &'g dyn Node) {
        match value.shape() {
            Shape::Indirect(target) => self.consider(frontier, target),
            Shape::Scalar => {}
            shape => {
                if self.ignored.contains(&value.as_any().type_id()) {
                    return;
                }
                if !frontier.admit(IdentityKey::of(value)) {
                    return;
                }
                match shape {
                    Shape::Array(elements)
                    | Shape::Collection(elements)
                    | Shape::Map(elements) => {
                        for element in elements {
                            self.consider(frontier, element);
                        }
                    }
                    Shape::Object => frontier.enqueue(value),
                    // Primitive buffers stay seen but are never expanded or
                    // queued; scalars and indirections never reach here.
                    Shape::PrimitiveArray | Shape::Scalar | Shape::Indirect(_) => {}
                }
            }
        }
    }
}

/// The default ignored-type set: string-like, numeric, and boolean types.
fn default_ignored_types() -> HashSet<TypeId> {
    [
        TypeId::of::<String>(),
        TypeId::of::<&'static str>(),
        TypeId::of::<bool>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// Tests
// ============================================================================
