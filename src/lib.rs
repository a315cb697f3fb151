//! Breadth-first traversal of arbitrary in-memory object graphs.
//!
//! This crate walks a possibly cyclic graph of heterogeneous objects and
//! hands each distinct instance to a caller-supplied visitor exactly once,
//! recursing transparently through containers and skipping configured leaf
//! types. It needs no prior schema knowledge: values self-classify through
//! the [`Node`] trait, and plain objects expose their fields through
//! per-type descriptor tables.
//!
//! # Overview
//!
//! - **Traversal**: [`GraphWalker`] owns the breadth-first frontier, the
//!   identity-keyed seen set, and the single-use run lifecycle.
//! - **Classification**: every walkable value implements [`Node`] and
//!   reports a [`Shape`]: scalar, primitive buffer, array, collection,
//!   map, plain object, or a transparent smart-pointer hop.
//! - **Introspection**: [`TypeRegistry`] maps runtime types to field
//!   tables; the [`graph_node!`] macro generates the table for named-field
//!   structs. Anything can stand in via the [`Introspector`] trait.
//! - **Visitation**: a [`Visitor`] observes each surviving object;
//!   [`DispatchVisitor`] routes observations by exact runtime type.
//!
//! # Quick Start
//!
//! ```
//! use graphwalk::{graph_node, FnVisitor, GraphWalker, TypeRegistry};
//!
//! struct Team {
//!     name: String,
//!     members: Vec<Member>,
//! }
//!
//! struct Member {
//!     name: String,
//! }
//!
//! graph_node! {
//!     Team { name, members }
//!     Member { name }
//! }
//!
//! let team = Team {
//!     name: "search".to_string(),
//!     members: vec![
//!         Member { name: "ada".to_string() },
//!         Member { name: "grace".to_string() },
//!     ],
//! };
//!
//! let mut count = 0usize;
//! let mut walker = GraphWalker::new(
//!     FnVisitor::new(|_| count += 1),
//!     TypeRegistry::new().with::<Team>().with::<Member>(),
//! );
//! walker.walk(&team).unwrap();
//! drop(walker);
//!
//! // The team and both members; the name strings are default leaf types.
//! assert_eq!(count, 3);
//! ```
//!
//! # Guarantees
//!
//! - Each distinct object instance is visited at most once per walk, keyed
//!   by identity, never by the value's own equality.
//! - Containers are structural pass-throughs: arrays, collections, and map
//!   values unwrap at any nesting depth; map keys are never traversed.
//! - Visits happen in breadth-first discovery order.
//! - A walker instance runs exactly once; reuse is a [`WalkError`].
//!
//! The walker borrows the graph immutably for the duration of the walk and
//! assumes a stable snapshot: concurrent mutation from another thread is
//! outside the contract.

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Error types for walk lifecycle, visitor faults, and field access.
pub mod error;
pub use error::{FieldReadError, VisitError, WalkError};

/// Identity-keyed membership for visited objects.
pub mod identity;
pub use identity::{IdentityKey, IdentitySet};

/// Field introspection: descriptor tables and the registry.
pub mod introspect;
pub use introspect::{
    Describe, FieldRead, FieldSlot, Introspector, ReadFn, TypeDescriptor, TypeRegistry,
};

/// The node abstraction and shape classification.
pub mod node;
pub use node::{Node, Shape};

/// Visitor interfaces: the core trait, closure adapter, and type dispatch.
pub mod visitor;
pub use visitor::{DispatchVisitor, FnVisitor, Visitor};

/// The breadth-first traversal engine.
pub mod walker;
pub use walker::GraphWalker;
