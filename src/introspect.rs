//! Field introspection for plain objects.
//!
//! Rust has no runtime reflection, so field enumeration is driven by
//! per-type descriptor tables. A [`TypeDescriptor`] lists a type's
//! data-carrying fields as [`FieldSlot`]s (a name plus a monomorphic
//! accessor), and a [`TypeRegistry`] maps runtime [`TypeId`]s to
//! descriptors. The
//! walker talks to all of this through the [`Introspector`] trait, so a
//! different backing (a derive, a code generator, a hand-built table) can be
//! substituted without touching the traversal core.
//!
//! Types without inheritance have no ancestor fields to merge in: a
//! descriptor listing every data-carrying field of the struct is already the
//! complete set. Unregistered types are legal; they are visited but never
//! expanded.
//!
//! # Describing a type
//!
//! For a named-field struct whose fields all implement [`crate::Node`], use
//! [`crate::graph_node!`]:
//!
//! ```
//! use graphwalk::{graph_node, Describe, TypeRegistry};
//!
//! struct Sensor {
//!     label: String,
//!     samples: Vec<f64>,
//! }
//!
//! graph_node! {
//!     Sensor { label, samples }
//! }
//!
//! let registry = TypeRegistry::new().with::<Sensor>();
//! assert_eq!(Sensor::describe().fields().len(), 2);
//! assert_eq!(registry.len(), 1);
//! ```
//!
//! Types with interior mutability or computed access implement [`Describe`]
//! by hand, building the descriptor with [`TypeDescriptor::of`] and
//! [`FieldSlot::new`].

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use crate::error::FieldReadError;
use crate::node::Node;

// ============================================================================
// Field slots
// ============================================================================

/// Outcome of reading one field: the value, an absent value, or a failure
/// the walker will swallow.
pub type FieldRead<'r> = Result<Option<&'r dyn Node>, FieldReadError>;

/// Accessor signature stored in a [`FieldSlot`].
pub type ReadFn = for<'r> fn(&'r dyn Node) -> FieldRead<'r>;

/// One data-carrying field of a described type.
#[derive(Clone, Copy)]
pub struct FieldSlot {
    owner: &'static str,
    name: &'static str,
    read: ReadFn,
}

impl FieldSlot {
    /// Create a slot from the owning type's name, the field name, and an
    /// accessor.
    pub fn new(owner: &'static str, name: &'static str, read: ReadFn) -> Self {
        FieldSlot { owner, name, read }
    }

    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type declaring this field.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Read this field from `object`.
    pub fn read<'r>(&self, object: &'r dyn Node) -> FieldRead<'r> {
        (self.read)(object)
    }
}

impl fmt::Debug for FieldSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldSlot({}.{})", self.owner, self.name)
    }
}

impl fmt::Display for FieldSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

// ============================================================================
// Type descriptors
// ============================================================================

/// The ordered field table for one type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    ty: TypeId,
    name: &'static str,
    fields: Vec<FieldSlot>,
}

impl TypeDescriptor {
    /// Start a descriptor for `T`.
    pub fn of<T: Node>(name: &'static str) -> Self {
        TypeDescriptor {
            ty: TypeId::of::<T>(),
            name,
            fields: Vec::new(),
        }
    }

    /// Append a field slot. Field order is enumeration order during a walk.
    pub fn with_field(mut self, slot: FieldSlot) -> Self {
        self.fields.push(slot);
        self
    }

    /// The described type's id.
    pub fn type_id(&self) -> TypeId {
        self.ty
    }

    /// The described type's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field table, in declaration order.
    pub fn fields(&self) -> &[FieldSlot] {
        &self.fields
    }
}

/// A type that can produce its own descriptor.
///
/// Implemented by [`crate::graph_node!`] or by hand.
pub trait Describe: Node {
    /// Build the descriptor table for this type.
    fn describe() -> TypeDescriptor;
}

// ============================================================================
// Introspector
// ============================================================================

/// Field-enumeration collaborator used by the walker.
///
/// Given a runtime type, produce its ordered field slots; given a slot and
/// an object, read the value or fail gracefully. Read failures are the
/// introspector's way of saying "skip this field"; the walker never aborts
/// on them.
pub trait Introspector {
    /// The ordered field slots of `ty`. Unknown types yield an empty slice.
    fn fields_of(&self, ty: TypeId) -> &[FieldSlot];

    /// Read one field from `object`.
    fn read<'r>(&self, slot: &FieldSlot, object: &'r dyn Node) -> FieldRead<'r> {
        slot.read(object)
    }
}

/// Descriptor-table [`Introspector`] keyed by [`TypeId`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<TypeId, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`, consuming and returning the registry for chaining.
    pub fn with<T: Describe>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Register `T`. Re-registering a type replaces its descriptor.
    pub fn register<T: Describe>(&mut self) {
        let descriptor = T::describe();
        self.types.insert(descriptor.type_id(), descriptor);
    }

    /// Whether `ty` has a descriptor.
    pub fn contains(&self, ty: TypeId) -> bool {
        self.types.contains_key(&ty)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Introspector for TypeRegistry {
    fn fields_of(&self, ty: TypeId) -> &[FieldSlot] {
        self.types
            .get(&ty)
            .map(TypeDescriptor::fields)
            .unwrap_or(&[])
    }
}

// ============================================================================
// graph_node! macro
// ============================================================================

/// Implement [`Node`] and [`Describe`] for named-field structs.
///
/// Every listed field's type must implement [`Node`]. The generated
/// accessors downcast the incoming object and borrow the field directly;
/// a downcast failure surfaces as [`FieldReadError::TypeMismatch`], which
/// the walker swallows.
///
/// ```
/// use graphwalk::graph_node;
///
/// struct Account {
///     id: u64,
///     holder: String,
/// }
///
/// struct Bank {
///     accounts: Vec<Account>,
/// }
///
/// graph_node! {
///     Account { id, holder }
///     Bank { accounts }
/// }
/// ```
#[macro_export]
macro_rules! graph_node {
    ($($ty:ident { $($field:ident),* $(,)? })+) => {
        $(
            impl $crate::Node for $ty {
                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                fn type_name(&self) -> &'static str {
                    ::core::stringify!($ty)
                }

                fn shape(&self) -> $crate::Shape<'_> {
                    $crate::Shape::Object
                }
            }

            impl $crate::Describe for $ty {
                fn describe() -> $crate::TypeDescriptor {
                    $crate::TypeDescriptor::of::<$ty>(::core::stringify!($ty))
                        $(
                            .with_field($crate::FieldSlot::new(
                                ::core::stringify!($ty),
                                ::core::stringify!($field),
                                {
                                    fn read(object: &dyn $crate::Node) -> $crate::FieldRead<'_> {
                                        match object.as_any().downcast_ref::<$ty>() {
                                            ::core::option::Option::Some(this) => {
                                                ::core::result::Result::Ok(::core::option::Option::Some(
                                                    &this.$field as &dyn $crate::Node,
                                                ))
                                            }
                                            ::core::option::Option::None => {
                                                ::core::result::Result::Err($crate::FieldReadError::type_mismatch(
                                                    ::core::stringify!($ty),
                                                    object.type_name(),
                                                ))
                                            }
                                        }
                                    }
                                    read
                                },
                            ))
                        )*
                }
            }
        )+
    };
}

// ============================================================================
// Tests
// ============================================================================
