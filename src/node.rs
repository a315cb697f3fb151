//! The node abstraction and shape classification for walkable values.
//!
//! Every value a walk can encounter implements [`Node`] and self-reports a
//! [`Shape`], which tells the walker how to treat it:
//!
//! - **Scalars** (`u32`, `f64`, `bool`, `char`, `&'static str`, ...) are
//!   leaves. They are dropped before identity tracking even starts.
//! - **Primitive buffers** (`Vec<u8>`, `[f64; N]`, ...) are opaque: an
//!   unboxed primitive element is not an object and cannot be visited.
//! - **Arrays, collections, and maps** are structural pass-throughs. The
//!   container itself is never visited; its elements (for maps: its values)
//!   are considered one by one, in the container's iteration order.
//! - **Plain objects** are the things visitors actually see. Their fields
//!   are enumerated through an [`crate::Introspector`].
//! - **Indirections** (`Box`, `Rc`, `Arc`, references) are resolved before
//!   anything else happens, so shared ownership deduplicates on the pointee.
//!
//! Map keys are opaque identifiers, never graph content. The map impls
//! encode that at the type level: the key type is not required to implement
//! [`Node`] at all.
//!
//! Classification happens per value, not per type, and is re-applied at
//! every nesting level, so a collection of collections of objects unwraps
//! transparently.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// Shape
// ============================================================================

/// How the walker should treat one value.
///
/// Container variants carry their children eagerly; the walker consumes the
/// shape of a container exactly once, when the container is first considered.
pub enum Shape<'a> {
    /// A primitive leaf value. Dropped without identity tracking.
    Scalar,
    /// A contiguous buffer of unboxed primitives. Recorded as seen, never
    /// expanded element-by-element.
    PrimitiveArray,
    /// A fixed-size array of reference elements, in index order.
    Array(Vec<&'a dyn Node>),
    /// A sequence or set of reference elements, in iteration order.
    Collection(Vec<&'a dyn Node>),
    /// A map's values, in iteration order. Keys are not represented.
    Map(Vec<&'a dyn Node>),
    /// A plain object: visited, then expanded through the introspector.
    Object,
    /// A transparent hop to the pointee of a smart pointer or reference.
    Indirect(&'a dyn Node),
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => f.write_str("Scalar"),
            Shape::PrimitiveArray => f.write_str("PrimitiveArray"),
            Shape::Array(items) => write!(f, "Array(len={})", items.len()),
            Shape::Collection(items) => write!(f, "Collection(len={})", items.len()),
            Shape::Map(values) => write!(f, "Map(len={})", values.len()),
            Shape::Object => f.write_str("Object"),
            Shape::Indirect(_) => f.write_str("Indirect"),
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// A value that can appear in a walked object graph.
///
/// Implementations exist for the primitive scalars, `String`, the common
/// std containers, smart pointers, and `'static` references. Domain structs
/// get their impl from the [`crate::graph_node!`] macro, or by hand for
/// types with interior mutability or other unusual access paths.
pub trait Node: Any {
    /// The value as [`Any`], for downcasting and runtime type identification.
    ///
    /// Transparent wrappers (smart pointers, references) delegate to the
    /// pointee so that type checks agree across ownership styles.
    fn as_any(&self) -> &dyn Any;

    /// Classify this value for traversal.
    fn shape(&self) -> Shape<'_>;

    /// Human-readable type name, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether this type is a bare primitive scalar.
    ///
    /// Sequence impls use this to classify contiguous primitive storage as
    /// [`Shape::PrimitiveArray`]. Indirections (boxed or referenced
    /// elements) report `false`, so containers of them expand normally.
    fn is_scalar() -> bool
    where
        Self: Sized,
    {
        false
    }
}

// ============================================================================
// Scalars
// ============================================================================

macro_rules! scalar_nodes {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Node for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }

                fn is_scalar() -> bool {
                    true
                }
            }
        )+
    };
}

scalar_nodes!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    &'static str,
);

/// `String` is a plain object, not a scalar; it is filtered by the walker's
/// default ignored-type set instead, and carries no registered fields.
impl Node for String {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Object
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: Node> Node for Vec<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        if T::is_scalar() {
            Shape::PrimitiveArray
        } else {
            Shape::Collection(self.iter().map(|item| item as &dyn Node).collect())
        }
    }
}

impl<T: Node, const N: usize> Node for [T; N] {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        if T::is_scalar() {
            Shape::PrimitiveArray
        } else {
            Shape::Array(self.iter().map(|item| item as &dyn Node).collect())
        }
    }
}

impl<T: Node> Node for VecDeque<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Collection(self.iter().map(|item| item as &dyn Node).collect())
    }
}

impl<T: Node> Node for HashSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Collection(self.iter().map(|item| item as &dyn Node).collect())
    }
}

impl<T: Node> Node for BTreeSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Collection(self.iter().map(|item| item as &dyn Node).collect())
    }
}

/// An absent value reads as an empty container; the walker finds nothing
/// inside and moves on, which is the null-dropping rule.
impl<T: Node> Node for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Collection(self.iter().map(|value| value as &dyn Node).collect())
    }
}

// ============================================================================
// Maps
// ============================================================================

impl<K: 'static, V: Node> Node for HashMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Map(self.values().map(|value| value as &dyn Node).collect())
    }
}

impl<K: 'static, V: Node> Node for BTreeMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Map(self.values().map(|value| value as &dyn Node).collect())
    }
}

// ============================================================================
// Indirections
// ============================================================================

macro_rules! pointer_nodes {
    ($($ptr:ident),+ $(,)?) => {
        $(
            impl<T: Node> Node for $ptr<T> {
                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Indirect(&**self)
                }
            }

            impl Node for $ptr<dyn Node> {
                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Indirect(&**self)
                }
            }
        )+
    };
}

pointer_nodes!(Box, Rc, Arc);

impl<T: Node> Node for &'static T {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Indirect(*self)
    }
}

impl Node for &'static dyn Node {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Indirect(*self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod classification {
        use super::*;

        #[test]
        fn primitives_are_scalars() {
            assert!(matches!(7u32.shape(), Shape::Scalar));
            assert!(matches!(true.shape(), Shape::Scalar));
            assert!(matches!(2.5f64.shape(), Shape::Scalar));
            assert!(matches!("leaf".shape(), Shape::Scalar));
        }

        #[test]
        fn string_is_a_plain_object() {
            let s = String::from("content");
            assert!(matches!(s.shape(), Shape::Object));
        }

        #[test]
        fn primitive_buffers_are_opaque() {
            let bytes = vec![1u8, 2, 3];
            assert!(matches!(bytes.shape(), Shape::PrimitiveArray));

            let fixed = [1.0f64, 2.0];
            assert!(matches!(fixed.shape(), Shape::PrimitiveArray));
        }

        #[test]
        fn reference_sequences_expand() {
            let strings = vec![String::from("a"), String::from("b")];
            match strings.shape() {
                Shape::Collection(items) => assert_eq!(items.len(), 2),
                other => panic!("expected Collection, got {other:?}"),
            }

            let fixed = [String::from("a"), String::from("b")];
            match fixed.shape() {
                Shape::Array(items) => assert_eq!(items.len(), 2),
                other => panic!("expected Array, got {other:?}"),
            }
        }

        #[test]
        fn boxed_primitive_elements_are_not_a_primitive_buffer() {
            let boxed = vec![Box::new(1u8), Box::new(2u8)];
            assert!(matches!(boxed.shape(), Shape::Collection(_)));
        }

        #[test]
        fn maps_expose_values_only() {
            let mut map: HashMap<String, Vec<String>> = HashMap::new();
            map.insert(String::from("k"), vec![String::from("v")]);
            match map.shape() {
                Shape::Map(values) => assert_eq!(values.len(), 1),
                other => panic!("expected Map, got {other:?}"),
            }
        }

        #[test]
        fn map_keys_need_not_be_nodes() {
            // The key type here implements neither Node nor anything else
            // the walker could traverse.
            #[derive(PartialEq, Eq, Hash)]
            struct OpaqueKey(u64);

            let mut map: HashMap<OpaqueKey, String> = HashMap::new();
            map.insert(OpaqueKey(1), String::from("v"));
            assert!(matches!(map.shape(), Shape::Map(_)));
        }
    }

    mod options {
        use super::*;

        #[test]
        fn none_is_an_empty_container() {
            let absent: Option<String> = None;
            match absent.shape() {
                Shape::Collection(items) => assert!(items.is_empty()),
                other => panic!("expected Collection, got {other:?}"),
            }
        }

        #[test]
        fn some_carries_one_element() {
            let present = Some(String::from("v"));
            match present.shape() {
                Shape::Collection(items) => assert_eq!(items.len(), 1),
                other => panic!("expected Collection, got {other:?}"),
            }
        }
    }

    mod indirections {
        use super::*;

        #[test]
        fn smart_pointers_are_transparent() {
            let boxed: Box<String> = Box::new(String::from("v"));
            assert!(matches!(boxed.shape(), Shape::Indirect(_)));

            let shared: Rc<String> = Rc::new(String::from("v"));
            assert!(matches!(shared.shape(), Shape::Indirect(_)));

            let sync_shared: Arc<String> = Arc::new(String::from("v"));
            assert!(matches!(sync_shared.shape(), Shape::Indirect(_)));
        }

        #[test]
        fn wrappers_report_the_pointee_type() {
            let boxed: Box<String> = Box::new(String::from("v"));
            let unwrapped: &dyn Node = &String::from("v");
            assert_eq!(
                boxed.as_any().type_id(),
                unwrapped.as_any().type_id(),
            );
        }

        #[test]
        fn indirect_resolves_to_the_pointee() {
            let shared = Rc::new(String::from("v"));
            let via_clone = Rc::clone(&shared);
            let a = match shared.shape() {
                Shape::Indirect(inner) => inner as *const dyn Node as *const (),
                other => panic!("expected Indirect, got {other:?}"),
            };
            let b = match via_clone.shape() {
                Shape::Indirect(inner) => inner as *const dyn Node as *const (),
                other => panic!("expected Indirect, got {other:?}"),
            };
            // Both clones resolve to the same heap object.
            assert_eq!(a, b);
        }
    }
}
