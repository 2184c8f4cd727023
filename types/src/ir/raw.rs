//! The nominal, non-generic type every term erases to.
//!
//! A raw type is one of the nine primitives, a class named by its binary
//! name (`java.util.Map$Entry`), or an array of either. Arrays are folded on
//! construction so an array never wraps another array.

use std::fmt;
use std::sync::Arc;

use super::ty::{hash_str, mix};

/// Primitive types, including `void`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// One-character descriptor code (`I` for `int`, `Z` for `boolean`, ...).
    pub fn code(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
            Primitive::Void => 'V',
        }
    }

    /// Inverse of [`Primitive::code`].
    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'Z' => Primitive::Boolean,
            'B' => Primitive::Byte,
            'C' => Primitive::Char,
            'S' => Primitive::Short,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'F' => Primitive::Float,
            'D' => Primitive::Double,
            'V' => Primitive::Void,
            _ => return None,
        })
    }

    /// Source keyword (`int`, `boolean`, ...).
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// Returns true for the numeric primitives.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean | Primitive::Void)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawKind {
    Primitive(Primitive),

    /// Binary name, dot separated (`java.util.Map$Entry`).
    Class(Arc<str>),

    /// Element is never itself an array.
    Array { element: Arc<RawType>, arity: u32 },
}

/// Erased nominal type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawType {
    kind: RawKind,
}

impl RawType {
    /// The universal top type, `java.lang.Object`.
    ///
    /// Built on demand; callers that need a different top type pass it
    /// explicitly to [`crate::Ty::erasure_in`].
    pub fn object() -> Self {
        Self::class("java.lang.Object")
    }

    /// A class type from its binary name (`java.util.List`).
    pub fn class(binary_name: impl AsRef<str>) -> Self {
        Self {
            kind: RawKind::Class(Arc::from(binary_name.as_ref())),
        }
    }

    /// A class type from its internal name (`java/util/List`).
    pub fn from_internal_name(internal_name: &str) -> Self {
        Self::class(internal_name.replace('/', "."))
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            kind: RawKind::Primitive(primitive),
        }
    }

    /// Wrap this type in `arity` array dimensions.
    ///
    /// Arity 0 returns the type itself; wrapping an array adds to its arity,
    /// saturating at `u32::MAX`.
    pub fn array_of(&self, arity: u32) -> Self {
        if arity == 0 {
            return self.clone();
        }
        match &self.kind {
            RawKind::Array { element, arity: inner } => Self {
                kind: RawKind::Array {
                    element: element.clone(),
                    arity: inner.saturating_add(arity),
                },
            },
            _ => Self {
                kind: RawKind::Array {
                    element: Arc::new(self.clone()),
                    arity,
                },
            },
        }
    }

    pub fn kind(&self) -> &RawKind {
        &self.kind
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, RawKind::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, RawKind::Array { .. })
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.kind {
            RawKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Array dimensions; 0 for non-array types.
    pub fn arity(&self) -> u32 {
        match self.kind {
            RawKind::Array { arity, .. } => arity,
            _ => 0,
        }
    }

    /// The type one array dimension down, or `None` for non-arrays.
    pub fn component_type(&self) -> Option<RawType> {
        match &self.kind {
            RawKind::Array { element, arity: 1 } => Some(element.as_ref().clone()),
            RawKind::Array { element, arity } => Some(element.array_of(arity - 1)),
            _ => None,
        }
    }

    /// Source-form name: `java.util.Map$Entry`, `int`, `java.lang.String[][]`.
    pub fn type_name(&self) -> String {
        match &self.kind {
            RawKind::Primitive(p) => String::from(p.keyword()),
            RawKind::Class(name) => String::from(name.as_ref()),
            RawKind::Array { element, arity } => {
                let mut name = element.type_name();
                for _ in 0..*arity {
                    name.push_str("[]");
                }
                name
            }
        }
    }

    /// Slash-separated name; arrays use their descriptor, as the class-file
    /// format does.
    pub fn internal_name(&self) -> String {
        match &self.kind {
            RawKind::Primitive(p) => String::from(p.keyword()),
            RawKind::Class(name) => name.replace('.', "/"),
            RawKind::Array { .. } => self.descriptor(),
        }
    }

    /// Field descriptor: `I`, `Ljava/lang/String;`, `[[I`.
    pub fn descriptor(&self) -> String {
        match &self.kind {
            RawKind::Primitive(p) => {
                let mut descriptor = String::new();
                descriptor.push(p.code());
                descriptor
            }
            RawKind::Class(name) => {
                let mut descriptor = String::from("L");
                descriptor.push_str(&name.replace('.', "/"));
                descriptor.push(';');
                descriptor
            }
            RawKind::Array { element, arity } => {
                let mut descriptor = String::new();
                for _ in 0..*arity {
                    descriptor.push('[');
                }
                descriptor.push_str(&element.descriptor());
                descriptor
            }
        }
    }

    /// Name without package or enclosing class: `Entry` for `java.util.Map$Entry`.
    pub fn simple_name(&self) -> String {
        match &self.kind {
            RawKind::Primitive(p) => String::from(p.keyword()),
            RawKind::Class(name) => {
                let unqualified = name.rsplit('.').next().unwrap_or(name);
                String::from(unqualified.rsplit('$').next().unwrap_or(unqualified))
            }
            RawKind::Array { element, arity } => {
                let mut name = element.simple_name();
                for _ in 0..*arity {
                    name.push_str("[]");
                }
                name
            }
        }
    }

    /// Stable structural hash, mixed the same way as term hashes.
    pub fn hash_code(&self) -> u64 {
        match &self.kind {
            RawKind::Primitive(p) => p.code() as u64,
            RawKind::Class(name) => hash_str(name),
            RawKind::Array { element, arity } => mix(element.hash_code(), *arity as u64),
        }
    }
}

impl From<Primitive> for RawType {
    fn from(primitive: Primitive) -> Self {
        RawType::primitive(primitive)
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_folding() {
        let int = RawType::primitive(Primitive::Int);
        let nested = int.array_of(1).array_of(2);
        assert_eq!(nested, int.array_of(3));
        assert_eq!(nested.arity(), 3);
        assert_eq!(int.array_of(0), int);
    }

    #[test]
    fn test_array_folding_saturates() {
        let int = RawType::primitive(Primitive::Int);
        let wide = int.array_of(u32::MAX).array_of(3);
        assert_eq!(wide.arity(), u32::MAX);
        assert_eq!(wide.component_type().map(|c| c.arity()), Some(u32::MAX - 1));
    }

    #[test]
    fn test_component_type() {
        let string = RawType::class("java.lang.String");
        let matrix = string.array_of(2);
        assert_eq!(matrix.component_type(), Some(string.array_of(1)));
        assert_eq!(string.array_of(1).component_type(), Some(string.clone()));
        assert_eq!(string.component_type(), None);
    }

    #[test]
    fn test_names() {
        let entry = RawType::class("java.util.Map$Entry");
        assert_eq!(entry.type_name(), "java.util.Map$Entry");
        assert_eq!(entry.internal_name(), "java/util/Map$Entry");
        assert_eq!(entry.descriptor(), "Ljava/util/Map$Entry;");
        assert_eq!(entry.simple_name(), "Entry");

        let ints = RawType::primitive(Primitive::Int).array_of(2);
        assert_eq!(ints.type_name(), "int[][]");
        assert_eq!(ints.internal_name(), "[[I");
        assert_eq!(ints.to_string(), "int[][]");
    }

    #[test]
    fn test_from_internal_name() {
        assert_eq!(
            RawType::from_internal_name("java/lang/Object"),
            RawType::object()
        );
    }

    #[test]
    fn test_primitive_codes_roundtrip() {
        for p in [
            Primitive::Boolean,
            Primitive::Byte,
            Primitive::Char,
            Primitive::Short,
            Primitive::Int,
            Primitive::Long,
            Primitive::Float,
            Primitive::Double,
            Primitive::Void,
        ] {
            assert_eq!(Primitive::from_code(p.code()), Some(p));
        }
        assert_eq!(Primitive::from_code('L'), None);
    }
}
