//! Declaration sources: the scope that introduces a type variable.

use std::fmt;
use std::sync::Arc;

use super::RawType;
use super::ty::{hash_str, mix};

#[derive(Debug)]
pub enum SourceKind {
    /// A type, possibly nested in another type or declared inside a method.
    Type {
        ty: RawType,
        enclosing: Option<DeclarationSource>,
    },

    /// A method or constructor of a type.
    Method {
        owner: DeclarationSource,
        name: Arc<str>,
        descriptor: Arc<str>,
    },
}

/// Identity of the scope that declares a type variable.
///
/// Two sources are equal when they denote the same declaration: the same
/// type, or the same method (owner, name and descriptor). The enclosing link
/// of a type is navigation only and does not take part in equality.
#[derive(Clone)]
pub struct DeclarationSource {
    inner: Arc<SourceKind>,
}

impl DeclarationSource {
    /// A top-level type.
    pub fn for_type(ty: RawType) -> Self {
        Self {
            inner: Arc::new(SourceKind::Type {
                ty,
                enclosing: None,
            }),
        }
    }

    /// A type declared inside `enclosing` (a type or a method).
    pub fn nested_in(ty: RawType, enclosing: DeclarationSource) -> Self {
        Self {
            inner: Arc::new(SourceKind::Type {
                ty,
                enclosing: Some(enclosing),
            }),
        }
    }

    /// A method of `owner`, identified by name and descriptor.
    pub fn for_method(
        owner: DeclarationSource,
        name: impl AsRef<str>,
        descriptor: impl AsRef<str>,
    ) -> Self {
        Self {
            inner: Arc::new(SourceKind::Method {
                owner,
                name: Arc::from(name.as_ref()),
                descriptor: Arc::from(descriptor.as_ref()),
            }),
        }
    }

    pub fn kind(&self) -> &SourceKind {
        &self.inner
    }

    pub fn is_type(&self) -> bool {
        matches!(*self.inner, SourceKind::Type { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(*self.inner, SourceKind::Method { .. })
    }

    /// The scope this one is declared in: a method's owner, or the type or
    /// method a nested type is declared in.
    pub fn enclosing_source(&self) -> Option<&DeclarationSource> {
        match &*self.inner {
            SourceKind::Type { enclosing, .. } => enclosing.as_ref(),
            SourceKind::Method { owner, .. } => Some(owner),
        }
    }

    /// This source followed by every enclosing source, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &DeclarationSource> {
        std::iter::successors(Some(self), |source| source.enclosing_source())
    }

    /// The type itself, or the type declaring the method.
    pub fn declaring_type(&self) -> &RawType {
        match &*self.inner {
            SourceKind::Type { ty, .. } => ty,
            SourceKind::Method { owner, .. } => owner.declaring_type(),
        }
    }

    pub fn hash_code(&self) -> u64 {
        match &*self.inner {
            SourceKind::Type { ty, .. } => mix(1, ty.hash_code()),
            SourceKind::Method {
                owner,
                name,
                descriptor,
            } => mix(
                mix(mix(2, owner.hash_code()), hash_str(name)),
                hash_str(descriptor),
            ),
        }
    }
}

impl PartialEq for DeclarationSource {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        match (&*self.inner, &*other.inner) {
            (SourceKind::Type { ty: a, .. }, SourceKind::Type { ty: b, .. }) => a == b,
            (
                SourceKind::Method {
                    owner: o1,
                    name: n1,
                    descriptor: d1,
                },
                SourceKind::Method {
                    owner: o2,
                    name: n2,
                    descriptor: d2,
                },
            ) => n1 == n2 && d1 == d2 && o1 == o2,
            _ => false,
        }
    }
}

impl Eq for DeclarationSource {}

impl std::hash::Hash for DeclarationSource {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for DeclarationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner {
            SourceKind::Type { ty, .. } => write!(f, "{}", ty),
            SourceKind::Method {
                owner,
                name,
                descriptor,
            } => write!(f, "{}#{}{}", owner, name, descriptor),
        }
    }
}

impl fmt::Debug for DeclarationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclarationSource({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_identity_ignores_enclosing() {
        let outer = DeclarationSource::for_type(RawType::class("Outer"));
        let nested = DeclarationSource::nested_in(RawType::class("Outer$Inner"), outer);
        let detached = DeclarationSource::for_type(RawType::class("Outer$Inner"));
        assert_eq!(nested, detached);
        assert_eq!(nested.hash_code(), detached.hash_code());
    }

    #[test]
    fn test_method_identity() {
        let owner = DeclarationSource::for_type(RawType::class("java.util.Collections"));
        let a = DeclarationSource::for_method(owner.clone(), "emptyList", "()Ljava/util/List;");
        let b = DeclarationSource::for_method(owner.clone(), "emptyList", "()Ljava/util/List;");
        let c = DeclarationSource::for_method(owner.clone(), "emptySet", "()Ljava/util/Set;");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, owner);
    }

    #[test]
    fn test_ancestors() {
        let outer = DeclarationSource::for_type(RawType::class("Outer"));
        let method = DeclarationSource::for_method(outer.clone(), "run", "()V");
        let local = DeclarationSource::nested_in(RawType::class("Outer$1Local"), method.clone());

        let chain: Vec<String> = local.ancestors().map(|s| s.to_string()).collect();
        assert_eq!(chain, vec!["Outer$1Local", "Outer#run()V", "Outer"]);
        assert_eq!(method.declaring_type(), &RawType::class("Outer"));
        assert_eq!(local.enclosing_source(), Some(&method));
        assert!(outer.enclosing_source().is_none());
    }
}
