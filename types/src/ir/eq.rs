use super::{Ty, TypeKind};

/// Structural equality of two terms.
///
/// Lazy nodes are resolved first, so a projection is equal to the term it
/// resolves to. Terms of different sorts are never equal.
pub fn types_equal(ty1: &Ty, ty2: &Ty) -> bool {
    if ty1.ptr_eq(ty2) {
        return true;
    }
    if ty1.is_lazy() || ty2.is_lazy() {
        return types_equal(&ty1.resolve(), &ty2.resolve());
    }

    match (ty1.kind(), ty2.kind()) {
        (TypeKind::Raw(r1), TypeKind::Raw(r2)) => r1 == r2,

        // Compare one dimension down so a folded array and an array whose
        // component resolves lazily to an array still agree.
        (TypeKind::GenericArray { .. }, TypeKind::GenericArray { .. }) => {
            match (ty1.component_type(), ty2.component_type()) {
                (Some(c1), Some(c2)) => types_equal(&c1, &c2),
                _ => false,
            }
        }

        (
            TypeKind::Parameterized {
                raw: r1,
                parameters: p1,
                owner: o1,
            },
            TypeKind::Parameterized {
                raw: r2,
                parameters: p2,
                owner: o2,
            },
        ) => {
            r1 == r2
                && match (o1, o2) {
                    (None, None) => true,
                    (Some(o1), Some(o2)) => types_equal(o1, o2),
                    _ => false,
                }
                && p1 == p2
        }

        (
            TypeKind::Wildcard {
                upper: u1,
                lower: l1,
            },
            TypeKind::Wildcard {
                upper: u2,
                lower: l2,
            },
        ) => u1 == u2 && l1 == l2,

        // Bounds are not part of a variable's identity.
        (
            TypeKind::Variable {
                symbol: s1,
                source: d1,
                ..
            },
            TypeKind::Variable {
                symbol: s2,
                source: d2,
                ..
            },
        ) => s1 == s2 && d1 == d2,

        _ => false,
    }
}

impl PartialEq for Ty {
    fn eq(&self, other: &Self) -> bool {
        types_equal(self, other)
    }
}

impl Eq for Ty {}

impl std::hash::Hash for Ty {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclarationSource, LazyProjection, RawType, TypeList};

    fn class(name: &str) -> Ty {
        Ty::raw(RawType::class(name))
    }

    fn source() -> DeclarationSource {
        DeclarationSource::for_type(RawType::class("com.example.Box"))
    }

    #[test]
    fn test_variables_ignore_bounds() {
        let a = Ty::variable("T", source(), TypeList::empty());
        let b = Ty::variable("T", source(), class("java.lang.Number"));
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());

        let other_source = DeclarationSource::for_type(RawType::class("com.example.Other"));
        assert_ne!(a, Ty::variable("T", other_source, TypeList::empty()));
        assert_ne!(a, Ty::variable("U", source(), TypeList::empty()));
    }

    #[test]
    fn test_sorts_never_cross() {
        let variable = Ty::variable("T", source(), TypeList::empty());
        let wildcard = Ty::unbounded_wildcard();
        let raw = class("T");
        assert_ne!(variable, wildcard);
        assert_ne!(wildcard, raw);
        assert_ne!(raw, variable);
    }

    #[test]
    fn test_wildcard_bound_order_matters() {
        let a = Ty::wildcard(
            TypeList::from([class("A"), class("B")]),
            TypeList::empty(),
        );
        let b = Ty::wildcard(
            TypeList::from([class("B"), class("A")]),
            TypeList::empty(),
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_top_bound_is_not_unbounded() {
        let object = Ty::upper_bounded(Ty::raw(RawType::object()));
        assert_ne!(object, Ty::unbounded_wildcard());
    }

    #[test]
    fn test_parameterized_owner_presence() {
        let outer = Ty::parameterized(RawType::class("Outer"), class("A"), None);
        let inner = RawType::class("Outer$Inner");
        let with_owner = Ty::parameterized(inner.clone(), TypeList::empty(), Some(outer));
        let without = Ty::parameterized(inner, TypeList::empty(), None);
        assert_ne!(with_owner, without);
    }

    #[test]
    fn test_generic_array_compares_components() {
        let t = Ty::variable("T", source(), TypeList::empty());
        assert_eq!(
            Ty::generic_array(t.clone(), 2),
            Ty::generic_array(Ty::generic_array(t.clone(), 1), 1)
        );
        assert_ne!(Ty::generic_array(t.clone(), 2), Ty::generic_array(t, 1));
    }

    #[test]
    fn test_lazy_equals_resolved() {
        let lazy = Ty::lazy(LazyProjection::new(RawType::class("java.lang.String"), || {
            class("java.lang.String")
        }));
        assert_eq!(lazy, class("java.lang.String"));
        assert_eq!(class("java.lang.String"), lazy);
        assert_eq!(lazy.hash_code(), class("java.lang.String").hash_code());
    }
}
