use hashbrown::HashMap;

use super::{RawType, Ty, TypeFlags, TypeKind, TypeList};

/// Trait for transforming terms.
///
/// Implement this trait to build new terms from existing ones.
/// The default implementation handles recursion automatically.
///
/// # Example
///
/// ```
/// use typeterm_types::{RawType, Ty, TypeFolder, TypeKind};
///
/// // Replace every raw Integer with Long.
/// struct Widen;
///
/// impl TypeFolder for Widen {
///     fn fold_ty(&mut self, ty: &Ty) -> Ty {
///         match ty.kind() {
///             TypeKind::Raw(raw) if *raw == RawType::class("java.lang.Integer") => {
///                 Ty::raw(RawType::class("java.lang.Long"))
///             }
///             _ => self.super_fold_ty(ty),
///         }
///     }
/// }
///
/// let list = Ty::parameterized(
///     RawType::class("java.util.List"),
///     Ty::raw(RawType::class("java.lang.Integer")),
///     None,
/// );
/// let widened = Widen.fold_ty(&list);
/// assert_eq!(widened.to_string(), "java.util.List<java.lang.Long>");
/// ```
pub trait TypeFolder {
    /// Transform a term.
    ///
    /// Override this to customize behavior for all terms.
    /// Call `super_fold_ty` to recurse into nested terms.
    fn fold_ty(&mut self, ty: &Ty) -> Ty {
        self.super_fold_ty(ty)
    }

    /// Default recursion into nested terms.
    ///
    /// Leaves are returned as-is. Lazy nodes are resolved and the result is
    /// folded, so the output never contains a projection that was reached.
    fn super_fold_ty(&mut self, ty: &Ty) -> Ty {
        match ty.kind() {
            TypeKind::Raw(_) | TypeKind::Variable { .. } => ty.clone(),

            TypeKind::GenericArray { component, arity } => {
                Ty::generic_array(self.fold_ty(component), *arity)
            }

            TypeKind::Parameterized {
                raw,
                parameters,
                owner,
            } => {
                let owner = owner.as_ref().map(|owner| self.fold_ty(owner));
                let parameters = self.fold_list(parameters);
                Ty::parameterized(raw.clone(), parameters, owner)
            }

            TypeKind::Wildcard { upper, lower } => {
                let upper = self.fold_list(upper);
                let lower = self.fold_list(lower);
                Ty::wildcard(upper, lower)
            }

            TypeKind::Lazy(projection) => self.fold_ty(&projection.resolve()),
        }
    }

    fn fold_list(&mut self, list: &TypeList) -> TypeList {
        list.iter().map(|ty| self.fold_ty(ty)).collect()
    }
}

/// Bindings from type variables to the terms that replace them.
///
/// Keys compare by variable identity (symbol and declaration source).
#[derive(Clone, Debug, Default)]
pub struct TypeBindings {
    map: HashMap<Ty, Ty>,
}

impl TypeBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings established by a parameterized term: each argument is bound
    /// to the variable its raw type declares at that position. Owners are
    /// walked outward so `Outer<A>.Inner<B>` binds the variables of both.
    ///
    /// `declared` returns the type variables a raw type declares, in order.
    /// Surplus arguments or variables are ignored.
    pub fn for_parameterized(term: &Ty, mut declared: impl FnMut(&RawType) -> Vec<Ty>) -> Self {
        let mut bindings = Self::new();
        let mut current = Some(term.resolve());
        while let Some(ty) = current {
            current = match ty.kind() {
                TypeKind::Parameterized {
                    raw,
                    parameters,
                    owner,
                } => {
                    for (variable, argument) in declared(raw).into_iter().zip(parameters) {
                        bindings.bind(variable, argument.clone());
                    }
                    owner.as_ref().map(Ty::resolve)
                }
                _ => None,
            };
        }
        bindings
    }

    /// Bind `variable` to `ty`, returning the previous binding.
    pub fn bind(&mut self, variable: Ty, ty: Ty) -> Option<Ty> {
        self.map.insert(variable, ty)
    }

    pub fn get(&self, variable: &Ty) -> Option<&Ty> {
        self.map.get(variable)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(Ty, Ty)> for TypeBindings {
    fn from_iter<I: IntoIterator<Item = (Ty, Ty)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

/// Replaces bound variables. Unbound variables are kept.
pub struct Substitutor<'a> {
    bindings: &'a TypeBindings,
}

impl<'a> Substitutor<'a> {
    pub fn new(bindings: &'a TypeBindings) -> Self {
        Self { bindings }
    }
}

impl TypeFolder for Substitutor<'_> {
    fn fold_ty(&mut self, ty: &Ty) -> Ty {
        // Nothing to replace below this node.
        if !ty
            .flags()
            .intersects(TypeFlags::HAS_VARIABLES | TypeFlags::DEFERRED)
        {
            return ty.clone();
        }
        match ty.kind() {
            TypeKind::Variable { .. } => {
                self.bindings.get(ty).cloned().unwrap_or_else(|| ty.clone())
            }
            _ => self.super_fold_ty(ty),
        }
    }
}

impl Ty {
    /// This term with every bound variable replaced.
    pub fn substitute(&self, bindings: &TypeBindings) -> Ty {
        if bindings.is_empty() {
            return self.clone();
        }
        Substitutor::new(bindings).fold_ty(self)
    }
}
