use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use super::{DeclarationSource, LazyProjection, RawType, TypeList};

/// Multiplier used to combine field hashes into a term hash.
pub(crate) const HASH_MULTIPLIER: u64 = 31;

pub(crate) fn mix(acc: u64, value: u64) -> u64 {
    acc.wrapping_mul(HASH_MULTIPLIER).wrapping_add(value)
}

pub(crate) fn hash_str(s: &str) -> u64 {
    s.bytes().fold(0, |acc, b| mix(acc, b as u64))
}

bitflags! {
    /// Flags indicating various properties of a type.
    ///
    /// These flags are computed once when a term is constructed and cached
    /// for efficient queries. This avoids repeated recursive traversals.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct TypeFlags: u8 {
        /// A type variable occurs somewhere in the term.
        const HAS_VARIABLES = 1;
        /// A wildcard occurs somewhere in the term.
        const HAS_WILDCARDS = 1 << 1;
        /// The term contains a lazy projection, so the other flags are a
        /// lower bound only.
        const DEFERRED = 1 << 2;
    }
}

/// Discriminant of a term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sort {
    Raw,
    GenericArray,
    Parameterized,
    Wildcard,
    Variable,
}

impl Sort {
    pub fn is_raw(self) -> bool {
        self == Sort::Raw
    }

    pub fn is_parameterized(self) -> bool {
        self == Sort::Parameterized
    }

    fn tag(self) -> u64 {
        match self {
            Sort::Raw => 1,
            Sort::GenericArray => 2,
            Sort::Parameterized => 3,
            Sort::Wildcard => 4,
            Sort::Variable => 5,
        }
    }
}

/// Data for a term: kind + cached flags.
#[derive(Debug)]
pub struct TyData {
    /// The actual type structure
    pub kind: TypeKind,

    /// Cached properties for efficient queries
    pub flags: TypeFlags,
}

/// Logical structure of a term.
///
/// Each of the five sorts owns only the fields that make sense for it; the
/// `Lazy` node stands in for a term that is resolved on demand and answers
/// every query by resolving.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Nominal, non-generic type.
    Raw(RawType),

    /// Array of a generic component.
    ///
    /// Nested arrays are folded: `component` is never itself a
    /// `GenericArray` node and `arity` is at least 1.
    GenericArray { component: Ty, arity: u32 },

    /// Raw type applied to type arguments, optionally inside a
    /// parameterized owner (`Outer<T>.Inner`).
    Parameterized {
        raw: RawType,
        parameters: TypeList,
        owner: Option<Ty>,
    },

    /// `?`, `? extends ...` or `? super ...`.
    ///
    /// At most one of the two lists is expected to be non-empty; when a
    /// producer sets both, upper bounds win everywhere.
    Wildcard { upper: TypeList, lower: TypeList },

    /// Type variable, identified by symbol and declaration source.
    Variable {
        symbol: Arc<str>,
        source: DeclarationSource,
        bounds: TypeList,
    },

    /// Term resolved on demand.
    Lazy(LazyProjection),
}

impl TypeKind {
    /// Compute type flags for this kind.
    fn compute_flags(&self) -> TypeFlags {
        match self {
            TypeKind::Raw(_) => TypeFlags::empty(),

            TypeKind::GenericArray { component, .. } => component.flags(),

            TypeKind::Parameterized {
                parameters, owner, ..
            } => {
                let owner_flags = owner.as_ref().map_or(TypeFlags::empty(), Ty::flags);
                parameters.flags() | owner_flags
            }

            TypeKind::Wildcard { upper, lower } => {
                TypeFlags::HAS_WILDCARDS | upper.flags() | lower.flags()
            }

            // Bounds are not part of what the variable mentions.
            TypeKind::Variable { .. } => TypeFlags::HAS_VARIABLES,

            TypeKind::Lazy(_) => TypeFlags::DEFERRED,
        }
    }
}

/// Handle to an immutable term.
///
/// Cloning is cheap and terms can be shared freely across threads.
/// Equality and hashing are structural (see [`crate::types_equal`]).
#[derive(Clone)]
pub struct Ty {
    data: Arc<TyData>,
}

impl Ty {
    fn new(kind: TypeKind) -> Self {
        let flags = kind.compute_flags();
        Self {
            data: Arc::new(TyData { kind, flags }),
        }
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    pub fn raw(raw: RawType) -> Self {
        Self::new(TypeKind::Raw(raw))
    }

    /// Array of `component` with `arity` dimensions.
    ///
    /// Arity 0 returns the component itself and an array component is folded
    /// into a single node. Folded arities saturate at `u32::MAX`.
    pub fn generic_array(component: Ty, arity: u32) -> Self {
        if arity == 0 {
            return component;
        }
        match component.kind() {
            TypeKind::GenericArray {
                component: inner,
                arity: inner_arity,
            } => Self::new(TypeKind::GenericArray {
                component: inner.clone(),
                arity: inner_arity.saturating_add(arity),
            }),
            _ => Self::new(TypeKind::GenericArray { component, arity }),
        }
    }

    pub fn parameterized(
        raw: RawType,
        parameters: impl Into<TypeList>,
        owner: Option<Ty>,
    ) -> Self {
        Self::new(TypeKind::Parameterized {
            raw,
            parameters: parameters.into(),
            owner,
        })
    }

    pub fn wildcard(upper: impl Into<TypeList>, lower: impl Into<TypeList>) -> Self {
        Self::new(TypeKind::Wildcard {
            upper: upper.into(),
            lower: lower.into(),
        })
    }

    /// `?`
    pub fn unbounded_wildcard() -> Self {
        Self::wildcard(TypeList::empty(), TypeList::empty())
    }

    /// `? extends bound`
    pub fn upper_bounded(bound: Ty) -> Self {
        Self::wildcard(bound, TypeList::empty())
    }

    /// `? super bound`
    pub fn lower_bounded(bound: Ty) -> Self {
        Self::wildcard(TypeList::empty(), bound)
    }

    pub fn variable(
        symbol: impl AsRef<str>,
        source: DeclarationSource,
        bounds: impl Into<TypeList>,
    ) -> Self {
        Self::new(TypeKind::Variable {
            symbol: Arc::from(symbol.as_ref()),
            source,
            bounds: bounds.into(),
        })
    }

    pub fn lazy(projection: LazyProjection) -> Self {
        Self::new(TypeKind::Lazy(projection))
    }

    // ========================================================================
    // Access
    // ========================================================================

    pub fn kind(&self) -> &TypeKind {
        &self.data.kind
    }

    pub fn data(&self) -> &TyData {
        &self.data
    }

    pub fn flags(&self) -> TypeFlags {
        self.data.flags
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.kind(), TypeKind::Lazy(_))
    }

    pub(crate) fn ptr_eq(&self, other: &Ty) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Follow lazy projections until a concrete term is reached.
    ///
    /// Every call invokes the projection suppliers again unless the
    /// projection was built with [`LazyProjection::memoized`].
    pub fn resolve(&self) -> Ty {
        let mut ty = self.clone();
        while let Some(next) = ty.as_projection().map(LazyProjection::resolve) {
            ty = next;
        }
        ty
    }

    fn as_projection(&self) -> Option<&LazyProjection> {
        match self.kind() {
            TypeKind::Lazy(projection) => Some(projection),
            _ => None,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn sort(&self) -> Sort {
        match self.kind() {
            TypeKind::Raw(_) => Sort::Raw,
            TypeKind::GenericArray { .. } => Sort::GenericArray,
            TypeKind::Parameterized { .. } => Sort::Parameterized,
            TypeKind::Wildcard { .. } => Sort::Wildcard,
            TypeKind::Variable { .. } => Sort::Variable,
            TypeKind::Lazy(projection) => projection.resolve().sort(),
        }
    }

    /// Erasure against `java.lang.Object` as the top type.
    pub fn as_raw_type(&self) -> RawType {
        self.erasure_in(&RawType::object())
    }

    /// Erasure, using `top` for wildcards and variables without upper bounds.
    ///
    /// Lazy projections answer from their own erasure without resolving.
    pub fn erasure_in(&self, top: &RawType) -> RawType {
        match self.kind() {
            TypeKind::Raw(raw) => raw.clone(),
            TypeKind::GenericArray { component, arity } => {
                component.erasure_in(top).array_of(*arity)
            }
            TypeKind::Parameterized { raw, .. } => raw.clone(),
            TypeKind::Wildcard { upper: bounds, .. } | TypeKind::Variable { bounds, .. } => bounds
                .first()
                .map_or_else(|| top.clone(), |bound| bound.erasure_in(top)),
            TypeKind::Lazy(projection) => projection.erasure().clone(),
        }
    }

    pub fn upper_bounds(&self) -> TypeList {
        match self.kind() {
            TypeKind::Wildcard { upper, .. } => upper.clone(),
            TypeKind::Variable { bounds, .. } => bounds.clone(),
            TypeKind::Lazy(projection) => projection.resolve().upper_bounds(),
            _ => TypeList::empty(),
        }
    }

    pub fn lower_bounds(&self) -> TypeList {
        match self.kind() {
            TypeKind::Wildcard { lower, .. } => lower.clone(),
            TypeKind::Lazy(projection) => projection.resolve().lower_bounds(),
            _ => TypeList::empty(),
        }
    }

    /// The array one dimension down; `None` unless this is a generic array.
    pub fn component_type(&self) -> Option<Ty> {
        match self.kind() {
            TypeKind::GenericArray { component, arity } => {
                Some(Ty::generic_array(component.clone(), arity - 1))
            }
            TypeKind::Lazy(projection) => projection.resolve().component_type(),
            _ => None,
        }
    }

    /// Array dimensions of a generic array; 0 for every other sort.
    pub fn arity(&self) -> u32 {
        match self.kind() {
            TypeKind::GenericArray { arity, .. } => *arity,
            TypeKind::Lazy(projection) => projection.resolve().arity(),
            _ => 0,
        }
    }

    pub fn parameters(&self) -> TypeList {
        match self.kind() {
            TypeKind::Parameterized { parameters, .. } => parameters.clone(),
            TypeKind::Lazy(projection) => projection.resolve().parameters(),
            _ => TypeList::empty(),
        }
    }

    pub fn owner_type(&self) -> Option<Ty> {
        match self.kind() {
            TypeKind::Parameterized { owner, .. } => owner.clone(),
            TypeKind::Lazy(projection) => projection.resolve().owner_type(),
            _ => None,
        }
    }

    pub fn declaration_source(&self) -> Option<DeclarationSource> {
        match self.kind() {
            TypeKind::Variable { source, .. } => Some(source.clone()),
            TypeKind::Lazy(projection) => projection.resolve().declaration_source(),
            _ => None,
        }
    }

    /// Symbol of a type variable.
    ///
    /// `None` for every other sort, wildcards included: a wildcard's `?` is
    /// not a stored symbol and only exists in its `Display` rendering.
    pub fn symbol(&self) -> Option<Arc<str>> {
        match self.kind() {
            TypeKind::Variable { symbol, .. } => Some(symbol.clone()),
            TypeKind::Lazy(projection) => projection.resolve().symbol(),
            _ => None,
        }
    }

    /// True for every sort except raw.
    pub fn is_generic(&self) -> bool {
        !self.sort().is_raw()
    }

    pub fn has_type_variables(&self) -> bool {
        let flags = self.flags();
        if flags.contains(TypeFlags::HAS_VARIABLES) {
            return true;
        }
        flags.contains(TypeFlags::DEFERRED) && !self.type_variables().is_empty()
    }

    /// Stable structural hash; equal terms always have equal hash codes.
    pub fn hash_code(&self) -> u64 {
        let body = match self.kind() {
            TypeKind::Lazy(projection) => return projection.resolve().hash_code(),
            TypeKind::Raw(raw) => raw.hash_code(),
            TypeKind::GenericArray { .. } => self
                .component_type()
                .map_or(0, |component| component.hash_code()),
            TypeKind::Parameterized {
                raw,
                parameters,
                owner,
            } => {
                let owner = owner.as_ref().map_or(0, Ty::hash_code);
                mix(mix(raw.hash_code(), owner), parameters.hash_code())
            }
            TypeKind::Wildcard { upper, lower } => mix(upper.hash_code(), lower.hash_code()),
            TypeKind::Variable { symbol, source, .. } => {
                mix(hash_str(symbol), source.hash_code())
            }
        };
        mix(self.sort().tag(), body)
    }
}

impl From<RawType> for Ty {
    fn from(raw: RawType) -> Self {
        Ty::raw(raw)
    }
}

impl fmt::Debug for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ty({:?})", self.kind())
    }
}
