//! Terms resolved on demand.
//!
//! A projection pairs a cheap erasure with a supplier that produces the full
//! generic term. The supplier runs on every query unless the projection is
//! explicitly built with [`LazyProjection::memoized`]; suppliers must be pure
//! functions of an immutable source, so concurrent or repeated calls only
//! duplicate work.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::{RawType, Ty};

type Supplier = dyn Fn() -> Ty + Send + Sync;

#[derive(Clone)]
pub struct LazyProjection {
    label: &'static str,
    erasure: RawType,
    supplier: Arc<Supplier>,
    memo: Option<Arc<OnceCell<Ty>>>,
}

impl LazyProjection {
    /// A projection that resolves on every access.
    pub fn new(erasure: RawType, supplier: impl Fn() -> Ty + Send + Sync + 'static) -> Self {
        Self {
            label: "projection",
            erasure,
            supplier: Arc::new(supplier),
            memo: None,
        }
    }

    /// A projection that resolves once and keeps the result.
    ///
    /// Only for sources known not to change; [`LazyProjection::new`] is the
    /// default.
    pub fn memoized(
        erasure: RawType,
        supplier: impl Fn() -> Ty + Send + Sync + 'static,
    ) -> Self {
        Self {
            memo: Some(Arc::new(OnceCell::new())),
            ..Self::new(erasure, supplier)
        }
    }

    /// Generic superclass of a type.
    pub fn of_superclass(
        erasure: RawType,
        supplier: impl Fn() -> Ty + Send + Sync + 'static,
    ) -> Self {
        Self::new(erasure, supplier).with_label("superclass")
    }

    /// Generic type of a field.
    pub fn of_field_type(
        erasure: RawType,
        supplier: impl Fn() -> Ty + Send + Sync + 'static,
    ) -> Self {
        Self::new(erasure, supplier).with_label("field type")
    }

    /// Generic return type of a method.
    pub fn of_return_type(
        erasure: RawType,
        supplier: impl Fn() -> Ty + Send + Sync + 'static,
    ) -> Self {
        Self::new(erasure, supplier).with_label("return type")
    }

    /// Generic type of a method parameter.
    pub fn of_parameter_type(
        erasure: RawType,
        supplier: impl Fn() -> Ty + Send + Sync + 'static,
    ) -> Self {
        Self::new(erasure, supplier).with_label("parameter type")
    }

    /// Name shown in `Debug` output and trace logs.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Erasure of the projected term, available without resolving it.
    pub fn erasure(&self) -> &RawType {
        &self.erasure
    }

    pub fn is_memoized(&self) -> bool {
        self.memo.is_some()
    }

    /// Produce the projected term.
    ///
    /// The result may itself be lazy; [`Ty::resolve`] follows the chain.
    pub fn resolve(&self) -> Ty {
        match &self.memo {
            Some(memo) => memo.get_or_init(|| self.invoke()).clone(),
            None => self.invoke(),
        }
    }

    fn invoke(&self) -> Ty {
        tracing::trace!(label = self.label, erasure = %self.erasure, "resolving lazy projection");
        (self.supplier)()
    }
}

impl From<LazyProjection> for Ty {
    fn from(projection: LazyProjection) -> Self {
        Ty::lazy(projection)
    }
}

impl fmt::Debug for LazyProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyProjection")
            .field("label", &self.label)
            .field("erasure", &self.erasure)
            .field("memoized", &self.is_memoized())
            .finish()
    }
}
