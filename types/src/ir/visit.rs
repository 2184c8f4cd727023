use hashbrown::HashSet;

use super::{Ty, TypeFlags, TypeKind};

/// Trait for visiting terms.
///
/// Implement this trait to traverse terms without rebuilding them.
/// The default implementation handles recursion automatically.
///
/// # Example
///
/// ```
/// use typeterm_types::{RawType, Ty, TypeKind, TypeVisitor};
///
/// struct DepthCalculator {
///     max_depth: usize,
///     current_depth: usize,
/// }
///
/// impl TypeVisitor for DepthCalculator {
///     fn visit_ty(&mut self, ty: &Ty) {
///         self.current_depth += 1;
///         self.max_depth = self.max_depth.max(self.current_depth);
///
///         self.super_visit_ty(ty);
///
///         self.current_depth -= 1;
///     }
/// }
///
/// let string = Ty::raw(RawType::class("java.lang.String"));
/// let list = Ty::parameterized(RawType::class("java.util.List"), string, None);
/// let nested = Ty::parameterized(RawType::class("java.util.List"), list, None);
///
/// let mut calc = DepthCalculator { max_depth: 0, current_depth: 0 };
/// calc.visit_ty(&nested);
/// assert_eq!(calc.max_depth, 3); // List -> List -> String
/// ```
pub trait TypeVisitor {
    /// Visit a term.
    ///
    /// Override this to customize behavior for all terms.
    /// Call `super_visit_ty` to recurse into nested terms.
    fn visit_ty(&mut self, ty: &Ty) {
        self.super_visit_ty(ty)
    }

    /// Default recursion into nested terms.
    ///
    /// Owners are visited before arguments and upper bounds before lower
    /// bounds. Variable bounds are not visited, since a bound may refer back
    /// to the variable itself. Lazy nodes are resolved and visited.
    fn super_visit_ty(&mut self, ty: &Ty) {
        match ty.kind() {
            TypeKind::Raw(_) | TypeKind::Variable { .. } => {}

            TypeKind::GenericArray { component, .. } => self.visit_ty(component),

            TypeKind::Parameterized {
                parameters, owner, ..
            } => {
                if let Some(owner) = owner {
                    self.visit_ty(owner);
                }
                for parameter in parameters {
                    self.visit_ty(parameter);
                }
            }

            TypeKind::Wildcard { upper, lower } => {
                for bound in upper.iter().chain(lower) {
                    self.visit_ty(bound);
                }
            }

            TypeKind::Lazy(projection) => self.visit_ty(&projection.resolve()),
        }
    }
}

/// Visitor wrapping a closure that is called for every term, pre-order.
pub struct ClosureVisitor<F: FnMut(&Ty)> {
    f: F,
}

impl<F: FnMut(&Ty)> ClosureVisitor<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(&Ty)> TypeVisitor for ClosureVisitor<F> {
    fn visit_ty(&mut self, ty: &Ty) {
        (self.f)(ty);
        self.super_visit_ty(ty);
    }
}

/// Collects the distinct type variables a term mentions, in order of first
/// occurrence.
#[derive(Default)]
pub struct VariableCollector {
    seen: HashSet<Ty>,
    variables: Vec<Ty>,
}

impl VariableCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_variables(self) -> Vec<Ty> {
        self.variables
    }
}

impl TypeVisitor for VariableCollector {
    fn visit_ty(&mut self, ty: &Ty) {
        let flags = ty.flags();
        if !flags.intersects(TypeFlags::HAS_VARIABLES | TypeFlags::DEFERRED) {
            return;
        }
        if let TypeKind::Variable { .. } = ty.kind() {
            if self.seen.insert(ty.clone()) {
                self.variables.push(ty.clone());
            }
            return;
        }
        self.super_visit_ty(ty);
    }
}

impl Ty {
    /// Type variables mentioned by this term, without duplicates.
    pub fn type_variables(&self) -> Vec<Ty> {
        let mut collector = VariableCollector::new();
        collector.visit_ty(self);
        collector.into_variables()
    }
}
