use tracing::debug;

use crate::ir::{RawKind, RawType, Sort, Ty, TypeKind, TypeList};

use super::{ClassSignature, MethodSignature, SignatureSink, Variance};

/// Walks terms depth-first and emits signature tokens.
///
/// Dispatch is a single `match` on the term kind. Lazy nodes are resolved
/// and encoded as their result. Malformed wildcards encode their first upper
/// bound; a wildcard or variable bound beyond the first cannot be expressed
/// in a type argument and is dropped.
pub struct SignatureEncoder<S: SignatureSink> {
    sink: S,
}

impl<S: SignatureSink> SignatureEncoder<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn encode_type(&mut self, ty: &Ty) {
        match ty.kind() {
            TypeKind::Raw(raw) => self.encode_raw(raw),

            TypeKind::GenericArray { component, arity } => {
                for _ in 0..*arity {
                    self.sink.array_of();
                }
                self.encode_type(component);
            }

            TypeKind::Parameterized {
                raw,
                parameters,
                owner,
            } => {
                self.encode_class_chain(raw, parameters, owner.as_ref());
                self.sink.end();
            }

            TypeKind::Wildcard { upper, lower } => {
                if let Some(bound) = upper.first() {
                    self.encode_bracketed(Variance::Covariant, bound);
                } else if let Some(bound) = lower.first() {
                    self.encode_bracketed(Variance::Contravariant, bound);
                } else {
                    self.sink.unbounded_argument();
                }
            }

            TypeKind::Variable { symbol, .. } => self.sink.type_variable(symbol),

            TypeKind::Lazy(projection) => self.encode_type(&projection.resolve()),
        }
    }

    /// Formal type parameters, superclass and interfaces.
    pub fn encode_class(&mut self, signature: &ClassSignature) {
        self.encode_formals(&signature.type_variables);
        self.sink.superclass();
        self.encode_type(&signature.superclass);
        for interface in &signature.interfaces {
            self.sink.interface();
            self.encode_type(interface);
        }
    }

    /// Formal type parameters, parameters, return type and exceptions.
    pub fn encode_method(&mut self, signature: &MethodSignature) {
        self.encode_formals(&signature.type_variables);
        for parameter in &signature.parameters {
            self.sink.parameter_type();
            self.encode_type(parameter);
        }
        self.sink.return_type();
        self.encode_type(&signature.return_type);
        for exception in &signature.exceptions {
            self.sink.exception_type();
            self.encode_type(exception);
        }
    }

    fn encode_raw(&mut self, raw: &RawType) {
        match raw.kind() {
            RawKind::Primitive(primitive) => self.sink.base_type(primitive.code()),
            RawKind::Class(_) => {
                self.sink.class_type(&raw.internal_name());
                self.sink.end();
            }
            RawKind::Array { element, arity } => {
                for _ in 0..*arity {
                    self.sink.array_of();
                }
                self.encode_raw(element);
            }
        }
    }

    /// Open the class type for `raw`, preceded by its owner chain, and emit
    /// its arguments. The caller closes it.
    ///
    /// The owner chain is only encoded when the binary name of `raw` extends
    /// the owner's (`Outer$Inner` under `Outer`); otherwise the member is
    /// opened by its full internal name and the owner is dropped.
    fn encode_class_chain(&mut self, raw: &RawType, parameters: &TypeList, owner: Option<&Ty>) {
        let owner = owner.map(Ty::resolve);
        let member = owner.as_ref().and_then(|owner| {
            let prefix = format!("{}$", owner.as_raw_type().type_name());
            raw.type_name().strip_prefix(&prefix).map(String::from)
        });
        match (owner, member) {
            (Some(owner), Some(member)) => {
                match owner.kind() {
                    TypeKind::Parameterized {
                        raw: owner_raw,
                        parameters: owner_parameters,
                        owner: outer,
                    } => self.encode_class_chain(owner_raw, owner_parameters, outer.as_ref()),
                    _ => self.sink.class_type(&owner.as_raw_type().internal_name()),
                }
                self.sink.inner_type(&member);
            }
            (owner, _) => {
                if let Some(owner) = owner {
                    debug!(member = %raw, owner = %owner, "member is not nested in its owner");
                }
                self.sink.class_type(&raw.internal_name());
            }
        }
        for parameter in parameters {
            self.encode_argument(parameter);
        }
    }

    fn encode_argument(&mut self, argument: &Ty) {
        let argument = argument.resolve();
        if argument.sort() == Sort::Wildcard {
            self.encode_type(&argument);
        } else {
            self.encode_bracketed(Variance::Invariant, &argument);
        }
    }

    fn encode_bracketed(&mut self, variance: Variance, ty: &Ty) {
        self.sink.type_argument(variance);
        self.encode_type(ty);
        self.sink.end();
    }

    fn encode_formals(&mut self, variables: &TypeList) {
        for variable in variables {
            let variable = variable.resolve();
            let Some(symbol) = variable.symbol() else {
                debug!(sort = %variable.sort(), "skipping formal that is not a type variable");
                continue;
            };
            self.sink.formal_type_parameter(&symbol);

            let bounds = variable.upper_bounds();
            let mut bounds = bounds.iter();
            self.sink.class_bound();
            match bounds.next() {
                Some(first) => self.encode_type(first),
                None => self.encode_raw(&RawType::object()),
            }
            for bound in bounds {
                self.sink.interface_bound();
                self.encode_type(bound);
            }
        }
    }
}

/// Encode `ty` into `sink`.
pub fn encode(ty: &Ty, sink: impl SignatureSink) {
    SignatureEncoder::new(sink).encode_type(ty);
}
