//! Input boundary: shape descriptors handed over by a metadata provider.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ir::{DeclarationSource, LazyProjection, RawType, Ty, TypeList};
use crate::options::DescribeOptions;

/// Descriptor of a type as reported by a metadata provider.
///
/// Shapes are finite trees. A variable bound that refers back to the
/// variable being declared is given as a `Variable` with empty bounds at the
/// point of recursion.
#[derive(Debug, Clone)]
pub enum Shape {
    Raw(RawType),

    /// One array dimension over `component`.
    Array(Box<Shape>),

    Parameterized {
        raw: RawType,
        arguments: Vec<Shape>,
        owner: Option<Box<Shape>>,
    },

    Variable {
        symbol: String,
        source: DeclarationSource,
        bounds: Vec<Shape>,
    },

    Wildcard { upper: Vec<Shape>, lower: Vec<Shape> },

    /// A type whose generic form is only available on demand.
    Deferred(LazyProjection),

    /// A kind of type this model does not know.
    Unknown { kind: String },
}

impl Shape {
    /// Name of the shape's kind, as used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Shape::Raw(_) => "raw",
            Shape::Array(_) => "array",
            Shape::Parameterized { .. } => "parameterized",
            Shape::Variable { .. } => "variable",
            Shape::Wildcard { .. } => "wildcard",
            Shape::Deferred(_) => "deferred",
            Shape::Unknown { kind } => kind,
        }
    }
}

/// Turns shapes into terms.
///
/// Options:
/// - `max_depth`: Maximum shape nesting (for recursion protection)
pub struct Describer {
    options: DescribeOptions,
    depth: usize,
}

impl Describer {
    pub fn new(options: DescribeOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn options(&self) -> &DescribeOptions {
        &self.options
    }

    /// Classify `shape` into the matching term sort, recursively.
    pub fn describe(&mut self, shape: &Shape) -> Result<Ty> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            debug!(limit = self.options.max_depth, "shape nested too deeply");
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = self.describe_inner(shape);
        self.depth -= 1;

        result
    }

    fn describe_inner(&mut self, shape: &Shape) -> Result<Ty> {
        trace!(kind = shape.kind_name(), depth = self.depth, "describing shape");
        match shape {
            Shape::Raw(raw) => Ok(Ty::raw(raw.clone())),

            Shape::Array(component) => Ok(Ty::generic_array(self.describe(component)?, 1)),

            Shape::Parameterized {
                raw,
                arguments,
                owner,
            } => {
                let owner = owner
                    .as_deref()
                    .map(|owner| self.describe(owner))
                    .transpose()?;
                let parameters = self.describe_all(arguments)?;
                Ok(Ty::parameterized(raw.clone(), parameters, owner))
            }

            Shape::Variable {
                symbol,
                source,
                bounds,
            } => {
                let bounds = self.describe_all(bounds)?;
                Ok(Ty::variable(symbol, source.clone(), bounds))
            }

            Shape::Wildcard { upper, lower } => {
                let upper = self.describe_all(upper)?;
                let lower = self.describe_all(lower)?;
                Ok(Ty::wildcard(upper, lower))
            }

            Shape::Deferred(projection) => Ok(Ty::lazy(projection.clone())),

            Shape::Unknown { kind } => {
                debug!(kind = %kind, "rejecting unsupported shape");
                Err(Error::UnsupportedShape { kind: kind.clone() })
            }
        }
    }

    fn describe_all(&mut self, shapes: &[Shape]) -> Result<TypeList> {
        shapes.iter().map(|shape| self.describe(shape)).collect()
    }
}

impl Default for Describer {
    fn default() -> Self {
        Self::new(DescribeOptions::default())
    }
}

/// Describe `shape` with default options.
pub fn describe(shape: &Shape) -> Result<Ty> {
    Describer::default().describe(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;
    use crate::ir::{Sort, TypeKind};
    use crate::test_utils::init_test_logging;

    #[test]
    fn test_describe_array_folds() {
        init_test_logging();
        let shape = Shape::Array(Box::new(Shape::Array(Box::new(Shape::Raw(
            RawType::primitive(Primitive::Int),
        )))));
        let ty = describe(&shape).expect("describable");
        match ty.kind() {
            TypeKind::GenericArray { component, arity } => {
                assert_eq!(*arity, 2);
                assert_eq!(component.sort(), Sort::Raw);
            }
            other => panic!("Expected GenericArray, got {:?}", other),
        }
    }

    #[test]
    fn test_describe_unknown() {
        let err = describe(&Shape::Unknown {
            kind: "intersection".to_string(),
        })
        .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedShape {
                kind: "intersection".to_string()
            }
        );
    }

    #[test]
    fn test_describe_unknown_nested() {
        let shape = Shape::Parameterized {
            raw: RawType::class("java.util.List"),
            arguments: vec![Shape::Unknown {
                kind: "union".to_string(),
            }],
            owner: None,
        };
        assert!(matches!(
            describe(&shape),
            Err(Error::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut shape = Shape::Raw(RawType::class("java.lang.String"));
        for _ in 0..5 {
            shape = Shape::Parameterized {
                raw: RawType::class("java.util.List"),
                arguments: vec![shape],
                owner: None,
            };
        }

        let mut shallow = Describer::new(DescribeOptions { max_depth: 3 });
        assert_eq!(
            shallow.describe(&shape).unwrap_err(),
            Error::DepthExceeded { limit: 3 }
        );

        // The describer is reusable after a failure.
        let mut deep = Describer::new(DescribeOptions { max_depth: 6 });
        assert!(deep.describe(&shape).is_ok());
        assert!(deep.describe(&shape).is_ok());
    }

    #[test]
    fn test_describe_variable_with_self_bound() {
        let source = DeclarationSource::for_type(RawType::class("java.lang.Enum"));
        let shape = Shape::Variable {
            symbol: "E".to_string(),
            source: source.clone(),
            bounds: vec![Shape::Parameterized {
                raw: RawType::class("java.lang.Enum"),
                arguments: vec![Shape::Variable {
                    symbol: "E".to_string(),
                    source: source.clone(),
                    bounds: Vec::new(),
                }],
                owner: None,
            }],
        };
        let e = describe(&shape).expect("describable");
        assert_eq!(e.to_string(), "E");
        assert_eq!(e.upper_bounds()[0].to_string(), "java.lang.Enum<E>");
        assert_eq!(e.upper_bounds()[0].parameters()[0], e);
        assert_eq!(e.as_raw_type(), RawType::class("java.lang.Enum"));
    }
}
