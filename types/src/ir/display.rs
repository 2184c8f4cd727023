use std::fmt::{self, Write};

use super::{RawType, Sort, Ty, TypeKind, TypeList};

/// Formats terms in source notation.
///
/// - arrays append `[]` per dimension
/// - wildcards render `?`, `? extends A & B` or `? super A`; upper bounds win
///   over lower bounds, and a lone top-type upper bound renders as `?`
/// - parameterized types render `Name<A, B>`, or `Owner<A>.Inner<B>` when an
///   owner is present
/// - variables render their symbol
pub struct TypeFormatter<'a, W: Write> {
    out: &'a mut W,
    top: RawType,
}

impl<'a, W: Write> TypeFormatter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            top: RawType::object(),
        }
    }

    /// Format `ty` into a fresh string.
    pub fn format(ty: &Ty) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = TypeFormatter::new(&mut output).write_ty(ty);
        output
    }

    pub fn write_ty(&mut self, ty: &Ty) -> fmt::Result {
        match ty.kind() {
            TypeKind::Raw(raw) => self.out.write_str(&raw.type_name()),

            TypeKind::GenericArray { component, arity } => {
                self.write_ty(component)?;
                for _ in 0..*arity {
                    self.out.write_str("[]")?;
                }
                Ok(())
            }

            TypeKind::Parameterized {
                raw,
                parameters,
                owner,
            } => {
                match owner {
                    Some(owner) => {
                        self.write_ty(owner)?;
                        self.out.write_char('.')?;
                        let name = raw.type_name();
                        if owner.sort().is_parameterized() {
                            let prefix = format!("{}$", owner.as_raw_type().type_name());
                            self.out.write_str(name.strip_prefix(&prefix).unwrap_or(&name))?;
                        } else {
                            self.out.write_str(&name)?;
                        }
                    }
                    None => self.out.write_str(&raw.type_name())?,
                }
                if !parameters.is_empty() {
                    self.out.write_char('<')?;
                    self.write_list(parameters, ", ")?;
                    self.out.write_char('>')?;
                }
                Ok(())
            }

            TypeKind::Wildcard { upper, lower } => {
                if !upper.is_empty() {
                    if upper.only().is_some_and(|bound| self.is_top(bound)) {
                        return self.out.write_char('?');
                    }
                    self.out.write_str("? extends ")?;
                    self.write_list(upper, " & ")
                } else if !lower.is_empty() {
                    self.out.write_str("? super ")?;
                    self.write_list(lower, " & ")
                } else {
                    self.out.write_char('?')
                }
            }

            TypeKind::Variable { symbol, .. } => self.out.write_str(symbol),

            TypeKind::Lazy(projection) => self.write_ty(&projection.resolve()),
        }
    }

    fn write_list(&mut self, list: &TypeList, separator: &str) -> fmt::Result {
        for (i, ty) in list.iter().enumerate() {
            if i > 0 {
                self.out.write_str(separator)?;
            }
            self.write_ty(ty)?;
        }
        Ok(())
    }

    fn is_top(&self, ty: &Ty) -> bool {
        ty.sort().is_raw() && ty.as_raw_type() == self.top
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TypeFormatter::new(f).write_ty(self)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sort::Raw => "raw",
            Sort::GenericArray => "generic array",
            Sort::Parameterized => "parameterized",
            Sort::Wildcard => "wildcard",
            Sort::Variable => "variable",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclarationSource, Primitive};

    fn class(name: &str) -> Ty {
        Ty::raw(RawType::class(name))
    }

    fn variable(symbol: &str) -> Ty {
        Ty::variable(
            symbol,
            DeclarationSource::for_type(RawType::class("Outer")),
            TypeList::empty(),
        )
    }

    #[test]
    fn test_format_raw() {
        assert_eq!(class("java.lang.String").to_string(), "java.lang.String");
        assert_eq!(
            Ty::raw(RawType::primitive(Primitive::Int).array_of(1)).to_string(),
            "int[]"
        );
    }

    #[test]
    fn test_format_generic_array() {
        assert_eq!(Ty::generic_array(variable("T"), 2).to_string(), "T[][]");
    }

    #[test]
    fn test_format_parameterized() {
        let map = Ty::parameterized(
            RawType::class("java.util.Map"),
            TypeList::from([class("java.lang.String"), variable("V")]),
            None,
        );
        assert_eq!(map.to_string(), "java.util.Map<java.lang.String, V>");

        let bare = Ty::parameterized(RawType::class("java.util.List"), TypeList::empty(), None);
        assert_eq!(bare.to_string(), "java.util.List");
    }

    #[test]
    fn test_format_owner() {
        let outer = Ty::parameterized(RawType::class("Outer"), variable("T"), None);
        let inner = Ty::parameterized(RawType::class("Outer$Inner"), variable("U"), Some(outer));
        assert_eq!(inner.to_string(), "Outer<T>.Inner<U>");

        let raw_owner = Ty::parameterized(
            RawType::class("Outer$Inner"),
            variable("U"),
            Some(class("Outer")),
        );
        assert_eq!(raw_owner.to_string(), "Outer.Outer$Inner<U>");
    }

    #[test]
    fn test_format_wildcards() {
        assert_eq!(Ty::unbounded_wildcard().to_string(), "?");
        assert_eq!(
            Ty::upper_bounded(class("java.lang.Number")).to_string(),
            "? extends java.lang.Number"
        );
        assert_eq!(
            Ty::lower_bounded(class("java.lang.Integer")).to_string(),
            "? super java.lang.Integer"
        );
        assert_eq!(Ty::upper_bounded(Ty::raw(RawType::object())).to_string(), "?");
        assert_eq!(
            Ty::wildcard(
                TypeList::from([class("A"), class("B")]),
                TypeList::empty()
            )
            .to_string(),
            "? extends A & B"
        );
    }

    #[test]
    fn test_format_malformed_wildcard_prefers_upper() {
        let both = Ty::wildcard(class("A"), class("B"));
        assert_eq!(both.to_string(), "? extends A");
    }

    #[test]
    fn test_format_sort() {
        assert_eq!(Sort::GenericArray.to_string(), "generic array");
    }
}
