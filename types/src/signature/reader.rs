//! Reader for class-file signatures.
//!
//! Parsing produces an unresolved syntax tree first; type variable
//! references are then resolved against a [`VariableScope`]. Splitting the
//! two passes lets formal type parameters refer to each other in any order.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ir::{DeclarationSource, Primitive, RawType, Ty, TypeKind, TypeList};
use crate::options::ReaderOptions;

use super::{ClassSignature, MethodSignature, Variance};

/// Type variables visible at some point of a declaration, innermost scope
/// first.
#[derive(Debug, Clone, Default)]
pub struct VariableScope {
    variables: Vec<Ty>,
    parent: Option<Arc<VariableScope>>,
}

impl VariableScope {
    /// The empty top-level scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope nested in this one, declaring `variables`.
    pub fn child(&self, variables: impl IntoIterator<Item = Ty>) -> Self {
        Self {
            variables: variables.into_iter().collect(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    pub fn declare(&mut self, variable: Ty) {
        self.variables.push(variable);
    }

    /// Variables declared directly in this scope.
    pub fn variables(&self) -> &[Ty] {
        &self.variables
    }

    pub fn parent(&self) -> Option<&VariableScope> {
        self.parent.as_deref()
    }

    /// The innermost variable named `symbol`.
    pub fn lookup(&self, symbol: &str) -> Option<&Ty> {
        self.variables
            .iter()
            .rev()
            .find(|variable| variable.symbol().as_deref() == Some(symbol))
            .or_else(|| self.parent().and_then(|parent| parent.lookup(symbol)))
    }
}

/// Parses class-file signatures into terms.
#[derive(Debug, Clone, Default)]
pub struct SignatureReader {
    options: ReaderOptions,
}

impl SignatureReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Read a field or type signature such as `Ljava/util/List<TE;>;`.
    pub fn read_type(&self, signature: &str, scope: &VariableScope) -> Result<Ty> {
        trace!(signature, "reading type signature");
        self.read(signature, |parser| {
            let syntax = parser.parse_java_type()?;
            parser.finish()?;
            resolve_type(&syntax, scope)
        })
    }

    /// Read a class signature declared by `source`.
    pub fn read_class(
        &self,
        signature: &str,
        source: &DeclarationSource,
        enclosing: &VariableScope,
    ) -> Result<ClassSignature> {
        trace!(signature, %source, "reading class signature");
        self.read(signature, |parser| {
            let formals = parser.parse_formals()?;
            let superclass = parser.parse_class()?;
            let mut interfaces = Vec::new();
            while !parser.at_end() {
                interfaces.push(parser.parse_class()?);
            }

            let (type_variables, scope) = declare(&formals, source, enclosing)?;
            Ok(ClassSignature {
                type_variables,
                superclass: resolve_type(&superclass, &scope)?,
                interfaces: resolve_all(&interfaces, &scope)?,
            })
        })
    }

    /// Read a method signature declared by `source`.
    pub fn read_method(
        &self,
        signature: &str,
        source: &DeclarationSource,
        enclosing: &VariableScope,
    ) -> Result<MethodSignature> {
        trace!(signature, %source, "reading method signature");
        self.read(signature, |parser| {
            let formals = parser.parse_formals()?;
            parser.expect(b'(')?;
            let mut parameters = Vec::new();
            while parser.peek() != Some(b')') {
                parameters.push(parser.parse_java_type()?);
            }
            parser.expect(b')')?;
            let return_type = parser.parse_return_type()?;
            let mut exceptions = Vec::new();
            while parser.peek() == Some(b'^') {
                parser.bump();
                exceptions.push(parser.parse_reference()?);
            }
            parser.finish()?;

            let (type_variables, scope) = declare(&formals, source, enclosing)?;
            Ok(MethodSignature {
                type_variables,
                parameters: resolve_all(&parameters, &scope)?,
                return_type: resolve_type(&return_type, &scope)?,
                exceptions: resolve_all(&exceptions, &scope)?,
            })
        })
    }

    fn read<T>(
        &self,
        signature: &str,
        body: impl FnOnce(&mut Parser<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut parser = Parser::new(signature, self.options.max_depth);
        body(&mut parser).inspect_err(|error| debug!(%error, "rejecting signature"))
    }
}

// ============================================================================
// Syntax
// ============================================================================

#[derive(Debug)]
enum TypeSyntax {
    Base(Primitive),
    Array(Box<TypeSyntax>),
    Class(ClassSyntax),
    Variable(String),
}

#[derive(Debug)]
struct ClassSyntax {
    internal_name: String,
    arguments: Vec<ArgumentSyntax>,
    members: Vec<MemberSyntax>,
}

#[derive(Debug)]
struct MemberSyntax {
    name: String,
    arguments: Vec<ArgumentSyntax>,
}

#[derive(Debug)]
enum ArgumentSyntax {
    Unbounded,
    Bounded(Variance, TypeSyntax),
}

#[derive(Debug)]
struct FormalSyntax {
    symbol: String,
    /// Class bound first, when present, then interface bounds.
    bounds: Vec<TypeSyntax>,
}

struct Parser<'s> {
    signature: &'s str,
    bytes: &'s [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'s> Parser<'s> {
    fn new(signature: &'s str, max_depth: usize) -> Self {
        Self {
            signature,
            bytes: signature.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::MalformedSignature {
            signature: self.signature.to_string(),
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn expect(&mut self, ch: u8) -> Result<()> {
        match self.peek() {
            Some(byte) if byte == ch => {
                self.pos += 1;
                Ok(())
            }
            Some(byte) => Err(self.error(format!(
                "expected `{}`, found `{}`",
                ch as char, byte as char
            ))),
            None => Err(self.error(format!("expected `{}`, found end of input", ch as char))),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing characters"))
        }
    }

    /// Consume a non-empty name ending right before one of `stops`.
    fn name(&mut self, stops: &[u8], what: &str) -> Result<String> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if stops.contains(&byte) {
                break;
            }
            self.pos += 1;
        }
        if self.at_end() {
            return Err(self.error(format!("unterminated {}", what)));
        }
        if self.pos == start {
            return Err(self.error(format!("empty {}", what)));
        }
        Ok(self.signature[start..self.pos].to_string())
    }

    fn parse_formals(&mut self) -> Result<Vec<FormalSyntax>> {
        let mut formals = Vec::new();
        if self.peek() != Some(b'<') {
            return Ok(formals);
        }
        self.bump();
        while self.peek() != Some(b'>') {
            let symbol = self.name(b":;<>", "type parameter name")?;
            self.expect(b':')?;
            let mut bounds = Vec::new();
            if !matches!(self.peek(), Some(b':') | Some(b'>')) {
                bounds.push(self.parse_reference()?);
            }
            while self.peek() == Some(b':') {
                self.bump();
                bounds.push(self.parse_reference()?);
            }
            formals.push(FormalSyntax { symbol, bounds });
        }
        if formals.is_empty() {
            return Err(self.error("empty type parameter list"));
        }
        self.expect(b'>')?;
        Ok(formals)
    }

    fn parse_java_type(&mut self) -> Result<TypeSyntax> {
        match self.peek() {
            Some(b'V') => Err(self.error("`void` is only valid as a return type")),
            Some(code) => match Primitive::from_code(code as char) {
                Some(primitive) => {
                    self.pos += 1;
                    Ok(TypeSyntax::Base(primitive))
                }
                None => self.parse_reference(),
            },
            None => Err(self.error("expected a type, found end of input")),
        }
    }

    fn parse_return_type(&mut self) -> Result<TypeSyntax> {
        if self.peek() == Some(b'V') {
            self.pos += 1;
            return Ok(TypeSyntax::Base(Primitive::Void));
        }
        self.parse_java_type()
    }

    fn parse_reference(&mut self) -> Result<TypeSyntax> {
        // Check depth before recursing
        if self.depth >= self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.parse_reference_inner();
        self.depth -= 1;

        result
    }

    fn parse_reference_inner(&mut self) -> Result<TypeSyntax> {
        match self.peek() {
            Some(b'L') => Ok(TypeSyntax::Class(self.parse_class_inner()?)),
            Some(b'T') => {
                self.pos += 1;
                let symbol = self.name(b";<>:./[", "type variable name")?;
                self.expect(b';')?;
                Ok(TypeSyntax::Variable(symbol))
            }
            Some(b'[') => {
                self.pos += 1;
                Ok(TypeSyntax::Array(Box::new(self.parse_java_type()?)))
            }
            Some(byte) => Err(self.error(format!(
                "expected a reference type, found `{}`",
                byte as char
            ))),
            None => Err(self.error("expected a reference type, found end of input")),
        }
    }

    /// A class type at the top of a class signature.
    fn parse_class(&mut self) -> Result<TypeSyntax> {
        if self.peek() != Some(b'L') {
            return Err(self.error("expected a class type"));
        }
        self.parse_reference()
    }

    fn parse_class_inner(&mut self) -> Result<ClassSyntax> {
        self.expect(b'L')?;
        let internal_name = self.name(b";<.>:[", "class name")?;
        let arguments = self.parse_arguments()?;
        let mut members = Vec::new();
        while self.peek() == Some(b'.') {
            self.pos += 1;
            let name = self.name(b";<.>:[/", "member class name")?;
            let arguments = self.parse_arguments()?;
            members.push(MemberSyntax { name, arguments });
        }
        self.expect(b';')?;
        Ok(ClassSyntax {
            internal_name,
            arguments,
            members,
        })
    }

    fn parse_arguments(&mut self) -> Result<Vec<ArgumentSyntax>> {
        let mut arguments = Vec::new();
        if self.peek() != Some(b'<') {
            return Ok(arguments);
        }
        self.pos += 1;
        while self.peek() != Some(b'>') {
            let argument = match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    ArgumentSyntax::Unbounded
                }
                Some(indicator @ (b'+' | b'-')) => {
                    self.pos += 1;
                    let variance = match indicator {
                        b'+' => Variance::Covariant,
                        _ => Variance::Contravariant,
                    };
                    ArgumentSyntax::Bounded(variance, self.parse_reference()?)
                }
                Some(_) => ArgumentSyntax::Bounded(Variance::Invariant, self.parse_reference()?),
                None => return Err(self.error("unterminated type argument list")),
            };
            arguments.push(argument);
        }
        if arguments.is_empty() {
            return Err(self.error("empty type argument list"));
        }
        self.expect(b'>')?;
        Ok(arguments)
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Declare `formals` for `source`. Bounds see every formal of the same list,
/// with empty bounds at the point of reference.
fn declare(
    formals: &[FormalSyntax],
    source: &DeclarationSource,
    enclosing: &VariableScope,
) -> Result<(TypeList, VariableScope)> {
    let placeholders = enclosing.child(
        formals
            .iter()
            .map(|formal| Ty::variable(&formal.symbol, source.clone(), TypeList::empty())),
    );
    let variables = formals
        .iter()
        .map(|formal| {
            let bounds = resolve_all(&formal.bounds, &placeholders)?;
            Ok(Ty::variable(&formal.symbol, source.clone(), bounds))
        })
        .collect::<Result<TypeList>>()?;
    let scope = enclosing.child(variables.iter().cloned());
    Ok((variables, scope))
}

fn resolve_all(syntax: &[TypeSyntax], scope: &VariableScope) -> Result<TypeList> {
    syntax.iter().map(|ty| resolve_type(ty, scope)).collect()
}

fn resolve_type(syntax: &TypeSyntax, scope: &VariableScope) -> Result<Ty> {
    match syntax {
        TypeSyntax::Base(primitive) => Ok(Ty::raw(RawType::primitive(*primitive))),

        // Arrays of raw types stay raw.
        TypeSyntax::Array(component) => {
            let component = resolve_type(component, scope)?;
            if let TypeKind::Raw(raw) = component.kind() {
                return Ok(Ty::raw(raw.array_of(1)));
            }
            Ok(Ty::generic_array(component, 1))
        }

        TypeSyntax::Class(class) => resolve_class(class, scope),

        TypeSyntax::Variable(symbol) => {
            scope
                .lookup(symbol)
                .cloned()
                .ok_or_else(|| Error::UnresolvedVariable {
                    symbol: symbol.clone(),
                })
        }
    }
}

fn resolve_class(class: &ClassSyntax, scope: &VariableScope) -> Result<Ty> {
    let mut raw = RawType::from_internal_name(&class.internal_name);
    let arguments = resolve_arguments(&class.arguments, scope)?;
    let mut ty = if arguments.is_empty() {
        Ty::raw(raw.clone())
    } else {
        Ty::parameterized(raw.clone(), arguments, None)
    };

    for member in &class.members {
        let member_raw = RawType::class(format!("{}${}", raw.type_name(), member.name));
        let arguments = resolve_arguments(&member.arguments, scope)?;
        ty = Ty::parameterized(member_raw.clone(), arguments, Some(ty));
        raw = member_raw;
    }
    Ok(ty)
}

fn resolve_arguments(arguments: &[ArgumentSyntax], scope: &VariableScope) -> Result<TypeList> {
    arguments
        .iter()
        .map(|argument| match argument {
            ArgumentSyntax::Unbounded => Ok(Ty::unbounded_wildcard()),
            ArgumentSyntax::Bounded(Variance::Covariant, bound) => {
                Ok(Ty::upper_bounded(resolve_type(bound, scope)?))
            }
            ArgumentSyntax::Bounded(Variance::Contravariant, bound) => {
                Ok(Ty::lower_bounded(resolve_type(bound, scope)?))
            }
            ArgumentSyntax::Bounded(Variance::Invariant, ty) => resolve_type(ty, scope),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Sort;
    use crate::test_utils::init_test_logging;
    use pretty_assertions::assert_eq;

    fn reader() -> SignatureReader {
        SignatureReader::default()
    }

    fn class_source(name: &str) -> DeclarationSource {
        DeclarationSource::for_type(RawType::class(name))
    }

    #[test]
    fn test_read_field_types() {
        init_test_logging();
        let scope = VariableScope::new();
        let list = reader()
            .read_type("Ljava/util/List<+Ljava/lang/Number;>;", &scope)
            .expect("valid signature");
        assert_eq!(list.to_string(), "java.util.List<? extends java.lang.Number>");

        let ints = reader().read_type("[I", &scope).expect("valid signature");
        assert_eq!(ints.sort(), Sort::Raw);
        assert_eq!(ints.as_raw_type(), RawType::primitive(Primitive::Int).array_of(1));
    }

    #[test]
    fn test_read_inner_types() {
        let source = class_source("Outer");
        let t = Ty::variable("T", source, TypeList::empty());
        let scope = VariableScope::new().child([t]);

        let inner = reader()
            .read_type("LOuter<TT;>.Inner;", &scope)
            .expect("valid signature");
        assert_eq!(inner.to_string(), "Outer<T>.Inner");
        assert_eq!(inner.as_raw_type(), RawType::class("Outer$Inner"));
    }

    #[test]
    fn test_read_class_with_self_bound() {
        let source = class_source("java.lang.Enum");
        let signature = reader()
            .read_class(
                "<E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;Ljava/lang/Comparable<TE;>;",
                &source,
                &VariableScope::new(),
            )
            .expect("valid signature");

        let e = &signature.type_variables[0];
        assert_eq!(e.upper_bounds()[0].to_string(), "java.lang.Enum<E>");
        assert_eq!(e.as_raw_type(), RawType::class("java.lang.Enum"));
        assert_eq!(signature.superclass, Ty::raw(RawType::object()));
        assert_eq!(signature.interfaces[0].parameters()[0], *e);
    }

    #[test]
    fn test_read_forward_reference_between_formals() {
        let source = class_source("Pair");
        let signature = reader()
            .read_class(
                "<A:TB;B:Ljava/lang/Object;>Ljava/lang/Object;",
                &source,
                &VariableScope::new(),
            )
            .expect("valid signature");
        let a = &signature.type_variables[0];
        assert_eq!(a.upper_bounds()[0], signature.type_variables[1]);
    }

    #[test]
    fn test_read_method_sees_enclosing_variables() {
        let owner = class_source("java.util.Map");
        let class = reader()
            .read_class(
                "<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;",
                &owner,
                &VariableScope::new(),
            )
            .expect("valid signature");
        let class_scope = class.scope(&VariableScope::new());

        let method_source = DeclarationSource::for_method(
            owner,
            "map",
            "(Ljava/util/function/Function;)Ljava/util/Map;",
        );
        let signature = concat!(
            "<R::Ljava/lang/Comparable<-TR;>;>",
            "(Ljava/util/function/Function<-TV;+TR;>;)",
            "Ljava/util/Map<TK;TR;>;",
            "^Ljava/io/IOException;",
        );
        let method = reader()
            .read_method(signature, &method_source, &class_scope)
            .expect("valid signature");

        let r = &method.type_variables[0];
        assert_eq!(r.declaration_source(), Some(method_source));
        assert_eq!(method.return_type.to_string(), "java.util.Map<K, R>");
        assert_eq!(
            method.return_type.parameters()[0].declaration_source(),
            Some(class_source("java.util.Map"))
        );
        assert_eq!(method.exceptions.len(), 1);
        assert_eq!(
            method.parameters[0].to_string(),
            "java.util.function.Function<? super V, ? extends R>"
        );
    }

    #[test]
    fn test_read_void_method() {
        let method = reader()
            .read_method(
                "()V",
                &DeclarationSource::for_method(class_source("A"), "run", "()V"),
                &VariableScope::new(),
            )
            .expect("valid signature");
        assert!(method.parameters.is_empty());
        assert_eq!(method.return_type, Ty::raw(RawType::primitive(Primitive::Void)));
    }

    #[test]
    fn test_unresolved_variable() {
        let err = reader()
            .read_type("Ljava/util/List<TT;>;", &VariableScope::new())
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnresolvedVariable {
                symbol: "T".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_signatures() {
        let scope = VariableScope::new();
        for (signature, offset) in [
            ("Ljava/lang/String", 17),
            ("Ljava/util/List<>;", 16),
            ("Q", 0),
            ("V", 0),
            ("II", 1),
        ] {
            match reader().read_type(signature, &scope) {
                Err(Error::MalformedSignature { offset: at, .. }) => {
                    assert_eq!(at, offset, "offset for {}", signature)
                }
                other => panic!("Expected MalformedSignature for {}, got {:?}", signature, other),
            }
        }
    }

    #[test]
    fn test_depth_limit() {
        let reader = SignatureReader::new(ReaderOptions { max_depth: 2 });
        let err = reader
            .read_type("[[[Ljava/lang/String;", &VariableScope::new())
            .unwrap_err();
        assert_eq!(err, Error::DepthExceeded { limit: 2 });
    }

    #[test]
    fn test_scope_lookup_prefers_innermost() {
        let outer = Ty::variable("T", class_source("Outer"), TypeList::empty());
        let inner = Ty::variable("T", class_source("Outer$Inner"), TypeList::empty());
        let mut scope = VariableScope::new().child([outer.clone()]).child(Vec::<Ty>::new());
        assert_eq!(scope.lookup("T"), Some(&outer));
        scope.declare(inner.clone());
        assert_eq!(scope.lookup("T"), Some(&inner));
        assert_eq!(scope.parent().and_then(|p| p.lookup("T")), Some(&outer));
        assert_eq!(scope.lookup("U"), None);
    }
}
