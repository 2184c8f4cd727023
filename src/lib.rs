//! Typeterm - generic type terms for nominal, JVM-style type systems
//!
//! # Overview
//!
//! Typeterm models the types a compiler or bytecode tool sees once generics
//! enter the picture:
//!
//! - Raw classes, primitives and their arrays
//! - Parameterized types such as `Map<K, V>` and `Outer<T>.Inner`
//! - Type variables, identified by their declaration site
//! - Wildcards with upper or lower bounds
//! - Arrays whose component is itself generic
//!
//! Terms compare structurally, erase to a raw type, render in source
//! notation and encode into a signature grammar.
//!
//! # Quick Start
//!
//! ```
//! use typeterm::{SignatureReader, VariableScope};
//!
//! let reader = SignatureReader::default();
//! let ty = reader
//!     .read_type("Ljava/util/List<+Ljava/lang/Number;>;", &VariableScope::new())
//!     .unwrap();
//!
//! assert_eq!(ty.to_string(), "java.util.List<? extends java.lang.Number>");
//! assert_eq!(ty.as_raw_type().type_name(), "java.util.List");
//! ```
//!
//! # Error Reports
//!
//! Failures only happen at the input boundary. [`render_error_to_string_no_color`]
//! turns any [`Error`] into a readable report, pointing into the offending
//! signature when there is one.

mod error_renderer;

pub use error_renderer::{report, render_error, render_error_to_string_no_color};

// Re-export public API from typeterm_types
pub use typeterm_types::{
    ClassSignature, DescribeOptions, Describer, Error, JvmSignatureWriter, MethodSignature,
    ReaderOptions, Result, Shape, SignatureEncoder, SignatureReader, SignatureSink, TokenWriter,
    Variance, VariableScope, describe, encode,
};

// Re-export the term model
pub use typeterm_types::ir::{
    self, DeclarationSource, LazyProjection, Primitive, RawType, Sort, Ty, TypeBindings,
    TypeFolder, TypeKind, TypeList, TypeVisitor,
};
