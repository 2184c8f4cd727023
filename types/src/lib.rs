//! Generic type terms for a nominal, JVM-style type system.
//!
//! Terms are immutable, cheaply cloneable and thread-safe. They can be built
//! directly, described from a metadata [`Shape`], read from a class-file
//! signature, and encoded back into a signature grammar.
//!
//! # Example
//!
//! ```
//! use typeterm_types::{RawType, Ty, TokenWriter, encode};
//!
//! let list = Ty::parameterized(
//!     RawType::class("java.util.List"),
//!     Ty::raw(RawType::class("java.lang.String")),
//!     None,
//! );
//! assert_eq!(list.to_string(), "java.util.List<java.lang.String>");
//! assert_eq!(list.as_raw_type(), RawType::class("java.util.List"));
//!
//! let mut tokens = TokenWriter::new();
//! encode(&list, &mut tokens);
//! assert_eq!(
//!     tokens.finish(),
//!     "class-type(java/util/List) invariant-argument class-type(java/lang/String) end end end"
//! );
//! ```

pub mod error;
pub mod ir;
pub mod options;
pub mod shape;
pub mod signature;

pub use error::{Error, Result};
pub use options::{DescribeOptions, ReaderOptions};
pub use shape::{Describer, Shape, describe};
pub use signature::{
    ClassSignature, JvmSignatureWriter, MethodSignature, SignatureEncoder, SignatureReader,
    SignatureSink, TokenWriter, Variance, VariableScope, encode,
};

// Re-export IR types for convenience
pub use ir::{
    ClosureVisitor, DeclarationSource, LazyProjection, Primitive, RawKind, RawType, Sort,
    SourceKind, Substitutor, Ty, TyData, TypeBindings, TypeFlags, TypeFolder, TypeFormatter,
    TypeKind, TypeList, TypeVisitor, VariableCollector, types_equal,
};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
