//! Intermediate representation of generic type terms.
//!
//! ## Structure
//!
//! - **Core types**: `Ty`, `TypeKind`, `Sort` - the five sorts of term plus
//!   the lazy projection node
//! - **Leaves**: `RawType` (erasure target), `DeclarationSource` (variable
//!   identity), `TypeList` (arguments and bounds)
//! - **Generic algorithms**: structural equality, visitor and folder
//! - **Display**: source-notation rendering

pub mod display;
pub mod eq;
pub mod fold;
pub mod lazy;
pub mod list;
pub mod raw;
pub mod source;
pub mod ty;
pub mod visit;

pub use display::TypeFormatter;
pub use eq::types_equal;
pub use fold::{Substitutor, TypeBindings, TypeFolder};
pub use lazy::LazyProjection;
pub use list::TypeList;
pub use raw::{Primitive, RawKind, RawType};
pub use source::{DeclarationSource, SourceKind};
pub use ty::{Sort, Ty, TyData, TypeFlags, TypeKind};
pub use visit::{ClosureVisitor, TypeVisitor, VariableCollector};
