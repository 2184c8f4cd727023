//! Signature grammar: encoding terms into a token stream and reading
//! class-file signatures back into terms.
//!
//! [`SignatureEncoder`] drives any [`SignatureSink`]. Two sinks are provided:
//! [`TokenWriter`] for the readable token grammar and [`JvmSignatureWriter`]
//! for the compact class-file form that [`SignatureReader`] parses.

pub mod encoder;
pub mod reader;
pub mod sink;
pub mod tokens;
pub mod writer;

pub use encoder::{SignatureEncoder, encode};
pub use reader::{SignatureReader, VariableScope};
pub use sink::{SignatureSink, Variance};
pub use tokens::TokenWriter;
pub use writer::JvmSignatureWriter;

use crate::ir::{Ty, TypeList};

/// Generic signature of a class: its type variables, superclass and
/// interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_variables: TypeList,
    pub superclass: Ty,
    pub interfaces: TypeList,
}

impl ClassSignature {
    /// Class-file form, e.g. `<T:Ljava/lang/Object;>Ljava/lang/Object;`.
    pub fn jvm_signature(&self) -> String {
        let mut encoder = SignatureEncoder::new(JvmSignatureWriter::new());
        encoder.encode_class(self);
        encoder.into_sink().finish()
    }

    /// `enclosing` extended with this class's type variables.
    pub fn scope(&self, enclosing: &VariableScope) -> VariableScope {
        enclosing.child(self.type_variables.iter().cloned())
    }
}

/// Generic signature of a method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_variables: TypeList,
    pub parameters: TypeList,
    /// `void` is the raw primitive `void`.
    pub return_type: Ty,
    pub exceptions: TypeList,
}

impl MethodSignature {
    /// Class-file form, e.g. `<T:Ljava/lang/Object;>(TT;)V`.
    pub fn jvm_signature(&self) -> String {
        let mut encoder = SignatureEncoder::new(JvmSignatureWriter::new());
        encoder.encode_method(self);
        encoder.into_sink().finish()
    }

    /// `enclosing` extended with this method's type variables.
    pub fn scope(&self, enclosing: &VariableScope) -> VariableScope {
        enclosing.child(self.type_variables.iter().cloned())
    }
}

impl Ty {
    /// Class-file signature of this term, e.g. `Ljava/util/List<TE;>;`.
    pub fn jvm_signature(&self) -> String {
        let mut writer = JvmSignatureWriter::new();
        encode(self, &mut writer);
        writer.finish()
    }
}
