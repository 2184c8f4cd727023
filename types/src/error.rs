use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while turning external metadata into type terms.
///
/// Equality, hashing, erasure, rendering and encoding never fail; only the
/// input boundary (`describe` and the signature reader) does.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error("unsupported type shape `{kind}`")]
    #[diagnostic(
        code(typeterm::unsupported_shape),
        help("the metadata provider produced a kind of type this model does not know")
    )]
    UnsupportedShape { kind: String },

    #[error("type shape nested deeper than {limit} levels")]
    #[diagnostic(code(typeterm::depth_exceeded))]
    DepthExceeded { limit: usize },

    #[error("malformed signature `{signature}` at offset {offset}: {reason}")]
    #[diagnostic(code(typeterm::malformed_signature))]
    MalformedSignature {
        signature: String,
        offset: usize,
        reason: String,
    },

    #[error("type variable `{symbol}` is not declared in any enclosing scope")]
    #[diagnostic(
        code(typeterm::unresolved_variable),
        help("declare the variable in the reader's scope before reading the signature")
    )]
    UnresolvedVariable { symbol: String },
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::UnsupportedShape {
            kind: "intersection".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported type shape `intersection`");

        let err = Error::MalformedSignature {
            signature: "Ljava/lang/String".to_string(),
            offset: 17,
            reason: "expected `;`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed signature `Ljava/lang/String` at offset 17: expected `;`"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::DepthExceeded { limit: 4 };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("typeterm::depth_exceeded"));
    }
}
