use super::{SignatureSink, Variance};

/// Renders the textual token grammar, tokens separated by single spaces.
///
/// ```
/// use typeterm_types::{RawType, TokenWriter, Ty, encode};
///
/// let mut writer = TokenWriter::new();
/// encode(&Ty::upper_bounded(Ty::raw(RawType::class("java.lang.Number"))), &mut writer);
/// assert_eq!(writer.finish(), "covariant-argument class-type(java/lang/Number) end end");
/// ```
#[derive(Debug, Default, Clone)]
pub struct TokenWriter {
    tokens: Vec<String>,
}

impl TokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn finish(self) -> String {
        self.tokens.join(" ")
    }

    fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }
}

impl SignatureSink for TokenWriter {
    fn base_type(&mut self, code: char) {
        self.push(format!("base-type({})", code));
    }

    fn type_variable(&mut self, symbol: &str) {
        self.push(format!("type-variable({})", symbol));
    }

    fn array_of(&mut self) {
        self.push("array-of");
    }

    fn class_type(&mut self, internal_name: &str) {
        self.push(format!("class-type({})", internal_name));
    }

    fn inner_type(&mut self, simple_name: &str) {
        self.push(format!("inner-type({})", simple_name));
    }

    fn type_argument(&mut self, variance: Variance) {
        self.push(variance.token());
    }

    fn unbounded_argument(&mut self) {
        self.push("unbounded-argument");
    }

    fn end(&mut self) {
        self.push("end");
    }

    fn formal_type_parameter(&mut self, symbol: &str) {
        self.push(format!("formal-type-parameter({})", symbol));
    }

    fn class_bound(&mut self) {
        self.push("class-bound");
    }

    fn interface_bound(&mut self) {
        self.push("interface-bound");
    }

    fn superclass(&mut self) {
        self.push("superclass");
    }

    fn interface(&mut self) {
        self.push("interface");
    }

    fn parameter_type(&mut self) {
        self.push("parameter-type");
    }

    fn return_type(&mut self) {
        self.push("return-type");
    }

    fn exception_type(&mut self) {
        self.push("exception-type");
    }
}
