use super::{SignatureSink, Variance};

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// An open class type; `arguments` is set once `<` has been written.
    Class { arguments: bool },
    /// An open type argument.
    Argument,
}

/// Renders the compact class-file signature form
/// (`Ljava/util/List<+Ljava/lang/Number;>;`).
#[derive(Debug, Default)]
pub struct JvmSignatureWriter {
    out: String,
    frames: Vec<Frame>,
    has_formals: bool,
    has_parameters: bool,
}

impl JvmSignatureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn end_formals(&mut self) {
        if self.has_formals {
            self.has_formals = false;
            self.out.push('>');
        }
    }

    fn open_arguments(&mut self) {
        if let Some(Frame::Class { arguments }) = self.frames.last_mut() {
            if !*arguments {
                *arguments = true;
                self.out.push('<');
            }
        }
    }

    fn close_arguments(&mut self) {
        if let Some(Frame::Class { arguments }) = self.frames.last_mut() {
            if *arguments {
                *arguments = false;
                self.out.push('>');
            }
        }
    }
}

impl SignatureSink for JvmSignatureWriter {
    fn base_type(&mut self, code: char) {
        self.out.push(code);
    }

    fn type_variable(&mut self, symbol: &str) {
        self.out.push('T');
        self.out.push_str(symbol);
        self.out.push(';');
    }

    fn array_of(&mut self) {
        self.out.push('[');
    }

    fn class_type(&mut self, internal_name: &str) {
        self.out.push('L');
        self.out.push_str(internal_name);
        self.frames.push(Frame::Class { arguments: false });
    }

    fn inner_type(&mut self, simple_name: &str) {
        self.close_arguments();
        self.out.push('.');
        self.out.push_str(simple_name);
    }

    fn type_argument(&mut self, variance: Variance) {
        self.open_arguments();
        if variance != Variance::Invariant {
            self.out.push(variance.indicator());
        }
        self.frames.push(Frame::Argument);
    }

    fn unbounded_argument(&mut self) {
        self.open_arguments();
        self.out.push('*');
    }

    fn end(&mut self) {
        match self.frames.pop() {
            Some(Frame::Class { arguments }) => {
                if arguments {
                    self.out.push('>');
                }
                self.out.push(';');
            }
            Some(Frame::Argument) | None => {}
        }
    }

    fn formal_type_parameter(&mut self, symbol: &str) {
        if !self.has_formals {
            self.has_formals = true;
            self.out.push('<');
        }
        self.out.push_str(symbol);
        self.out.push(':');
    }

    fn interface_bound(&mut self) {
        self.out.push(':');
    }

    fn superclass(&mut self) {
        self.end_formals();
    }

    fn parameter_type(&mut self) {
        self.end_formals();
        if !self.has_parameters {
            self.has_parameters = true;
            self.out.push('(');
        }
    }

    fn return_type(&mut self) {
        self.end_formals();
        if !self.has_parameters {
            self.has_parameters = true;
            self.out.push('(');
        }
        self.out.push(')');
    }

    fn exception_type(&mut self) {
        self.out.push('^');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DeclarationSource, Primitive, RawType, Ty, TypeList};
    use crate::signature::encode;

    fn jvm(ty: &Ty) -> String {
        let mut writer = JvmSignatureWriter::new();
        encode(ty, &mut writer);
        writer.finish()
    }

    fn class(name: &str) -> Ty {
        Ty::raw(RawType::class(name))
    }

    #[test]
    fn test_write_types() {
        assert_eq!(jvm(&class("java.lang.String")), "Ljava/lang/String;");
        assert_eq!(jvm(&Ty::raw(RawType::primitive(Primitive::Int).array_of(1))), "[I");

        let map = Ty::parameterized(
            RawType::class("java.util.Map"),
            TypeList::from([
                class("java.lang.String"),
                Ty::upper_bounded(class("java.lang.Number")),
            ]),
            None,
        );
        assert_eq!(
            jvm(&map),
            "Ljava/util/Map<Ljava/lang/String;+Ljava/lang/Number;>;"
        );
    }

    #[test]
    fn test_write_inner_type() {
        let source = DeclarationSource::for_type(RawType::class("Outer"));
        let t = Ty::variable("T", source, TypeList::empty());
        let outer = Ty::parameterized(RawType::class("Outer"), t, None);
        let inner = Ty::parameterized(
            RawType::class("Outer$Inner"),
            Ty::unbounded_wildcard(),
            Some(outer),
        );
        assert_eq!(jvm(&inner), "LOuter<TT;>.Inner<*>;");
    }
}
