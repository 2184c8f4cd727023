use std::fmt;

/// Variance of a bracketed type argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    /// `? extends X`
    Covariant,
    /// `? super X`
    Contravariant,
    /// `X`
    Invariant,
}

impl Variance {
    /// Wildcard indicator used by class-file signatures.
    pub fn indicator(self) -> char {
        match self {
            Variance::Covariant => '+',
            Variance::Contravariant => '-',
            Variance::Invariant => '=',
        }
    }

    /// Inverse of [`Variance::indicator`].
    pub fn from_indicator(indicator: char) -> Option<Self> {
        match indicator {
            '+' => Some(Variance::Covariant),
            '-' => Some(Variance::Contravariant),
            '=' => Some(Variance::Invariant),
            _ => None,
        }
    }

    /// Token name in the textual grammar.
    pub fn token(self) -> &'static str {
        match self {
            Variance::Covariant => "covariant-argument",
            Variance::Contravariant => "contravariant-argument",
            Variance::Invariant => "invariant-argument",
        }
    }
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Receiver of signature tokens, in visit order.
///
/// Type tokens form a nested stream:
///
/// - a class type is `class_type`, then any `inner_type` continuations,
///   each followed by its type arguments, and closed by one `end`
/// - a type argument is either `unbounded_argument` alone, or
///   `type_argument(variance)`, the argument type, and `end`
/// - `array_of` prefixes its component type
///
/// Declaration tokens announce which part of a class or method signature the
/// next type belongs to. Sinks that only care about types can ignore them.
pub trait SignatureSink {
    fn base_type(&mut self, code: char);

    fn type_variable(&mut self, symbol: &str);

    fn array_of(&mut self);

    /// Open a class type by internal name (`java/util/Map`).
    fn class_type(&mut self, internal_name: &str);

    /// Continue the open class type with a member type (`Entry`).
    fn inner_type(&mut self, simple_name: &str);

    fn type_argument(&mut self, variance: Variance);

    fn unbounded_argument(&mut self);

    /// Close the innermost open class type or type argument.
    fn end(&mut self);

    fn formal_type_parameter(&mut self, _symbol: &str) {}

    fn class_bound(&mut self) {}

    fn interface_bound(&mut self) {}

    fn superclass(&mut self) {}

    fn interface(&mut self) {}

    fn parameter_type(&mut self) {}

    fn return_type(&mut self) {}

    fn exception_type(&mut self) {}
}

impl<S: SignatureSink + ?Sized> SignatureSink for &mut S {
    fn base_type(&mut self, code: char) {
        (**self).base_type(code)
    }

    fn type_variable(&mut self, symbol: &str) {
        (**self).type_variable(symbol)
    }

    fn array_of(&mut self) {
        (**self).array_of()
    }

    fn class_type(&mut self, internal_name: &str) {
        (**self).class_type(internal_name)
    }

    fn inner_type(&mut self, simple_name: &str) {
        (**self).inner_type(simple_name)
    }

    fn type_argument(&mut self, variance: Variance) {
        (**self).type_argument(variance)
    }

    fn unbounded_argument(&mut self) {
        (**self).unbounded_argument()
    }

    fn end(&mut self) {
        (**self).end()
    }

    fn formal_type_parameter(&mut self, symbol: &str) {
        (**self).formal_type_parameter(symbol)
    }

    fn class_bound(&mut self) {
        (**self).class_bound()
    }

    fn interface_bound(&mut self) {
        (**self).interface_bound()
    }

    fn superclass(&mut self) {
        (**self).superclass()
    }

    fn interface(&mut self) {
        (**self).interface()
    }

    fn parameter_type(&mut self) {
        (**self).parameter_type()
    }

    fn return_type(&mut self) {
        (**self).return_type()
    }

    fn exception_type(&mut self) {
        (**self).exception_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators() {
        for variance in [Variance::Covariant, Variance::Contravariant, Variance::Invariant] {
            assert_eq!(Variance::from_indicator(variance.indicator()), Some(variance));
        }
        assert_eq!(Variance::from_indicator('*'), None);
        assert_eq!(Variance::Covariant.to_string(), "covariant-argument");
    }
}
