//! Configuration options for describing shapes and reading signatures.

/// Options controlling how shapes are turned into type terms.
///
/// # Example
///
/// ```
/// use typeterm_types::DescribeOptions;
///
/// let options = DescribeOptions { max_depth: 64 };
/// assert_eq!(DescribeOptions::default().max_depth, 256);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Maximum nesting of shapes (for recursion protection).
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Options for the class-file signature reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum nesting of type arguments and array dimensions.
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}
