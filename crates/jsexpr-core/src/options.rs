//! Parser configuration.

/// Default nesting limit shared by literal containers and expression groups.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for the literal parser and the `new` resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of `[]`, `{}`, `()` groups, argument lists,
    /// computed indices and stacked `new`. Going past it fails with
    /// `SyntaxErrorKind::DepthLimitExceeded`.
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
