//! Limits for value decoding.

/// Limits enforced while decoding nested values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLimits {
    /// Maximum nesting of dictionaries and typed arrays.
    pub max_depth: usize,
}

impl Default for ValueLimits {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl ValueLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self { max_depth: 8 }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}
