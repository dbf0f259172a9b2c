use crate::FormatError;

/// Configuration for the buffer allocation engine.
///
/// All lengths are counted in `char`s, not bytes.
///
/// # Examples
///
/// ```rust
/// use chatmarkup::{BufferAllocator, FormatterOptions};
///
/// let options = FormatterOptions {
///     initial_buffer_length: 64,
///     growth_factor: 1.5,
///     ..Default::default()
/// };
/// let allocator = BufferAllocator::new(options).unwrap();
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatterOptions {
    /// Size of the first buffer tried when the final length is unknown.
    ///
    /// A caller-supplied hint larger than this value takes precedence.
    ///
    /// # Default
    ///
    /// `256`
    pub initial_buffer_length: usize,

    /// Buffers shorter than this are allocated on the stack and released
    /// when the attempt returns.
    ///
    /// # Default
    ///
    /// `1024`
    pub stack_threshold: usize,

    /// Buffers shorter than this (and at least `stack_threshold`) are
    /// borrowed from the shared [`BufferPool`]. Anything larger is a fresh
    /// heap allocation.
    ///
    /// [`BufferPool`]: crate::BufferPool
    ///
    /// # Default
    ///
    /// `65_536`
    pub pool_threshold: usize,

    /// Largest buffer the grow-and-retry loop will try before giving up with
    /// [`FormatError::CapacityExceeded`].
    ///
    /// # Default
    ///
    /// `16_777_216`
    pub maximum_buffer_length: usize,

    /// Multiplier applied to the buffer size after an insufficient attempt.
    /// Must be finite and greater than `1.0`.
    ///
    /// # Default
    ///
    /// `2.0`
    pub growth_factor: f64,
}

impl FormatterOptions {
    /// Options used by the shared allocator and the free builder functions.
    pub const DEFAULT: Self = Self {
        initial_buffer_length: 256,
        stack_threshold: 1024,
        pool_threshold: 64 * 1024,
        maximum_buffer_length: 16 * 1024 * 1024,
        growth_factor: 2.0,
    };

    /// Checks the options for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidOptions`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), FormatError> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(FormatError::InvalidOptions(
                "growth_factor must be finite and greater than 1.0",
            ));
        }
        if self.initial_buffer_length == 0 {
            return Err(FormatError::InvalidOptions(
                "initial_buffer_length must be non-zero",
            ));
        }
        if self.initial_buffer_length > self.maximum_buffer_length {
            return Err(FormatError::InvalidOptions(
                "initial_buffer_length exceeds maximum_buffer_length",
            ));
        }
        if self.stack_threshold > self.pool_threshold {
            return Err(FormatError::InvalidOptions(
                "stack_threshold exceeds pool_threshold",
            ));
        }
        Ok(())
    }
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::FormatterOptions;
    use crate::FormatError;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FormatterOptions::default().validate(), Ok(()));
    }

    #[rstest]
    #[case::growth_one(FormatterOptions { growth_factor: 1.0, ..FormatterOptions::DEFAULT })]
    #[case::growth_nan(FormatterOptions { growth_factor: f64::NAN, ..FormatterOptions::DEFAULT })]
    #[case::zero_initial(FormatterOptions { initial_buffer_length: 0, ..FormatterOptions::DEFAULT })]
    #[case::initial_over_max(FormatterOptions {
        initial_buffer_length: 10,
        maximum_buffer_length: 5,
        ..FormatterOptions::DEFAULT
    })]
    #[case::stack_over_pool(FormatterOptions {
        stack_threshold: 10,
        pool_threshold: 5,
        ..FormatterOptions::DEFAULT
    })]
    fn rejects_inconsistent_options(#[case] options: FormatterOptions) {
        assert!(matches!(
            options.validate(),
            Err(FormatError::InvalidOptions(_))
        ));
    }

    #[test]
    fn deserializes_partial_options() {
        let options: FormatterOptions =
            serde_json::from_str(r#"{"growth_factor":1.5,"stack_threshold":16}"#).unwrap();
        assert_eq!(
            options,
            FormatterOptions {
                growth_factor: 1.5,
                stack_threshold: 16,
                ..FormatterOptions::DEFAULT
            }
        );
    }
}
