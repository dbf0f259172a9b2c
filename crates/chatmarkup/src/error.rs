use thiserror::Error;

/// Errors raised while composing or materializing formatted text.
///
/// Out-of-range character lookups are not errors: [`Node::try_get_char`]
/// returns `None` for them.
///
/// [`Node::try_get_char`]: crate::Node::try_get_char
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A [`Node::copy_to`] destination is shorter than the node.
    ///
    /// [`Node::copy_to`]: crate::Node::copy_to
    #[error("destination holds {actual} chars but {required} are required")]
    DestinationTooSmall {
        /// Length of the node being copied.
        required: usize,
        /// Length of the destination.
        actual: usize,
    },
    /// A text node was built from `None`.
    #[error("text node constructed from absent source text")]
    MissingText,
    /// The grow-and-retry loop reached `maximum_buffer_length`.
    #[error("cannot format within maximum buffer size of {maximum} chars")]
    CapacityExceeded {
        /// The configured maximum.
        maximum: usize,
    },
    /// A [`MessageWriter`](crate::MessageWriter) append did not fit.
    #[error("write of {required} chars exceeds buffer capacity of {capacity}")]
    LengthExceeded {
        /// Length of the writer's buffer.
        capacity: usize,
        /// Total length the append needed.
        required: usize,
    },
    /// A known-length callback wrote fewer chars than it declared.
    #[error("declared length {declared} but only {written} chars were written")]
    IncompleteWrite {
        /// The declared length.
        declared: usize,
        /// Chars actually written.
        written: usize,
    },
    /// [`FormatterOptions::validate`](crate::FormatterOptions::validate)
    /// rejected the options; the message names the violated constraint.
    #[error("invalid formatter options: {0}")]
    InvalidOptions(&'static str),
    /// A `Display` implementation failed.
    #[error("value formatting failed")]
    Fmt,
}

impl From<core::fmt::Error> for FormatError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Fmt
    }
}

impl FormatError {
    /// Checks that a destination of `actual` chars can hold `required`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::DestinationTooSmall`] when it cannot.
    #[inline]
    pub fn ensure_capacity(required: usize, actual: usize) -> Result<(), Self> {
        if actual < required {
            Err(Self::DestinationTooSmall { required, actual })
        } else {
            Ok(())
        }
    }
}
