//! Primitive-value leaves formatted through `core::fmt`.
//!
//! Any `Display` type becomes a node by wrapping it in [`Value`]. The value
//! is formatted straight into the destination buffer through a small
//! `fmt::Write` adapter, so no intermediate `String` is built.
//!
//! `Display` implementations must be deterministic: a value that renders
//! differently between calls breaks the length invariant.

use alloc::vec::{self, Vec};
use core::fmt::{self, Write};
use std::sync::OnceLock;

use crate::{FormatError, IntoNode, Node};

/// Leaf node rendering `T` through its `Display` implementation.
#[derive(Debug, Clone)]
pub struct Value<T> {
    value: T,
    length: OnceLock<usize>,
}

impl<T: fmt::Display> Value<T> {
    /// Wraps `value`; its length is measured on first use.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            length: OnceLock::new(),
        }
    }

    /// The wrapped value.
    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display> Node for Value<T> {
    type Chars<'a>
        = vec::IntoIter<char>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        0
    }

    fn inner_length(&self) -> usize {
        *self.length.get_or_init(|| count_chars(&self.value))
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        let required = self.total_length();
        FormatError::ensure_capacity(required, dst.len())?;
        let written = write_display(&self.value, &mut dst[..required])?;
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(written, required, "non-deterministic Display impl");
        Ok(written)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index >= self.total_length() {
            return None;
        }
        let mut seek = SeekWriter {
            remaining: index,
            found: None,
        };
        // The seeker aborts with `fmt::Error` as soon as it finds the char.
        let _ = write!(seek, "{}", self.value);
        seek.found
    }

    /// `Display` output cannot be resumed part-way, so the value is
    /// formatted once into an owned buffer of its exact length.
    fn char_stream(&self) -> vec::IntoIter<char> {
        let mut sink = CollectWriter(Vec::with_capacity(self.total_length()));
        let _ = write!(sink, "{}", self.value);
        sink.0.into_iter()
    }
}

impl<T: fmt::Display> fmt::Display for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl IntoNode for char {
    type Node = Value<char>;

    #[inline]
    fn into_node(self) -> Value<char> {
        Value::new(self)
    }
}

/// Number of chars `value` renders to.
pub(crate) fn count_chars<T: fmt::Display + ?Sized>(value: &T) -> usize {
    let mut counter = CountingWriter(0);
    // Counting never fails; an error here can only come from `value` itself.
    let _ = write!(counter, "{value}");
    counter.0
}

/// Formats `value` into `dst`.
///
/// Returns the chars written, or [`FormatError::LengthExceeded`] carrying
/// the exact length the value needs when `dst` is too short. Nothing past
/// `dst` is touched either way.
pub(crate) fn write_display<T: fmt::Display + ?Sized>(
    value: &T,
    dst: &mut [char],
) -> Result<usize, FormatError> {
    let mut sink = SliceWriter {
        dst,
        position: 0,
        overflow: 0,
    };
    write!(sink, "{value}")?;
    if sink.overflow > 0 {
        return Err(FormatError::LengthExceeded {
            capacity: sink.dst.len(),
            required: sink.position + sink.overflow,
        });
    }
    Ok(sink.position)
}

struct CountingWriter(usize);

impl Write for CountingWriter {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.chars().count();
        Ok(())
    }
}

/// Writes into a char slice; once full, keeps counting what did not fit so
/// the caller learns the required size in one pass.
struct SliceWriter<'a> {
    dst: &'a mut [char],
    position: usize,
    overflow: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if let Some(slot) = self.dst.get_mut(self.position) {
                if self.overflow == 0 {
                    *slot = c;
                    self.position += 1;
                    continue;
                }
            }
            self.overflow += 1;
        }
        Ok(())
    }
}

struct CollectWriter(Vec<char>);

impl Write for CollectWriter {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend(s.chars());
        Ok(())
    }
}

struct SeekWriter {
    remaining: usize,
    found: Option<char>,
}

impl Write for SeekWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.remaining == 0 {
                self.found = Some(c);
                return Err(fmt::Error);
            }
            self.remaining -= 1;
        }
        Ok(())
    }
}
