//! Materializing nodes and caller-written content into a `String`.
//!
//! Content is assembled in a `char` buffer from the [`BufferAllocator`] and
//! converted to UTF-8 once at the end, into a `String` allocated at its
//! exact size. That final string is the only heap allocation on the fast
//! path.

use alloc::string::String;
use core::fmt;

use crate::{
    BufferAllocationResult, BufferAllocator, FormatError, FormatterOptions, IntoNode, Node,
    value::write_display,
};

/// Sequential writer over a fixed-size char buffer.
///
/// An append that does not fit fails with [`FormatError::LengthExceeded`]
/// and leaves the write position where it was. The largest length any
/// rejected append needed is also recorded (see [`MessageWriter::overflow`]),
/// so overflow reported through `fmt::Write` as a bare `fmt::Error` still
/// lets the builders grow the buffer and retry.
#[derive(Debug)]
pub struct MessageWriter<'b> {
    buffer: &'b mut [char],
    position: usize,
    overflow: Option<usize>,
}

impl<'b> MessageWriter<'b> {
    /// A writer positioned at the start of `buffer`.
    pub fn new(buffer: &'b mut [char]) -> Self {
        Self {
            buffer,
            position: 0,
            overflow: None,
        }
    }

    /// Chars written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.position
    }

    /// Chars still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// The written prefix of the buffer.
    #[must_use]
    pub fn as_chars(&self) -> &[char] {
        &self.buffer[..self.position]
    }

    /// Total length the largest rejected append needed, if any append was
    /// rejected.
    #[must_use]
    pub fn overflow(&self) -> Option<usize> {
        self.overflow
    }

    fn exceeded(&mut self, required: usize) -> FormatError {
        self.overflow = Some(self.overflow.map_or(required, |seen| seen.max(required)));
        FormatError::LengthExceeded {
            capacity: self.buffer.len(),
            required,
        }
    }

    fn reserve(&mut self, length: usize) -> Result<(), FormatError> {
        if length > self.remaining() {
            Err(self.exceeded(self.position + length))
        } else {
            Ok(())
        }
    }

    /// Length the buffer must have for a callback that finished with
    /// `outcome` to succeed, or `None` when running out of space is not
    /// what went wrong.
    fn shortfall(&self, outcome: &Result<(), FormatError>) -> Option<usize> {
        match outcome {
            Err(FormatError::LengthExceeded { required, .. }) => {
                Some(self.overflow.map_or(*required, |seen| seen.max(*required)))
            }
            Ok(()) | Err(FormatError::Fmt) => self.overflow,
            Err(_) => None,
        }
    }

    /// Appends `text`.
    ///
    /// # Errors
    ///
    /// [`FormatError::LengthExceeded`] when `text` does not fit.
    pub fn append_str(&mut self, text: &str) -> Result<&mut Self, FormatError> {
        let length = text.chars().count();
        self.reserve(length)?;
        let dst = &mut self.buffer[self.position..self.position + length];
        for (slot, c) in dst.iter_mut().zip(text.chars()) {
            *slot = c;
        }
        self.position += length;
        Ok(self)
    }

    /// Appends a single char.
    ///
    /// # Errors
    ///
    /// [`FormatError::LengthExceeded`] when the buffer is full.
    pub fn append_char(&mut self, c: char) -> Result<&mut Self, FormatError> {
        self.reserve(1)?;
        self.buffer[self.position] = c;
        self.position += 1;
        Ok(self)
    }

    /// Appends the rendered form of `node`.
    ///
    /// # Errors
    ///
    /// [`FormatError::LengthExceeded`] when the node does not fit.
    pub fn append_node<N: IntoNode>(&mut self, node: N) -> Result<&mut Self, FormatError> {
        let node = node.into_node();
        self.reserve(node.total_length())?;
        self.position += node.copy_to(&mut self.buffer[self.position..])?;
        Ok(self)
    }

    /// Appends `value` formatted through `Display`.
    ///
    /// The value is formatted in a single pass, so when it does not fit the
    /// chars after the write position may already have been overwritten.
    /// Only [`MessageWriter::as_chars`] is guaranteed unchanged.
    ///
    /// # Errors
    ///
    /// [`FormatError::LengthExceeded`] with the total length needed when
    /// the value does not fit.
    pub fn append_value<T: fmt::Display + ?Sized>(&mut self, value: &T) -> Result<&mut Self, FormatError> {
        let start = self.position;
        match write_display(value, &mut self.buffer[start..]) {
            Ok(written) => {
                self.position += written;
                Ok(self)
            }
            Err(FormatError::LengthExceeded { required, .. }) => Err(self.exceeded(start + required)),
            Err(error) => Err(error),
        }
    }
}

/// `write!` support. Running out of space surfaces as `fmt::Error` (and so
/// as [`FormatError::Fmt`] through `?`); the builders consult
/// [`MessageWriter::overflow`] to treat it as a capacity shortfall.
impl fmt::Write for MessageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s).map(|_| ()).map_err(|_| fmt::Error)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_char(c).map(|_| ()).map_err(|_| fmt::Error)
    }
}

/// Builds strings with a particular allocator configuration.
///
/// The allocator only backs the builder's own buffers. Nodes never draw
/// buffers while rendering: `copy_to`, `Display` and the escape passes all
/// work from their char streams, so a custom allocator sees every buffer
/// a `MessageBuilder` call takes.
#[derive(Debug, Clone, Copy)]
pub struct MessageBuilder<'p> {
    allocator: BufferAllocator<'p>,
}

impl MessageBuilder<'static> {
    /// A builder with its own options over the shared pool.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidOptions`] when `options` are inconsistent.
    pub fn new(options: FormatterOptions) -> Result<Self, FormatError> {
        BufferAllocator::new(options).map(Self::from_allocator)
    }

    /// A builder over [`BufferAllocator::shared`].
    #[must_use]
    pub fn shared() -> Self {
        Self::from_allocator(*BufferAllocator::shared())
    }
}

impl<'p> MessageBuilder<'p> {
    /// A builder drawing its buffers from `allocator`.
    #[must_use]
    pub fn from_allocator(allocator: BufferAllocator<'p>) -> Self {
        Self { allocator }
    }

    /// The allocator this builder draws from.
    #[must_use]
    pub fn allocator(&self) -> &BufferAllocator<'p> {
        &self.allocator
    }

    /// Renders `node` to a `String`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the node's [`Node::copy_to`].
    pub fn render<N: Node + ?Sized>(&self, node: &N) -> Result<String, FormatError> {
        if let Some(text) = node.as_str() {
            return Ok(String::from(text));
        }
        let length = node.total_length();
        self.allocator.with_buffer(length, |buffer| {
            let written = node.copy_to(buffer)?;
            Ok(collect_string(&buffer[..written]))
        })
    }

    /// Runs `callback` against a writer of exactly `total_length` chars.
    ///
    /// The length is trusted as given; it is not checked against
    /// `maximum_buffer_length`.
    ///
    /// # Errors
    ///
    /// Whatever `callback` returns; [`FormatError::LengthExceeded`] when it
    /// writes past `total_length`; [`FormatError::IncompleteWrite`] when it
    /// writes fewer chars.
    pub fn materialize_known_length<S, F>(&self, total_length: usize, state: &S, callback: F) -> Result<String, FormatError>
    where
        S: ?Sized,
        F: FnOnce(&mut MessageWriter<'_>, &S) -> Result<(), FormatError>,
    {
        self.allocator.with_buffer(total_length, |buffer| {
            let mut writer = MessageWriter::new(buffer);
            let outcome = callback(&mut writer, state);
            if let Some(required) = writer.shortfall(&outcome) {
                return Err(FormatError::LengthExceeded {
                    capacity: total_length,
                    required,
                });
            }
            outcome?;
            let written = writer.written();
            if written != total_length {
                return Err(FormatError::IncompleteWrite {
                    declared: total_length,
                    written,
                });
            }
            Ok(collect_string(writer.as_chars()))
        })
    }

    /// Runs `callback` against buffers of growing size until its writes fit.
    ///
    /// The callback may run several times and must produce the same content
    /// each time. Running out of space triggers a retry with a larger
    /// buffer, whether the callback saw it as [`FormatError::LengthExceeded`]
    /// or, through `write!`, as [`FormatError::Fmt`]. Any other error is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// [`FormatError::CapacityExceeded`] when the content does not fit in
    /// `maximum_buffer_length` chars, or the first non-capacity error the
    /// callback returns.
    pub fn materialize_unknown_length<S, F>(&self, state: &S, mut callback: F) -> Result<String, FormatError>
    where
        S: ?Sized,
        F: FnMut(&mut MessageWriter<'_>, &S) -> Result<(), FormatError>,
    {
        self.allocator
            .allocate(0, state, |buffer: &mut [char], state: &S| {
                let mut writer = MessageWriter::new(buffer);
                let outcome = callback(&mut writer, state);
                if let Some(required) = writer.shortfall(&outcome) {
                    return BufferAllocationResult::Insufficient {
                        required: Some(required),
                    };
                }
                BufferAllocationResult::Sufficient(outcome.map(|()| collect_string(writer.as_chars())))
            })
            .and_then(|result| result)
    }
}

/// Renders `node` with the shared allocator.
///
/// # Errors
///
/// See [`MessageBuilder::render`].
pub fn render<N: Node + ?Sized>(node: &N) -> Result<String, FormatError> {
    MessageBuilder::shared().render(node)
}

/// [`MessageBuilder::materialize_known_length`] with the shared allocator.
///
/// # Errors
///
/// See [`MessageBuilder::materialize_known_length`].
pub fn materialize_known_length<S, F>(total_length: usize, state: &S, callback: F) -> Result<String, FormatError>
where
    S: ?Sized,
    F: FnOnce(&mut MessageWriter<'_>, &S) -> Result<(), FormatError>,
{
    MessageBuilder::shared().materialize_known_length(total_length, state, callback)
}

/// [`MessageBuilder::materialize_unknown_length`] with the shared allocator.
///
/// # Errors
///
/// See [`MessageBuilder::materialize_unknown_length`].
pub fn materialize_unknown_length<S, F>(state: &S, callback: F) -> Result<String, FormatError>
where
    S: ?Sized,
    F: FnMut(&mut MessageWriter<'_>, &S) -> Result<(), FormatError>,
{
    MessageBuilder::shared().materialize_unknown_length(state, callback)
}

/// Writes `node` to a formatter, used by the `Display` impls of composed
/// nodes.
pub(crate) fn write_node<N: Node + ?Sized>(node: &N, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(text) = node.as_str() {
        return f.write_str(text);
    }
    node.char_stream().try_for_each(|c| fmt::Write::write_char(f, c))
}

fn collect_string(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.iter().map(|c| c.len_utf8()).sum());
    out.extend(chars);
    out
}
