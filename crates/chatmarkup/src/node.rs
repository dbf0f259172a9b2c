//! The node contract shared by every formatted fragment.
//!
//! A node is an immutable value that knows exactly how many `char`s it
//! renders to and can write itself into a caller-supplied buffer. Nodes are
//! composed by value, so a nested style such as bold-italic text is a
//! concrete generic type like `Styled<Bold, Styled<Italic, Text>>`: no
//! boxing and no dynamic dispatch.
//!
//! Four operations must agree for every instance:
//!
//! - [`Node::total_length`] is the number of chars [`Node::copy_to`] writes;
//! - it is also the number of indices [`Node::try_get_char`] accepts and
//!   the number of chars [`Node::char_stream`] yields;
//! - `try_get_char(i)` is the char `copy_to` writes at position `i`, and
//!   the `i`th char of the stream.

use crate::FormatError;

/// An immutable, composable unit of formatted text.
pub trait Node {
    /// Sequential iterator over the rendered chars, see
    /// [`Node::char_stream`].
    type Chars<'a>: Iterator<Item = char>
    where
        Self: 'a;

    /// Chars contributed by this node's own decoration (prefixes, suffixes,
    /// escape markers), excluding wrapped content.
    fn syntax_length(&self) -> usize;

    /// Chars contributed by wrapped nodes. Leaves report their own content
    /// here.
    fn inner_length(&self) -> usize;

    /// Total rendered length in chars.
    #[inline]
    fn total_length(&self) -> usize {
        self.syntax_length() + self.inner_length()
    }

    /// Writes the rendered node to the front of `dst`.
    ///
    /// Returns the number of chars written, always `total_length()`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::DestinationTooSmall`] when `dst` is shorter
    /// than `total_length()`. The check happens before anything is written.
    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError>;

    /// Returns the char at `index` of the rendered output, or `None` when
    /// `index >= total_length()`.
    fn try_get_char(&self, index: usize) -> Option<char>;

    /// Streams the rendered output left to right.
    ///
    /// Each step is amortized O(1) in the rendered length: composites chain
    /// their children's streams instead of looking chars up by index.
    fn char_stream(&self) -> Self::Chars<'_>;

    /// The rendered output as one contiguous string, when the node has one
    /// readily available.
    #[inline]
    fn as_str(&self) -> Option<&str> {
        None
    }

    /// [`Node::char_stream`] with an exact length.
    #[inline]
    fn chars(&self) -> NodeChars<'_, Self> {
        NodeChars {
            stream: self.char_stream(),
            remaining: self.total_length(),
        }
    }
}

impl<N: Node + ?Sized> Node for &N {
    type Chars<'a>
        = N::Chars<'a>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        (**self).syntax_length()
    }

    #[inline]
    fn inner_length(&self) -> usize {
        (**self).inner_length()
    }

    #[inline]
    fn total_length(&self) -> usize {
        (**self).total_length()
    }

    #[inline]
    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        (**self).copy_to(dst)
    }

    #[inline]
    fn try_get_char(&self, index: usize) -> Option<char> {
        (**self).try_get_char(index)
    }

    #[inline]
    fn char_stream(&self) -> Self::Chars<'_> {
        (**self).char_stream()
    }

    #[inline]
    fn as_str(&self) -> Option<&str> {
        (**self).as_str()
    }
}

/// Iterator returned by [`Node::chars`].
pub struct NodeChars<'a, N: Node + ?Sized + 'a> {
    stream: N::Chars<'a>,
    remaining: usize,
}

impl<'a, N: Node + ?Sized + 'a> Iterator for NodeChars<'a, N> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        if self.remaining == 0 {
            return None;
        }
        let c = self.stream.next()?;
        self.remaining -= 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N: Node + ?Sized + 'a> ExactSizeIterator for NodeChars<'a, N> {}

impl<'a, N: Node + ?Sized + 'a> core::iter::FusedIterator for NodeChars<'a, N> {}

impl<'a, N: Node + ?Sized + 'a> core::fmt::Debug for NodeChars<'a, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeChars")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Conversion into a [`Node`], so builders accept plain strings as well as
/// composed nodes.
pub trait IntoNode {
    /// The node this value becomes.
    type Node: Node;

    /// Performs the conversion.
    fn into_node(self) -> Self::Node;
}

impl<N: Node> IntoNode for N {
    type Node = N;

    #[inline]
    fn into_node(self) -> N {
        self
    }
}
