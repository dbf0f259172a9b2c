//! The escape node: renders an inner node with every reserved char of a
//! dialect replaced by its escape sequence.
//!
//! Two passes, both O(n) in the inner length:
//!
//! 1. the length pass sums the extra chars each reserved char adds; the
//!    result is memoized because the wrapped node is immutable;
//! 2. the copy pass streams the inner node's [`Node::char_stream`] through
//!    an [`EscapeCursor`] into the destination.
//!
//! Neither pass needs a scratch buffer. Random access goes through the same
//! cursor: `try_get_char(i)` steps a fresh cursor `i` times. There is a
//! single walk implementation, so sequential and random access cannot
//! disagree.

mod cursor;
mod table;

use core::{fmt, marker::PhantomData};
use std::sync::OnceLock;

pub use cursor::EscapeCursor;
pub use table::{EscapeRule, EscapeTable};

use crate::{FormatError, IntoNode, Node, dialect::Dialect};

/// Escapes the rendered output of `N` for dialect `D`.
#[derive(Debug, Clone)]
pub struct Escape<N, D> {
    inner: N,
    extra: OnceLock<usize>,
    _dialect: PhantomData<fn() -> D>,
}

impl<N: Node, D: Dialect> Escape<N, D> {
    /// Escapes `inner`; the length pass runs lazily on first use.
    pub fn new(inner: impl IntoNode<Node = N>) -> Self {
        Self {
            inner: inner.into_node(),
            extra: OnceLock::new(),
            _dialect: PhantomData,
        }
    }

    /// The unescaped node.
    pub fn inner(&self) -> &N {
        &self.inner
    }

    /// Sequential cursor over the escaped output, driven by the inner
    /// node's char stream. A full scan is O(n).
    #[must_use]
    pub fn cursor(&self) -> EscapeCursor<N::Chars<'_>, D> {
        EscapeCursor::new(self.inner.char_stream())
    }

    /// Forces the length pass now, e.g. before sharing the node.
    pub fn precompute(&self) -> &Self {
        let _ = self.syntax_length();
        self
    }

    fn count_extra(&self) -> usize {
        let table = D::escapes();
        match self.inner.as_str() {
            Some(text) => table.extra_in_str(text),
            None => self.inner.char_stream().map(|c| table.extra(c)).sum(),
        }
    }
}

impl<N: Node, D: Dialect> Node for Escape<N, D> {
    type Chars<'a>
        = EscapeCursor<N::Chars<'a>, D>
    where
        Self: 'a;

    fn syntax_length(&self) -> usize {
        *self.extra.get_or_init(|| self.count_extra())
    }

    #[inline]
    fn inner_length(&self) -> usize {
        self.inner.total_length()
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        let total = self.total_length();
        FormatError::ensure_capacity(total, dst.len())?;
        let written = fill(&mut dst[..total], self.cursor());
        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(written, total, "escaped length disagrees with copy");
        Ok(written)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index >= self.total_length() {
            return None;
        }
        self.cursor().nth(index)
    }

    #[inline]
    fn char_stream(&self) -> Self::Chars<'_> {
        self.cursor()
    }
}

impl<N: Node, D: Dialect> fmt::Display for Escape<N, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::builder::write_node(self, f)
    }
}

fn fill(dst: &mut [char], source: impl Iterator<Item = char>) -> usize {
    let mut written = 0;
    for (slot, c) in dst.iter_mut().zip(source) {
        *slot = c;
        written += 1;
    }
    written
}
