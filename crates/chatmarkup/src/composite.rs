use core::{fmt, iter::Chain};

use crate::{FormatError, IntoNode, Node};

/// Concatenation of two nodes.
///
/// Longer sequences are chains of composites (see [`compose!`]); each level
/// adds O(1) work to every operation and nothing to the heap.
///
/// [`compose!`]: crate::compose!
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composite<L, R> {
    left: L,
    right: R,
}

impl<L: Node, R: Node> Composite<L, R> {
    /// `left` followed by `right`.
    #[must_use]
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// The first part.
    pub fn left(&self) -> &L {
        &self.left
    }

    /// The second part.
    pub fn right(&self) -> &R {
        &self.right
    }
}

/// Concatenates two fragments.
///
/// ```rust
/// use chatmarkup::{Node, compose};
///
/// let greeting = compose("Hello, ", "world");
/// assert_eq!(greeting.total_length(), 12);
/// assert_eq!(greeting.to_string(), "Hello, world");
/// ```
#[must_use]
pub fn compose<L: IntoNode, R: IntoNode>(left: L, right: R) -> Composite<L::Node, R::Node> {
    Composite::new(left.into_node(), right.into_node())
}

impl<L: Node, R: Node> Node for Composite<L, R> {
    type Chars<'a>
        = Chain<L::Chars<'a>, R::Chars<'a>>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        0
    }

    #[inline]
    fn inner_length(&self) -> usize {
        self.left.total_length() + self.right.total_length()
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        FormatError::ensure_capacity(self.total_length(), dst.len())?;
        let left = self.left.copy_to(dst)?;
        let right = self.right.copy_to(&mut dst[left..])?;
        Ok(left + right)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        let split = self.left.total_length();
        if index < split {
            self.left.try_get_char(index)
        } else {
            self.right.try_get_char(index - split)
        }
    }

    #[inline]
    fn char_stream(&self) -> Self::Chars<'_> {
        self.left.char_stream().chain(self.right.char_stream())
    }
}

impl<L: Node, R: Node> fmt::Display for Composite<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::builder::write_node(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Node, Text, Value, compose};

    #[test]
    fn delegates_by_offset() {
        let node = compose("ab", Value::new(12));
        assert_eq!(node.total_length(), 4);
        assert_eq!(node.try_get_char(1), Some('b'));
        assert_eq!(node.try_get_char(2), Some('1'));
        assert_eq!(node.try_get_char(4), None);
        assert_eq!(node.to_string(), "ab12");
        assert!(node.char_stream().eq("ab12".chars()));
    }

    #[test]
    fn macro_chains_right_nested() {
        let node = crate::compose!("a", "b", 'c', Text::new("d"));
        assert_eq!(node.to_string(), "abcd");
        assert_eq!(node.left().as_source(), "a");
    }

    #[test]
    fn empty_sides() {
        let node = compose("", "x");
        assert_eq!(node.try_get_char(0), Some('x'));
        let node = compose("x", "");
        assert_eq!(node.try_get_char(1), None);
    }
}
