//! Wrapper nodes: fixed literal text around one or two inner nodes.

use core::{fmt, iter::Chain, str::Chars};

use crate::{FormatError, IntoNode, Node};

/// A string literal with its char count computed up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Literal {
    text: &'static str,
    length: usize,
}

impl Literal {
    pub(crate) const fn new(text: &'static str) -> Self {
        Self {
            text,
            length: char_count(text),
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    /// Writes the literal at the front of `dst`, which the caller has sized.
    #[inline]
    pub(crate) fn write(&self, dst: &mut [char]) -> usize {
        for (slot, c) in dst.iter_mut().zip(self.text.chars()) {
            *slot = c;
        }
        self.length
    }

    #[inline]
    pub(crate) fn chars(&self) -> Chars<'static> {
        self.text.chars()
    }

    #[inline]
    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.length {
            None
        } else if self.text.len() == self.length {
            Some(char::from(self.text.as_bytes()[index]))
        } else {
            self.text.chars().nth(index)
        }
    }
}

/// Stream of `prefix`, then `inner`, then `suffix`.
pub(crate) type Framed<I> = Chain<Chain<Chars<'static>, I>, Chars<'static>>;

#[inline]
pub(crate) fn framed<I: Iterator<Item = char>>(prefix: &Literal, inner: I, suffix: &Literal) -> Framed<I> {
    prefix.chars().chain(inner).chain(suffix.chars())
}

/// Counts chars of a UTF-8 string in a const context by skipping
/// continuation bytes.
pub(crate) const fn char_count(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] & 0xC0 != 0x80 {
            count += 1;
        }
        i += 1;
    }
    count
}

/// One inner node between a prefix and a suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrap<N> {
    prefix: Literal,
    inner: N,
    suffix: Literal,
}

impl<N: Node> Wrap<N> {
    /// `prefix`, then `inner`, then `suffix`.
    pub fn new(prefix: &'static str, inner: impl IntoNode<Node = N>, suffix: &'static str) -> Self {
        Self {
            prefix: Literal::new(prefix),
            inner: inner.into_node(),
            suffix: Literal::new(suffix),
        }
    }

    /// The wrapped node.
    pub fn inner(&self) -> &N {
        &self.inner
    }
}

impl<N: Node> Node for Wrap<N> {
    type Chars<'a>
        = Framed<N::Chars<'a>>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }

    #[inline]
    fn inner_length(&self) -> usize {
        self.inner.total_length()
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        FormatError::ensure_capacity(self.total_length(), dst.len())?;
        let mut at = self.prefix.write(dst);
        at += self.inner.copy_to(&mut dst[at..])?;
        at += self.suffix.write(&mut dst[at..]);
        Ok(at)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        let mut index = index;
        if index < self.prefix.len() {
            return self.prefix.char_at(index);
        }
        index -= self.prefix.len();
        let inner = self.inner.total_length();
        if index < inner {
            return self.inner.try_get_char(index);
        }
        self.suffix.char_at(index - inner)
    }

    #[inline]
    fn char_stream(&self) -> Self::Chars<'_> {
        framed(&self.prefix, self.inner.char_stream(), &self.suffix)
    }
}

impl<N: Node> fmt::Display for Wrap<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::builder::write_node(self, f)
    }
}

/// Two inner nodes framed by three literals: `prefix first middle second
/// suffix`. Links are the typical use: `[` text `](` url `)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrap2<A, B> {
    prefix: Literal,
    first: A,
    middle: Literal,
    second: B,
    suffix: Literal,
}

impl<A: Node, B: Node> Wrap2<A, B> {
    /// Frames `first` and `second` with the three literals.
    pub fn new(
        prefix: &'static str,
        first: impl IntoNode<Node = A>,
        middle: &'static str,
        second: impl IntoNode<Node = B>,
        suffix: &'static str,
    ) -> Self {
        Self {
            prefix: Literal::new(prefix),
            first: first.into_node(),
            middle: Literal::new(middle),
            second: second.into_node(),
            suffix: Literal::new(suffix),
        }
    }

    /// The node between `prefix` and `middle`.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The node between `middle` and `suffix`.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A: Node, B: Node> Node for Wrap2<A, B> {
    type Chars<'a>
        = Framed<Chain<Chain<A::Chars<'a>, Chars<'static>>, B::Chars<'a>>>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        self.prefix.len() + self.middle.len() + self.suffix.len()
    }

    #[inline]
    fn inner_length(&self) -> usize {
        self.first.total_length() + self.second.total_length()
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        FormatError::ensure_capacity(self.total_length(), dst.len())?;
        let mut at = self.prefix.write(dst);
        at += self.first.copy_to(&mut dst[at..])?;
        at += self.middle.write(&mut dst[at..]);
        at += self.second.copy_to(&mut dst[at..])?;
        at += self.suffix.write(&mut dst[at..]);
        Ok(at)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        let mut index = index;
        if index < self.prefix.len() {
            return self.prefix.char_at(index);
        }
        index -= self.prefix.len();

        let first = self.first.total_length();
        if index < first {
            return self.first.try_get_char(index);
        }
        index -= first;

        if index < self.middle.len() {
            return self.middle.char_at(index);
        }
        index -= self.middle.len();

        let second = self.second.total_length();
        if index < second {
            return self.second.try_get_char(index);
        }
        self.suffix.char_at(index - second)
    }

    fn char_stream(&self) -> Self::Chars<'_> {
        let inner = self
            .first
            .char_stream()
            .chain(self.middle.chars())
            .chain(self.second.char_stream());
        framed(&self.prefix, inner, &self.suffix)
    }
}

impl<A: Node, B: Node> fmt::Display for Wrap2<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::builder::write_node(self, f)
    }
}
