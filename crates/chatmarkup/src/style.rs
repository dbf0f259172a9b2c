//! Style wrappers with compile-time literals.
//!
//! A [`Style`] is a zero-sized marker carrying a prefix and a suffix;
//! [`Styled`] puts them around any node. Nesting styles nests types, so
//! `Bold.apply(Italic.apply("x"))` is a `Styled<Bold, Styled<Italic, Text>>`
//! with no allocation.

use core::{fmt, marker::PhantomData};

use crate::{
    FormatError, IntoNode, Node,
    wrap::{Framed, Literal, framed},
};

/// Fixed decoration placed around wrapped content.
pub trait Style: Sized {
    /// Written before the content.
    const PREFIX: &'static str;
    /// Written after the content.
    const SUFFIX: &'static str;

    /// Wraps `inner` in this style.
    fn apply<N: IntoNode>(self, inner: N) -> Styled<Self, N::Node> {
        Styled::new(inner.into_node())
    }
}

/// `S::PREFIX`, then the inner node, then `S::SUFFIX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styled<S, N> {
    inner: N,
    _style: PhantomData<fn() -> S>,
}

impl<S: Style, N: Node> Styled<S, N> {
    const PREFIX: Literal = Literal::new(S::PREFIX);
    const SUFFIX: Literal = Literal::new(S::SUFFIX);

    /// Wraps `inner`; see also [`Style::apply`].
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            _style: PhantomData,
        }
    }

    /// The wrapped node.
    pub fn inner(&self) -> &N {
        &self.inner
    }
}

impl<S: Style, N: Node> Node for Styled<S, N> {
    type Chars<'a>
        = Framed<N::Chars<'a>>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        Self::PREFIX.len() + Self::SUFFIX.len()
    }

    #[inline]
    fn inner_length(&self) -> usize {
        self.inner.total_length()
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        FormatError::ensure_capacity(self.total_length(), dst.len())?;
        let mut at = Self::PREFIX.write(dst);
        at += self.inner.copy_to(&mut dst[at..])?;
        at += Self::SUFFIX.write(&mut dst[at..]);
        Ok(at)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        let prefix = Self::PREFIX.len();
        if index < prefix {
            return Self::PREFIX.char_at(index);
        }
        let index = index - prefix;
        let inner = self.inner.total_length();
        if index < inner {
            self.inner.try_get_char(index)
        } else {
            Self::SUFFIX.char_at(index - inner)
        }
    }

    #[inline]
    fn char_stream(&self) -> Self::Chars<'_> {
        framed(&Self::PREFIX, self.inner.char_stream(), &Self::SUFFIX)
    }
}

impl<S: Style, N: Node> fmt::Display for Styled<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::builder::write_node(self, f)
    }
}

/// Declares zero-sized [`Style`] markers.
macro_rules! styles {
    ($( $(#[$meta:meta])* $name:ident => ($prefix:expr, $suffix:expr); )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl $crate::style::Style for $name {
                const PREFIX: &'static str = $prefix;
                const SUFFIX: &'static str = $suffix;
            }
        )*
    };
}

pub(crate) use styles;
