use alloc::{borrow::Cow, string::String};
use core::fmt;

use crate::{FormatError, IntoNode, Node};

/// Plain text leaf: renders its source string unchanged.
///
/// The char count is computed once at construction, so every length query
/// is O(1). Lookups by index are O(1) for ASCII text and O(index)
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text<'a> {
    value: Cow<'a, str>,
    length: usize,
}

impl<'a> Text<'a> {
    /// Creates a text node borrowing or owning `value`.
    #[must_use]
    pub fn new(value: impl Into<Cow<'a, str>>) -> Self {
        let value = value.into();
        let length = value.chars().count();
        Self { value, length }
    }

    /// The source string.
    #[must_use]
    pub fn as_source(&self) -> &str {
        &self.value
    }

    #[inline]
    fn is_ascii(&self) -> bool {
        self.value.len() == self.length
    }
}

impl<'a> TryFrom<Option<&'a str>> for Text<'a> {
    type Error = FormatError;

    /// Rejects absent text up front instead of deferring the failure to
    /// materialization.
    fn try_from(value: Option<&'a str>) -> Result<Self, Self::Error> {
        value.map(Text::new).ok_or(FormatError::MissingText)
    }
}

impl Node for Text<'_> {
    type Chars<'a>
        = core::str::Chars<'a>
    where
        Self: 'a;

    #[inline]
    fn syntax_length(&self) -> usize {
        0
    }

    #[inline]
    fn inner_length(&self) -> usize {
        self.length
    }

    fn copy_to(&self, dst: &mut [char]) -> Result<usize, FormatError> {
        FormatError::ensure_capacity(self.length, dst.len())?;
        for (slot, c) in dst.iter_mut().zip(self.value.chars()) {
            *slot = c;
        }
        Ok(self.length)
    }

    fn try_get_char(&self, index: usize) -> Option<char> {
        if index >= self.length {
            return None;
        }
        if self.is_ascii() {
            return Some(char::from(self.value.as_bytes()[index]));
        }
        self.value.chars().nth(index)
    }

    #[inline]
    fn char_stream(&self) -> core::str::Chars<'_> {
        self.value.chars()
    }

    #[inline]
    fn as_str(&self) -> Option<&str> {
        Some(&self.value)
    }
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<'a> IntoNode for &'a str {
    type Node = Text<'a>;

    #[inline]
    fn into_node(self) -> Text<'a> {
        Text::new(self)
    }
}

impl IntoNode for String {
    type Node = Text<'static>;

    #[inline]
    fn into_node(self) -> Text<'static> {
        Text::new(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::Text;
    use crate::{FormatError, Node};

    #[test]
    fn ascii_lookup_and_copy() {
        let text = Text::new("hello");
        assert_eq!(text.total_length(), 5);
        assert_eq!(text.syntax_length(), 0);
        assert_eq!(text.try_get_char(1), Some('e'));
        assert_eq!(text.try_get_char(5), None);
        assert_eq!(text.try_get_char(usize::MAX), None);

        let mut buf = ['\0'; 5];
        assert_eq!(text.copy_to(&mut buf), Ok(5));
        assert_eq!(buf, ['h', 'e', 'l', 'l', 'o']);
    }

    #[test]
    fn lengths_count_chars_not_bytes() {
        let text = Text::new("héllo👍");
        assert_eq!(text.total_length(), 6);
        assert_eq!(text.try_get_char(1), Some('é'));
        assert_eq!(text.try_get_char(5), Some('👍'));
        assert_eq!(text.try_get_char(6), None);
    }

    #[test]
    fn short_destination_is_rejected_untouched() {
        let text = Text::new("abc");
        let mut buf = ['x'; 2];
        assert_eq!(
            text.copy_to(&mut buf),
            Err(FormatError::DestinationTooSmall {
                required: 3,
                actual: 2
            })
        );
        assert_eq!(buf, ['x', 'x']);
    }

    #[test]
    fn absent_text_is_rejected_at_construction() {
        assert_eq!(Text::try_from(None::<&str>), Err(FormatError::MissingText));
        assert_eq!(Text::try_from(Some("a")), Ok(Text::new("a")));
    }

    #[test]
    fn empty_text() {
        let text = Text::new("");
        assert_eq!(text.total_length(), 0);
        assert_eq!(text.copy_to(&mut []), Ok(0));
        assert_eq!(text.try_get_char(0), None);
    }

    #[quickcheck_macros::quickcheck]
    fn lookup_matches_chars(source: String) -> bool {
        let text = Text::new(source.as_str());
        text.total_length() == source.chars().count()
            && source
                .chars()
                .enumerate()
                .all(|(i, c)| text.try_get_char(i) == Some(c))
    }
}
