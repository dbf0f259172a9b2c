use bstr::ByteSlice;

/// How a single char is rendered by an escaping dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeRule {
    /// Written unchanged.
    Verbatim,
    /// Written after the given prefix char, e.g. `\*`.
    Prefix(char),
    /// Replaced by an ASCII sequence, e.g. `&lt;`.
    Replace(&'static str),
}

impl EscapeRule {
    /// Length in chars of the escaped form of one char.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Verbatim => 1,
            Self::Prefix(_) => 2,
            Self::Replace(sequence) => sequence.len(),
        }
    }

    /// Chars the escaped form adds on top of the original char.
    #[inline]
    #[must_use]
    pub const fn extra(self) -> usize {
        self.len() - 1
    }

    /// Char at `offset` within the escaped form of `c`.
    #[inline]
    pub(crate) fn char_at(self, c: char, offset: usize) -> char {
        match self {
            Self::Verbatim => c,
            Self::Prefix(prefix) if offset == 0 => prefix,
            Self::Prefix(_) => c,
            Self::Replace(sequence) => char::from(sequence.as_bytes()[offset]),
        }
    }
}

/// O(1) lookup of the escape rule for each reserved ASCII char.
///
/// Reserved chars are always ASCII, so non-ASCII input is never escaped and
/// the byte-level scan in [`EscapeTable::extra_in_str`] is UTF-8 safe.
#[derive(Debug)]
pub struct EscapeTable {
    rules: [EscapeRule; 128],
    reserved: &'static [u8],
    widest: usize,
}

impl EscapeTable {
    /// Every reserved char is written after `prefix`.
    #[must_use]
    pub const fn prefixed(prefix: char, reserved: &'static [u8]) -> Self {
        let mut rules = [EscapeRule::Verbatim; 128];
        let mut i = 0;
        while i < reserved.len() {
            assert!(reserved[i].is_ascii(), "reserved chars must be ASCII");
            rules[reserved[i] as usize] = EscapeRule::Prefix(prefix);
            i += 1;
        }
        let widest = if reserved.is_empty() { 1 } else { 2 };
        Self {
            rules,
            reserved,
            widest,
        }
    }

    /// `reserved[i]` is replaced by `replacements[i]`.
    #[must_use]
    pub const fn replaced(reserved: &'static [u8], replacements: &[&'static str]) -> Self {
        assert!(reserved.len() == replacements.len(), "one replacement per reserved char");
        let mut rules = [EscapeRule::Verbatim; 128];
        let mut widest = 1;
        let mut i = 0;
        while i < reserved.len() {
            assert!(reserved[i].is_ascii(), "reserved chars must be ASCII");
            assert!(replacements[i].is_ascii(), "replacements must be ASCII");
            assert!(!replacements[i].is_empty(), "replacements must be non-empty");
            rules[reserved[i] as usize] = EscapeRule::Replace(replacements[i]);
            if replacements[i].len() > widest {
                widest = replacements[i].len();
            }
            i += 1;
        }
        Self {
            rules,
            reserved,
            widest,
        }
    }

    /// How `c` is escaped.
    #[inline]
    #[must_use]
    pub fn rule(&self, c: char) -> EscapeRule {
        match u8::try_from(c) {
            Ok(byte) if byte.is_ascii() => self.rules[usize::from(byte)],
            _ => EscapeRule::Verbatim,
        }
    }

    /// Chars escaping `c` adds.
    #[inline]
    #[must_use]
    pub fn extra(&self, c: char) -> usize {
        self.rule(c).extra()
    }

    /// Length of the longest escaped form in this table.
    #[must_use]
    pub fn widest(&self) -> usize {
        self.widest
    }

    /// The reserved chars, as bytes.
    #[must_use]
    pub fn reserved(&self) -> &'static [u8] {
        self.reserved
    }

    /// Extra chars escaping `text` adds, found by scanning for reserved
    /// bytes rather than decoding every char.
    #[must_use]
    pub fn extra_in_str(&self, text: &str) -> usize {
        let mut rest = text.as_bytes();
        let mut extra = 0;
        while let Some(at) = rest.find_byteset(self.reserved) {
            extra += self.rules[usize::from(rest[at])].extra();
            rest = &rest[at + 1..];
        }
        extra
    }
}
