use core::{iter::FusedIterator, marker::PhantomData};

use super::table::EscapeRule;
use crate::dialect::Dialect;

/// Stateful cursor over the escaped form of a char stream.
///
/// Pulls one source char at a time and then yields each char of its escaped
/// form, so a full left-to-right scan costs O(1) per step. The cursor
/// remembers whether it is in the middle of an escape sequence, which is
/// what makes random access by repeated stepping unnecessary.
#[derive(Debug, Clone)]
pub struct EscapeCursor<I, D> {
    source: I,
    current: Option<(char, EscapeRule)>,
    offset: usize,
    position: usize,
    source_position: usize,
    _dialect: PhantomData<fn() -> D>,
}

impl<I: Iterator<Item = char>, D: Dialect> EscapeCursor<I, D> {
    /// A cursor escaping the chars of `source`.
    pub fn new(source: I) -> Self {
        Self {
            source,
            current: None,
            offset: 0,
            position: 0,
            source_position: 0,
            _dialect: PhantomData,
        }
    }

    /// Virtual (escaped) index of the next char this cursor yields.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of source chars consumed so far.
    #[must_use]
    pub fn source_position(&self) -> usize {
        self.source_position
    }

    /// Whether the cursor stopped part-way through an escape sequence.
    #[must_use]
    pub fn in_escape(&self) -> bool {
        self.current
            .is_some_and(|(_, rule)| self.offset > 0 && self.offset < rule.len())
    }
}

impl<I: Iterator<Item = char>, D: Dialect> Iterator for EscapeCursor<I, D> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        loop {
            if let Some((c, rule)) = self.current {
                if self.offset < rule.len() {
                    let out = rule.char_at(c, self.offset);
                    self.offset += 1;
                    self.position += 1;
                    return Some(out);
                }
            }
            let c = self.source.next()?;
            self.source_position += 1;
            self.current = Some((c, D::escapes().rule(c)));
            self.offset = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self
            .current
            .map_or(0, |(_, rule)| rule.len().saturating_sub(self.offset));
        let (low, high) = self.source.size_hint();
        let widest = D::escapes().widest();
        (
            low.saturating_add(pending),
            high.and_then(|h| h.checked_mul(widest))
                .and_then(|h| h.checked_add(pending)),
        )
    }
}

impl<I: FusedIterator<Item = char>, D: Dialect> FusedIterator for EscapeCursor<I, D> {}
