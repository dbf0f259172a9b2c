//! The Markdown-like dialect (Telegram `MarkdownV2` flavor).

use super::Dialect;
use crate::{Escape, IntoNode, Wrap2, escape::EscapeTable, style::styles};

/// Markdown-like dialect: reserved chars are prefixed with `\`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markdown;

impl Dialect for Markdown {
    const NAME: &'static str = "markdown";

    fn escapes() -> &'static EscapeTable {
        static TABLE: EscapeTable = EscapeTable::prefixed('\\', b"_*~`#+-=.![](){}>|\\");
        &TABLE
    }
}

styles! {
    /// `*bold*`
    Bold => ("*", "*");
    /// `_italic_`
    Italic => ("_", "_");
    /// `__underline__`
    Underline => ("__", "__");
    /// `~strikethrough~`
    Strikethrough => ("~", "~");
    /// `||spoiler||`
    Spoiler => ("||", "||");
    /// `` `code` ``
    InlineCode => ("`", "`");
    /// A fenced block without a language tag.
    CodeBlock => ("```\n", "\n```");
}

/// Escapes `inner` for this dialect.
pub fn escape<N: IntoNode>(inner: N) -> Escape<N::Node, Markdown> {
    Escape::new(inner)
}

/// `[text](url)`
pub fn link<T: IntoNode, U: IntoNode>(text: T, url: U) -> Wrap2<T::Node, U::Node> {
    Wrap2::new("[", text, "](", url, ")")
}

/// A fenced code block tagged with `language`.
pub fn code_block<L: IntoNode, C: IntoNode>(language: L, code: C) -> Wrap2<L::Node, C::Node> {
    Wrap2::new("```", language, "\n", code, "\n```")
}
