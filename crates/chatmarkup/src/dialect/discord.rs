//! Discord-flavored Markdown.

use super::Dialect;
use crate::{Escape, IntoNode, Wrap2, escape::EscapeTable, style::styles};

/// Discord Markdown: reserved chars are prefixed with `\`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscordMarkdown;

impl Dialect for DiscordMarkdown {
    const NAME: &'static str = "discord";

    fn escapes() -> &'static EscapeTable {
        static TABLE: EscapeTable = EscapeTable::prefixed('\\', b"_*~`#-[]()>|\\");
        &TABLE
    }
}

styles! {
    /// `**bold**`
    Bold => ("**", "**");
    /// `*italic*`
    Italic => ("*", "*");
    /// `__underline__`
    Underline => ("__", "__");
    /// `~~strikethrough~~`
    Strikethrough => ("~~", "~~");
    /// `||spoiler||`
    Spoiler => ("||", "||");
    /// `` `code` ``
    InlineCode => ("`", "`");
    /// Fenced block without a language.
    CodeBlock => ("```\n", "\n```");
    /// Single-line block quote.
    Quote => ("> ", "");
}

/// Escapes `inner` for this dialect.
pub fn escape<N: IntoNode>(inner: N) -> Escape<N::Node, DiscordMarkdown> {
    Escape::new(inner)
}

/// Masked link, `[text](url)`.
pub fn link<T: IntoNode, U: IntoNode>(text: T, url: U) -> Wrap2<T::Node, U::Node> {
    Wrap2::new("[", text, "](", url, ")")
}

/// A fenced code block tagged with `language`.
pub fn code_block<L: IntoNode, C: IntoNode>(language: L, code: C) -> Wrap2<L::Node, C::Node> {
    Wrap2::new("```", language, "\n", code, "\n```")
}
