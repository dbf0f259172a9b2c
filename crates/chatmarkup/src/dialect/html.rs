//! The HTML-subset dialect.

use super::Dialect;
use crate::{Escape, IntoNode, Wrap2, escape::EscapeTable, style::styles};

/// HTML-subset dialect: `<`, `>` and `&` become entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Html;

impl Dialect for Html {
    const NAME: &'static str = "html";

    fn escapes() -> &'static EscapeTable {
        static TABLE: EscapeTable = EscapeTable::replaced(b"<>&", &["&lt;", "&gt;", "&amp;"]);
        &TABLE
    }
}

styles! {
    /// `<b>bold</b>`
    Bold => ("<b>", "</b>");
    /// `<i>italic</i>`
    Italic => ("<i>", "</i>");
    /// `<u>underline</u>`
    Underline => ("<u>", "</u>");
    /// `<s>strikethrough</s>`
    Strikethrough => ("<s>", "</s>");
    /// Telegram's `<tg-spoiler>` element.
    Spoiler => ("<tg-spoiler>", "</tg-spoiler>");
    /// `<code>code</code>`
    InlineCode => ("<code>", "</code>");
    /// Preformatted block without a language.
    CodeBlock => ("<pre>", "</pre>");
    /// `<blockquote>quote</blockquote>`
    Quote => ("<blockquote>", "</blockquote>");
}

/// Escapes `inner` for this dialect.
pub fn escape<N: IntoNode>(inner: N) -> Escape<N::Node, Html> {
    Escape::new(inner)
}

/// `<a href="url">text</a>`; the url comes first in the rendered output.
pub fn link<T: IntoNode, U: IntoNode>(text: T, url: U) -> Wrap2<U::Node, T::Node> {
    Wrap2::new("<a href=\"", url, "\">", text, "</a>")
}

/// `<pre><code class="language-…">…</code></pre>`
pub fn code_block<L: IntoNode, C: IntoNode>(language: L, code: C) -> Wrap2<L::Node, C::Node> {
    Wrap2::new(
        "<pre><code class=\"language-",
        language,
        "\">",
        code,
        "</code></pre>",
    )
}
