//! Supported markup dialects.
//!
//! Each dialect is a zero-sized type naming its escape table, so the
//! dialect of an [`Escape`] node is part of its type and the table lookup is
//! resolved at compile time. The submodules also carry a small catalogue of
//! style wrappers for their dialect.
//!
//! | Dialect | Reserved chars | Escaping |
//! |---|---|---|
//! | [`Markdown`] | ``_ * ~ ` # + - = . ! [ ] ( ) { } > \| \`` | prefix with `\` |
//! | [`Html`] | `< > &` | `&lt;` `&gt;` `&amp;` |
//! | [`DiscordMarkdown`] | ``_ * ~ ` # - [ ] ( ) > \| \`` | prefix with `\` |
//!
//! [`Escape`]: crate::Escape

pub mod discord;
pub mod html;
pub mod markdown;

pub use discord::DiscordMarkdown;
pub use html::Html;
pub use markdown::Markdown;

use crate::escape::EscapeTable;

/// A markup flavor with its own reserved-char escaping rules.
pub trait Dialect {
    /// Human-readable name, used in logs.
    const NAME: &'static str;

    /// The reserved chars and how each one is escaped.
    fn escapes() -> &'static EscapeTable;
}
