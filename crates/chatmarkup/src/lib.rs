//! Allocation-free composition of chat message markup.
//!
//! Messages are built from small immutable [`Node`]s (text, formatted
//! values, style wrappers, escapes and concatenations) that know their exact
//! rendered length up front. Composition is generic over concrete node
//! types, so building a message allocates nothing; rendering writes into one
//! buffer from a tiered [`BufferAllocator`] and produces the final `String`
//! in a single allocation.
//!
//! Three dialects are supported: a Markdown-like one ([`Markdown`]), an HTML
//! subset ([`Html`]) and Discord markdown ([`DiscordMarkdown`]).
//!
//! ```rust
//! use chatmarkup::{Style, compose, dialect::markdown, render};
//!
//! let user = "some_user";
//! let message = compose!(
//!     "Hello, ",
//!     markdown::Bold.apply(markdown::escape(user)),
//!     '!',
//! );
//! assert_eq!(render(&message).unwrap(), "Hello, *some\\_user*!");
//! ```

extern crate alloc;

mod buffer;
mod builder;
mod composite;
pub mod dialect;
mod error;
mod escape;
mod node;
mod options;
mod style;
mod text;
mod value;
mod wrap;

#[cfg(test)]
mod tests;

pub use buffer::{
    BufferAllocationResult, BufferAllocator, BufferPool, BufferProcessor, BufferSource,
    DEFAULT_RETAINED_BUFFERS, PooledBuffer,
};
pub use builder::{
    MessageBuilder, MessageWriter, materialize_known_length, materialize_unknown_length, render,
};
pub use composite::{Composite, compose};
pub use dialect::{Dialect, DiscordMarkdown, Html, Markdown};
pub use error::FormatError;
pub use escape::{Escape, EscapeCursor, EscapeRule, EscapeTable};
pub use node::{IntoNode, Node, NodeChars};
pub use options::FormatterOptions;
pub use style::{Style, Styled};
pub use text::Text;
pub use value::Value;
pub use wrap::{Wrap, Wrap2};

/// Concatenates any number of nodes (or strings, or chars) into nested
/// [`Composite`]s, right-associated.
///
/// ```rust
/// # use chatmarkup::{Node, compose};
/// let node = compose!("a", 'b', "cd");
/// assert_eq!(node.total_length(), 4);
/// assert_eq!(node.try_get_char(1), Some('b'));
/// ```
#[macro_export]
macro_rules! compose {
    ($single:expr $(,)?) => {
        $crate::IntoNode::into_node($single)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::compose($first, $crate::compose!($($rest),+))
    };
}
