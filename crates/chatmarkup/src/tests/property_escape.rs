use alloc::string::String;

use quickcheck::QuickCheck;

use crate::{
    Dialect, DiscordMarkdown, Escape, EscapeRule, Html, Markdown, Node, Style, Text,
    dialect::markdown,
};

/// Straightforward per-char rendering to compare the escape node against.
fn reference<D: Dialect>(text: &str) -> String {
    let mut out = String::new();
    for c in text.chars() {
        match D::escapes().rule(c) {
            EscapeRule::Verbatim => out.push(c),
            EscapeRule::Prefix(prefix) => {
                out.push(prefix);
                out.push(c);
            }
            EscapeRule::Replace(sequence) => out.push_str(sequence),
        }
    }
    out
}

fn agrees<D: Dialect>(text: &str) -> bool {
    let expected = reference::<D>(text);
    let expected_length = expected.chars().count();

    // Contiguous source: byte-scan length pass.
    let direct = Escape::<_, D>::new(text);
    // Composed source: length pass over the chained char stream.
    let composed = Escape::<_, D>::new(crate::compose(Text::new(text), ""));

    [direct.to_string(), composed.to_string()]
        .iter()
        .all(|rendered| *rendered == expected)
        && direct.total_length() == expected_length
        && composed.total_length() == expected_length
        && direct.cursor().eq(expected.chars())
        && composed.cursor().eq(expected.chars())
        && (0..expected_length).all(|i| direct.try_get_char(i) == composed.try_get_char(i))
}

#[test]
fn escaping_matches_per_char_reference() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        agrees::<Markdown>(&text) && agrees::<Html>(&text) && agrees::<DiscordMarkdown>(&text)
    }

    QuickCheck::new()
        .tests(super::cases())
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn escaped_length_is_inner_plus_extra() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let node = markdown::escape(markdown::Bold.apply(text.as_str()));
        let extra: usize = node.inner().chars().map(|c| Markdown::escapes().extra(c)).sum();
        node.inner_length() == node.inner().total_length()
            && node.syntax_length() == extra
            && node.total_length() == node.inner().total_length() + extra
    }

    QuickCheck::new()
        .tests(super::cases())
        .quickcheck(prop as fn(String) -> bool);
}
