#![no_main]

use arbitrary::Arbitrary;
use chatmarkup::{
    Dialect, DiscordMarkdown, Escape, Html, Markdown, Node, Style, Value, compose,
    dialect::{discord, html, markdown},
    render,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    other: &'a str,
    number: i32,
    nested: bool,
}

/// Every way of reading a node must produce the same chars.
fn check<N: Node>(node: &N) {
    let length = node.total_length();
    let rendered = render(node).expect("render");
    assert_eq!(rendered.chars().count(), length);

    let mut buffer = vec!['\0'; length];
    assert_eq!(node.copy_to(&mut buffer), Ok(length));
    assert!(rendered.chars().eq(buffer.iter().copied()));
    assert!(node.chars().eq(buffer.iter().copied()));
    assert_eq!(node.try_get_char(length), None);
}

fn check_dialect<D: Dialect>(input: &Input<'_>) {
    let escaped = Escape::<_, D>::new(input.text);
    check(&escaped);
    assert!(escaped.cursor().eq(escaped.chars()));

    let composed = Escape::<_, D>::new(compose!(input.text, Value::new(input.number), input.other));
    check(&composed);

    if input.nested {
        check(&Escape::<_, D>::new(Escape::<_, D>::new(input.other)));
    }
}

fuzz_target!(|input: Input<'_>| {
    check_dialect::<Markdown>(&input);
    check_dialect::<Html>(&input);
    check_dialect::<DiscordMarkdown>(&input);

    check(&compose!(
        markdown::Bold.apply(markdown::escape(input.text)),
        html::Italic.apply(html::escape(input.other)),
        discord::link(discord::escape(input.text), input.other),
    ));
});
