#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use chatmarkup::{
    Node, Style, Value, compose,
    dialect::{discord, html, markdown},
    materialize_unknown_length, render,
};

struct Order<'a> {
    customer: &'a str,
    items: &'a [(&'a str, u32)],
    note: &'a str,
}

const ORDER: Order<'static> = Order {
    customer: "j_doe [admin]",
    items: &[("Fish & Chips", 2), ("Tea <hot>", 1)],
    note: "leave at door. ring *twice*",
};

#[test]
fn snapshot_markdown_message() {
    let message = compose!(
        markdown::Bold.apply(markdown::escape(ORDER.customer)),
        " ordered ",
        markdown::escape(Value::new(ORDER.items.len())),
        " items\n",
        markdown::Italic.apply(markdown::escape(ORDER.note)),
        '\n',
        markdown::link("details", "https://example.com/o/1"),
    );
    insta::assert_snapshot!(render(&message).unwrap(), @r#"
    *j\_doe \[admin\]* ordered 2 items
    _leave at door\. ring \*twice\*_
    [details](https://example.com/o/1)
    "#);
}

#[test]
fn snapshot_html_message() {
    let message = compose!(
        html::Bold.apply(html::escape(ORDER.customer)),
        html::Quote.apply(html::escape(ORDER.note)),
        html::link(html::escape(ORDER.items[0].0), "https://example.com/?a=1&amp;b=2"),
        html::code_block("rust", html::escape("if a < b && c > d {}")),
    );
    insta::assert_snapshot!(render(&message).unwrap(), @r#"<b>j_doe [admin]</b><blockquote>leave at door. ring *twice*</blockquote><a href="https://example.com/?a=1&amp;b=2">Fish &amp; Chips</a><pre><code class="language-rust">if a &lt; b &amp;&amp; c &gt; d {}</code></pre>"#);
}

#[test]
fn snapshot_discord_message() {
    let message = compose!(
        discord::Quote.apply(discord::Bold.apply(discord::escape(ORDER.customer))),
        '\n',
        discord::Spoiler.apply(discord::escape(ORDER.note)),
        '\n',
        discord::InlineCode.apply("a.b+c"),
    );
    insta::assert_snapshot!(render(&message).unwrap(), @r#"
    > **j\_doe \[admin\]**
    ||leave at door. ring \*twice\*||
    `a.b+c`
    "#);
}

#[test]
fn snapshot_streamed_item_list() {
    let list = materialize_unknown_length(ORDER.items, |writer, items| {
        for (name, quantity) in items {
            writer
                .append_str("- ")?
                .append_node(markdown::escape(*name))?
                .append_str(" x")?
                .append_value(quantity)?
                .append_char('\n')?;
        }
        Ok(())
    })
    .unwrap();
    insta::assert_snapshot!(list.trim_end(), @r#"
    - Fish & Chips x2
    - Tea <hot\> x1
    "#);
}

#[test]
fn bold_round_trip() {
    assert_eq!(markdown::Bold.apply("text").to_string(), "*text*");
    assert_eq!(markdown::Bold.apply(markdown::Bold.apply("text")).to_string(), "**text**");
    assert_eq!(discord::Bold.apply("text").to_string(), "**text**");
    assert_eq!(html::Bold.apply("text").to_string(), "<b>text</b>");
}

#[test]
fn nested_styles_report_lengths() {
    let node = html::Bold.apply(html::Italic.apply(html::escape("a&b")));
    assert_eq!(node.inner_length(), 3 + 7 + 4);
    assert_eq!(node.syntax_length(), 7);
    assert_eq!(node.total_length(), 21);
    assert_eq!(node.try_get_char(6), Some('a'));
    assert_eq!(node.try_get_char(7), Some('&'));
    assert_eq!(node.try_get_char(21), None);
}
