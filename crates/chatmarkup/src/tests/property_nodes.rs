use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use quickcheck::QuickCheck;

use crate::{
    BufferAllocationResult, BufferAllocator, BufferPool, FormatterOptions, Node, Style, Value,
    compose,
    dialect::{discord, html, markdown},
    render,
};

/// Checks that `copy_to`, `try_get_char` and `Display` all agree with
/// `total_length` on one node.
fn consistent<N: Node + core::fmt::Display>(node: &N) -> bool {
    let length = node.total_length();
    if node.syntax_length() + node.inner_length() != length {
        return false;
    }

    let mut buffer = vec!['\0'; length + 3];
    let Ok(written) = node.copy_to(&mut buffer) else {
        return false;
    };
    if written != length || buffer[length..].iter().any(|&c| c != '\0') {
        return false;
    }
    if length > 0 && node.copy_to(&mut buffer[..length - 1]).is_ok() {
        return false;
    }

    let indexed: Vec<char> = (0..length).filter_map(|i| node.try_get_char(i)).collect();
    let walked: Vec<char> = node.chars().collect();
    let copied: String = buffer[..length].iter().collect();

    indexed == buffer[..length]
        && walked == indexed
        && node.try_get_char(length).is_none()
        && node.to_string() == copied
        && render(node).is_ok_and(|rendered| rendered == copied)
}

#[test]
fn composed_messages_are_consistent() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(name: String, body: String, count: i64, url: String) -> bool {
        let md = compose!(
            markdown::Bold.apply(markdown::escape(name.as_str())),
            ": ",
            markdown::Italic.apply(markdown::escape(Value::new(count))),
            '\n',
            markdown::link(markdown::escape(body.as_str()), url.as_str()),
        );
        let tg = compose!(
            html::Bold.apply(html::escape(name.as_str())),
            html::Quote.apply(html::escape(compose!(body.as_str(), Value::new(count)))),
            html::link(html::escape(body.as_str()), html::escape(url.as_str())),
        );
        let dc = compose!(
            discord::Spoiler.apply(discord::Underline.apply(discord::escape(name.as_str()))),
            discord::code_block("rust", body.as_str()),
            discord::escape(discord::escape(url.as_str())),
        );
        consistent(&md) && consistent(&tg) && consistent(&dc)
    }

    QuickCheck::new()
        .tests(super::cases())
        .quickcheck(prop as fn(String, String, i64, String) -> bool);
}

#[test]
fn composition_is_associative() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(a: String, b: String, c: String) -> bool {
        let left = compose(compose(a.as_str(), b.as_str()), c.as_str());
        let right = compose(a.as_str(), compose(b.as_str(), c.as_str()));
        let expected = [a.as_str(), b.as_str(), c.as_str()].concat();
        left.total_length() == right.total_length()
            && left.to_string() == expected
            && right.to_string() == expected
            && left.chars().eq(right.chars())
    }

    QuickCheck::new()
        .tests(super::cases())
        .quickcheck(prop as fn(String, String, String) -> bool);
}

#[test]
fn growth_reaches_any_length_within_maximum() {
    fn prop(initial: u16, growth: u8, needed: u32) -> bool {
        let maximum = 1 << 16;
        let options = FormatterOptions {
            initial_buffer_length: usize::from(initial % 512) + 1,
            stack_threshold: 64,
            pool_threshold: 4096,
            maximum_buffer_length: maximum,
            growth_factor: 1.0 + f64::from(growth % 40 + 1) / 10.0,
        };
        let needed = usize::try_from(needed).unwrap_or(usize::MAX) % (maximum + 1);

        let pool = BufferPool::new(2);
        let allocator = BufferAllocator::with_pool(options, &pool).unwrap();
        let mut attempts = 0_usize;
        let result = allocator.allocate(0, &needed, |buffer: &mut [char], needed: &usize| {
            attempts += 1;
            if buffer.len() >= *needed {
                BufferAllocationResult::Sufficient(buffer.len())
            } else {
                BufferAllocationResult::Insufficient { required: None }
            }
        });

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bound = (needed as f64 / options.initial_buffer_length as f64)
            .log(options.growth_factor)
            .ceil()
            .max(0.0) as usize
            + 1;
        result.is_ok_and(|size| size >= needed) && attempts <= bound
    }

    QuickCheck::new()
        .tests((super::cases() / 10).max(1))
        .quickcheck(prop as fn(u16, u8, u32) -> bool);
}
