#![no_main]

use arbitrary::Arbitrary;
use chatmarkup::{
    BufferAllocator, BufferPool, FormatError, FormatterOptions, MessageBuilder, dialect::markdown,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Piece<'a> {
    Str(&'a str),
    Char(char),
    Number(u64),
    Escaped(&'a str),
}

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    initial: u8,
    growth: u8,
    maximum: u16,
    pieces: Vec<Piece<'a>>,
}

fuzz_target!(|input: Input<'_>| {
    let options = FormatterOptions {
        initial_buffer_length: usize::from(input.initial) + 1,
        stack_threshold: 32,
        pool_threshold: 256,
        maximum_buffer_length: usize::from(input.maximum) + 256,
        growth_factor: 1.0 + f64::from(input.growth % 30 + 1) / 10.0,
    };
    let pool = BufferPool::new(4);
    let builder = MessageBuilder::from_allocator(
        BufferAllocator::with_pool(options, &pool).expect("valid options"),
    );

    let mut expected = String::new();
    for piece in &input.pieces {
        match piece {
            Piece::Str(s) => expected.push_str(s),
            Piece::Char(c) => expected.push(*c),
            Piece::Number(n) => expected.push_str(&n.to_string()),
            Piece::Escaped(s) => expected.push_str(&markdown::escape(*s).to_string()),
        }
    }

    let built = builder.materialize_unknown_length(&input.pieces, |writer, pieces| {
        for piece in pieces {
            match piece {
                Piece::Str(s) => writer.append_str(s)?,
                Piece::Char(c) => writer.append_char(*c)?,
                Piece::Number(n) => writer.append_value(n)?,
                Piece::Escaped(s) => writer.append_node(markdown::escape(*s))?,
            };
        }
        Ok(())
    });

    match built {
        Ok(built) => assert_eq!(built, expected),
        Err(FormatError::CapacityExceeded { maximum }) => {
            assert!(expected.chars().count() > maximum);
        }
        Err(error) => panic!("unexpected error: {error}"),
    }
});
