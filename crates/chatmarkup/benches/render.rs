//! Benchmark – rendering composed messages
#![allow(missing_docs)]

use std::{fmt::Write, hint::black_box, time::Duration};

use chatmarkup::{
    Style, Value, compose,
    dialect::{html, markdown},
    materialize_unknown_length, render,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Deterministic user-supplied text of `length` chars, one in six of them
/// reserved in markdown.
fn make_text(length: usize) -> String {
    "hello_w*rld ".chars().cycle().take(length).collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for &length in &[16_usize, 256, 4_096, 65_536] {
        let text = make_text(length);

        group.bench_with_input(BenchmarkId::new("markdown", length), &text, |b, text| {
            b.iter(|| {
                let node = compose!(
                    markdown::Bold.apply(markdown::escape(black_box(text.as_str()))),
                    ' ',
                    markdown::escape(Value::new(length)),
                );
                black_box(render(&node).unwrap());
            });
        });

        group.bench_with_input(BenchmarkId::new("html", length), &text, |b, text| {
            b.iter(|| {
                let node = html::Quote.apply(html::escape(black_box(text.as_str())));
                black_box(render(&node).unwrap());
            });
        });

        // Baseline: the same markdown output built with `format!`-style
        // string pushing.
        group.bench_with_input(BenchmarkId::new("string_baseline", length), &text, |b, text| {
            b.iter(|| {
                let mut out = String::from("*");
                for ch in black_box(text.as_str()).chars() {
                    if "_*~`#+-=.![](){}>|\\".contains(ch) {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                let _ = write!(out, "* {length}");
                black_box(out);
            });
        });
    }
    group.finish();
}

fn bench_unknown_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_unknown_length");

    for &rows in &[4_usize, 64, 1_024] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| {
                let built = materialize_unknown_length(&rows, |writer, rows| {
                    for row in 0..*rows {
                        writer
                            .append_str("- row ")?
                            .append_value(&row)?
                            .append_char('\n')?;
                    }
                    Ok(())
                });
                black_box(built.unwrap());
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(3));
    targets = bench_render, bench_unknown_length
}
criterion_main!(benches);
