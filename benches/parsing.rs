use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nested_qs::{parse, parse_with_options, percent_decode, ParseOptions};

fn benchmark_parse_flat(c: &mut Criterion) {
    let input = "name=Alice&email=alice%40example.com&active=true&role=admin";

    c.bench_function("parse_flat_pairs", |b| {
        b.iter(|| parse(black_box(input)))
    });
}

fn benchmark_parse_nested(c: &mut Criterion) {
    let input = "user[name]=Alice&user[address][city]=Berlin&user[address][zip]=10115&user[tags][]=a&user[tags][]=b";

    c.bench_function("parse_nested_keys", |b| {
        b.iter(|| parse(black_box(input)))
    });
}

fn benchmark_parse_many_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_many_pairs");

    for size in [10, 100, 1000].iter() {
        let input: String = (0..*size)
            .map(|i| format!("key{}=value{}", i, i))
            .collect::<Vec<_>>()
            .join("&");

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_parse_indexed_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_indexed_array");

    for size in [5, 10, 20].iter() {
        let input: String = (0..*size)
            .map(|i| format!("a[{}]=v{}", i, i))
            .collect::<Vec<_>>()
            .join("&");

        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_parse_deep_key(c: &mut Criterion) {
    let input = "a[b][c][d][e]=value";
    let options = ParseOptions::new().with_depth(10);

    c.bench_function("parse_deep_key", |b| {
        b.iter(|| parse_with_options(black_box(input), options.clone()))
    });
}

fn benchmark_parse_dot_notation(c: &mut Criterion) {
    let input = "user.name=Alice&user.address.city=Berlin&user.address.zip=10115";
    let options = ParseOptions::new().with_allow_dots(true);

    c.bench_function("parse_dot_notation", |b| {
        b.iter(|| parse_with_options(black_box(input), options.clone()))
    });
}

fn benchmark_percent_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("percent_decode");

    let plain = "no_escapes_at_all_just_plain_text";
    let escaped = "a%20string%20with%20many%20%5Bescaped%5D%20characters%21";

    group.bench_function("plain", |b| b.iter(|| percent_decode(black_box(plain))));

    group.bench_function("escaped", |b| {
        b.iter(|| percent_decode(black_box(escaped)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_flat,
    benchmark_parse_nested,
    benchmark_parse_many_pairs,
    benchmark_parse_indexed_array,
    benchmark_parse_deep_key,
    benchmark_parse_dot_notation,
    benchmark_percent_decode
);
criterion_main!(benches);
