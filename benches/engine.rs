use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use clausewitz_patch::{group, insert, parse, script, split_segments, to_bytes};

/// A file of `count` job definitions shaped like the game's own.
fn jobs_file(count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| {
            format!(
                "# job {i}\n\
                 job_{i} = {{\n\
                 \tcategory = worker\n\
                 \tbuilding_icon = building_{i}\n\
                 \tpossible = {{ planet = {{ has_owner = yes }} }}\n\
                 \tresources = {{\n\
                 \t\tproduces = {{ minerals = {i} }}\n\
                 \t\tupkeep = {{ energy >= 1 }}\n\
                 \t}}\n\
                 }}\n"
            )
        })
        .collect::<String>()
        .into_bytes()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut bench = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let input = jobs_file(*size);
        bench.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    bench.finish();
}

fn benchmark_group(c: &mut Criterion) {
    let doc = parse(&jobs_file(100)).unwrap();

    c.bench_function("group_top_level", |b| b.iter(|| group(black_box(&doc))));
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut bench = c.benchmark_group("serialize");

    for size in [10, 100, 1000].iter() {
        let doc = parse(&jobs_file(*size)).unwrap();
        bench.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_bytes(black_box(doc)))
        });
    }
    bench.finish();
}

fn benchmark_split(c: &mut Criterion) {
    let mut bench = c.benchmark_group("split_segments");

    for size in [10, 100, 1000].iter() {
        let input = jobs_file(*size);
        bench.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| split_segments(black_box(input)))
        });
    }
    bench.finish();
}

fn benchmark_insert(c: &mut Criterion) {
    let doc = parse(&jobs_file(100)).unwrap();
    let contents = script!["is_enabled", "=", "yes"].into_children();

    c.bench_function("insert_nested", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            insert(&mut doc, &["job_99", "possible", "planet"], contents.clone())
        })
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let input = jobs_file(100);

    c.bench_function("roundtrip_100_jobs", |b| {
        b.iter(|| {
            let doc = parse(black_box(&input)).unwrap();
            to_bytes(&doc)
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_group,
    benchmark_serialize,
    benchmark_split,
    benchmark_insert,
    benchmark_roundtrip
);
criterion_main!(benches);
