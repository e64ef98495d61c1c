use criterion::{black_box, criterion_group, criterion_main, Criterion};
use readbench::{count_raw, LineReader};
use std::fs::File;
use std::io::{BufRead, Write};
use tempfile::NamedTempFile;

fn lines(count: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..count {
        writeln!(file, "A20171105WKD_{:06}_1..S03R,00:08:00,00:08:00,101S,{},", i, i % 40).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let text = lines(100_000);
    c.bench_function("count_raw 100k", |b| {
        b.iter(|| black_box(count_raw(File::open(text.path()).unwrap()).unwrap()))
    });
    c.bench_function("line chunks 100k", |b| {
        b.iter(|| {
            let file = File::open(text.path()).unwrap();
            for chunk in LineReader::new(file).chunks(1024) {
                black_box(chunk.unwrap().len());
            }
        })
    });
    c.bench_function("std lines 100k", |b| {
        b.iter(|| {
            let file = File::open(text.path()).unwrap();
            for _line in std::io::BufReader::new(file).lines() {}
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = criterion_benchmark
}
criterion_main!(benches);
