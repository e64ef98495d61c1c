use burntcsv::ReaderBuilder;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs::File;
use std::io::Write;
use tempfile::NamedTempFile;

fn stop_times(rows: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "trip_id,arrival_time,departure_time,stop_id,stop_sequence,stop_headsign").unwrap();
    for i in 0..rows {
        writeln!(
            file,
            "A20171105WKD_{:06}_1..S03R,00:{:02}:00,00:{:02}:30,{}S,{},\"Stop, {}\"",
            i,
            i % 60,
            i % 60,
            100 + i % 50,
            i % 40,
            i
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let csv = stop_times(100_000);
    c.bench_function("csv crate 100k", |b| {
        b.iter(|| {
            let file = File::open(csv.path()).unwrap();
            let mut rdr = ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(std::io::BufReader::new(file));
            let mut cells = 0;
            for result in rdr.records() {
                cells += result.unwrap().len();
            }
            black_box(cells)
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = criterion_benchmark
}
criterion_main!(benches);
