//! # Parser Benchmarks
//!
//! Measures live line parsing, batch block scanning and window statistics.
//!
//! Run: `cargo bench --bench parser_bench`

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use envmon::models::{Quantity, Record};
use envmon::parser::{BlockParser, LineParser};
use envmon::statistics::DashboardSummary;

fn sample_dump(blocks: usize) -> String {
    (0..blocks)
        .map(|i| {
            format!(
                "Humidity out: {:.2} %\nTemperature out: {:.2} *C\nHumidity IN: {:.2} %\nTemperature IN: {:.2} *C\nCO2: {:.2} ppm\n\n",
                70.0 + (i % 10) as f64,
                5.0 + (i % 7) as f64,
                40.0 + (i % 5) as f64,
                20.0 + (i % 3) as f64,
                600.0 + (i % 50) as f64 * 10.0
            )
        })
        .collect()
}

fn bench_line_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_parser");
    let parser = LineParser::new();

    group.bench_function("environment_line", |b| {
        b.iter(|| black_box(parser.parse(black_box("Humidity IN: 41.50% : 21.30*C"))))
    });

    group.bench_function("co2_line", |b| {
        b.iter(|| black_box(parser.parse(black_box("CO2: 612.00 ppm"))))
    });

    group.bench_function("unrecognized_line", |b| {
        b.iter(|| black_box(parser.parse(black_box("Sensor boot v1.2"))))
    });

    group.finish();
}

fn bench_block_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_scan");
    let parser = BlockParser::new().unwrap();

    for blocks in [10, 100, 1000] {
        let dump = sample_dump(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &dump, |b, dump| {
            b.iter(|| black_box(parser.scan(dump)))
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let records: Vec<Record> = (0..100)
        .map(|i| {
            Record::new(
                start + Duration::seconds(i),
                40.0,
                21.0 + (i % 4) as f64 * 0.1,
                75.0,
                6.0,
                600.0 + i as f64,
            )
        })
        .collect();

    c.bench_function("dashboard_100_records", |b| {
        b.iter(|| black_box(DashboardSummary::from_records(&records, 1000.0).unwrap().get(Quantity::Co2).copied()))
    });
}

criterion_group!(benches, bench_line_parser, bench_block_scan, bench_dashboard);
criterion_main!(benches);
