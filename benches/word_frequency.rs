use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use manifest_eda::analysis::{RateTable, StopWords, WordCounts};
use manifest_eda::config::CloudConfig;
use manifest_eda::manifest::{ManifestRecord, ManifestTable};
use manifest_eda::render::layout_cloud;

const VOCABULARY: &[&str] = &[
    "the", "speech", "model", "people", "data", "and", "training", "audio", "we", "is",
    "recognition", "of", "language", "transcript", "a", "sample", "voice", "to", "corpus", "in",
];

/// Synthetic manifest with a skewed word distribution.
fn synthetic_manifest(records: usize) -> ManifestTable {
    let rows = (0..records)
        .map(|i| {
            let words = 5 + i % 25;
            let text: Vec<&str> = (0..words)
                .map(|j| VOCABULARY[(i * 7 + j * j) % VOCABULARY.len()])
                .collect();
            ManifestRecord {
                path: format!("audio/{:06}.flac", i),
                duration: 1.0 + (i % 15) as f64,
                text: text.join(" "),
            }
        })
        .collect();
    ManifestTable::from_records(rows)
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_counts");
    for records in [1_000, 10_000, 50_000] {
        let table = synthetic_manifest(records);
        group.bench_with_input(BenchmarkId::from_parameter(records), &table, |b, table| {
            b.iter(|| {
                let counts = WordCounts::accumulate(black_box(table).texts());
                black_box(counts.frequencies())
            })
        });
    }
    group.finish();
}

fn bench_speaking_rate(c: &mut Criterion) {
    let table = synthetic_manifest(50_000);
    c.bench_function("rate_table_50k", |b| {
        b.iter(|| {
            let rates = RateTable::from_manifest(black_box(&table));
            black_box(rates.summary())
        })
    });
}

fn bench_cloud_layout(c: &mut Criterion) {
    let table = synthetic_manifest(10_000);
    let frequencies = WordCounts::accumulate(table.texts()).frequencies();
    let stopwords = StopWords::english();
    let config = CloudConfig::default();
    c.bench_function("cloud_layout", |b| {
        b.iter(|| black_box(layout_cloud(&frequencies, &stopwords, &config)))
    });
}

criterion_group!(
    benches,
    bench_aggregation,
    bench_speaking_rate,
    bench_cloud_layout
);
criterion_main!(benches);
