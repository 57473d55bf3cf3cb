use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use chrono::Utc;
use stocktrail_core::{PartLotId, UserId};
use stocktrail_journal::{LogEntry, StockChangeEntry};

fn sample_entry() -> LogEntry {
    StockChangeEntry::move_stock(
        PartLotId::new(17),
        120.0,
        80.0,
        450.0,
        "quarterly rebalance between shelves",
        PartLotId::new(23),
        Utc::now(),
        Some(UserId::new(2)),
    )
    .unwrap()
    .into_entry()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_change_encode");
    group.throughput(Throughput::Elements(1));

    group.bench_function("construct", |b| {
        b.iter(|| {
            StockChangeEntry::add(
                black_box(PartLotId::new(17)),
                black_box(0.0),
                black_box(25.0),
                black_box(25.0),
                black_box("restock"),
                Utc::now(),
                None,
            )
            .unwrap()
        })
    });

    group.bench_function("serialize", |b| {
        let entry = sample_entry();
        b.iter(|| serde_json::to_vec(black_box(&entry)).unwrap())
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_change_decode");
    group.throughput(Throughput::Elements(1));

    let bytes = serde_json::to_vec(&sample_entry()).unwrap();

    group.bench_function("deserialize", |b| {
        b.iter(|| serde_json::from_slice::<LogEntry>(black_box(&bytes)).unwrap())
    });

    group.bench_function("accessors", |b| {
        let entry: LogEntry = serde_json::from_slice(&bytes).unwrap();
        let record = StockChangeEntry::from_entry(entry).unwrap();
        b.iter(|| {
            let kind = record.kind().unwrap();
            let amount = record.change_amount().unwrap();
            (black_box(kind), black_box(amount))
        })
    });

    group.bench_function("full_decode", |b| {
        let entry: LogEntry = serde_json::from_slice(&bytes).unwrap();
        let record = StockChangeEntry::from_entry(entry).unwrap();
        b.iter(|| record.decode().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
