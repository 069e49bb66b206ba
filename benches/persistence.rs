use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use iexpense::{ExpenseRecord, ExpenseStore, FileStore, KeyValueStore, MemoryStore};
use std::time::Duration;

const RECORDS: u64 = 100;

fn add_records<S: KeyValueStore>(store: &mut ExpenseStore<S>) {
    for i in 0..RECORDS {
        store
            .add(ExpenseRecord::new(format!("item {i}"), "Bench", i as i64))
            .unwrap();
    }
}

fn persist_on_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");

    // Every add rewrites the whole list, so cost grows with list length
    group.throughput(Throughput::Elements(RECORDS));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(30);

    group.bench_function("memory_add_100", |b| {
        b.iter_batched(
            || ExpenseStore::open(MemoryStore::new(), "Items"),
            |mut store| add_records(&mut store),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("file_add_100", |b| {
        let temp_dir = tempfile::TempDir::new().unwrap();
        b.iter_batched(
            || {
                let mut backend = FileStore::new(temp_dir.path());
                backend.remove("Items").unwrap();
                ExpenseStore::open(backend, "Items")
            },
            |mut store| add_records(&mut store),
            BatchSize::PerIteration,
        );
    });

    group.finish();
}

criterion_group!(benches, persist_on_add);
criterion_main!(benches);
