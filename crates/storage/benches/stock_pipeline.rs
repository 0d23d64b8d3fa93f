use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use hemobank_core::{AggregateRoot, BloodGroup, StockStatus};
use hemobank_events::{EventEnvelope, InMemoryEventBus, ProjectionRunner};
use hemobank_inventory::{Inventory, StockAdjusted};
use hemobank_storage::{InMemorySlot, InventoryService, StockBoard};

type Bus = Arc<InMemoryEventBus<EventEnvelope<StockAdjusted>>>;

fn service() -> InventoryService<InMemorySlot, Bus> {
    InventoryService::open(InMemorySlot::new(), Arc::new(InMemoryEventBus::new()))
}

fn bench_status_derivation(c: &mut Criterion) {
    c.bench_function("status_for_units", |b| {
        b.iter(|| {
            for units in 0u32..64 {
                black_box(StockStatus::for_units(black_box(units)));
            }
        });
    });
}

fn bench_mutation_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation_pipeline");
    group.throughput(Throughput::Elements(1));

    // Donation through the full pipeline: decide, evolve, persist, publish.
    // No live subscriber, so published envelopes are dropped instead of
    // accumulating across iterations.
    group.bench_function("donate_persist_publish", |b| {
        let mut service = service();
        b.iter(|| {
            service
                .apply_delta(black_box(BloodGroup::OPositive), 1)
                .unwrap();
        });
    });

    // The pure decision+evolution path alone, no storage or bus.
    group.bench_function("apply_delta_pure", |b| {
        let mut inventory = Inventory::seed();
        let occurred_at = chrono::Utc::now();
        b.iter(|| {
            inventory
                .apply_delta(black_box(BloodGroup::OPositive), 1, occurred_at)
                .unwrap();
        });
    });

    group.finish();
}

fn bench_board_refresh(c: &mut Criterion) {
    let mut service = service();
    let subscription = service.subscribe();
    for _ in 0..256 {
        service.apply_delta(BloodGroup::ANegative, 1).unwrap();
    }
    let envelopes = subscription.drain();

    let mut group = c.benchmark_group("board_refresh");
    group.throughput(Throughput::Elements(envelopes.len() as u64));
    group.bench_function("replay_256_envelopes", |b| {
        let inventory = Inventory::seed();
        b.iter(|| {
            let mut runner = ProjectionRunner::resume(
                StockBoard::from_inventory(&inventory),
                inventory.version(),
            );
            runner.run(black_box(&envelopes)).unwrap();
            black_box(runner.projection().rows());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_status_derivation,
    bench_mutation_pipeline,
    bench_board_refresh
);
criterion_main!(benches);
