//! # QC-18 Sanction Benchmarks
//!
//! Performance claims to validate:
//! - Resolved status is one reverse seek, independent of how many
//!   temporary entries an address has
//! - Proposal cleanup is linear in the proposal's own entries only
//!
//! Brutal Conditions:
//! - 10k permanently sanctioned addresses
//! - Addresses with up to 1000 temporary entries each

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qc_18_sanction::{
    Address, InMemoryGovernance, InMemoryKvStore, SanctionConfig, SanctionService, TxContext,
};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

type Service = SanctionService<InMemoryGovernance>;
type Ctx = TxContext<InMemoryKvStore>;

fn random_address(rng: &mut impl Rng) -> Address {
    let len = rng.gen_range(20..=32);
    let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
    Address::new(bytes).unwrap()
}

fn setup() -> (Service, Ctx) {
    let service = SanctionService::new(
        SanctionConfig::default(),
        Arc::new(InMemoryGovernance::new()),
    );
    (service, TxContext::new(InMemoryKvStore::new()))
}

/// Ledger with `permanent` sanctioned addresses and one target address that
/// has `temp_entries` temporary entries of alternating status.
fn populated(permanent: usize, temp_entries: u64) -> (Service, Ctx, Address) {
    let mut rng = rand::thread_rng();
    let (service, mut ctx) = setup();

    let addrs: Vec<Address> = (0..permanent).map(|_| random_address(&mut rng)).collect();
    service.sanction_addresses(&mut ctx, &addrs).unwrap();

    let target = random_address(&mut rng);
    for id in 1..=temp_entries {
        let batch = [target.clone()];
        if id % 2 == 0 {
            service.add_temporary_sanction(&mut ctx, id, &batch).unwrap();
        } else {
            service.add_temporary_unsanction(&mut ctx, id, &batch).unwrap();
        }
    }
    ctx.events_mut().drain();
    (service, ctx, target)
}

pub fn bench_is_sanctioned(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-sanction-is-sanctioned");
    group.measurement_time(Duration::from_secs(5));

    for temp_entries in [0u64, 10, 100, 1000] {
        let (service, ctx, target) = populated(10_000, temp_entries);
        group.bench_with_input(
            BenchmarkId::new("latest_wins", temp_entries),
            &target,
            |b, target| b.iter(|| black_box(service.is_sanctioned_addr(&ctx, target).unwrap())),
        );
    }

    let (service, ctx, _) = populated(10_000, 0);
    let unknown = random_address(&mut rand::thread_rng());
    group.bench_function("unknown_address", |b| {
        b.iter(|| black_box(service.is_sanctioned_addr(&ctx, &unknown).unwrap()))
    });

    group.finish();
}

pub fn bench_temp_entry_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-sanction-temp-lifecycle");
    group.measurement_time(Duration::from_secs(5));

    for batch in [1usize, 10, 100] {
        let addrs: Vec<Address> = {
            let mut rng = rand::thread_rng();
            (0..batch).map(|_| random_address(&mut rng)).collect()
        };
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("add_then_cleanup", batch), &addrs, |b, addrs| {
            let (service, mut ctx, _) = populated(1_000, 0);
            b.iter(|| {
                service.add_temporary_sanction(&mut ctx, 42, addrs).unwrap();
                service.delete_gov_prop_temp_entries(&mut ctx, 42).unwrap();
                ctx.events_mut().drain();
            })
        });
    }

    group.finish();
}
