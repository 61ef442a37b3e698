//! # Subspace-Ledger Benchmarks
//!
//! | Path | Cost driver |
//! |------|-------------|
//! | CreateReport | one record, one index entry, counter bump |
//! | RemoveReason | scan of the subspace reports |
//! | Invariant sweep | every record and index entry |
//! | Grant acceptance | linear scan of the granted subspace ids |

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use shared_types::{Address, SubspaceId};
use sl_01_reports::{
    MsgCreateReport, MsgRemoveReason, ReportTarget, ReportsMsg, TYPE_URL_REMOVE_REASON,
};
use sl_02_subspace_authz::{AuthzConfig, GenericSubspaceAuthorization, InfiniteGasMeter};
use sl_tests::fixtures::{address, owner, Ledger};
use std::time::Duration;

const SIZES: [u64; 3] = [10, 100, 1_000];

/// Distinct valid addresses for reporters.
fn user(index: u64) -> Address {
    const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
    let mut data = String::from("desmos1");
    let mut value = index;
    for _ in 0..8 {
        data.push(CHARSET[(value % 32) as usize] as char);
        value /= 32;
    }
    address(&data)
}

/// Subspace 1 with one reason and `reports` user reports citing it.
fn ledger_with_reports(reports: u64) -> Ledger {
    let mut ledger = Ledger::new();
    ledger.create_subspace(1, owner()).unwrap();
    ledger.add_reason(1, "Spam").unwrap();
    for index in 0..reports {
        ledger
            .report(1, vec![1], ReportTarget::user(user(index)), owner())
            .unwrap();
    }
    ledger
}

// ============================================================================
// REPORTS
// ============================================================================

fn bench_create_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports-create");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("create_user_report", |b| {
        let mut ledger = ledger_with_reports(0);
        let mut index = 0u64;
        b.iter(|| {
            index += 1;
            let msg = ReportsMsg::CreateReport(MsgCreateReport {
                subspace_id: 1,
                reasons_ids: vec![1],
                message: String::new(),
                target: ReportTarget::user(user(index)),
                reporter: owner(),
            });
            black_box(ledger.deliver(msg).unwrap())
        })
    });

    group.finish();
}

fn bench_remove_reason_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("reasons-remove-cascade");

    for size in SIZES {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || ledger_with_reports(size),
                |mut ledger| {
                    ledger
                        .deliver(ReportsMsg::RemoveReason(MsgRemoveReason {
                            subspace_id: 1,
                            reason_id: 1,
                            signer: owner(),
                        }))
                        .unwrap();
                    black_box(ledger)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// INVARIANTS
// ============================================================================

fn bench_invariant_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("invariant-sweep");

    for size in SIZES {
        let ledger = ledger_with_reports(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.sweep()))
        });
    }

    group.finish();
}

// ============================================================================
// AUTHZ
// ============================================================================

fn bench_grant_accept(c: &mut Criterion) {
    let mut group = c.benchmark_group("authz-accept");
    let config = AuthzConfig::default();

    for size in SIZES {
        // Worst case: the message targets the last granted subspace
        let ids: Vec<SubspaceId> = (1..=size).collect();
        let grant = GenericSubspaceAuthorization::new(ids, TYPE_URL_REMOVE_REASON);
        let msg = ReportsMsg::RemoveReason(MsgRemoveReason {
            subspace_id: size,
            reason_id: 1,
            signer: owner(),
        });

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut meter = InfiniteGasMeter::new();
                black_box(grant.accept(&config, &mut meter, &msg).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_create_report,
    bench_remove_reason_cascade,
    bench_invariant_sweep,
    bench_grant_accept
);
criterion_main!(benches);
