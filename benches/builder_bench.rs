//! Benchmark for token reads and Builder round-trips.
//!
//! Compares direct and reflective token reads against plain field access,
//! and measures `init`/`with`/`build` over records of growing override depth.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fieldlens::accessor::Accessor;
use fieldlens::builder::Builder;
use fieldlens::Accessors;
use std::hint::black_box;

#[derive(Clone, Debug, PartialEq, Accessors)]
struct Account {
    pub owner: String,
    balance: i64,
    note: Option<String>,
}

fn account() -> Account {
    Account {
        owner: "ann".to_string(),
        balance: 120,
        note: None,
    }
}

fn builder() -> Builder<Account> {
    Builder::of(
        (Account::OWNER, Account::BALANCE, Account::NOTE),
        |(owner, balance, note)| Account {
            owner,
            balance,
            note,
        },
    )
}

// =============================================================================
// Token Read Benchmark
// =============================================================================

fn benchmark_token_read(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("token_read");
    let source = account();

    // Plain field access
    group.bench_function("field", |bencher| {
        bencher.iter(|| black_box(black_box(&source).balance));
    });

    // Direct token (visible field)
    group.bench_function("direct", |bencher| {
        bencher.iter(|| black_box(Account::OWNER.get(black_box(&source))));
    });

    // Reflective token (private field, resolved handle)
    group.bench_function("reflective", |bencher| {
        bencher.iter(|| black_box(Account::BALANCE.get(black_box(&source))));
    });

    group.finish();
}

// =============================================================================
// Builder Benchmark
// =============================================================================

fn benchmark_builder(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("builder");
    let builder = builder();
    let source = account();

    group.bench_function("init_build", |bencher| {
        bencher.iter(|| black_box(builder.init(black_box(&source)).build()));
    });

    for depth in [1, 10, 100] {
        group.bench_with_input(
            BenchmarkId::new("with_build", depth),
            &depth,
            |bencher, &depth| {
                bencher.iter(|| {
                    let mut current = builder.init(&source);
                    for balance in 0..depth {
                        if let Ok(next) = current.with(&Account::BALANCE, black_box(balance)) {
                            current = next;
                        }
                    }
                    black_box(current.build())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_token_read, benchmark_builder);
criterion_main!(benches);
