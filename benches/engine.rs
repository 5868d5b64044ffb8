// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Benchmarks for the balance/coverage engine.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Balance computation over growing transaction histories
//! - Allocation cost as the scheduled-withdrawal count grows
//! - Store scan + compute through the repository
//! - Concurrent per-user computation (the engine is pure)

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use coverage_ledger::{
    RecordStore, TransactionId, TransactionKind, TransactionRecord, TransactionRepository,
    TransactionState, UserId, compute_balance,
};
use rayon::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Helper Functions
// =============================================================================

fn record(
    id: u64,
    user: u64,
    kind: TransactionKind,
    amount: i64,
    state: TransactionState,
) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId(id),
        user_id: UserId(user),
        kind,
        amount: Decimal::new(amount, 2),
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        state,
    }
}

/// A history of `n` records: settled deposits and refunds with a tail of
/// scheduled withdrawals sized so allocation runs out partway through.
fn history(user: u64, n: u64) -> Vec<TransactionRecord> {
    let mut transactions = Vec::with_capacity(n as usize);
    let withdrawals = (n / 4).max(1);
    let mut id = 1;

    for _ in 0..(n - withdrawals) {
        let kind = if id % 5 == 0 {
            TransactionKind::Refund
        } else {
            TransactionKind::Deposit
        };
        transactions.push(record(id, user, kind, 10_00, TransactionState::Completed));
        id += 1;
    }
    for _ in 0..withdrawals {
        transactions.push(record(
            id,
            user,
            TransactionKind::ScheduledWithdrawal,
            25_00,
            TransactionState::Scheduled,
        ));
        id += 1;
    }
    transactions
}

// =============================================================================
// Single-Threaded Benchmarks
// =============================================================================

fn bench_compute_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_throughput");

    for count in [100u64, 1_000, 10_000].iter() {
        let transactions = history(1, *count);
        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &transactions,
            |b, transactions| b.iter(|| black_box(compute_balance(black_box(transactions)))),
        );
    }
    group.finish();
}

fn bench_allocation_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation_depth");

    // Fixed funding, growing list of scheduled withdrawals.
    for withdrawals in [10u64, 100, 1_000].iter() {
        let mut transactions = vec![record(
            1,
            1,
            TransactionKind::Deposit,
            1_000_00,
            TransactionState::Completed,
        )];
        for i in 0..*withdrawals {
            transactions.push(record(
                i + 2,
                1,
                TransactionKind::ScheduledWithdrawal,
                30_00,
                TransactionState::Scheduled,
            ));
        }

        group.throughput(Throughput::Elements(*withdrawals));
        group.bench_with_input(
            BenchmarkId::from_parameter(withdrawals),
            &transactions,
            |b, transactions| b.iter(|| black_box(compute_balance(black_box(transactions)))),
        );
    }
    group.finish();
}

// =============================================================================
// Repository Benchmarks
// =============================================================================

fn bench_repository_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository_balance");

    for count in [100u64, 1_000, 10_000].iter() {
        let store = RecordStore::new();
        for tx in history(1, *count) {
            store.insert_with(|id| TransactionRecord { id, ..tx.clone() });
        }

        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &store, |b, store| {
            let repo = TransactionRepository::new(store);
            b.iter(|| black_box(repo.balance(UserId(1))))
        });
    }
    group.finish();
}

// =============================================================================
// Concurrent Benchmarks
// =============================================================================

fn bench_parallel_users(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_users");

    for num_users in [10u64, 100, 1_000].iter() {
        let histories: Vec<Vec<TransactionRecord>> =
            (0..*num_users).map(|user| history(user, 200)).collect();

        group.throughput(Throughput::Elements(*num_users));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_users),
            &histories,
            |b, histories| {
                b.iter(|| {
                    let reports: Vec<_> = histories
                        .par_iter()
                        .map(|transactions| compute_balance(transactions))
                        .collect();
                    black_box(reports)
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    engine,
    bench_compute_throughput,
    bench_allocation_depth,
    bench_repository_balance,
);

criterion_group!(concurrent, bench_parallel_users,);

criterion_main!(engine, concurrent);
