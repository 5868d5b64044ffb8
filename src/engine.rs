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

//! Balance and coverage computation.
//!
//! [`compute_balance`] is the ledger's core: given one user's transaction
//! history it derives the net balance and walks the scheduled withdrawals in
//! order, allocating whatever balance remains to each one in turn.
//!
//! # Balance rules
//!
//! Only three (kind, state) combinations move the net balance:
//!
//! | Kind                | States counted        | Effect |
//! |---------------------|-----------------------|--------|
//! | Deposit             | Completed             | +amount |
//! | ScheduledWithdrawal | Completed             | −amount |
//! | Refund              | Completed, Pending    | −amount |
//!
//! Everything else is ignored. The net balance is not floored; a user can be
//! in the red and the report says so.
//!
//! # Allocation
//!
//! Withdrawals in state `Scheduled` are processed in the order they appear
//! in the input (the store's scan order — deliberately not sorted by due
//! date; sort beforehand if earliest-due-first is wanted). Each one lands in
//! exactly one of three cases: fully covered, partially covered (the balance
//! is exhausted), or not covered at all.

use crate::transaction::{TransactionKind, TransactionRecord, TransactionState};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Coverage of a single scheduled withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithdrawalCoverage {
    /// The withdrawal's full amount.
    pub amount: Decimal,
    /// How much of it the balance covers, in `[0, amount]` for well-formed input.
    pub covered_amount: Decimal,
    /// Covered percentage rounded to the nearest integer, in `[0, 100]`.
    pub coverage_rate: u8,
}

/// Result of a balance computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceReport {
    /// Net balance left after allocation. May be negative or zero.
    pub remaining_balance: Decimal,
    /// One entry per scheduled withdrawal, in allocation order.
    pub scheduled_withdrawals: Vec<WithdrawalCoverage>,
}

/// Computes the net balance and per-withdrawal coverage for one user's
/// transaction list.
///
/// Pure and total: no side effects, no error paths, O(n) over the input.
/// Malformed amounts (negative, zero) are not rejected here — the arithmetic
/// is applied as-is and validation belongs to whoever created the records.
///
/// # Example
///
/// ```
/// use coverage_ledger::compute_balance;
///
/// let report = compute_balance(&[]);
/// assert_eq!(report.remaining_balance, rust_decimal::Decimal::ZERO);
/// assert!(report.scheduled_withdrawals.is_empty());
/// ```
pub fn compute_balance(transactions: &[TransactionRecord]) -> BalanceReport {
    let opening = net_balance(transactions);

    let (scheduled_withdrawals, remaining_balance) = transactions
        .iter()
        .filter(|tx| {
            tx.kind == TransactionKind::ScheduledWithdrawal
                && tx.state == TransactionState::Scheduled
        })
        .fold(
            (Vec::new(), opening),
            |(mut entries, balance), withdrawal| {
                let (entry, balance) = cover(balance, withdrawal.amount);
                entries.push(entry);
                (entries, balance)
            },
        );

    BalanceReport {
        remaining_balance,
        scheduled_withdrawals,
    }
}

/// Sums the transactions that count toward the balance.
fn net_balance(transactions: &[TransactionRecord]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |acc, tx| match (tx.kind, tx.state) {
            (TransactionKind::Deposit, TransactionState::Completed) => acc + tx.amount,
            (TransactionKind::ScheduledWithdrawal, TransactionState::Completed) => acc - tx.amount,
            (
                TransactionKind::Refund,
                TransactionState::Completed | TransactionState::Pending,
            ) => acc - tx.amount,
            _ => acc,
        })
}

/// Allocates `balance` to one withdrawal; returns the entry and what is left.
fn cover(balance: Decimal, amount: Decimal) -> (WithdrawalCoverage, Decimal) {
    if balance >= amount {
        let entry = WithdrawalCoverage {
            amount,
            covered_amount: amount,
            coverage_rate: 100,
        };
        (entry, balance - amount)
    } else if balance > Decimal::ZERO {
        // Partial coverage drains the balance; the rate uses round-half-to-even,
        // which Decimal::round implements.
        let rate = (balance / amount * Decimal::ONE_HUNDRED).round();
        debug_assert!(rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED);
        let entry = WithdrawalCoverage {
            amount,
            covered_amount: balance,
            coverage_rate: rate.to_u8().unwrap_or(0),
        };
        (entry, Decimal::ZERO)
    } else {
        // Nothing left. The balance stays where it is, negative included.
        let entry = WithdrawalCoverage {
            amount,
            covered_amount: Decimal::ZERO,
            coverage_rate: 0,
        };
        (entry, balance)
    }
}
