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

//! # Coverage Ledger
//!
//! This library tracks per-user financial transactions (deposits, refunds,
//! scheduled withdrawals) and computes a running balance together with the
//! coverage status of each pending scheduled withdrawal.
//!
//! ## Core Components
//!
//! - [`compute_balance`]: Pure balance/coverage engine over a transaction list
//! - [`TransactionRepository`]: Per-user queries and transaction creation
//! - [`RecordStore`]: Keyed record collection with a stable scan order
//! - [`TransactionKind`] / [`TransactionState`]: Closed transaction model
//! - [`LedgerError`]: Creation/parsing failure types
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use coverage_ledger::{
//!     RecordStore, TransactionDraft, TransactionKind, TransactionRepository,
//!     TransactionState, UserId,
//! };
//! use rust_decimal_macros::dec;
//!
//! let store = RecordStore::new();
//! let repo = TransactionRepository::new(&store);
//! let user = UserId(1);
//! let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
//!
//! // A deposit starts pending; settlement happens outside this crate.
//! let deposit = repo
//!     .create(user, TransactionDraft { kind: TransactionKind::Deposit, amount: dec!(30), date })
//!     .unwrap();
//! store.update(deposit.id, |record| record.state = TransactionState::Completed);
//!
//! repo.create(
//!     user,
//!     TransactionDraft { kind: TransactionKind::ScheduledWithdrawal, amount: dec!(20), date },
//! )
//! .unwrap();
//!
//! let report = repo.balance(user);
//! assert_eq!(report.remaining_balance, dec!(10));
//! assert_eq!(report.scheduled_withdrawals[0].coverage_rate, 100);
//! ```
//!
//! ## Thread Safety
//!
//! The store takes `&self` everywhere and is safe for concurrent use. The
//! engine is a pure function over an immutable snapshot, so any number of
//! callers may compute balances at once without coordination.

mod base;
mod engine;
pub mod error;
mod repository;
mod store;
mod transaction;

pub use base::{TransactionId, UserId};
pub use engine::{BalanceReport, WithdrawalCoverage, compute_balance};
pub use error::LedgerError;
pub use repository::TransactionRepository;
pub use store::RecordStore;
pub use transaction::{TransactionDraft, TransactionKind, TransactionRecord, TransactionState};
