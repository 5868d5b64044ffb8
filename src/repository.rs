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

//! Per-user queries over the record store.
//!
//! The repository is a thin layer: it filters the store by owner, creates
//! records with their derived initial state, and hands transaction lists to
//! the engine. It holds no state of its own and never mutates existing
//! records.

use crate::base::{TransactionId, UserId};
use crate::engine::{BalanceReport, compute_balance};
use crate::error::LedgerError;
use crate::store::RecordStore;
use crate::transaction::{TransactionDraft, TransactionRecord};
use rust_decimal::Decimal;

/// Per-user view of a [`RecordStore`].
pub struct TransactionRepository<'a> {
    store: &'a RecordStore,
}

impl<'a> TransactionRepository<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Returns all of the user's transactions, in store scan order.
    pub fn list(&self, user_id: UserId) -> Vec<TransactionRecord> {
        self.store
            .scan()
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect()
    }

    /// Returns the user's transaction with the given id.
    ///
    /// `None` both for ids that do not exist and for records owned by a
    /// different user; callers cannot tell the two apart, and must not.
    pub fn get(&self, user_id: UserId, id: TransactionId) -> Option<TransactionRecord> {
        self.store
            .get(id)
            .filter(|record| record.user_id == user_id)
    }

    /// Creates a transaction for the user and returns the stored record.
    ///
    /// The initial state follows the kind (deposits and refunds start
    /// pending, scheduled withdrawals start scheduled) and the store assigns
    /// the id.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAmount`] if the draft's amount is negative;
    /// nothing is persisted in that case.
    pub fn create(
        &self,
        user_id: UserId,
        draft: TransactionDraft,
    ) -> Result<TransactionRecord, LedgerError> {
        if draft.amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let record = self.store.insert_with(|id| TransactionRecord {
            id,
            user_id,
            kind: draft.kind,
            amount: draft.amount,
            date: draft.date,
            state: draft.kind.initial_state(),
        });
        Ok(record)
    }

    /// Computes the user's balance and scheduled-withdrawal coverage.
    ///
    /// Equivalent to [`compute_balance`] over [`list`](Self::list); a user
    /// with no transactions gets a zero-balance, empty report.
    pub fn balance(&self, user_id: UserId) -> BalanceReport {
        compute_balance(&self.list(user_id))
    }
}
