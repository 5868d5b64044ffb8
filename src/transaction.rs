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

//! Transaction records and their kind/state model.
//!
//! A record's kind is immutable and determines its initial state:
//! - [`Deposit`] and [`Refund`] start [`Pending`]
//! - [`ScheduledWithdrawal`] starts [`Scheduled`]
//!
//! States advance to [`Completed`] (or [`Cancelled`]) by a process outside
//! this crate, via [`RecordStore::update`](crate::RecordStore::update).
//!
//! [`Deposit`]: TransactionKind::Deposit
//! [`Refund`]: TransactionKind::Refund
//! [`ScheduledWithdrawal`]: TransactionKind::ScheduledWithdrawal
//! [`Pending`]: TransactionState::Pending
//! [`Scheduled`]: TransactionState::Scheduled
//! [`Completed`]: TransactionState::Completed
//! [`Cancelled`]: TransactionState::Cancelled

use crate::LedgerError;
use crate::base::{TransactionId, UserId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a transaction does to the user's funds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Credits the balance once completed.
    Deposit,
    /// Debits the balance while pending or completed.
    Refund,
    /// A future-dated debit; debits the balance once completed.
    ScheduledWithdrawal,
}

impl TransactionKind {
    /// The state a freshly created record of this kind starts in.
    pub fn initial_state(self) -> TransactionState {
        match self {
            TransactionKind::Deposit | TransactionKind::Refund => TransactionState::Pending,
            TransactionKind::ScheduledWithdrawal => TransactionState::Scheduled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Refund => "refund",
            TransactionKind::ScheduledWithdrawal => "scheduled_withdrawal",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "refund" => Ok(TransactionKind::Refund),
            "scheduled_withdrawal" => Ok(TransactionKind::ScheduledWithdrawal),
            other => Err(LedgerError::UnknownTransactionKind(other.to_string())),
        }
    }
}

/// Lifecycle state of a transaction record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// Created, not yet settled. Pending refunds already count against the balance.
    Pending,
    /// A scheduled withdrawal awaiting execution.
    Scheduled,
    /// Settled; counts toward the balance.
    Completed,
    /// Abandoned; ignored by every balance filter.
    Cancelled,
}

impl TransactionState {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionState::Pending => "pending",
            TransactionState::Scheduled => "scheduled",
            TransactionState::Completed => "completed",
            TransactionState::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TransactionState {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionState::Pending),
            "scheduled" => Ok(TransactionState::Scheduled),
            "completed" => Ok(TransactionState::Completed),
            "cancelled" => Ok(TransactionState::Cancelled),
            other => Err(LedgerError::UnknownTransactionState(other.to_string())),
        }
    }
}

/// A stored transaction, as returned by the record store.
///
/// `id` and `user_id` are assigned at creation and never change. The engine
/// only reads records; state transitions happen through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub state: TransactionState,
}

/// Caller-supplied fields for a new transaction.
///
/// The repository derives the initial state from `kind` and the store assigns
/// the id; neither is part of the draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
}
