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

//! Error types for transaction creation and parsing.
//!
//! Lookups for missing or foreign-owned records are not errors; they return
//! `None` and the caller decides what "not found" means at its boundary.

use thiserror::Error;

/// Ledger processing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Transaction kind spelling not in the known set
    #[error("unknown transaction kind `{0}`")]
    UnknownTransactionKind(String),

    /// Transaction state spelling not in the known set
    #[error("unknown transaction state `{0}`")]
    UnknownTransactionState(String),

    /// Amount is negative
    #[error("invalid amount (must not be negative)")]
    InvalidAmount,
}
