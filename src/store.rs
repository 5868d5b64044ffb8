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

//! Thread-safe keyed record collection with a stable scan order.
//!
//! The store is the ledger's only stateful collaborator: it hands out ids,
//! keeps every record reachable by id, and replays records in insertion
//! order on [`scan`](RecordStore::scan). Balance computation depends on that
//! order being stable from one scan to the next.

use crate::base::TransactionId;
use crate::transaction::TransactionRecord;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory record store.
///
/// Combines a [`DashMap`] for O(1) lookup by id with an order ledger
/// protected by an [`RwLock`], so concurrent scans see a consistent
/// insertion order. All operations take `&self` and are safe for concurrent
/// access.
#[derive(Debug)]
pub struct RecordStore {
    /// Records indexed by transaction id.
    records: DashMap<TransactionId, TransactionRecord>,

    /// Ids in insertion order; the scan contract is "stable per scan".
    scan_order: RwLock<Vec<TransactionId>>,

    /// Next id to hand out, starting at 1.
    next_id: AtomicU64,
}

impl RecordStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            scan_order: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Inserts the record produced by `build`, handing it a freshly
    /// generated id, and returns the stored record.
    ///
    /// The builder must use the id it is given; anything else would make the
    /// record unreachable by lookup.
    pub fn insert_with<F>(&self, build: F) -> TransactionRecord
    where
        F: FnOnce(TransactionId) -> TransactionRecord,
    {
        let id = TransactionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = build(id);
        debug_assert_eq!(record.id, id, "builder must keep the assigned id");

        // Map first, then order ledger: a concurrent scan either misses the
        // id entirely or finds the record already present.
        self.records.insert(id, record.clone());
        self.scan_order.write().push(id);
        record
    }

    /// Retrieves a record by id.
    pub fn get(&self, id: TransactionId) -> Option<TransactionRecord> {
        self.records.get(&id).map(|entry| entry.clone())
    }

    /// Applies `mutate` to the record with the given id and returns the
    /// updated record, or `None` if no such record exists.
    ///
    /// This is the hook for the external settlement process that advances
    /// record states; the id, owner, and kind are expected to stay put.
    pub fn update<F>(&self, id: TransactionId, mutate: F) -> Option<TransactionRecord>
    where
        F: FnOnce(&mut TransactionRecord),
    {
        let mut entry = self.records.get_mut(&id)?;
        mutate(entry.value_mut());
        Some(entry.clone())
    }

    /// Returns all records in insertion order.
    pub fn scan(&self) -> Vec<TransactionRecord> {
        let order = self.scan_order.read();
        order
            .iter()
            .filter_map(|id| self.records.get(id).map(|entry| entry.clone()))
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
