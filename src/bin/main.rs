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

use chrono::NaiveDate;
use clap::Parser;
use coverage_ledger::{
    LedgerError, RecordStore, TransactionKind, TransactionRecord, TransactionRepository,
    TransactionState, UserId,
};
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

/// Coverage Ledger - Compute balance and withdrawal coverage from a
/// transaction snapshot CSV
///
/// Reads one row per transaction and prints, per user, the coverage of each
/// scheduled withdrawal along with the remaining balance.
#[derive(Parser, Debug)]
#[command(name = "coverage-ledger")]
#[command(about = "Computes per-user balance and scheduled-withdrawal coverage", long_about = None)]
struct Args {
    /// Path to CSV file with transactions
    ///
    /// Expected format: user,type,amount,date,state
    /// Example: cargo run -- transactions.csv > coverage.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Restrict the report to a single user id
    #[arg(long, value_name = "ID")]
    user: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let store = match load_records(BufReader::new(file)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error reading transactions: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_reports(&store, args.user.map(UserId), std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `user, type, amount, date, state`
#[derive(Debug, Deserialize)]
struct CsvRow {
    user: u64,
    #[serde(rename = "type")]
    tx_type: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
    date: NaiveDate,
    state: String,
}

impl CsvRow {
    /// Converts the row into the record fields, minus the store-assigned id.
    ///
    /// Unknown kind or state spellings are rejected; casing is forgiven.
    fn into_parts(
        self,
    ) -> Result<(UserId, TransactionKind, Decimal, NaiveDate, TransactionState), LedgerError> {
        let kind: TransactionKind = self.tx_type.to_lowercase().parse()?;
        let state: TransactionState = self.state.to_lowercase().parse()?;
        let amount = self.amount.ok_or(LedgerError::InvalidAmount)?;
        Ok((UserId(self.user), kind, amount, self.date, state))
    }
}

/// Loads a transaction snapshot from a CSV reader into a fresh store.
///
/// Rows carry explicit states because the input is a snapshot of already
/// settled and pending history, not a stream of new transactions. Malformed
/// rows are skipped; ids are assigned in row order, so the store's scan order
/// is the file order.
///
/// # CSV Format
///
/// Expected columns: `user, type, amount, date, state`
/// - `user`: User id (u64)
/// - `type`: deposit, refund, or scheduled_withdrawal
/// - `amount`: Decimal amount
/// - `date`: ISO date (YYYY-MM-DD)
/// - `state`: pending, scheduled, completed, or cancelled
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
/// Row-level problems are logged in debug mode but don't stop the load.
pub fn load_records<R: Read>(reader: R) -> Result<RecordStore, csv::Error> {
    let store = RecordStore::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match row.into_parts() {
                Ok((user_id, kind, amount, date, state)) => {
                    store.insert_with(|id| TransactionRecord {
                        id,
                        user_id,
                        kind,
                        amount,
                        date,
                        state,
                    });
                }
                Err(_e) => {
                    #[cfg(debug_assertions)]
                    eprintln!("Skipping invalid transaction row: {}", _e);
                }
            },
            Err(_e) => {
                // Skip malformed rows
                #[cfg(debug_assertions)]
                eprintln!("Skipping malformed row: {}", _e);
                continue;
            }
        }
    }

    Ok(store)
}

/// Flat output row: one per scheduled withdrawal, or a single balance-only
/// row for users with none.
#[derive(Debug, Serialize)]
struct ReportRow {
    user: u64,
    remaining_balance: Decimal,
    withdrawal_amount: Option<Decimal>,
    covered_amount: Option<Decimal>,
    coverage_rate: Option<u8>,
}

/// Writes coverage reports to a CSV writer.
///
/// Covers every user present in the store, in ascending user id order, or
/// only `user` when given. A `--user` unknown to the store still gets its
/// (empty, zero-balance) row.
///
/// # Example
///
/// ```csv
/// user,remaining_balance,withdrawal_amount,covered_amount,coverage_rate
/// 1,0,20,20,100
/// 1,0,20,5,25
/// 2,50,,,
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_reports<W: Write>(
    store: &RecordStore,
    user: Option<UserId>,
    writer: W,
) -> Result<(), csv::Error> {
    let repo = TransactionRepository::new(store);
    let users: BTreeSet<UserId> = match user {
        Some(id) => BTreeSet::from([id]),
        None => store.scan().into_iter().map(|r| r.user_id).collect(),
    };

    let mut wtr = Writer::from_writer(writer);
    for user_id in users {
        let report = repo.balance(user_id);
        if report.scheduled_withdrawals.is_empty() {
            wtr.serialize(ReportRow {
                user: user_id.0,
                remaining_balance: report.remaining_balance,
                withdrawal_amount: None,
                covered_amount: None,
                coverage_rate: None,
            })?;
        } else {
            for entry in &report.scheduled_withdrawals {
                wtr.serialize(ReportRow {
                    user: user_id.0,
                    remaining_balance: report.remaining_balance,
                    withdrawal_amount: Some(entry.amount),
                    covered_amount: Some(entry.covered_amount),
                    coverage_rate: Some(entry.coverage_rate),
                })?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
