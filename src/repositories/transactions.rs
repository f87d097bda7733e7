// 💾 Transaction Repository - append-only money movements per user

use chrono::{DateTime, Datelike, Utc};
use rusqlite::params;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use super::TransactionRepository;
use crate::db::{format_timestamp, parse_timestamp, Database};
use crate::error::StoreError;
use crate::models::{MonthlyReportRow, Transaction, DEDUCTION, INCOME};

/// Log a failed aggregate read and fall back to `default`
fn degrade<T>(result: Result<T, StoreError>, what: &str, user_id: i64, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(user_id, error = %e, "{} query failed, returning default", what);
            default
        }
    }
}

// ============================================================================
// SQLITE
// ============================================================================

#[derive(Clone)]
pub struct SqliteTransactionRepository {
    db: Database,
}

impl SqliteTransactionRepository {
    pub fn new(db: Database) -> Self {
        SqliteTransactionRepository { db }
    }

    /// Every stored transaction in insertion order (empty on failure)
    pub fn transactions(&self) -> Vec<Transaction> {
        let result = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, amount, type, created_at
                 FROM transactions
                 ORDER BY id",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    let created_at: String = row.get(4)?;
                    Ok(Transaction {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        amount: row.get(2)?,
                        transaction_type: row.get(3)?,
                        created_at: parse_timestamp(&created_at)
                            .ok_or(rusqlite::Error::InvalidQuery)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(rows)
        });

        match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "transaction listing failed, returning nothing");
                Vec::new()
            }
        }
    }

    fn yearly_total(&self, user_id: i64, year: i32, transaction_type: &str) -> Result<f64, StoreError> {
        self.db.with_connection(|conn| {
            let total: Option<f64> = conn.query_row(
                "SELECT SUM(amount)
                 FROM transactions
                 WHERE user_id = ?1 AND type = ?2
                   AND CAST(strftime('%Y', created_at) AS INTEGER) = ?3",
                params![user_id, transaction_type, year],
                |row| row.get(0),
            )?;
            Ok(total.unwrap_or(0.0))
        })
    }
}

impl TransactionRepository for SqliteTransactionRepository {
    fn save_transaction_at(
        &self,
        user_id: i64,
        amount: f64,
        transaction_type: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO transactions (user_id, amount, type, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![user_id, amount, transaction_type, format_timestamp(&created_at)],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        info!(user_id, transaction_id = id, amount, transaction_type, "transaction saved");
        Ok(id)
    }

    fn get_user_balance(&self, user_id: i64) -> f64 {
        let result = self.db.with_connection(|conn| {
            let balance: Option<f64> = conn.query_row(
                "SELECT SUM(amount) FROM transactions WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(balance.unwrap_or(0.0))
        });

        degrade(result, "balance", user_id, 0.0)
    }

    fn get_monthly_transactions(&self, user_id: i64, month: u32, year: i32) -> Vec<MonthlyReportRow> {
        debug!(user_id, month, year, "querying monthly transactions");

        let result = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT type, SUM(amount) AS total, COUNT(*) AS count
                 FROM transactions
                 WHERE user_id = ?1
                   AND CAST(strftime('%m', created_at) AS INTEGER) = ?2
                   AND CAST(strftime('%Y', created_at) AS INTEGER) = ?3
                 GROUP BY type
                 ORDER BY type",
            )?;

            let rows = stmt
                .query_map(
                    params![user_id, month, year],
                    |row| {
                        Ok(MonthlyReportRow {
                            transaction_type: row.get(0)?,
                            total: row.get(1)?,
                            count: row.get(2)?,
                        })
                    },
                )?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(rows)
        });

        degrade(result, "monthly transactions", user_id, Vec::new())
    }

    fn get_yearly_income(&self, user_id: i64, year: i32) -> f64 {
        degrade(self.yearly_total(user_id, year, INCOME), "yearly income", user_id, 0.0)
    }

    fn get_yearly_deductions(&self, user_id: i64, year: i32) -> f64 {
        degrade(
            self.yearly_total(user_id, year, DEDUCTION),
            "yearly deductions",
            user_id,
            0.0,
        )
    }
}

// ============================================================================
// IN-MEMORY
// ============================================================================

/// Vec-backed store for tests and demos
///
/// `set_offline(true)` makes every call fail as if the store were down.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
    offline: AtomicBool,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Copy of everything stored (empty when offline)
    pub fn transactions(&self) -> Vec<Transaction> {
        self.snapshot().unwrap_or_default()
    }

    fn snapshot(&self) -> Result<Vec<Transaction>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("transaction store lock poisoned".to_string()))?;
        Ok(rows.clone())
    }

    fn yearly_total(&self, user_id: i64, year: i32, transaction_type: &str) -> Result<f64, StoreError> {
        Ok(self
            .snapshot()?
            .iter()
            .filter(|tx| {
                tx.user_id == user_id
                    && tx.transaction_type == transaction_type
                    && tx.created_at.year() == year
            })
            .map(|tx| tx.amount)
            .sum())
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn save_transaction_at(
        &self,
        user_id: i64,
        amount: f64,
        transaction_type: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("transaction store lock poisoned".to_string()))?;

        let id = rows.len() as i64 + 1;
        rows.push(Transaction {
            id,
            user_id,
            amount,
            transaction_type: transaction_type.to_string(),
            created_at,
        });

        info!(user_id, transaction_id = id, amount, transaction_type, "transaction saved");
        Ok(id)
    }

    fn get_user_balance(&self, user_id: i64) -> f64 {
        let result = self.snapshot().map(|rows| {
            rows.iter()
                .filter(|tx| tx.user_id == user_id)
                .map(|tx| tx.amount)
                .sum::<f64>()
        });

        degrade(result, "balance", user_id, 0.0)
    }

    fn get_monthly_transactions(&self, user_id: i64, month: u32, year: i32) -> Vec<MonthlyReportRow> {
        let result = self.snapshot().map(|rows| {
            let mut groups: BTreeMap<String, (f64, i64)> = BTreeMap::new();

            for tx in rows.iter().filter(|tx| {
                tx.user_id == user_id && tx.created_at.month() == month && tx.created_at.year() == year
            }) {
                let entry = groups.entry(tx.transaction_type.clone()).or_insert((0.0, 0));
                entry.0 += tx.amount;
                entry.1 += 1;
            }

            groups
                .into_iter()
                .map(|(transaction_type, (total, count))| MonthlyReportRow {
                    transaction_type,
                    total,
                    count,
                })
                .collect::<Vec<_>>()
        });

        degrade(result, "monthly transactions", user_id, Vec::new())
    }

    fn get_yearly_income(&self, user_id: i64, year: i32) -> f64 {
        degrade(self.yearly_total(user_id, year, INCOME), "yearly income", user_id, 0.0)
    }

    fn get_yearly_deductions(&self, user_id: i64, year: i32) -> f64 {
        degrade(
            self.yearly_total(user_id, year, DEDUCTION),
            "yearly deductions",
            user_id,
            0.0,
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
