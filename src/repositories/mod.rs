// Persistence boundary
//
// Two capability sets, each with a SQLite implementation and an in-memory one.
// Writes return StoreError to the caller. Aggregate reads degrade to zero or
// empty results and log the failure instead of returning it.

pub mod transactions;
pub mod users;

use chrono::{DateTime, Utc};

use crate::error::{Result, StoreError};
use crate::models::MonthlyReportRow;

pub use transactions::{InMemoryTransactionRepository, SqliteTransactionRepository};
pub use users::{InMemoryUserRepository, SqliteUserRepository};

pub trait TransactionRepository: Send + Sync {
    /// Append a transaction stamped with `created_at`; returns its row id
    fn save_transaction_at(
        &self,
        user_id: i64,
        amount: f64,
        transaction_type: &str,
        created_at: DateTime<Utc>,
    ) -> std::result::Result<i64, StoreError>;

    /// Append a transaction stamped with the current time
    fn save_transaction(
        &self,
        user_id: i64,
        amount: f64,
        transaction_type: &str,
    ) -> std::result::Result<i64, StoreError> {
        self.save_transaction_at(user_id, amount, transaction_type, Utc::now())
    }

    /// Sum of every amount for the user (0 when none or on failure)
    fn get_user_balance(&self, user_id: i64) -> f64;

    /// Per-type totals and counts for one calendar month (empty on failure)
    fn get_monthly_transactions(&self, user_id: i64, month: u32, year: i32) -> Vec<MonthlyReportRow>;

    /// Sum of "income" transactions in the year (0 when none or on failure)
    fn get_yearly_income(&self, user_id: i64, year: i32) -> f64;

    /// Sum of "deduction" transactions in the year (0 when none or on failure)
    fn get_yearly_deductions(&self, user_id: i64, year: i32) -> f64;
}

pub trait UserRepository: Send + Sync {
    fn create_user(&self, name: &str, email: &str) -> std::result::Result<i64, StoreError>;

    /// Overwrite name and email. Unknown ids are a no-op.
    fn update_user_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> std::result::Result<(), StoreError>;

    /// Fails with `NotFound` when the user does not exist
    fn get_user_email(&self, user_id: i64) -> Result<String>;
}
