// 🏛️ Financial Service - single entry point over the reporting components
//
// Every method but one forwards to a collaborator. send_monthly_statement
// runs: email lookup -> balance -> monthly report -> notifier, stopping at
// the first step that fails.

use std::sync::Arc;
use tracing::info;

use crate::calculator::{FinancialCalculator, ProgressiveTaxCalculator};
use crate::clock::{Clock, SystemClock};
use crate::db::Database;
use crate::error::{Result, StoreError};
use crate::models::{MonthlyReportRow, TaxReportSummary};
use crate::notifier::{EmailNotifier, MailTransport, StatementNotifier};
use crate::reports::{ReportGenerator, StandardReportGenerator};
use crate::repositories::{
    SqliteTransactionRepository, SqliteUserRepository, TransactionRepository, UserRepository,
};

pub struct FinancialService {
    calculator: Arc<dyn FinancialCalculator>,
    transactions: Arc<dyn TransactionRepository>,
    users: Arc<dyn UserRepository>,
    reports: Arc<dyn ReportGenerator>,
    notifier: Arc<dyn StatementNotifier>,
    clock: Arc<dyn Clock>,
}

impl FinancialService {
    pub fn new(
        calculator: Arc<dyn FinancialCalculator>,
        transactions: Arc<dyn TransactionRepository>,
        users: Arc<dyn UserRepository>,
        reports: Arc<dyn ReportGenerator>,
        notifier: Arc<dyn StatementNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        FinancialService {
            calculator,
            transactions,
            users,
            reports,
            notifier,
            clock,
        }
    }

    /// Wire the standard components over a SQLite database
    pub fn with_database(db: Database, transport: Arc<dyn MailTransport>, subject: &str) -> Self {
        let calculator: Arc<dyn FinancialCalculator> = Arc::new(ProgressiveTaxCalculator::new());
        let transactions: Arc<dyn TransactionRepository> =
            Arc::new(SqliteTransactionRepository::new(db.clone()));
        let reports = Arc::new(StandardReportGenerator::new(
            transactions.clone(),
            calculator.clone(),
        ));

        Self::new(
            calculator,
            transactions,
            Arc::new(SqliteUserRepository::new(db)),
            reports,
            Arc::new(EmailNotifier::with_subject(transport, subject)),
            Arc::new(SystemClock),
        )
    }

    // ========================================================================
    // CALCULATIONS
    // ========================================================================

    pub fn calculate_interest(&self, principal: f64, rate: f64, periods: u32) -> f64 {
        self.calculator.calculate_interest(principal, rate, periods)
    }

    pub fn calculate_tax(&self, income: f64, deductions: f64) -> f64 {
        self.calculator.calculate_tax(income, deductions)
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    pub fn save_transaction(
        &self,
        user_id: i64,
        amount: f64,
        transaction_type: &str,
    ) -> std::result::Result<i64, StoreError> {
        self.transactions.save_transaction(user_id, amount, transaction_type)
    }

    pub fn save_transaction_at(
        &self,
        user_id: i64,
        amount: f64,
        transaction_type: &str,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> std::result::Result<i64, StoreError> {
        self.transactions
            .save_transaction_at(user_id, amount, transaction_type, created_at)
    }

    pub fn get_user_balance(&self, user_id: i64) -> f64 {
        self.transactions.get_user_balance(user_id)
    }

    pub fn get_yearly_income(&self, user_id: i64, year: i32) -> f64 {
        self.transactions.get_yearly_income(user_id, year)
    }

    pub fn get_yearly_deductions(&self, user_id: i64, year: i32) -> f64 {
        self.transactions.get_yearly_deductions(user_id, year)
    }

    pub fn create_user(&self, name: &str, email: &str) -> std::result::Result<i64, StoreError> {
        self.users.create_user(name, email)
    }

    pub fn update_user_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> std::result::Result<(), StoreError> {
        self.users.update_user_profile(user_id, name, email)
    }

    // ========================================================================
    // REPORTING
    // ========================================================================

    pub fn generate_monthly_report(&self, user_id: i64, month: u32, year: i32) -> Vec<MonthlyReportRow> {
        self.reports.generate_monthly_report(user_id, month, year)
    }

    pub fn generate_tax_report(&self, user_id: i64, year: i32) -> TaxReportSummary {
        self.reports.generate_tax_report(user_id, year)
    }

    // ========================================================================
    // NOTIFICATIONS
    // ========================================================================

    /// Email the user their balance and this month's breakdown
    ///
    /// An unknown user (or a failed lookup) returns the error and nothing is sent.
    pub fn send_monthly_statement(&self, user_id: i64) -> Result<()> {
        let email = self.users.get_user_email(user_id)?;

        let balance = self.get_user_balance(user_id);
        let (month, year) = self.clock.current_period();
        let report = self.generate_monthly_report(user_id, month, year);

        self.notifier.send_monthly_statement(&email, balance, &report);
        info!(user_id, month, year, rows = report.len(), "monthly statement sent");
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
