// Financial Reporting - Core Library
// Calculator, repositories, reports and notifications behind one service facade

pub mod calculator;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notifier;
pub mod reports;
pub mod repositories;
pub mod service;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

// Re-export commonly used types
pub use calculator::{FinancialCalculator, ProgressiveTaxCalculator, TaxBracket};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use db::{setup_database, Database};
pub use error::{FinanceError, Result, StoreError};
pub use models::{MonthlyReportRow, TaxReportSummary, Transaction, User, DEDUCTION, INCOME};
pub use notifier::{
    EmailNotifier, LogTransport, MailTransport, Outbox, StatementMessage, StatementNotifier,
};
pub use reports::{ReportGenerator, StandardReportGenerator};
pub use repositories::{
    InMemoryTransactionRepository, InMemoryUserRepository, SqliteTransactionRepository,
    SqliteUserRepository, TransactionRepository, UserRepository,
};
pub use service::FinancialService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static TRACING_INIT: Once = Once::new();

/// Install the fmt subscriber once. RUST_LOG wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        // Another subscriber may already be installed (tests, embedding apps)
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
