// 📊 Report Generator - monthly breakdowns and yearly tax summaries
//
// Sits between the service and the transaction store so report shaping can
// change without touching the queries.

use std::sync::Arc;
use tracing::debug;

use crate::calculator::FinancialCalculator;
use crate::models::{MonthlyReportRow, TaxReportSummary};
use crate::repositories::TransactionRepository;

pub trait ReportGenerator: Send + Sync {
    fn generate_monthly_report(&self, user_id: i64, month: u32, year: i32) -> Vec<MonthlyReportRow>;

    fn generate_tax_report(&self, user_id: i64, year: i32) -> TaxReportSummary;
}

pub struct StandardReportGenerator {
    transactions: Arc<dyn TransactionRepository>,
    calculator: Arc<dyn FinancialCalculator>,
}

impl StandardReportGenerator {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        calculator: Arc<dyn FinancialCalculator>,
    ) -> Self {
        StandardReportGenerator {
            transactions,
            calculator,
        }
    }
}

impl ReportGenerator for StandardReportGenerator {
    fn generate_monthly_report(&self, user_id: i64, month: u32, year: i32) -> Vec<MonthlyReportRow> {
        self.transactions.get_monthly_transactions(user_id, month, year)
    }

    /// Store failures count as zero income / zero deductions
    fn generate_tax_report(&self, user_id: i64, year: i32) -> TaxReportSummary {
        let income = self.transactions.get_yearly_income(user_id, year);
        let deductions = self.transactions.get_yearly_deductions(user_id, year);

        let report = TaxReportSummary::compute(year, income, deductions, self.calculator.as_ref());
        debug!(user_id, year, tax_owed = report.tax_owed(), "tax report generated");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ProgressiveTaxCalculator;
    use crate::repositories::InMemoryTransactionRepository;
    use chrono::{TimeZone, Utc};

    fn setup() -> (Arc<InMemoryTransactionRepository>, StandardReportGenerator) {
        let repo = Arc::new(InMemoryTransactionRepository::new());
        let generator = StandardReportGenerator::new(
            repo.clone(),
            Arc::new(ProgressiveTaxCalculator::new()),
        );
        (repo, generator)
    }

    #[test]
    fn test_monthly_report_matches_repository() {
        let (repo, generator) = setup();
        let march = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        repo.save_transaction_at(1, 100.0, "income", march).unwrap();
        repo.save_transaction_at(1, -25.0, "groceries", march).unwrap();

        assert_eq!(
            generator.generate_monthly_report(1, 3, 2024),
            repo.get_monthly_transactions(1, 3, 2024)
        );
        assert_eq!(generator.generate_monthly_report(1, 3, 2024).len(), 2);
    }

    #[test]
    fn test_tax_report_consistency() {
        let (repo, generator) = setup();
        let calc = ProgressiveTaxCalculator::new();

        let scenarios: &[(f64, f64)] = &[
            (0.0, 0.0),
            (30_000.0, 40_000.0),
            (75_000.0, 10_000.0),
            (120_000.0, 5_000.0),
            (250_000.0, 0.0),
        ];

        for (i, (income, deductions)) in scenarios.iter().enumerate() {
            let user_id = i as i64 + 1;
            let when = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
            repo.save_transaction_at(user_id, *income, "income", when).unwrap();
            repo.save_transaction_at(user_id, *deductions, "deduction", when).unwrap();

            let report = generator.generate_tax_report(user_id, 2024);

            assert_eq!(report.year(), 2024);
            assert_eq!(report.total_income(), *income);
            assert_eq!(report.total_deductions(), *deductions);
            assert_eq!(
                report.tax_owed(),
                calc.calculate_tax(report.total_income(), report.total_deductions())
            );
        }
    }

    #[test]
    fn test_tax_report_with_store_down_uses_zero() {
        let (repo, generator) = setup();
        repo.save_transaction(1, 80_000.0, "income").unwrap();
        repo.set_offline(true);

        let report = generator.generate_tax_report(1, 2024);

        assert_eq!(report.total_income(), 0.0);
        assert_eq!(report.total_deductions(), 0.0);
        assert_eq!(report.tax_owed(), 0.0);
    }
}
