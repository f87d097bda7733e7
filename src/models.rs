// Records handled by the reporting layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::FinancialCalculator;

/// Transaction type counted as income in tax reports
pub const INCOME: &str = "income";

/// Transaction type counted as a deduction in tax reports
pub const DEDUCTION: &str = "deduction";

// ============================================================================
// STORED RECORDS
// ============================================================================

/// A recorded money movement. Immutable once saved.
///
/// The sign of `amount` is up to the caller; nothing checks it against
/// `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub transaction_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// ============================================================================
// DERIVED REPORTS (never stored)
// ============================================================================

/// Totals for one transaction type within a calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReportRow {
    pub transaction_type: String,
    pub total: f64,
    pub count: i64,
}

impl MonthlyReportRow {
    pub fn new(transaction_type: impl Into<String>, total: f64, count: i64) -> Self {
        Self {
            transaction_type: transaction_type.into(),
            total,
            count,
        }
    }
}

/// Yearly income, deductions and the tax owed on them
///
/// `tax_owed` is always computed from the two totals when the summary is
/// built; there is no setter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxReportSummary {
    year: i32,
    total_income: f64,
    total_deductions: f64,
    tax_owed: f64,
}

impl TaxReportSummary {
    pub fn compute(
        year: i32,
        total_income: f64,
        total_deductions: f64,
        calculator: &dyn FinancialCalculator,
    ) -> Self {
        Self {
            year,
            total_income,
            total_deductions,
            tax_owed: calculator.calculate_tax(total_income, total_deductions),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn total_income(&self) -> f64 {
        self.total_income
    }

    pub fn total_deductions(&self) -> f64 {
        self.total_deductions
    }

    pub fn tax_owed(&self) -> f64 {
        self.tax_owed
    }

    pub fn summary(&self) -> String {
        format!(
            "Tax report {}: income ${:.2}, deductions ${:.2}, tax owed ${:.2}",
            self.year, self.total_income, self.total_deductions, self.tax_owed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ProgressiveTaxCalculator;

    #[test]
    fn test_tax_summary_uses_calculator() {
        let calc = ProgressiveTaxCalculator::new();
        let summary = TaxReportSummary::compute(2024, 75_000.0, 10_000.0, &calc);

        assert_eq!(summary.year(), 2024);
        assert_eq!(summary.tax_owed(), calc.calculate_tax(75_000.0, 10_000.0));
        assert_eq!(
            summary.summary(),
            "Tax report 2024: income $75000.00, deductions $10000.00, tax owed $8000.00"
        );
    }

    #[test]
    fn test_tax_summary_serializes_all_fields() {
        let calc = ProgressiveTaxCalculator::new();
        let summary = TaxReportSummary::compute(2023, 50_000.0, 0.0, &calc);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["year"], 2023);
        assert_eq!(json["total_income"], 50_000.0);
        assert_eq!(json["total_deductions"], 0.0);
        assert!((json["tax_owed"].as_f64().unwrap() - 5_000.0).abs() < 1e-6);
    }
}
