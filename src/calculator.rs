// 🧮 Financial Calculator - interest and progressive tax
//
// Pure functions, no collaborators. The tax schedule is a table of brackets:
//   tax = base_tax + (taxable_income - floor) * rate
// for the first bracket whose ceiling is not exceeded.

// ============================================================================
// TAX BRACKET
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TaxBracket {
    /// Income already covered by lower brackets
    pub floor: f64,

    /// Upper bound (inclusive). None = top bracket
    pub ceiling: Option<f64>,

    /// Tax owed on everything up to `floor`
    pub base_tax: f64,

    /// Marginal rate applied above `floor`
    pub rate: f64,
}

impl TaxBracket {
    pub fn covers(&self, taxable_income: f64) -> bool {
        match self.ceiling {
            Some(ceiling) => taxable_income <= ceiling,
            None => true,
        }
    }

    pub fn tax_for(&self, taxable_income: f64) -> f64 {
        self.base_tax + (taxable_income - self.floor) * self.rate
    }
}

/// 10% up to 50k, 20% up to 100k, 30% above
pub fn default_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket {
            floor: 0.0,
            ceiling: Some(50_000.0),
            base_tax: 0.0,
            rate: 0.10,
        },
        TaxBracket {
            floor: 50_000.0,
            ceiling: Some(100_000.0),
            base_tax: 5_000.0,
            rate: 0.20,
        },
        TaxBracket {
            floor: 100_000.0,
            ceiling: None,
            base_tax: 15_000.0,
            rate: 0.30,
        },
    ]
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// Interest and tax formulas used by reports and the service facade
pub trait FinancialCalculator: Send + Sync {
    /// Simple interest: principal * rate * periods
    fn calculate_interest(&self, principal: f64, rate: f64, periods: u32) -> f64;

    /// Progressive tax on `income - deductions`
    ///
    /// Negative taxable income lands in the first bracket and produces a
    /// negative amount; it is not clamped to zero.
    fn calculate_tax(&self, income: f64, deductions: f64) -> f64;
}

#[derive(Debug, Clone)]
pub struct ProgressiveTaxCalculator {
    brackets: Vec<TaxBracket>,
}

impl ProgressiveTaxCalculator {
    pub fn new() -> Self {
        Self::with_brackets(default_brackets())
    }

    /// Brackets must be ordered by ceiling, the last one open-ended
    pub fn with_brackets(brackets: Vec<TaxBracket>) -> Self {
        ProgressiveTaxCalculator { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl Default for ProgressiveTaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialCalculator for ProgressiveTaxCalculator {
    fn calculate_interest(&self, principal: f64, rate: f64, periods: u32) -> f64 {
        principal * rate * f64::from(periods)
    }

    fn calculate_tax(&self, income: f64, deductions: f64) -> f64 {
        let taxable_income = income - deductions;

        self.brackets
            .iter()
            .find(|bracket| bracket.covers(taxable_income))
            .or_else(|| self.brackets.last())
            .map(|bracket| bracket.tax_for(taxable_income))
            .unwrap_or(0.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_tax_bracket_boundaries() {
        let calc = ProgressiveTaxCalculator::new();

        assert_close(calc.calculate_tax(50_000.0, 0.0), 5_000.0);
        assert_close(calc.calculate_tax(100_000.0, 0.0), 15_000.0);
        assert_close(calc.calculate_tax(150_000.0, 0.0), 30_000.0);
    }

    #[test]
    fn test_tax_inside_brackets() {
        let calc = ProgressiveTaxCalculator::new();

        assert_close(calc.calculate_tax(20_000.0, 0.0), 2_000.0);
        // 75k - 10k = 65k taxable -> 5000 + 15000 * 0.2
        assert_close(calc.calculate_tax(75_000.0, 10_000.0), 8_000.0);
        assert_close(calc.calculate_tax(200_000.0, 50_000.0), 30_000.0);
    }

    #[test]
    fn test_negative_taxable_income_is_not_clamped() {
        let calc = ProgressiveTaxCalculator::new();

        assert_close(calc.calculate_tax(30_000.0, 40_000.0), -1_000.0);
    }

    #[test]
    fn test_interest_is_linear() {
        let calc = ProgressiveTaxCalculator::new();

        assert_close(calc.calculate_interest(1_000.0, 0.05, 2), 100.0);
        assert_close(calc.calculate_interest(2_500.0, 0.03, 4), 300.0);
        assert_close(calc.calculate_interest(-500.0, 0.1, 3), -150.0);

        for principal in [0.0, 1.0, 999.99, 1_000_000.0] {
            assert_close(calc.calculate_interest(principal, 0.07, 0), 0.0);
        }
    }

    #[test]
    fn test_custom_brackets() {
        let calc = ProgressiveTaxCalculator::with_brackets(vec![
            TaxBracket {
                floor: 0.0,
                ceiling: Some(10_000.0),
                base_tax: 0.0,
                rate: 0.0,
            },
            TaxBracket {
                floor: 10_000.0,
                ceiling: None,
                base_tax: 0.0,
                rate: 0.5,
            },
        ]);

        assert_close(calc.calculate_tax(8_000.0, 0.0), 0.0);
        assert_close(calc.calculate_tax(12_000.0, 0.0), 1_000.0);
        assert_eq!(calc.brackets().len(), 2);
    }

    #[test]
    fn test_empty_schedule_owes_nothing() {
        let calc = ProgressiveTaxCalculator::with_brackets(Vec::new());
        assert_close(calc.calculate_tax(80_000.0, 0.0), 0.0);
    }
}
