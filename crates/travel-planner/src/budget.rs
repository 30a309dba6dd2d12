//! Budget & Cost Calculator
//!
//! Pure, deterministic arithmetic. The model composes trip cost math out of
//! these operations through explicit tool calls instead of doing numbers
//! itself; free-form numeric reasoning by a language model is unreliable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Travel spending style. Unknown input falls back to `Standard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetMode {
    Budget,
    Standard,
    Luxury,
}

impl BudgetMode {
    pub fn parse(mode: &str) -> Self {
        match mode.trim().to_lowercase().as_str() {
            "budget" => Self::Budget,
            "luxury" => Self::Luxury,
            _ => Self::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Standard => "standard",
            Self::Luxury => "luxury",
        }
    }

    /// Category ratios (stay, food, transport, activities). Sum to 1.0 for
    /// every mode.
    fn ratios(self) -> (Decimal, Decimal, Decimal, Decimal) {
        match self {
            Self::Budget => (dec!(0.35), dec!(0.30), dec!(0.20), dec!(0.15)),
            Self::Standard => (dec!(0.40), dec!(0.30), dec!(0.20), dec!(0.10)),
            Self::Luxury => (dec!(0.50), dec!(0.25), dec!(0.15), dec!(0.10)),
        }
    }
}

/// Proportional allocation of a total budget across spending categories
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BudgetBreakdown {
    pub stay: Decimal,
    pub food: Decimal,
    pub transport: Decimal,
    pub activities: Decimal,
}

impl BudgetBreakdown {
    pub fn total(&self) -> Decimal {
        self.stay + self.food + self.transport + self.activities
    }

    /// Render as "Category: $amount" lines with the given prefix
    pub fn lines(&self, prefix: &str) -> String {
        [
            ("Stay", self.stay),
            ("Food", self.food),
            ("Transport", self.transport),
            ("Activities", self.activities),
        ]
        .iter()
        .map(|(label, amount)| format!("{prefix}{label}: ${amount}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Budget estimator for a trip: allocation by mode plus per-day budget.
/// The day count is floored at 1 on this path.
#[derive(Clone, Debug)]
pub struct BudgetEstimator {
    total: Decimal,
    days: i64,
    mode: BudgetMode,
}

impl BudgetEstimator {
    pub fn new(total: Decimal, days: i64, mode: BudgetMode) -> Self {
        Self {
            total,
            days: days.max(1),
            mode,
        }
    }

    /// Amounts are `round(total * ratio, 2)`.
    pub fn breakdown(&self) -> BudgetBreakdown {
        let (stay, food, transport, activities) = self.mode.ratios();
        BudgetBreakdown {
            stay: (self.total * stay).round_dp(2),
            food: (self.total * food).round_dp(2),
            transport: (self.total * transport).round_dp(2),
            activities: (self.total * activities).round_dp(2),
        }
    }

    pub fn daily(&self) -> Decimal {
        (self.total / Decimal::from(self.days)).round_dp(2)
    }

    pub fn mode(&self) -> BudgetMode {
        self.mode
    }
}

/// Per-day budget on the unguarded path: degrade, do not crash.
/// A day count of zero or less yields 0.
pub fn daily_budget(total: Decimal, days: i64) -> Decimal {
    if days > 0 {
        total / Decimal::from(days)
    } else {
        Decimal::ZERO
    }
}

/// Sum of an arbitrary-length sequence of costs
pub fn total_cost(costs: &[Decimal]) -> Decimal {
    costs.iter().copied().sum()
}

pub fn multiply(a: Decimal, b: Decimal) -> Decimal {
    a * b
}

pub fn add(a: Decimal, b: Decimal) -> Decimal {
    a + b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_sum_to_one() {
        for mode in [BudgetMode::Budget, BudgetMode::Standard, BudgetMode::Luxury] {
            let (stay, food, transport, activities) = mode.ratios();
            assert_eq!(stay + food + transport + activities, dec!(1.0));
        }
    }

    #[test]
    fn test_breakdown_amounts() {
        let estimator = BudgetEstimator::new(dec!(80000), 3, BudgetMode::Standard);
        let breakdown = estimator.breakdown();

        assert_eq!(breakdown.stay, dec!(32000.00));
        assert_eq!(breakdown.food, dec!(24000.00));
        assert_eq!(breakdown.transport, dec!(16000.00));
        assert_eq!(breakdown.activities, dec!(8000.00));
        assert_eq!(breakdown.total(), dec!(80000.00));
    }

    #[test]
    fn test_breakdown_rounds_to_cents() {
        let estimator = BudgetEstimator::new(dec!(1000.01), 1, BudgetMode::Budget);
        let breakdown = estimator.breakdown();

        // 1000.01 * 0.35 = 350.0035 -> 350.00
        assert_eq!(breakdown.stay, dec!(350.00));
        // the rounded parts stay within a cent of the total per category
        assert!((breakdown.total() - dec!(1000.01)).abs() <= dec!(0.05));
    }

    #[test]
    fn test_unknown_mode_defaults_to_standard() {
        assert_eq!(BudgetMode::parse("extravagant"), BudgetMode::Standard);
        assert_eq!(BudgetMode::parse("LUXURY"), BudgetMode::Luxury);
        assert_eq!(BudgetMode::parse("budget"), BudgetMode::Budget);
    }

    #[test]
    fn test_estimator_floors_days_at_one() {
        let estimator = BudgetEstimator::new(dec!(500), 0, BudgetMode::Standard);
        assert_eq!(estimator.daily(), dec!(500));
    }

    #[test]
    fn test_daily_budget_degrades_to_zero() {
        assert_eq!(daily_budget(dec!(900), 0), Decimal::ZERO);
        assert_eq!(daily_budget(dec!(900), -2), Decimal::ZERO);
        assert_eq!(daily_budget(dec!(900), 3), dec!(300));
    }

    #[test]
    fn test_total_cost_sums_sequence() {
        assert_eq!(
            total_cost(&[dec!(120.50), dec!(79.50), dec!(40)]),
            dec!(240.00)
        );
        assert_eq!(total_cost(&[]), Decimal::ZERO);
    }
}
