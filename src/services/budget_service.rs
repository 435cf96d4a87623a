use crate::models::travel::ExpenseCategory;

const MIN_FALLBACK_BUDGET: f64 = 800.0;
const FALLBACK_BUDGET_PER_TRAVELER: f64 = 600.0;

/// (category, share of the budget, typical actual/planned ratio)
const CATEGORY_TABLE: [(&str, f64, f64); 4] = [
    ("transport", 0.25, 0.95),
    ("lodging", 0.35, 1.02),
    ("food", 0.20, 0.90),
    ("activities", 0.20, 1.05),
];

pub struct BudgetService;

impl BudgetService {
    /// Budget to split when the traveler gave none (or zero).
    pub fn effective_budget(budget: f64, travelers: u32) -> f64 {
        if budget > 0.0 {
            budget
        } else {
            MIN_FALLBACK_BUDGET.max(travelers as f64 * FALLBACK_BUDGET_PER_TRAVELER)
        }
    }

    /// Splits the budget across transport, lodging, food and activities, in that order.
    pub fn allocate(budget: f64, travelers: u32) -> Vec<ExpenseCategory> {
        let base = Self::effective_budget(budget, travelers);

        CATEGORY_TABLE
            .iter()
            .map(|(name, ratio, adjustment)| {
                let planned = (base * ratio).round();
                ExpenseCategory {
                    name: name.to_string(),
                    planned,
                    actual: (planned * adjustment).round(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_keep_fixed_order() {
        let names: Vec<String> = BudgetService::allocate(1000.0, 1)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["transport", "lodging", "food", "activities"]);
    }

    #[test]
    fn test_planned_sums_close_to_budget() {
        for budget in [1.0, 99.0, 333.0, 1234.0, 4000.0, 98765.0] {
            let total: f64 = BudgetService::allocate(budget, 2)
                .iter()
                .map(|c| c.planned)
                .sum();
            assert!(
                (total - budget).abs() <= 2.0,
                "budget {} allocated {}",
                budget,
                total
            );
        }
    }

    #[test]
    fn test_actual_applies_category_adjustment() {
        let expenses = BudgetService::allocate(4000.0, 2);
        let planned: Vec<f64> = expenses.iter().map(|c| c.planned).collect();
        let actual: Vec<f64> = expenses.iter().map(|c| c.actual).collect();

        assert_eq!(planned, vec![1000.0, 1400.0, 800.0, 800.0]);
        assert_eq!(actual, vec![950.0, 1428.0, 720.0, 840.0]);
    }

    #[test]
    fn test_zero_budget_uses_traveler_floor() {
        assert_eq!(BudgetService::effective_budget(0.0, 1), 800.0);
        assert_eq!(BudgetService::effective_budget(0.0, 3), 1800.0);
        assert_eq!(BudgetService::effective_budget(-50.0, 2), 1200.0);

        let total: f64 = BudgetService::allocate(0.0, 3).iter().map(|c| c.planned).sum();
        assert_eq!(total, 1800.0);
    }
}
