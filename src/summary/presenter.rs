//! Joins the budget catalog with the monthly spending sums.

use std::collections::HashMap;

use serde::Serialize;

use crate::budget::BudgetCatalog;

/// One row of the budget overview: a category's spending against its ceiling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpentView {
    /// The category name.
    pub name: String,
    /// How much was spent on the category this month.
    pub spent: i64,
    /// The category's monthly ceiling.
    pub max_amount: i64,
    /// How much is left before hitting the ceiling. Negative when over budget.
    pub available: i64,
}

/// Whether a category is under, over, or exactly at its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStanding {
    /// Spending exceeded the ceiling.
    OverBudget,
    /// There is money left to spend.
    UnderBudget,
    /// Spending matches the ceiling exactly.
    Neutral,
}

impl BudgetStanding {
    /// Classify a category by the sign of its available amount.
    pub fn from_available(available: i64) -> Self {
        match available.signum() {
            -1 => Self::OverBudget,
            1 => Self::UnderBudget,
            _ => Self::Neutral,
        }
    }
}

/// Build the budget overview rows by joining `catalog` against the month's
/// by-category sums.
///
/// Every catalog category with a positive ceiling appears exactly once, in
/// catalog order, whether or not it was spent on. Spending on categories that
/// are not in the catalog is dropped: those records still count in the
/// headline totals, but there is no ceiling to compare them against.
pub fn budget_overview(
    catalog: &BudgetCatalog,
    spend_by_category: &HashMap<String, i64>,
) -> Vec<CategorySpentView> {
    catalog
        .iter()
        .filter(|entry| entry.max_amount > 0)
        .map(|entry| {
            let spent = *spend_by_category.get(&entry.name).unwrap_or(&0);

            CategorySpentView {
                name: entry.name.clone(),
                spent,
                max_amount: entry.max_amount,
                available: entry.max_amount - spent,
            }
        })
        .collect()
}

#[cfg(test)]
mod presenter_tests {
    use std::collections::HashMap;

    use crate::budget::{BudgetCatalog, CategoryBudget, INCOME_CATEGORY};

    use super::{BudgetStanding, budget_overview};

    fn catalog(entries: &[(&str, i64)]) -> BudgetCatalog {
        BudgetCatalog::new(
            entries
                .iter()
                .map(|(name, max_amount)| CategoryBudget {
                    name: name.to_string(),
                    max_amount: *max_amount,
                })
                .collect(),
        )
        .unwrap()
    }

    fn sums(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(category, amount)| (category.to_string(), *amount))
            .collect()
    }

    #[test]
    fn every_catalog_category_appears_in_order() {
        let catalog = catalog(&[("Gasolina", 100_000), ("Peajes", 50_000), ("Lavado", 30_000)]);
        let overview = budget_overview(&catalog, &sums(&[("Peajes", 12_000)]));

        let names: Vec<_> = overview.iter().map(|row| row.name.as_str()).collect();

        assert_eq!(names, ["Gasolina", "Peajes", "Lavado"]);
    }

    #[test]
    fn unspent_category_shows_zero_spent_and_full_ceiling() {
        let catalog = catalog(&[("Gasolina", 100_000)]);

        let overview = budget_overview(&catalog, &sums(&[]));

        assert_eq!(overview[0].spent, 0);
        assert_eq!(overview[0].available, 100_000);
    }

    #[test]
    fn available_is_ceiling_minus_spent() {
        let catalog = catalog(&[("Gasolina", 100_000)]);

        let overview = budget_overview(&catalog, &sums(&[("Gasolina", 35_000)]));

        assert_eq!(overview[0].spent, 35_000);
        assert_eq!(overview[0].available, 65_000);
    }

    #[test]
    fn overspent_category_has_negative_available() {
        let catalog = catalog(&[("Gasolina", 100_000)]);

        let overview = budget_overview(&catalog, &sums(&[("Gasolina", 130_000)]));

        assert_eq!(overview[0].available, -30_000);
    }

    #[test]
    fn spending_outside_catalog_is_dropped() {
        let catalog = catalog(&[("Gasolina", 100_000)]);

        let overview = budget_overview(&catalog, &sums(&[("Lotería", 99_000)]));

        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].name, "Gasolina");
        assert_eq!(overview[0].spent, 0);
    }

    #[test]
    fn income_category_never_counts_against_a_ceiling() {
        let catalog = catalog(&[("Extras Casa", 1_000_000)]);

        let overview = budget_overview(
            &catalog,
            &sums(&[(INCOME_CATEGORY, 3_000_000), ("Extras Casa", 40_000)]),
        );

        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].spent, 40_000);
        assert_eq!(overview[0].available, 960_000);
    }

    #[test]
    fn category_without_positive_ceiling_is_skipped() {
        let catalog = catalog(&[("Gasolina", 100_000), ("Sin tope", 0)]);

        let overview = budget_overview(&catalog, &sums(&[("Sin tope", 40_000)]));

        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].name, "Gasolina");
    }

    #[test]
    fn standing_follows_sign_of_available() {
        assert_eq!(
            BudgetStanding::from_available(-1),
            BudgetStanding::OverBudget
        );
        assert_eq!(BudgetStanding::from_available(0), BudgetStanding::Neutral);
        assert_eq!(
            BudgetStanding::from_available(1),
            BudgetStanding::UnderBudget
        );
    }
}
