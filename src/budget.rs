//! The budget catalog maps each spending category to its monthly ceiling.
//!
//! The catalog is loaded once at start-up, either from a JSON file or from the
//! built-in defaults, and shared read-only across all requests. Catalog order
//! is meaningful: the summary page lists categories in catalog order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The category income records are filed under.
///
/// It is deliberately not part of the catalog, so salaries never count
/// against a spending ceiling.
pub const INCOME_CATEGORY: &str = "Ingresos";

/// A spending category and the maximum amount the family plans to spend on it
/// per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// The category name, as written on records.
    pub name: String,
    /// The monthly ceiling for this category.
    pub max_amount: i64,
}

/// An ordered collection of per-category budget ceilings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCatalog {
    entries: Vec<CategoryBudget>,
}

impl BudgetCatalog {
    /// Create a catalog from a list of category budgets.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudgetCatalog] if `entries` is empty.
    pub fn new(entries: Vec<CategoryBudget>) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::InvalidBudgetCatalog(
                "the catalog must contain at least one category".to_string(),
            ));
        }

        Ok(Self { entries })
    }

    /// Load a catalog from a JSON file containing a list of objects with
    /// `name` and `max_amount` fields.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudgetCatalog] if the file cannot be read,
    /// cannot be parsed, or contains no categories.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = std::fs::read_to_string(&path).map_err(|error| {
            Error::InvalidBudgetCatalog(format!(
                "could not read {}: {error}",
                path.as_ref().display()
            ))
        })?;

        let entries: Vec<CategoryBudget> = serde_json::from_str(&text).map_err(|error| {
            Error::InvalidBudgetCatalog(format!(
                "could not parse {}: {error}",
                path.as_ref().display()
            ))
        })?;

        Self::new(entries)
    }

    /// Get the monthly ceiling for `category`, or `None` if the category is
    /// not in the catalog.
    pub fn max_amount_for(&self, category: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.name == category)
            .map(|entry| entry.max_amount)
    }

    /// Iterate over the category budgets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryBudget> {
        self.entries.iter()
    }

    /// The number of categories in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog contains no categories.
    ///
    /// Always false for catalogs built through [BudgetCatalog::new].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BudgetCatalog {
    /// The household's standard categories.
    ///
    /// Every category has a ceiling of 100,000 except "Extras Casa" which
    /// covers irregular household expenses and gets 1,000,000.
    fn default() -> Self {
        let entries = [
            ("Comida y aseo", 100_000),
            ("Extras Casa", 1_000_000),
            ("Medicinas", 100_000),
            ("Clases", 100_000),
            ("Gasolina", 100_000),
            ("Mantenimiento", 100_000),
            ("Lavado", 100_000),
            ("Parqueadero", 100_000),
            ("Peajes", 100_000),
            ("Papeles", 100_000),
            ("Ocio General", 100_000),
            ("Viajes", 100_000),
            ("Cumpleaños", 100_000),
            ("Comidas afuera", 100_000),
            ("Comida Perros", 100_000),
            ("Guardería Perros", 100_000),
            ("Medicina Perros", 100_000),
        ]
        .into_iter()
        .map(|(name, max_amount)| CategoryBudget {
            name: name.to_string(),
            max_amount,
        })
        .collect();

        Self { entries }
    }
}

#[cfg(test)]
mod budget_catalog_tests {
    use std::io::Write;

    use crate::Error;

    use super::{BudgetCatalog, CategoryBudget};

    #[test]
    fn new_fails_on_empty_catalog() {
        let result = BudgetCatalog::new(vec![]);

        assert!(matches!(result, Err(Error::InvalidBudgetCatalog(_))));
    }

    #[test]
    fn default_catalog_has_expected_ceilings() {
        let catalog = BudgetCatalog::default();

        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog.max_amount_for("Comida y aseo"), Some(100_000));
        assert_eq!(catalog.max_amount_for("Extras Casa"), Some(1_000_000));
        assert_eq!(catalog.max_amount_for("Medicina Perros"), Some(100_000));
    }

    #[test]
    fn unknown_category_has_no_ceiling() {
        let catalog = BudgetCatalog::default();

        assert_eq!(catalog.max_amount_for("Lotería"), None);
    }

    #[test]
    fn iteration_preserves_catalog_order() {
        let catalog = BudgetCatalog::new(vec![
            CategoryBudget {
                name: "Gasolina".to_string(),
                max_amount: 100_000,
            },
            CategoryBudget {
                name: "Clases".to_string(),
                max_amount: 200_000,
            },
        ])
        .unwrap();

        let names: Vec<_> = catalog.iter().map(|entry| entry.name.as_str()).collect();

        assert_eq!(names, ["Gasolina", "Clases"]);
    }

    #[test]
    fn from_json_file_parses_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Gasolina", "max_amount": 150000}}, {{"name": "Peajes", "max_amount": 50000}}]"#
        )
        .unwrap();

        let catalog = BudgetCatalog::from_json_file(file.path()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.max_amount_for("Gasolina"), Some(150_000));
        assert_eq!(catalog.max_amount_for("Peajes"), Some(50_000));
    }

    #[test]
    fn from_json_file_fails_on_missing_file() {
        let result = BudgetCatalog::from_json_file("/no/such/catalog.json");

        assert!(matches!(result, Err(Error::InvalidBudgetCatalog(_))));
    }
}
