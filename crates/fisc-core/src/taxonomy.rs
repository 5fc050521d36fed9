//! The fixed expense category taxonomy
//!
//! Every expense is classified by a (category, subcategory) pair drawn from
//! this table; income entries use a flat source label instead. The table is
//! built once per process and never mutated; validation is a lookup, not
//! string matching.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

/// Display metadata and allowed subcategories for one expense category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub subcategories: Vec<&'static str>,
    /// Hex color used by presentation layers
    pub color: &'static str,
    /// Emoji icon used by presentation layers
    pub icon: &'static str,
}

/// The process-wide taxonomy table
pub static TAXONOMY: Lazy<Taxonomy> = Lazy::new(Taxonomy::builtin);

/// Immutable two-level expense taxonomy plus income source labels
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: BTreeMap<&'static str, CategoryInfo>,
    income_sources: Vec<&'static str>,
}

impl Taxonomy {
    /// Build the built-in taxonomy table
    pub fn builtin() -> Self {
        let mut categories = BTreeMap::new();

        categories.insert(
            "Children",
            CategoryInfo {
                subcategories: vec![
                    "Childcare",
                    "Medical & Consultations",
                    "School Supplies & Toys",
                    "School Tuition",
                    "Children's Food",
                    "Children's Entertainment",
                ],
                color: "#FF6B6B",
                icon: "👶",
            },
        );
        categories.insert(
            "Entertainment",
            CategoryInfo {
                subcategories: vec![
                    "Concerts",
                    "Theatre & Opera",
                    "Cinema",
                    "Music (CDs, Downloads, etc.)",
                    "Sports Events",
                    "Video/DVD (Purchase)",
                    "Video/DVD (Rental)",
                    "Books",
                ],
                color: "#4ECDC4",
                icon: "🎭",
            },
        );
        categories.insert(
            "Food",
            CategoryInfo {
                subcategories: vec![
                    "Dining Out & Catering",
                    "Groceries",
                    "Fruits & Vegetables",
                    "Meat & Deli",
                    "Fish & Seafood",
                ],
                color: "#45B7D1",
                icon: "🍕",
            },
        );
        categories.insert(
            "Gifts and Charity",
            CategoryInfo {
                subcategories: vec!["Religious Donations", "Gifts", "Gift 1", "Gift 2"],
                color: "#FFA07A",
                icon: "🎁",
            },
        );
        categories.insert(
            "Housing",
            CategoryInfo {
                subcategories: vec![
                    "Cable/Satellite",
                    "Electricity",
                    "Gas",
                    "House Cleaning",
                    "Home Maintenance & Repairs",
                    "Utilities",
                    "Natural Gas/Oil",
                    "Internet Service",
                    "Mobile Phone",
                    "Landline Phone",
                    "Other Housing Expenses",
                    "Waste Removal & Recycling",
                    "Water & Bottled Water",
                ],
                color: "#98D8C8",
                icon: "🏠",
            },
        );
        categories.insert(
            "Insurance",
            CategoryInfo {
                subcategories: vec!["Health Insurance", "Home Insurance", "Life Insurance"],
                color: "#6C5CE7",
                icon: "🛡️",
            },
        );
        categories.insert(
            "Loans",
            CategoryInfo {
                subcategories: vec![
                    "Personal Loan",
                    "Overdraft",
                    "Credit Card",
                    "Personal Debt",
                    "Student Loan",
                ],
                color: "#FDCB6E",
                icon: "💳",
            },
        );
        categories.insert(
            "Personal Care",
            CategoryInfo {
                subcategories: vec![
                    "Clothing",
                    "Hygiene Products",
                    "Hair Salon & Manicure",
                    "Fitness & Beauty Salon",
                    "Medical & Consultations",
                ],
                color: "#FF7675",
                icon: "💄",
            },
        );
        categories.insert(
            "Pets",
            CategoryInfo {
                subcategories: vec![
                    "Pet Food",
                    "Grooming",
                    "Veterinary & Medicine",
                    "Pet Toys",
                ],
                color: "#74B9FF",
                icon: "🐾",
            },
        );
        categories.insert(
            "Savings or Investments",
            CategoryInfo {
                subcategories: vec!["Investments", "Retirement Account"],
                color: "#55EFC4",
                icon: "💰",
            },
        );
        categories.insert(
            "Taxes",
            CategoryInfo {
                subcategories: vec!["Federal Taxes", "Local Taxes", "State Taxes"],
                color: "#A29BFE",
                icon: "📊",
            },
        );
        categories.insert(
            "Transportation",
            CategoryInfo {
                subcategories: vec![
                    "Public Transport & Taxi",
                    "Fuel/Gasoline",
                    "Car Insurance",
                    "License & Registration",
                    "Car Maintenance",
                    "Parking",
                    "Vehicle Taxes",
                ],
                color: "#FD79A8",
                icon: "🚗",
            },
        );

        let income_sources = vec![
            "Salary",
            "Bonus",
            "Freelance/Business",
            "Rental Income",
            "Investments",
            "Gifts & Inheritance",
            "Other Income",
        ];

        Self {
            categories,
            income_sources,
        }
    }

    /// All category names in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.keys().copied()
    }

    /// Subcategories allowed for a category, or None for unknown categories
    pub fn subcategories(&self, category: &str) -> Option<&[&'static str]> {
        self.categories
            .get(category)
            .map(|info| info.subcategories.as_slice())
    }

    /// Display metadata for a category
    pub fn category_info(&self, category: &str) -> Option<&CategoryInfo> {
        self.categories.get(category)
    }

    /// Income source labels
    pub fn income_sources(&self) -> &[&'static str] {
        &self.income_sources
    }

    /// Whether a (category, subcategory) pair exists in the taxonomy
    pub fn is_valid_expense(&self, category: &str, subcategory: &str) -> bool {
        self.subcategories(category)
            .map(|subs| subs.contains(&subcategory))
            .unwrap_or(false)
    }

    /// Whether a label is a known income source
    pub fn is_valid_income_source(&self, source: &str) -> bool {
        self.income_sources.contains(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_subcategories() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.categories().count(), 12);
        for category in taxonomy.categories() {
            let subs = taxonomy.subcategories(category).unwrap();
            assert!(!subs.is_empty(), "{} has no subcategories", category);
        }
    }

    #[test]
    fn test_valid_pairs_accepted() {
        assert!(TAXONOMY.is_valid_expense("Food", "Groceries"));
        assert!(TAXONOMY.is_valid_expense("Housing", "Electricity"));
        assert!(TAXONOMY.is_valid_expense("Transportation", "Fuel/Gasoline"));
    }

    #[test]
    fn test_unknown_pairs_rejected() {
        assert!(!TAXONOMY.is_valid_expense("Food", "Electricity"));
        assert!(!TAXONOMY.is_valid_expense("Spaceships", "Fuel"));
        assert!(!TAXONOMY.is_valid_expense("Food", ""));
    }

    #[test]
    fn test_income_sources() {
        assert!(TAXONOMY.is_valid_income_source("Salary"));
        assert!(TAXONOMY.is_valid_income_source("Other Income"));
        assert!(!TAXONOMY.is_valid_income_source("Lottery"));
        assert_eq!(TAXONOMY.income_sources().len(), 7);
    }

    #[test]
    fn test_category_display_metadata() {
        let info = TAXONOMY.category_info("Pets").unwrap();
        assert_eq!(info.icon, "🐾");
        assert!(info.color.starts_with('#'));
        assert!(TAXONOMY.category_info("Unknown").is_none());
    }
}
