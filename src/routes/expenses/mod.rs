pub mod queries;
pub mod routes;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// MODELS

/// The fixed set of spending categories. Stored as VARCHAR, so the derive
/// renames must match the column values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Dining")]
    #[sqlx(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    #[sqlx(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    #[sqlx(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills & Utilities")]
    #[sqlx(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Entertainment")]
    #[sqlx(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Healthcare")]
    #[sqlx(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    #[sqlx(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    #[sqlx(rename = "Travel")]
    Travel,
    #[serde(rename = "Home & Garden")]
    #[sqlx(rename = "Home & Garden")]
    HomeAndGarden,
    #[serde(rename = "Personal Care")]
    #[sqlx(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Work & Business")]
    #[sqlx(rename = "Work & Business")]
    WorkAndBusiness,
    #[serde(rename = "Gifts & Donations")]
    #[sqlx(rename = "Gifts & Donations")]
    GiftsAndDonations,
    #[serde(rename = "Other")]
    #[sqlx(rename = "Other")]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 13] = [
        ExpenseCategory::FoodAndDining,
        ExpenseCategory::Transportation,
        ExpenseCategory::Shopping,
        ExpenseCategory::BillsAndUtilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Education,
        ExpenseCategory::Travel,
        ExpenseCategory::HomeAndGarden,
        ExpenseCategory::PersonalCare,
        ExpenseCategory::WorkAndBusiness,
        ExpenseCategory::GiftsAndDonations,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::FoodAndDining => "Food & Dining",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::BillsAndUtilities => "Bills & Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::HomeAndGarden => "Home & Garden",
            ExpenseCategory::PersonalCare => "Personal Care",
            ExpenseCategory::WorkAndBusiness => "Work & Business",
            ExpenseCategory::GiftsAndDonations => "Gifts & Donations",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        ExpenseCategory::Other
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTOS

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub name: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub category: ExpenseCategory,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub category: Option<ExpenseCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStatsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// HELPER FUNCTIONS

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Please provide an expense name".to_string());
    }

    if name.len() > 100 {
        return Err("Expense name cannot be more than 100 characters".to_string());
    }

    Ok(())
}

pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative".to_string());
    }

    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() > 500 {
        return Err("Description cannot be more than 500 characters".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_is_complete() {
        assert_eq!(ExpenseCategory::ALL.len(), 13);
        // "Other" is last, matching the order clients display
        assert_eq!(ExpenseCategory::ALL[12], ExpenseCategory::Other);
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&ExpenseCategory::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");

        let parsed: ExpenseCategory = serde_json::from_str("\"Bills & Utilities\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::BillsAndUtilities);
    }

    #[test]
    fn test_category_rejects_unknown() {
        let parsed: Result<ExpenseCategory, _> = serde_json::from_str("\"Groceries\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_category_defaults_to_other() {
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::Other);

        let body: CreateExpenseRequest =
            serde_json::from_str(r#"{"name": "coffee", "amount": 3.5}"#).unwrap();
        assert_eq!(body.category, ExpenseCategory::Other);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for category in ExpenseCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::ZERO).is_ok());
        assert!(validate_amount(Decimal::new(1999, 2)).is_ok());
        assert!(validate_amount(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Lunch").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }
}
