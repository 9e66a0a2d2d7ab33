use chrono::Datelike;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::routes::expenses::ExpenseCategory;

// Projection of an expense row needed for summarization
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpenseRecord {
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

// Summary over one filtered record set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_amount: Decimal,
    pub total_count: i64,
    pub average_amount: Decimal,
    pub by_category: Vec<CategoryBucket>,
    pub monthly: Vec<MonthlyBucket>,
}

#[derive(Debug, Serialize)]
pub struct CategoryBucket {
    pub category: ExpenseCategory,
    pub total: Decimal,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
    pub count: i64,
}

/// Fold one filtered record set into the summary views.
///
/// Amounts accumulate as `Decimal`, so the totals are exact for currency
/// magnitudes. An empty input produces zero totals and empty groupings,
/// never an error.
pub fn summarize_expenses(records: &[ExpenseRecord]) -> ExpenseSummary {
    let mut total_amount = Decimal::ZERO;
    let mut by_category: Vec<CategoryBucket> = Vec::new();
    let mut monthly: Vec<MonthlyBucket> = Vec::new();

    for record in records {
        total_amount += record.amount;

        match by_category
            .iter_mut()
            .find(|b| b.category == record.category)
        {
            Some(bucket) => {
                bucket.total += record.amount;
                bucket.count += 1;
            }
            None => by_category.push(CategoryBucket {
                category: record.category,
                total: record.amount,
                count: 1,
            }),
        }

        let year = record.date.year();
        let month = record.date.month();
        match monthly.iter_mut().find(|b| b.year == year && b.month == month) {
            Some(bucket) => {
                bucket.total += record.amount;
                bucket.count += 1;
            }
            None => monthly.push(MonthlyBucket {
                year,
                month,
                total: record.amount,
                count: 1,
            }),
        }
    }

    // Largest category first; equal totals ordered by category name
    by_category.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    // Most recent period first
    monthly.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| b.month.cmp(&a.month)));

    let total_count = records.len() as i64;
    // 0 for the empty set, never a division error
    let average_amount = if total_count == 0 {
        Decimal::ZERO
    } else {
        (total_amount / Decimal::from(total_count)).round_dp(2)
    };

    ExpenseSummary {
        total_amount,
        total_count,
        average_amount,
        by_category,
        monthly,
    }
}

/// Completed tasks as a whole percentage of the total, rounded half-up.
/// A user with no tasks gets 0, not a division error.
pub fn completion_rate(completed: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }

    (completed * 200 + total) / (2 * total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn record(amount: &str, category: ExpenseCategory, date: &str) -> ExpenseRecord {
        ExpenseRecord {
            amount: amount.parse().unwrap(),
            category,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_empty_set_is_all_zeroes() {
        let summary = summarize_expenses(&[]);

        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.average_amount, Decimal::ZERO);
        assert!(summary.by_category.is_empty());
        assert!(summary.monthly.is_empty());
    }

    #[test]
    fn test_single_expense_round_trip() {
        let records = vec![record("19.99", ExpenseCategory::FoodAndDining, "2024-03-15")];
        let summary = summarize_expenses(&records);

        let expected = dec("19.99");
        assert_eq!(summary.total_amount, expected);
        assert_eq!(summary.total_count, 1);
        assert_eq!(summary.average_amount, expected);

        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].category, ExpenseCategory::FoodAndDining);
        assert_eq!(summary.by_category[0].total, expected);
        assert_eq!(summary.by_category[0].count, 1);

        assert_eq!(summary.monthly.len(), 1);
        assert_eq!(summary.monthly[0].year, 2024);
        assert_eq!(summary.monthly[0].month, 3);
        assert_eq!(summary.monthly[0].total, expected);
        assert_eq!(summary.monthly[0].count, 1);
    }

    #[test]
    fn test_totals_agree_across_views() {
        let records = vec![
            record("10.50", ExpenseCategory::FoodAndDining, "2024-01-05"),
            record("3.25", ExpenseCategory::Transportation, "2024-01-20"),
            record("99.99", ExpenseCategory::Shopping, "2024-02-11"),
            record("0.01", ExpenseCategory::FoodAndDining, "2024-02-29"),
            record("42.00", ExpenseCategory::Other, "2023-12-31"),
        ];
        let summary = summarize_expenses(&records);

        let by_category_total: Decimal = summary.by_category.iter().map(|b| b.total).sum();
        let monthly_total: Decimal = summary.monthly.iter().map(|b| b.total).sum();

        assert_eq!(summary.total_amount, by_category_total);
        assert_eq!(summary.total_amount, monthly_total);
        assert_eq!(summary.total_count, 5);
        assert_eq!(summary.average_amount, dec("31.15"));

        let by_category_count: i64 = summary.by_category.iter().map(|b| b.count).sum();
        let monthly_count: i64 = summary.monthly.iter().map(|b| b.count).sum();
        assert_eq!(by_category_count, 5);
        assert_eq!(monthly_count, 5);
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        // 0.10 summed ten times is exactly 1.00, which chained f64
        // addition does not give you
        let records: Vec<ExpenseRecord> = (1..=10)
            .map(|day| {
                record(
                    "0.10",
                    ExpenseCategory::FoodAndDining,
                    &format!("2024-03-{:02}", day),
                )
            })
            .collect();

        let summary = summarize_expenses(&records);
        assert_eq!(summary.total_amount, dec("1.00"));
    }

    #[test]
    fn test_category_order_descending_with_name_tie_break() {
        let records = vec![
            record("5.00", ExpenseCategory::Travel, "2024-03-01"),
            record("20.00", ExpenseCategory::Shopping, "2024-03-02"),
            record("5.00", ExpenseCategory::Education, "2024-03-03"),
        ];
        let summary = summarize_expenses(&records);

        assert_eq!(summary.by_category[0].category, ExpenseCategory::Shopping);
        // Equal totals: "Education" sorts before "Travel"
        assert_eq!(summary.by_category[1].category, ExpenseCategory::Education);
        assert_eq!(summary.by_category[2].category, ExpenseCategory::Travel);
    }

    #[test]
    fn test_monthly_order_most_recent_first() {
        let records = vec![
            record("1.00", ExpenseCategory::Other, "2023-11-15"),
            record("2.00", ExpenseCategory::Other, "2024-02-01"),
            record("3.00", ExpenseCategory::Other, "2024-01-31"),
            record("4.00", ExpenseCategory::Other, "2024-02-14"),
        ];
        let summary = summarize_expenses(&records);

        let periods: Vec<(i32, u32)> = summary.monthly.iter().map(|b| (b.year, b.month)).collect();
        assert_eq!(periods, vec![(2024, 2), (2024, 1), (2023, 11)]);

        assert_eq!(summary.monthly[0].total, dec("6.00"));
        assert_eq!(summary.monthly[0].count, 2);
    }

    #[test]
    fn test_completion_rate_zero_total() {
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn test_completion_rate_rounds_half_up() {
        // 1/3 = 33.33..
        assert_eq!(completion_rate(1, 3), 33);
        // 2/3 = 66.67..
        assert_eq!(completion_rate(2, 3), 67);
        // 1/8 = 12.5, half-up to 13
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(0, 5), 0);
        assert_eq!(completion_rate(5, 5), 100);
    }

    #[test]
    fn test_completion_rate_stays_in_range() {
        for total in 1..=20i64 {
            for completed in 0..=total {
                let rate = completion_rate(completed, total);
                assert!((0..=100).contains(&rate), "{completed}/{total} gave {rate}");
            }
        }
    }
}
