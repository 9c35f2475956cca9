use crate::model::{BazaarExpense, MealCount, MealRecord, Money};

/// Derives the uniform per-meal-unit rate: total bazaar spend divided by
/// total meal-units. Zero when no meal-units have been logged, so an empty
/// meal log is never a division fault.
pub fn compute_meal_rate(records: &[MealRecord], expenses: &[BazaarExpense]) -> Money {
    let total_spent: Money = expenses.iter().map(|expense| expense.amount).sum();
    let total_units: MealCount = records.iter().map(MealRecord::total_units).sum();

    if total_units.is_zero() {
        return Money::ZERO;
    }
    Money::from_decimal(total_spent.as_decimal() / total_units.as_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;
    use chrono::NaiveDate;
    use indexmap::IndexMap;
    use rstest::rstest;

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    fn expense(amount: i64) -> BazaarExpense {
        BazaarExpense::try_new(day(1), Money::from_i64(amount), "groceries")
            .expect("valid expense")
    }

    fn record(portions: &[(u64, MealCount)]) -> MealRecord {
        let portions: IndexMap<MemberId, MealCount> = portions
            .iter()
            .map(|(id, count)| (MemberId(*id), *count))
            .collect();
        MealRecord::try_new(day(1), portions).expect("valid record")
    }

    #[rstest]
    #[case::whole_units(
        vec![record(&[(1, MealCount::from_u32(3)), (2, MealCount::from_u32(3))])],
        vec![expense(1200)],
        Money::from_i64(200)
    )]
    #[case::fractional_units(
        vec![record(&[(1, MealCount::new(5, 1)), (2, MealCount::new(15, 1))])],
        vec![expense(100)],
        Money::from_i64(50)
    )]
    #[case::no_meals_logged(vec![], vec![expense(1200)], Money::ZERO)]
    #[case::no_spend(
        vec![record(&[(1, MealCount::from_u32(2))])],
        vec![],
        Money::ZERO
    )]
    fn meal_rate_cases(
        #[case] records: Vec<MealRecord>,
        #[case] expenses: Vec<BazaarExpense>,
        #[case] expected: Money,
    ) {
        assert_eq!(compute_meal_rate(&records, &expenses), expected);
    }

    #[test]
    fn meal_rate_ignores_input_ordering() {
        let records = [
            record(&[(1, MealCount::from_u32(2))]),
            record(&[(2, MealCount::from_u32(4))]),
        ];
        let reversed: Vec<MealRecord> = records.iter().rev().cloned().collect();
        let expenses = [expense(300), expense(300)];
        let reversed_expenses: Vec<BazaarExpense> = expenses.iter().rev().cloned().collect();

        assert_eq!(
            compute_meal_rate(&records, &expenses),
            compute_meal_rate(&reversed, &reversed_expenses)
        );
        assert_eq!(compute_meal_rate(&records, &expenses), Money::from_i64(100));
    }
}
