use crate::period::DateRange;
use messmate_domain::{MealCount, MemberId, Money};
use rust_decimal::Decimal;

/// Aggregate figures for one reporting window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodSummary {
    pub range: DateRange,
    pub total_meal_units: MealCount,
    pub total_bazaar_spend: Money,
    pub total_deposited: Money,
    pub meal_rate: Money,
    /// Deposits minus bazaar spend: positive is a surplus, negative a deficit.
    pub remaining_balance: Money,
    pub expense_count: usize,
    pub deposit_count: usize,
    pub member_count: usize,
    pub average_meals_per_member: MealCount,
}

/// One member's slice of the period's meals and spend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MealShare {
    pub member_id: MemberId,
    pub meals: MealCount,
    /// Fraction of all meal-units in the period, 0 when nothing was logged.
    pub share_of_total: Decimal,
    pub cost_share: Money,
}
