use crate::{
    model::{BazaarExpense, Deposit, MealRecord, Member, SettlementReport},
    services::{BalanceCalculator, compute_meal_rate},
};

/// Settlement derivation service
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Composes the meal-rate and per-member balance derivations into a
    /// [`SettlementReport`]. Pure and deterministic: inputs are borrowed
    /// immutably and identical inputs always yield an identical report.
    pub fn settle(
        members: &[Member],
        records: &[MealRecord],
        expenses: &[BazaarExpense],
        deposits: &[Deposit],
    ) -> SettlementReport {
        let meal_rate = compute_meal_rate(records, expenses);
        let (lines, orphans) = BalanceCalculator::balances(members, records, deposits, meal_rate);

        if !orphans.is_empty() {
            tracing::warn!(
                orphaned_deposits = orphans.deposits,
                orphaned_meal_entries = orphans.meal_entries,
                "Ledger entries referenced member ids outside the roster"
            );
        }
        tracing::debug!(
            member_count = members.len(),
            record_count = records.len(),
            expense_count = expenses.len(),
            deposit_count = deposits.len(),
            meal_rate = %meal_rate,
            "Settlement computed"
        );

        SettlementReport {
            meal_rate,
            lines,
            orphans,
        }
    }
}
