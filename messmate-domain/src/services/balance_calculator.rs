use crate::model::{
    Deposit, MealRecord, Member, MemberId, MemberSettlement, Money, OrphanDiagnostics,
};
use indexmap::IndexMap;

/// Per-member balance derivation.
///
/// The roster is authoritative: every roster member gets a line (all-zero
/// when inactive in the ledgers), line ordering follows roster ordering, and
/// ledger entries for ids outside the roster are excluded from every total
/// and tallied in the returned diagnostics.
pub struct BalanceCalculator;

impl BalanceCalculator {
    pub fn balances(
        members: &[Member],
        records: &[MealRecord],
        deposits: &[Deposit],
        meal_rate: Money,
    ) -> (IndexMap<MemberId, MemberSettlement>, OrphanDiagnostics) {
        let mut lines: IndexMap<MemberId, MemberSettlement> = members
            .iter()
            .map(|member| (member.id, MemberSettlement::zeroed()))
            .collect();
        let mut orphans = OrphanDiagnostics::default();

        for record in records {
            for (member_id, count) in record.portions() {
                match lines.get_mut(member_id) {
                    Some(line) => line.meals_consumed += *count,
                    None => orphans.meal_entries += 1,
                }
            }
        }

        for deposit in deposits {
            match lines.get_mut(&deposit.member_id) {
                Some(line) => line.total_deposited += deposit.amount,
                None => orphans.deposits += 1,
            }
        }

        for line in lines.values_mut() {
            line.meal_cost =
                Money::from_decimal(line.meals_consumed.as_decimal() * meal_rate.as_decimal());
            line.balance = line.total_deposited - line.meal_cost;
        }

        (lines, orphans)
    }
}
