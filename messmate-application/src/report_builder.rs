use crate::{
    error::ReportError,
    period::{DateRange, ReportingPeriod},
    ports::{BazaarLedger, DepositLedger, MealLog, MemberDirectory},
    session::SessionContext,
    summary::{MealShare, PeriodSummary},
};
use chrono::NaiveDate;
use messmate_domain::{
    BalanceCalculator, BazaarExpense, CurrencyContext, Deposit, MealCount, MealRecord, Member,
    Money, SettlementCalculator, SettlementReport, compute_meal_rate, quantize_report,
};
use rust_decimal::Decimal;

/// A settlement report together with the window it was computed over
/// (`None` for the full ledger history).
#[derive(Clone, Debug, PartialEq)]
pub struct SettlementResult {
    pub report: SettlementReport,
    pub range: Option<DateRange>,
}

struct Snapshot {
    members: Vec<Member>,
    records: Vec<MealRecord>,
    expenses: Vec<BazaarExpense>,
    deposits: Vec<Deposit>,
}

/// Pulls snapshots from the four ledger ports and runs the settlement engine
/// over them, optionally restricted to a reporting window.
#[derive(Clone, Copy)]
pub struct ReportBuilder<'a> {
    directory: &'a dyn MemberDirectory,
    meal_log: &'a dyn MealLog,
    bazaar: &'a dyn BazaarLedger,
    deposits: &'a dyn DepositLedger,
    session: Option<SessionContext>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(
        directory: &'a dyn MemberDirectory,
        meal_log: &'a dyn MealLog,
        bazaar: &'a dyn BazaarLedger,
        deposits: &'a dyn DepositLedger,
    ) -> Self {
        Self {
            directory,
            meal_log,
            bazaar,
            deposits,
            session: None,
        }
    }

    /// Attributes subsequent reports to a caller identity. Used for logging
    /// only; the engine never reads it.
    pub fn for_session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    pub fn settlement(&self) -> SettlementResult {
        self.build_settlement(None)
    }

    pub fn settlement_for_period(
        &self,
        period: ReportingPeriod,
        anchor: NaiveDate,
    ) -> SettlementResult {
        self.build_settlement(Some(period.resolve(anchor)))
    }

    pub fn quantized_settlement(
        &self,
        context: CurrencyContext,
    ) -> Result<SettlementResult, ReportError> {
        let result = self.build_settlement(None);
        Ok(SettlementResult {
            report: quantize_report(&result.report, context)?,
            range: result.range,
        })
    }

    pub fn quantized_settlement_for_period(
        &self,
        period: ReportingPeriod,
        anchor: NaiveDate,
        context: CurrencyContext,
    ) -> Result<SettlementResult, ReportError> {
        let result = self.settlement_for_period(period, anchor);
        Ok(SettlementResult {
            report: quantize_report(&result.report, context)?,
            range: result.range,
        })
    }

    pub fn period_summary(&self, period: ReportingPeriod, anchor: NaiveDate) -> PeriodSummary {
        let range = period.resolve(anchor);
        let snapshot = self.snapshot(Some(range));
        self.log_request("period_summary", Some(range));

        let total_meal_units: MealCount =
            snapshot.records.iter().map(MealRecord::total_units).sum();
        let total_bazaar_spend: Money = snapshot
            .expenses
            .iter()
            .map(|expense| expense.amount)
            .sum();
        let total_deposited: Money = snapshot
            .deposits
            .iter()
            .map(|deposit| deposit.amount)
            .sum();
        let meal_rate = compute_meal_rate(&snapshot.records, &snapshot.expenses);
        let member_count = snapshot.members.len();
        let average_meals_per_member = if member_count == 0 {
            MealCount::ZERO
        } else {
            MealCount::from_decimal(
                total_meal_units.as_decimal() / Decimal::from(member_count as u64),
            )
        };

        PeriodSummary {
            range,
            total_meal_units,
            total_bazaar_spend,
            total_deposited,
            meal_rate,
            remaining_balance: total_deposited - total_bazaar_spend,
            expense_count: snapshot.expenses.len(),
            deposit_count: snapshot.deposits.len(),
            member_count,
            average_meals_per_member,
        }
    }

    /// Per-member slice of the period's meal-units and of the bazaar spend,
    /// in roster order. Members with no meals get a zero share.
    pub fn meal_shares(&self, period: ReportingPeriod, anchor: NaiveDate) -> Vec<MealShare> {
        let range = period.resolve(anchor);
        let snapshot = self.snapshot(Some(range));

        let (lines, _) = BalanceCalculator::balances(
            &snapshot.members,
            &snapshot.records,
            &[],
            Money::ZERO,
        );
        let total_units: MealCount = lines.values().map(|line| line.meals_consumed).sum();
        let total_spend: Money = snapshot
            .expenses
            .iter()
            .map(|expense| expense.amount)
            .sum();

        lines
            .into_iter()
            .map(|(member_id, line)| {
                let share_of_total = if total_units.is_zero() {
                    Decimal::ZERO
                } else {
                    line.meals_consumed.as_decimal() / total_units.as_decimal()
                };
                MealShare {
                    member_id,
                    meals: line.meals_consumed,
                    share_of_total,
                    cost_share: Money::from_decimal(total_spend.as_decimal() * share_of_total),
                }
            })
            .collect()
    }

    fn build_settlement(&self, range: Option<DateRange>) -> SettlementResult {
        let snapshot = self.snapshot(range);
        self.log_request("settlement", range);

        let report = SettlementCalculator::settle(
            &snapshot.members,
            &snapshot.records,
            &snapshot.expenses,
            &snapshot.deposits,
        );
        SettlementResult { report, range }
    }

    fn snapshot(&self, range: Option<DateRange>) -> Snapshot {
        let members = self.directory.roster();
        let mut records = self.meal_log.records();
        let mut expenses = self.bazaar.expenses();
        let mut deposits = self.deposits.deposits();

        if let Some(range) = range {
            records.retain(|record| range.contains(record.date));
            expenses.retain(|expense| range.contains(expense.date));
            deposits.retain(|deposit| range.contains(deposit.date));
        }

        Snapshot {
            members,
            records,
            expenses,
            deposits,
        }
    }

    fn log_request(&self, kind: &str, range: Option<DateRange>) {
        match &self.session {
            Some(session) => tracing::debug!(
                kind,
                member_id = session.member_id.0,
                mess_id = session.mess_id.0,
                range = ?range,
                "Report requested"
            ),
            None => tracing::debug!(kind, range = ?range, "Report requested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessId;
    use indexmap::IndexMap;
    use messmate_domain::{MemberId, MemberStatus, Role};
    use rstest::{fixture, rstest};

    struct StubDirectory(Vec<Member>);

    impl MemberDirectory for StubDirectory {
        fn roster(&self) -> Vec<Member> {
            self.0.clone()
        }
    }

    struct StubMealLog(Vec<MealRecord>);

    impl MealLog for StubMealLog {
        fn records(&self) -> Vec<MealRecord> {
            self.0.clone()
        }
    }

    struct StubBazaar(Vec<BazaarExpense>);

    impl BazaarLedger for StubBazaar {
        fn expenses(&self) -> Vec<BazaarExpense> {
            self.0.clone()
        }
    }

    struct StubDeposits(Vec<Deposit>);

    impl DepositLedger for StubDeposits {
        fn deposits(&self) -> Vec<Deposit> {
            self.0.clone()
        }
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
    }

    fn member(id: u64, name: &str) -> Member {
        Member {
            id: MemberId(id),
            name: name.to_string(),
            role: Role::Member,
            status: MemberStatus::Active,
        }
    }

    fn record(on: NaiveDate, portions: &[(u64, u32)]) -> MealRecord {
        let portions: IndexMap<MemberId, MealCount> = portions
            .iter()
            .map(|(id, count)| (MemberId(*id), MealCount::from_u32(*count)))
            .collect();
        MealRecord::try_new(on, portions).expect("valid record")
    }

    struct Fixture {
        directory: StubDirectory,
        meal_log: StubMealLog,
        bazaar: StubBazaar,
        deposits: StubDeposits,
    }

    #[fixture]
    fn ledgers() -> Fixture {
        Fixture {
            directory: StubDirectory(vec![member(1, "A"), member(2, "B")]),
            meal_log: StubMealLog(vec![
                record(date(6, 1), &[(1, 3), (2, 3)]),
                record(date(7, 1), &[(1, 2)]),
            ]),
            bazaar: StubBazaar(vec![
                BazaarExpense::try_new(date(6, 1), Money::from_i64(1200), "weekly shopping")
                    .expect("valid expense"),
                BazaarExpense::try_new(date(7, 2), Money::from_i64(500), "weekly shopping")
                    .expect("valid expense"),
            ]),
            deposits: StubDeposits(vec![
                Deposit::try_new(date(6, 1), MemberId(1), Money::from_i64(1000))
                    .expect("valid deposit"),
                Deposit::try_new(date(7, 3), MemberId(2), Money::from_i64(800))
                    .expect("valid deposit"),
            ]),
        }
    }

    fn builder(fixture: &Fixture) -> ReportBuilder<'_> {
        ReportBuilder::new(
            &fixture.directory,
            &fixture.meal_log,
            &fixture.bazaar,
            &fixture.deposits,
        )
    }

    #[rstest]
    fn full_settlement_covers_all_entries(ledgers: Fixture) {
        let result = builder(&ledgers).settlement();

        assert_eq!(result.range, None);
        assert_eq!(result.report.total_deposited(), Money::from_i64(1800));
        // 1700 spend over 8 units.
        assert_eq!(
            result.report.meal_rate,
            Money::from_decimal(Money::from_i64(1700).as_decimal() / MealCount::from_u32(8).as_decimal())
        );
    }

    #[rstest]
    fn period_settlement_excludes_entries_outside_the_window(ledgers: Fixture) {
        let result = builder(&ledgers)
            .settlement_for_period(ReportingPeriod::CurrentMonth, date(6, 15));

        assert_eq!(result.range, Some(DateRange::new(date(6, 1), date(6, 30))));
        assert_eq!(result.report.meal_rate, Money::from_i64(200));
        assert_eq!(result.report.total_deposited(), Money::from_i64(1000));

        let line = result.report.lines.get(&MemberId(1)).expect("line");
        assert_eq!(line.meals_consumed, MealCount::from_u32(3));
        assert_eq!(line.balance, Money::from_i64(400));
    }

    #[rstest]
    fn session_attribution_does_not_change_the_report(ledgers: Fixture) {
        let plain = builder(&ledgers).settlement();
        let attributed = builder(&ledgers)
            .for_session(SessionContext::new(MemberId(1), MessId(1)))
            .settlement();

        assert_eq!(plain, attributed);
    }

    #[rstest]
    fn period_summary_aggregates_the_window(ledgers: Fixture) {
        let summary =
            builder(&ledgers).period_summary(ReportingPeriod::CurrentMonth, date(6, 15));

        assert_eq!(summary.total_meal_units, MealCount::from_u32(6));
        assert_eq!(summary.total_bazaar_spend, Money::from_i64(1200));
        assert_eq!(summary.total_deposited, Money::from_i64(1000));
        assert_eq!(summary.meal_rate, Money::from_i64(200));
        assert_eq!(summary.remaining_balance, Money::from_i64(-200));
        assert_eq!(summary.expense_count, 1);
        assert_eq!(summary.deposit_count, 1);
        assert_eq!(summary.member_count, 2);
        assert_eq!(summary.average_meals_per_member, MealCount::from_u32(3));
    }

    #[rstest]
    fn empty_window_yields_zeroed_summary(ledgers: Fixture) {
        let summary =
            builder(&ledgers).period_summary(ReportingPeriod::CurrentMonth, date(1, 15));

        assert_eq!(summary.total_meal_units, MealCount::ZERO);
        assert_eq!(summary.meal_rate, Money::ZERO);
        assert_eq!(summary.remaining_balance, Money::ZERO);
        assert_eq!(summary.expense_count, 0);
    }

    #[rstest]
    fn meal_shares_partition_the_spend(ledgers: Fixture) {
        let shares = builder(&ledgers).meal_shares(ReportingPeriod::CurrentMonth, date(6, 15));

        assert_eq!(shares.len(), 2);
        let total_share: Decimal = shares.iter().map(|share| share.share_of_total).sum();
        assert_eq!(total_share, Decimal::ONE);
        let total_cost: Money = shares.iter().map(|share| share.cost_share).sum();
        assert_eq!(total_cost, Money::from_i64(1200));
        assert_eq!(shares[0].member_id, MemberId(1));
        assert_eq!(shares[0].meals, MealCount::from_u32(3));
    }

    #[rstest]
    fn meal_shares_are_zero_when_nothing_was_logged(ledgers: Fixture) {
        let shares = builder(&ledgers).meal_shares(ReportingPeriod::CurrentMonth, date(1, 15));

        assert_eq!(shares.len(), 2);
        for share in shares {
            assert_eq!(share.meals, MealCount::ZERO);
            assert_eq!(share.share_of_total, Decimal::ZERO);
            assert_eq!(share.cost_share, Money::ZERO);
        }
    }

    #[rstest]
    fn quantized_settlement_restores_the_spend_identity(ledgers: Fixture) {
        let result = builder(&ledgers)
            .quantized_settlement(CurrencyContext::bdt_default())
            .expect("quantized settlement");

        assert_eq!(result.report.total_meal_cost(), Money::from_i64(1700));
    }
}
