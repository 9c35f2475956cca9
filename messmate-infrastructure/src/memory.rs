use messmate_application::{BazaarLedger, DepositLedger, MealLog, MemberDirectory, MemberNames};
use messmate_domain::{
    BazaarExpense, Deposit, LedgerError, MealRecord, MealSlots, Member, MemberId,
};

/// Vector-backed roster. Later entries win when a member id is re-added, so
/// an edit is expressed by re-adding the member.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    members: Vec<Member>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: Member) {
        if let Some(existing) = self.members.iter_mut().find(|m| m.id == member.id) {
            *existing = member;
        } else {
            self.members.push(member);
        }
    }
}

impl MemberDirectory for InMemoryDirectory {
    fn roster(&self) -> Vec<Member> {
        self.members.clone()
    }
}

impl MemberNames for InMemoryDirectory {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.members
            .iter()
            .find(|member| member.id == member_id)
            .map(|member| member.name.as_str())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMealLog {
    records: Vec<MealRecord>,
}

impl InMemoryMealLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: MealRecord) {
        self.records.push(record);
    }

    /// Normalizes a slot-array day into the canonical count form before
    /// storing it.
    pub fn add_slots(&mut self, slots: &MealSlots) {
        self.records.push(MealRecord::from_slots(slots));
    }
}

impl MealLog for InMemoryMealLog {
    fn records(&self) -> Vec<MealRecord> {
        self.records.clone()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBazaarLedger {
    expenses: Vec<BazaarExpense>,
}

impl InMemoryBazaarLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects negative amounts; the engine assumes validated inputs.
    pub fn add(&mut self, expense: BazaarExpense) -> Result<(), LedgerError> {
        if expense.amount.is_negative() {
            return Err(LedgerError::NegativeAmount(expense.amount));
        }
        self.expenses.push(expense);
        Ok(())
    }
}

impl BazaarLedger for InMemoryBazaarLedger {
    fn expenses(&self) -> Vec<BazaarExpense> {
        self.expenses.clone()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDepositLedger {
    deposits: Vec<Deposit>,
}

impl InMemoryDepositLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects negative amounts; the engine assumes validated inputs.
    pub fn add(&mut self, deposit: Deposit) -> Result<(), LedgerError> {
        if deposit.amount.is_negative() {
            return Err(LedgerError::NegativeAmount(deposit.amount));
        }
        self.deposits.push(deposit);
        Ok(())
    }
}

impl DepositLedger for InMemoryDepositLedger {
    fn deposits(&self) -> Vec<Deposit> {
        self.deposits.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use messmate_domain::{MealCount, MemberStatus, Money, Role};

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    fn member(id: u64, name: &str) -> Member {
        Member {
            id: MemberId(id),
            name: name.to_string(),
            role: Role::Member,
            status: MemberStatus::Active,
        }
    }

    #[test]
    fn directory_re_add_replaces_the_entry() {
        let mut directory = InMemoryDirectory::new();
        directory.add(member(1, "Old Name"));
        directory.add(member(2, "Other"));
        directory.add(member(1, "New Name"));

        let roster = directory.roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "New Name");
        assert_eq!(directory.display_name(MemberId(1)), Some("New Name"));
        assert_eq!(directory.display_name(MemberId(9)), None);
    }

    #[test]
    fn meal_log_normalizes_slot_input() {
        let mut log = InMemoryMealLog::new();
        log.add_slots(&MealSlots {
            date: day(1),
            breakfast: vec![MemberId(1), MemberId(1)],
            lunch: vec![MemberId(1)],
            dinner: vec![],
        });

        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].portion_of(MemberId(1)), MealCount::from_u32(2));
    }

    #[test]
    fn ledgers_reject_negative_amounts() {
        let mut bazaar = InMemoryBazaarLedger::new();
        let mut deposits = InMemoryDepositLedger::new();
        let bad_expense = BazaarExpense {
            date: day(1),
            amount: Money::from_i64(-10),
            description: "refund".to_string(),
        };
        let bad_deposit = Deposit {
            date: day(1),
            member_id: MemberId(1),
            amount: Money::from_i64(-10),
        };

        assert_eq!(
            bazaar.add(bad_expense),
            Err(LedgerError::NegativeAmount(Money::from_i64(-10)))
        );
        assert_eq!(
            deposits.add(bad_deposit),
            Err(LedgerError::NegativeAmount(Money::from_i64(-10)))
        );
        assert!(bazaar.expenses().is_empty());
        assert!(deposits.deposits().is_empty());
    }
}
