use messmate_domain::{BazaarExpense, Deposit, MealRecord, Member, MemberId};
use std::collections::HashMap;

/// Supplies the authoritative member roster, in report order.
pub trait MemberDirectory: Send + Sync {
    fn roster(&self) -> Vec<Member>;
}

/// Resolves member ids to display names for presentation.
pub trait MemberNames: Send + Sync {
    fn display_name(&self, member_id: MemberId) -> Option<&str>;
}

impl MemberNames for HashMap<MemberId, String> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.get(&member_id).map(String::as_str)
    }
}

/// Supplies a snapshot of logged meal days.
pub trait MealLog: Send + Sync {
    fn records(&self) -> Vec<MealRecord>;
}

/// Supplies a snapshot of grocery expenditures.
pub trait BazaarLedger: Send + Sync {
    fn expenses(&self) -> Vec<BazaarExpense>;
}

/// Supplies a snapshot of member contributions.
pub trait DepositLedger: Send + Sync {
    fn deposits(&self) -> Vec<Deposit>;
}
