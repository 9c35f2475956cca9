#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    BazaarExpense, Deposit, LedgerError, MealCount, MealRecord, MealSlots, Member, MemberId,
    MemberSettlement, MemberStatus, Money, OrphanDiagnostics, Role, SettlementReport,
};
pub use services::{
    BalanceCalculator, CurrencyContext, RoundingError, RoundingMode, SettlementCalculator,
    compute_meal_rate, quantize_report,
};
