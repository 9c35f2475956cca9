use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use chrono::NaiveDate;
use fxhash::FxHashSet;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Member,
    Viewer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

/// Roster entry. Role and status are passthrough data for consumers; the
/// settlement engine never interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub role: Role,
    pub status: MemberStatus,
}

/// Currency amount backed by `Decimal`. Ledger inputs are validated
/// non-negative at the boundary; balances are signed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self(Decimal::new(mantissa, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|money| money.0).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        Self(iter.map(|money| money.0).sum())
    }
}

/// Meal-units consumed. Fractional portions (e.g. 0.5 for a half plate) are
/// first-class.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MealCount(Decimal);

impl MealCount {
    pub const ZERO: MealCount = MealCount(Decimal::ZERO);
    pub const ONE: MealCount = MealCount(Decimal::ONE);

    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self(Decimal::new(mantissa, scale))
    }

    pub fn from_u32(value: u32) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for MealCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for MealCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for MealCount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for MealCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|count| count.0).sum())
    }
}

impl<'a> Sum<&'a MealCount> for MealCount {
    fn sum<I: Iterator<Item = &'a MealCount>>(iter: I) -> Self {
        Self(iter.map(|count| count.0).sum())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("ledger amount must not be negative (got {0})")]
    NegativeAmount(Money),
    #[error("meal count for member {member_id} must not be negative (got {count})")]
    NegativeMealCount {
        member_id: MemberId,
        count: MealCount,
    },
}

/// One day of meal attendance in the slot-array shape the meal log captures:
/// member ids present at breakfast, lunch, and dinner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlots {
    pub date: NaiveDate,
    #[serde(default)]
    pub breakfast: Vec<MemberId>,
    #[serde(default)]
    pub lunch: Vec<MemberId>,
    #[serde(default)]
    pub dinner: Vec<MemberId>,
}

/// Canonical meal record: per-member meal-unit counts for one date.
///
/// Counts are validated non-negative on construction; slot-array input is
/// normalized through [`MealRecord::from_slots`].
#[derive(Clone, Debug, PartialEq)]
pub struct MealRecord {
    pub date: NaiveDate,
    portions: IndexMap<MemberId, MealCount>,
}

impl MealRecord {
    pub fn try_new(
        date: NaiveDate,
        portions: IndexMap<MemberId, MealCount>,
    ) -> Result<Self, LedgerError> {
        for (member_id, count) in &portions {
            if count.is_negative() {
                return Err(LedgerError::NegativeMealCount {
                    member_id: *member_id,
                    count: *count,
                });
            }
        }
        Ok(Self { date, portions })
    }

    /// Normalizes a slot-array day into per-member counts. Each slot
    /// contributes at most one meal-unit per member: duplicate ids within a
    /// slot collapse.
    pub fn from_slots(slots: &MealSlots) -> Self {
        let mut portions: IndexMap<MemberId, MealCount> = IndexMap::new();
        for slot in [&slots.breakfast, &slots.lunch, &slots.dinner] {
            let mut seen = FxHashSet::default();
            for member_id in slot {
                // A member counts once per slot even if listed twice.
                if seen.insert(*member_id) {
                    *portions.entry(*member_id).or_insert(MealCount::ZERO) += MealCount::ONE;
                }
            }
        }
        Self {
            date: slots.date,
            portions,
        }
    }

    pub fn portions(&self) -> &IndexMap<MemberId, MealCount> {
        &self.portions
    }

    pub fn portion_of(&self, member_id: MemberId) -> MealCount {
        self.portions
            .get(&member_id)
            .copied()
            .unwrap_or(MealCount::ZERO)
    }

    pub fn total_units(&self) -> MealCount {
        self.portions.values().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BazaarExpense {
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
}

impl BazaarExpense {
    pub fn try_new(
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(Self {
            date,
            amount,
            description: description.into(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub date: NaiveDate,
    pub member_id: MemberId,
    pub amount: Money,
}

impl Deposit {
    pub fn try_new(
        date: NaiveDate,
        member_id: MemberId,
        amount: Money,
    ) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(Self {
            date,
            member_id,
            amount,
        })
    }
}

/// One roster member's settled position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberSettlement {
    pub meals_consumed: MealCount,
    pub total_deposited: Money,
    pub meal_cost: Money,
    pub balance: Money,
}

impl MemberSettlement {
    pub fn zeroed() -> Self {
        Self {
            meals_consumed: MealCount::ZERO,
            total_deposited: Money::ZERO,
            meal_cost: Money::ZERO,
            balance: Money::ZERO,
        }
    }
}

/// Tallies of ledger entries that referenced a member id absent from the
/// roster. Such entries are excluded from every total, but never silently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrphanDiagnostics {
    pub deposits: usize,
    pub meal_entries: usize,
}

impl OrphanDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.deposits == 0 && self.meal_entries == 0
    }
}

/// Derived settlement for a roster at a point in time. Line ordering follows
/// the roster.
#[derive(Clone, Debug, PartialEq)]
pub struct SettlementReport {
    pub meal_rate: Money,
    pub lines: IndexMap<MemberId, MemberSettlement>,
    pub orphans: OrphanDiagnostics,
}

impl SettlementReport {
    pub fn total_meal_cost(&self) -> Money {
        self.lines.values().map(|line| line.meal_cost).sum()
    }

    pub fn total_deposited(&self) -> Money {
        self.lines.values().map(|line| line.total_deposited).sum()
    }
}
