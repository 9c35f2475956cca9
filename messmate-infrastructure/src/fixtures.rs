use crate::memory::{
    InMemoryBazaarLedger, InMemoryDepositLedger, InMemoryDirectory, InMemoryMealLog,
};
use messmate_domain::{BazaarExpense, Deposit, LedgerError, MealSlots, Member};
use serde::Deserialize;
use thiserror::Error;

/// Demo dataset: one month of a four-member mess.
pub const SAMPLE_SEED: &str = r#"{
  "members": [
    { "id": 1, "name": "John Doe", "role": "manager", "status": "active" },
    { "id": 2, "name": "David Shawon", "role": "member", "status": "active" },
    { "id": 3, "name": "Bob Zesan", "role": "viewer", "status": "inactive" },
    { "id": 4, "name": "Alice Masum", "role": "member", "status": "active" }
  ],
  "meal_days": [
    {
      "date": "2024-06-01",
      "breakfast": [1, 2, 3, 4],
      "lunch": [1, 2, 3, 4],
      "dinner": [1, 2, 3, 4]
    },
    {
      "date": "2024-06-02",
      "breakfast": [1, 2, 4],
      "lunch": [1, 2, 3, 4],
      "dinner": [1, 2, 3]
    },
    {
      "date": "2024-06-03",
      "breakfast": [1, 2, 3, 4],
      "lunch": [1, 2, 3, 4],
      "dinner": [1, 2, 3, 4]
    },
    {
      "date": "2024-06-04",
      "breakfast": [1, 2],
      "lunch": [1, 2, 3, 4],
      "dinner": [1, 2, 3, 4]
    },
    {
      "date": "2024-06-05",
      "breakfast": [1, 2, 3, 4],
      "lunch": [1, 2, 3, 4],
      "dinner": [1, 2, 3, 4]
    }
  ],
  "expenses": [
    { "date": "2024-06-01", "amount": "1200", "description": "Weekly grocery shopping" },
    { "date": "2024-06-08", "amount": "1100", "description": "Weekly grocery shopping" },
    { "date": "2024-06-15", "amount": "1300", "description": "Weekly grocery shopping" },
    { "date": "2024-06-22", "amount": "1000", "description": "Weekly grocery shopping" }
  ],
  "deposits": [
    { "date": "2024-06-01", "member_id": 1, "amount": "1000" },
    { "date": "2024-06-01", "member_id": 2, "amount": "1000" },
    { "date": "2024-06-02", "member_id": 3, "amount": "800" },
    { "date": "2024-06-01", "member_id": 4, "amount": "1000" },
    { "date": "2024-06-15", "member_id": 1, "amount": "500" }
  ]
}"#;

#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub members: Vec<Member>,
    pub meal_days: Vec<MealSlots>,
    pub expenses: Vec<BazaarExpense>,
    pub deposits: Vec<Deposit>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub fn load_seed(json: &str) -> Result<SeedData, SeedError> {
    Ok(serde_json::from_str(json)?)
}

pub struct SeededLedgers {
    pub directory: InMemoryDirectory,
    pub meal_log: InMemoryMealLog,
    pub bazaar: InMemoryBazaarLedger,
    pub deposits: InMemoryDepositLedger,
}

/// Fills fresh in-memory ledgers from seed data, running every entry through
/// the validated insertion path.
pub fn seed_ledgers(seed: SeedData) -> Result<SeededLedgers, SeedError> {
    let mut directory = InMemoryDirectory::new();
    for member in seed.members {
        directory.add(member);
    }

    let mut meal_log = InMemoryMealLog::new();
    for day in &seed.meal_days {
        meal_log.add_slots(day);
    }

    let mut bazaar = InMemoryBazaarLedger::new();
    for expense in seed.expenses {
        bazaar.add(expense)?;
    }

    let mut deposits = InMemoryDepositLedger::new();
    for deposit in seed.deposits {
        deposits.add(deposit)?;
    }

    Ok(SeededLedgers {
        directory,
        meal_log,
        bazaar,
        deposits,
    })
}
