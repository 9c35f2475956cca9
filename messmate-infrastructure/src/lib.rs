#![warn(clippy::uninlined_format_args)]

pub mod fixtures;
pub mod memory;

pub use fixtures::{SAMPLE_SEED, SeedData, SeedError, SeededLedgers, load_seed, seed_ledgers};
pub use memory::{
    InMemoryBazaarLedger, InMemoryDepositLedger, InMemoryDirectory, InMemoryMealLog,
};
