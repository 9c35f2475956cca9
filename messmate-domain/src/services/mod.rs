pub mod balance_calculator;
pub mod meal_rate;
pub mod report_rounding;
pub mod settlement_calculator;

pub use balance_calculator::BalanceCalculator;
pub use meal_rate::compute_meal_rate;
pub use report_rounding::{CurrencyContext, RoundingError, RoundingMode, quantize_report};
pub use settlement_calculator::SettlementCalculator;
