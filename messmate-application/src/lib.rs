#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod period;
pub mod ports;
pub mod report_builder;
pub mod session;
pub mod summary;

pub use error::ReportError;
pub use period::{DateRange, ReportingPeriod};
pub use ports::{BazaarLedger, DepositLedger, MealLog, MemberDirectory, MemberNames};
pub use report_builder::{ReportBuilder, SettlementResult};
pub use session::{MessId, SessionContext};
pub use summary::{MealShare, PeriodSummary};
