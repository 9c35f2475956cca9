#![warn(clippy::uninlined_format_args)]

pub mod settlement_presenter;
pub mod summary_presenter;
pub mod svg_table;

pub use settlement_presenter::{SettlementPresenter, SettlementView};
pub use summary_presenter::{SummaryPresenter, SummaryView};
pub use svg_table::{Alignment, SvgTable};
