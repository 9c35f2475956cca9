use messmate_domain::RoundingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error(transparent)]
    Rounding(#[from] RoundingError),
}
