use chrono::{Datelike, Months, NaiveDate};

/// Inclusive date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Reporting window, resolved against an explicitly supplied anchor date.
/// There is no ambient clock: callers decide what "now" means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingPeriod {
    CurrentMonth,
    PreviousMonth,
    Yearly,
    Custom(DateRange),
}

impl ReportingPeriod {
    pub fn resolve(self, anchor: NaiveDate) -> DateRange {
        match self {
            ReportingPeriod::CurrentMonth => month_of(anchor),
            ReportingPeriod::PreviousMonth => {
                let first = first_of_month(anchor);
                month_of(first.pred_opt().unwrap_or(first))
            }
            ReportingPeriod::Yearly => {
                let start =
                    NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(anchor);
                let end =
                    NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap_or(anchor);
                DateRange::new(start, end)
            }
            ReportingPeriod::Custom(range) => range,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_of(date: NaiveDate) -> DateRange {
    let start = first_of_month(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    DateRange::new(start, end)
}
