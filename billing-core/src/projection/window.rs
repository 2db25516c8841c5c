//! Calendar month windows.

use chrono::{Months, NaiveDate};
use coach_core::error::AppError;
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One calendar month as an inclusive date window.
///
/// Construction validates the month, so a window always spans exactly the
/// first through the last day of a real month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl MonthWindow {
    /// Build the window for `(year, month)`. A month outside 1 to 12, or a
    /// month the calendar cannot represent, is a caller error.
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            AppError::InvalidInput(anyhow::anyhow!("Invalid projection month {year}-{month:02}"))
        })?;
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next_month| next_month.pred_opt())
            .ok_or_else(|| {
                AppError::InvalidInput(anyhow::anyhow!(
                    "Projection month {year}-{month:02} is out of calendar range"
                ))
            })?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// True when `date` falls inside the window, both bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Human-readable label, e.g. "March 2024".
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}
