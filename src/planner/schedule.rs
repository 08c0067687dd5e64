//! Forward schedule generation for installment accounts

use chrono::{Datelike, Duration, NaiveDate};

use crate::planner::drafts::latest_cash_in;
use crate::types::*;

/// Number of schedule slots produced when callers do not override the count
pub const DEFAULT_PERIOD_COUNT: usize = 12;

/// Produces a fixed-length forward sequence of due dates for an installment
/// account
///
/// Pure computation: no side effects, deterministic for given inputs, and a
/// fresh sequence on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleGenerator {
    frequency: Frequency,
    count: usize,
}

impl ScheduleGenerator {
    /// Create a generator with the default period count
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            count: DEFAULT_PERIOD_COUNT,
        }
    }

    /// Override the number of slots to generate
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Generate the ordered slot sequence starting from `anchor`
    ///
    /// Slot `i` is the first of the anchor month plus `i` months for a
    /// monthly schedule, `anchor + 7*i` days for weekly, and `anchor + i`
    /// days for daily. A zero count yields an empty sequence.
    pub fn generate(&self, anchor: NaiveDate) -> Vec<ScheduleSlot> {
        let mut slots = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let due_date = match self.frequency {
                Frequency::Monthly => month_start(anchor, i as u32),
                Frequency::Weekly => anchor + Duration::days(7 * i as i64),
                Frequency::Daily => anchor + Duration::days(i as i64),
            };
            slots.push(ScheduleSlot {
                due_date,
                label: self.label_for(due_date),
            });
        }
        slots
    }

    /// Derive the schedule anchor from an account's entry history
    ///
    /// When the account has received a lump sum, settlement starts one period
    /// after the latest cash-in entry (latest by economic date, tie-broken by
    /// creation time); with no cash-in on record the schedule starts at
    /// `today`. `entries` is the account's history as returned by the store.
    pub fn anchor_for(&self, entries: &[LedgerEntry], account_id: &str, today: NaiveDate) -> NaiveDate {
        match latest_cash_in(entries, account_id) {
            Some(cash_in) => self.first_due_after(cash_in.date),
            None => today,
        }
    }

    /// First due date strictly after a cash-in on `date`: the first of the
    /// following month for monthly schedules, otherwise one period later
    pub fn first_due_after(&self, date: NaiveDate) -> NaiveDate {
        match self.frequency {
            Frequency::Monthly => month_start(date, 1),
            Frequency::Weekly => date + Duration::days(7),
            Frequency::Daily => date + Duration::days(1),
        }
    }

    fn label_for(&self, date: NaiveDate) -> String {
        match self.frequency {
            Frequency::Monthly => date.format("%B %Y").to_string(),
            Frequency::Weekly | Frequency::Daily => date.format("%b %-d, %Y").to_string(),
        }
    }
}

/// First day of the month `offset` months after the month of `date`
fn month_start(date: NaiveDate, offset: u32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + offset as i32;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}
