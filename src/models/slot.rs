//! Time slot and availability models.
//!
//! A slot is a window of minutes within one calendar day. It describes
//! either the window a task must be performed in, or the window a staff
//! member works on a given day.
//!
//! # Time Model
//! `slot_start` and `slot_end` are minutes-of-day in `[0, 1440]`.
//! The interval is closed: a task fits a window when both of its ends
//! lie within the window's ends. No slot spans midnight.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A time window scoped to a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Day the window starts on.
    pub start_date: NaiveDate,
    /// Day the window ends on (equal to `start_date`).
    pub end_date: NaiveDate,
    /// Window start (minute of day).
    pub slot_start: u32,
    /// Window end (minute of day).
    pub slot_end: u32,
}

impl Slot {
    /// Creates a single-day slot.
    pub fn new(date: NaiveDate, slot_start: u32, slot_end: u32) -> Self {
        Self {
            start_date: date,
            end_date: date,
            slot_start,
            slot_end,
        }
    }

    /// Window length in minutes (0 if the window is inverted).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.slot_end.saturating_sub(self.slot_start)
    }

    /// Whether this window lies on the same day range as `other`.
    #[inline]
    pub fn same_days(&self, other: &Self) -> bool {
        self.start_date == other.start_date && self.end_date == other.end_date
    }

    /// Whether `other` fits entirely inside this window.
    pub fn contains(&self, other: &Self) -> bool {
        self.same_days(other)
            && self.slot_start <= other.slot_start
            && self.slot_end >= other.slot_end
    }

    /// Whether the slot is well formed: ordered ends, within one day,
    /// and not past midnight.
    pub fn is_well_formed(&self) -> bool {
        self.start_date == self.end_date
            && self.slot_start <= self.slot_end
            && self.slot_end <= MINUTES_PER_DAY
    }
}

/// A staff member's remaining availability on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "slot", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    /// No shift recorded for the day.
    Unavailable,
    /// Free within the given window.
    Available(Slot),
}

impl Availability {
    /// The available window, if any.
    pub fn window(&self) -> Option<&Slot> {
        match self {
            Self::Unavailable => None,
            Self::Available(slot) => Some(slot),
        }
    }

    /// Whether the task window fits into the available window.
    ///
    /// An unavailable day contains nothing, not even zero-length windows.
    pub fn contains(&self, task_slot: &Slot) -> bool {
        self.window().is_some_and(|w| w.contains(task_slot))
    }
}
