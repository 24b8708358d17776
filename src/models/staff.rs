//! Staff model.
//!
//! Staff members perform tasks. Each has a home location they start the
//! day from and at most one shift slot per calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Slot;

/// A staff member that can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Unique staff identifier.
    pub staff_id: String,
    /// Home location.
    pub location_id: String,
    /// Shift slots ordered by date, one per working day.
    pub available_date_shift_slots: Vec<Slot>,
}

impl Staff {
    /// Creates a staff member with no shifts.
    pub fn new(staff_id: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            location_id: location_id.into(),
            available_date_shift_slots: Vec::new(),
        }
    }

    /// Adds a shift slot.
    pub fn with_shift(mut self, shift: Slot) -> Self {
        self.available_date_shift_slots.push(shift);
        self
    }

    /// Sets all shift slots at once.
    pub fn with_shifts(mut self, shifts: Vec<Slot>) -> Self {
        self.available_date_shift_slots = shifts;
        self
    }

    /// The shift recorded for `date`, if any.
    ///
    /// If several slots share a date, the first one wins.
    pub fn shift_on(&self, date: NaiveDate) -> Option<&Slot> {
        self.available_date_shift_slots
            .iter()
            .find(|s| s.start_date == date)
    }

    /// Total shift minutes across the horizon.
    pub fn total_shift_minutes(&self) -> u32 {
        self.available_date_shift_slots
            .iter()
            .map(Slot::duration_minutes)
            .sum()
    }
}
