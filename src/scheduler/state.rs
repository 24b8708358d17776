//! Staff state resolution.
//!
//! A staff member's state on a day is derived from their shift and the
//! tasks already committed to them that day. It is recomputed for every
//! candidate check because commitments change after each assignment.

use chrono::NaiveDate;

use crate::models::{Availability, Slot, Staff, Task};

/// Where a staff member is and when they are free on one day.
///
/// Reflects the moment just after their last commitment of the day.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffState<'a> {
    /// Staff identifier.
    pub staff_id: &'a str,
    /// Effective location: home, or the site of the latest-ending task.
    pub location_id: &'a str,
    /// Tasks already committed to this staff member on the day.
    pub current_tasks: Vec<&'a Task>,
    /// Remaining availability on the day.
    pub availability: Availability,
}

impl<'a> StaffState<'a> {
    /// Resolves the state of `staff` on `date` given the scheduled tasks.
    ///
    /// # Algorithm
    /// 1. Collect the scheduled tasks assigned to this staff on `date`.
    /// 2. No shift on `date` → `Unavailable`.
    /// 3. No tasks → home location, full shift window.
    /// 4. Otherwise → location of the latest-ending task, window from
    ///    that task's end to the shift end.
    pub fn resolve(staff: &'a Staff, scheduled: &'a [Task], date: NaiveDate) -> Self {
        let current_tasks: Vec<&Task> = scheduled
            .iter()
            .filter(|t| t.is_assigned_to(&staff.staff_id) && t.date() == date)
            .collect();

        // Ties on end minute are interchangeable: only the end is used.
        let latest = current_tasks.iter().copied().max_by_key(|t| t.slot.slot_end);

        let location_id = latest.map_or(staff.location_id.as_str(), |t| t.location_id.as_str());
        let availability = match staff.shift_on(date) {
            None => Availability::Unavailable,
            Some(shift) => {
                let free_from = latest.map_or(shift.slot_start, |t| t.slot.slot_end);
                Availability::Available(Slot::new(date, free_from, shift.slot_end))
            }
        };

        Self {
            staff_id: &staff.staff_id,
            location_id,
            current_tasks,
            availability,
        }
    }

    /// Number of tasks committed on the day.
    #[inline]
    pub fn committed_count(&self) -> usize {
        self.current_tasks.len()
    }
}
