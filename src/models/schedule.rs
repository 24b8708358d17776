//! Schedule outcome and response models.
//!
//! A scheduling run splits the input tasks into two disjoint collections:
//! tasks that remain open and tasks that were scheduled during the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Location, Staff, Task};

/// Result of one scheduling pass.
///
/// `open` and `scheduled` partition the input tasks. Both keep the
/// input order of the tasks they hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Tasks no staff member could take.
    pub open: Vec<Task>,
    /// Tasks assigned during the pass.
    pub scheduled: Vec<Task>,
}

/// The full response of a scheduling request.
///
/// Mirrors the service response body: the remaining open tasks, the
/// locations, the scheduled tasks, and the staff pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    /// Tasks still open after the pass.
    pub new_tasks: Vec<Task>,
    /// Location pool.
    pub locations: Vec<Location>,
    /// Tasks scheduled during the pass.
    pub current_tasks: Vec<Task>,
    /// Staff pool.
    pub staffs: Vec<Staff>,
}

/// Response body of a generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Generated locations.
    pub locations: Vec<Location>,
    /// Generated open tasks.
    pub new_tasks: Vec<Task>,
}

impl ScheduleOutcome {
    /// Creates an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled tasks.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Number of open tasks.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Total number of tasks across both collections.
    pub fn total_count(&self) -> usize {
        self.open.len() + self.scheduled.len()
    }

    /// Staff member assigned to a task, if the task was scheduled.
    pub fn assignee_of(&self, task_id: &str) -> Option<&str> {
        self.scheduled
            .iter()
            .find(|t| t.task_id == task_id)
            .and_then(|t| t.assigned_staff_id.as_deref())
    }

    /// All tasks scheduled for a staff member.
    pub fn tasks_for_staff(&self, staff_id: &str) -> Vec<&Task> {
        self.scheduled
            .iter()
            .filter(|t| t.is_assigned_to(staff_id))
            .collect()
    }

    /// Tasks scheduled for a staff member on one day.
    pub fn tasks_for_staff_on(&self, staff_id: &str, date: NaiveDate) -> Vec<&Task> {
        self.scheduled
            .iter()
            .filter(|t| t.is_assigned_to(staff_id) && t.date() == date)
            .collect()
    }

    /// Builds the service response around this outcome.
    pub fn into_response(self, locations: Vec<Location>, staffs: Vec<Staff>) -> ScheduleResponse {
        ScheduleResponse {
            new_tasks: self.open,
            locations,
            current_tasks: self.scheduled,
            staffs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_outcome() -> ScheduleOutcome {
        ScheduleOutcome {
            open: vec![Task::new("t3", "loc1", Slot::new(day(1), 100, 200))],
            scheduled: vec![
                Task::new("t1", "loc1", Slot::new(day(1), 10, 12)).assign_to("s1"),
                Task::new("t2", "loc2", Slot::new(day(2), 10, 12)).assign_to("s1"),
                Task::new("t4", "loc2", Slot::new(day(1), 30, 40)).assign_to("s2"),
            ],
        }
    }

    #[test]
    fn test_counts() {
        let o = sample_outcome();
        assert_eq!(o.scheduled_count(), 3);
        assert_eq!(o.open_count(), 1);
        assert_eq!(o.total_count(), 4);
    }

    #[test]
    fn test_assignee_of() {
        let o = sample_outcome();
        assert_eq!(o.assignee_of("t1"), Some("s1"));
        assert_eq!(o.assignee_of("t4"), Some("s2"));
        assert_eq!(o.assignee_of("t3"), None);
        assert_eq!(o.assignee_of("t99"), None);
    }

    #[test]
    fn test_tasks_for_staff() {
        let o = sample_outcome();
        assert_eq!(o.tasks_for_staff("s1").len(), 2);
        assert_eq!(o.tasks_for_staff_on("s1", day(1)).len(), 1);
        assert_eq!(o.tasks_for_staff_on("s1", day(3)).len(), 0);
    }

    #[test]
    fn test_response_shape() {
        let response = sample_outcome().into_response(
            vec![Location::new("loc1", 0.0, 0.0)],
            vec![Staff::new("s1", "loc1")],
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["newTasks"].as_array().unwrap().len(), 1);
        assert_eq!(json["currentTasks"].as_array().unwrap().len(), 3);
        assert_eq!(json["locations"].as_array().unwrap().len(), 1);
        assert_eq!(json["staffs"].as_array().unwrap().len(), 1);
    }
}
