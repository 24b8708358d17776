//! Task model.
//!
//! A task is a unit of field work bound to one location and one time slot.
//! It starts OPEN and becomes SCHEDULED once a staff member is assigned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Slot;

/// Assignment status of a task.
///
/// The only transition is `Open → Scheduled`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not yet assigned to any staff member.
    #[default]
    Open,
    /// Assigned to a staff member.
    Scheduled,
}

/// A task to be assigned to a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Location the task is performed at.
    pub location_id: String,
    /// Required time window.
    pub slot: Slot,
    /// Unique task identifier.
    pub task_id: String,
    /// Assignment status.
    #[serde(rename = "taskAssignmentStatus", default)]
    pub status: TaskStatus,
    /// Assigned staff member. Present iff `status` is `Scheduled`.
    #[serde(default)]
    pub assigned_staff_id: Option<String>,
}

impl Task {
    /// Creates a new open task.
    pub fn new(task_id: impl Into<String>, location_id: impl Into<String>, slot: Slot) -> Self {
        Self {
            location_id: location_id.into(),
            slot,
            task_id: task_id.into(),
            status: TaskStatus::Open,
            assigned_staff_id: None,
        }
    }

    /// Marks the task scheduled for the given staff member.
    ///
    /// Status and assignee always change together.
    pub fn assign_to(mut self, staff_id: impl Into<String>) -> Self {
        self.status = TaskStatus::Scheduled;
        self.assigned_staff_id = Some(staff_id.into());
        self
    }

    /// Calendar day the task takes place on.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.slot.start_date
    }

    /// Whether the task is still open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }

    /// Whether the task is assigned to `staff_id`.
    pub fn is_assigned_to(&self, staff_id: &str) -> bool {
        self.assigned_staff_id.as_deref() == Some(staff_id)
    }

    /// Whether status and assignee agree.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            TaskStatus::Open => self.assigned_staff_id.is_none(),
            TaskStatus::Scheduled => self.assigned_staff_id.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> Slot {
        Slot::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10, 12)
    }

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new("task1", "loc1", slot());
        assert_eq!(task.status, TaskStatus::Open);
        assert!(task.is_open());
        assert!(task.assigned_staff_id.is_none());
        assert!(task.is_consistent());
    }

    #[test]
    fn test_assign_sets_status_and_staff() {
        let task = Task::new("task1", "loc1", slot()).assign_to("staff1");
        assert_eq!(task.status, TaskStatus::Scheduled);
        assert!(task.is_assigned_to("staff1"));
        assert!(!task.is_assigned_to("staff2"));
        assert!(task.is_consistent());
    }

    #[test]
    fn test_inconsistent_task() {
        let mut task = Task::new("task1", "loc1", slot());
        task.assigned_staff_id = Some("staff1".into());
        assert!(!task.is_consistent());
    }

    #[test]
    fn test_wire_format() {
        let task = Task::new("task1", "loc1", slot());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["taskId"], "task1");
        assert_eq!(json["locationId"], "loc1");
        assert_eq!(json["taskAssignmentStatus"], "OPEN");
        assert!(json["assignedStaffId"].is_null());

        let scheduled = serde_json::to_value(task.assign_to("staff1")).unwrap();
        assert_eq!(scheduled["taskAssignmentStatus"], "SCHEDULED");
        assert_eq!(scheduled["assignedStaffId"], "staff1");
    }
}
