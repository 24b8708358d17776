//! Input validation for scheduling requests.
//!
//! Checks structural integrity of locations, tasks, and staff before a
//! scheduling pass. Detects:
//! - Duplicate IDs
//! - Missing location references (tasks and staff homes)
//! - Malformed slots (inverted, past midnight, spanning days)
//! - Tasks that are not open, or whose status disagrees with their assignee
//!
//! Coordinates are not checked here: a location with unusable coordinates
//! makes travel estimation fail for the candidates that touch it, and
//! those candidates are rejected one by one.

use std::collections::HashSet;

use crate::models::{Location, Slot, Staff, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task or staff member references a location that doesn't exist.
    UnknownLocation,
    /// A slot is inverted, runs past midnight, or spans several days.
    InvalidSlot,
    /// A task's status disagrees with its assigned staff member.
    InconsistentStatus,
    /// A task handed to the scheduler is already scheduled.
    NotOpen,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input of a scheduling pass.
///
/// Checks:
/// 1. No duplicate location, task, or staff IDs
/// 2. Every task and staff home references an existing location
/// 3. Every task slot and shift slot is well formed
/// 4. Every task is open with no assignee
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(locations: &[Location], tasks: &[Task], staff: &[Staff]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut location_ids = HashSet::new();
    for loc in locations {
        if !location_ids.insert(loc.location_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate location ID: {}", loc.location_id),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.task_id),
            ));
        }
        if !location_ids.contains(task.location_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLocation,
                format!(
                    "Task '{}' references unknown location '{}'",
                    task.task_id, task.location_id
                ),
            ));
        }
        if let Some(err) = check_slot(&task.slot, || format!("Task '{}'", task.task_id)) {
            errors.push(err);
        }
        if !task.is_consistent() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InconsistentStatus,
                format!(
                    "Task '{}' has status {:?} but assignee {:?}",
                    task.task_id, task.status, task.assigned_staff_id
                ),
            ));
        } else if !task.is_open() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotOpen,
                format!("Task '{}' is already scheduled", task.task_id),
            ));
        }
    }

    let mut staff_ids = HashSet::new();
    for member in staff {
        if !staff_ids.insert(member.staff_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate staff ID: {}", member.staff_id),
            ));
        }
        if !location_ids.contains(member.location_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLocation,
                format!(
                    "Staff '{}' references unknown location '{}'",
                    member.staff_id, member.location_id
                ),
            ));
        }
        for shift in &member.available_date_shift_slots {
            if let Some(err) = check_slot(shift, || {
                format!("Shift of staff '{}' on {}", member.staff_id, shift.start_date)
            }) {
                errors.push(err);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_slot(slot: &Slot, owner: impl FnOnce() -> String) -> Option<ValidationError> {
    if slot.is_well_formed() {
        return None;
    }
    Some(ValidationError::new(
        ValidationErrorKind::InvalidSlot,
        format!(
            "{} has a malformed slot {}..{} [{}, {}]",
            owner(),
            slot.start_date,
            slot.end_date,
            slot.slot_start,
            slot.slot_end
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_locations() -> Vec<Location> {
        vec![
            Location::new("loc1", 10.0, 20.0),
            Location::new("loc2", 15.0, 25.0),
        ]
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("task1", "loc1", Slot::new(day(1), 10, 12)),
            Task::new("task2", "loc2", Slot::new(day(1), 840, 900)),
        ]
    }

    fn sample_staff() -> Vec<Staff> {
        vec![Staff::new("staff1", "loc1").with_shift(Slot::new(day(1), 8, 18))]
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_locations(), &sample_tasks(), &sample_staff()).is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert!(validate_input(&[], &[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut locations = sample_locations();
        locations.push(Location::new("loc1", 0.0, 0.0));
        let mut tasks = sample_tasks();
        tasks.push(Task::new("task1", "loc1", Slot::new(day(1), 10, 12)));
        let mut staff = sample_staff();
        staff.push(Staff::new("staff1", "loc2"));

        let errors = validate_input(&locations, &tasks, &staff).unwrap_err();
        let dupes: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dupes.len(), 3);
        assert!(dupes.iter().any(|e| e.message.contains("location")));
        assert!(dupes.iter().any(|e| e.message.contains("task")));
        assert!(dupes.iter().any(|e| e.message.contains("staff")));
    }

    #[test]
    fn test_unknown_task_location() {
        let tasks = vec![Task::new("task1", "nowhere", Slot::new(day(1), 10, 12))];
        let errors = validate_input(&sample_locations(), &tasks, &sample_staff()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::UnknownLocation]);
        assert!(errors[0].message.contains("nowhere"));
    }

    #[test]
    fn test_unknown_staff_home() {
        let staff = vec![Staff::new("staff1", "nowhere")];
        let errors = validate_input(&sample_locations(), &sample_tasks(), &staff).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::UnknownLocation]);
    }

    #[test]
    fn test_coordinates_not_checked() {
        let locations = vec![
            Location::new("loc1", 10.0, 20.0),
            Location::new("loc2", -91.0, 25.0),
        ];
        assert!(validate_input(&locations, &sample_tasks(), &sample_staff()).is_ok());
    }

    #[test]
    fn test_invalid_slots() {
        let tasks = vec![Task::new("task1", "loc1", Slot::new(day(1), 12, 10))];
        let mut overnight = Slot::new(day(1), 1000, 1200);
        overnight.end_date = day(2);
        let staff = vec![Staff::new("staff1", "loc1").with_shift(overnight)];

        let errors = validate_input(&sample_locations(), &tasks, &staff).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![ValidationErrorKind::InvalidSlot, ValidationErrorKind::InvalidSlot]
        );
    }

    #[test]
    fn test_scheduled_task_rejected() {
        let tasks = vec![Task::new("task1", "loc1", Slot::new(day(1), 10, 12)).assign_to("staff1")];
        let errors = validate_input(&sample_locations(), &tasks, &sample_staff()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::NotOpen]);
    }

    #[test]
    fn test_inconsistent_status() {
        let mut task = Task::new("task1", "loc1", Slot::new(day(1), 10, 12));
        task.assigned_staff_id = Some("staff1".into());
        let errors = validate_input(&sample_locations(), &[task], &sample_staff()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InconsistentStatus]);
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new("task1", "nowhere", Slot::new(day(1), 10, 12)),
            Task::new("task2", "loc1", Slot::new(day(1), 1500, 1600)),
        ];
        let errors = validate_input(&sample_locations(), &tasks, &[]).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
