//! Scheduling event observation.
//!
//! The scheduler reports what it decides through a [`ScheduleObserver`]
//! handed to it at construction. [`TracingObserver`] forwards events to
//! `tracing`; [`RecordingObserver`] keeps them in memory.

use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, trace, warn};

use super::Rejection;
use crate::travel::TravelError;

/// Receives scheduling events.
///
/// All methods default to no-ops.
pub trait ScheduleObserver: Send + Sync + Debug {
    /// A pass starts over `tasks` open tasks and `staff` staff members.
    fn run_started(&self, _tasks: usize, _staff: usize) {}

    /// A candidate failed a predicate.
    fn candidate_rejected(&self, _task_id: &str, _staff_id: &str, _reason: &Rejection) {}

    /// A predicate could not be computed for a candidate.
    fn candidate_failed(&self, _task_id: &str, _staff_id: &str, _error: &TravelError) {}

    /// A task was assigned.
    fn task_assigned(&self, _task_id: &str, _staff_id: &str) {}

    /// No staff member could take a task.
    fn task_left_open(&self, _task_id: &str) {}

    /// A pass finished.
    fn run_finished(&self, _scheduled: usize, _open: usize) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScheduleObserver for TracingObserver {
    fn run_started(&self, tasks: usize, staff: usize) {
        info!(tasks, staff, "scheduling pass started");
    }

    fn candidate_rejected(&self, task_id: &str, staff_id: &str, reason: &Rejection) {
        trace!(task_id, staff_id, %reason, "candidate rejected");
    }

    fn candidate_failed(&self, task_id: &str, staff_id: &str, error: &TravelError) {
        warn!(task_id, staff_id, %error, "feasibility check failed");
    }

    fn task_assigned(&self, task_id: &str, staff_id: &str) {
        debug!(task_id, staff_id, "task assigned");
    }

    fn task_left_open(&self, task_id: &str) {
        debug!(task_id, "no eligible staff");
    }

    fn run_finished(&self, scheduled: usize, open: usize) {
        info!(scheduled, open, "scheduling pass finished");
    }
}

/// An owned scheduling event.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEvent {
    RunStarted { tasks: usize, staff: usize },
    Rejected { task_id: String, staff_id: String, reason: Rejection },
    Failed { task_id: String, staff_id: String, error: TravelError },
    Assigned { task_id: String, staff_id: String },
    LeftOpen { task_id: String },
    RunFinished { scheduled: usize, open: usize },
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScheduleEvent>>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<ScheduleEvent> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ScheduleEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: ScheduleEvent) {
        self.lock().push(event);
    }
}

impl ScheduleObserver for RecordingObserver {
    fn run_started(&self, tasks: usize, staff: usize) {
        self.push(ScheduleEvent::RunStarted { tasks, staff });
    }

    fn candidate_rejected(&self, task_id: &str, staff_id: &str, reason: &Rejection) {
        self.push(ScheduleEvent::Rejected {
            task_id: task_id.to_string(),
            staff_id: staff_id.to_string(),
            reason: reason.clone(),
        });
    }

    fn candidate_failed(&self, task_id: &str, staff_id: &str, error: &TravelError) {
        self.push(ScheduleEvent::Failed {
            task_id: task_id.to_string(),
            staff_id: staff_id.to_string(),
            error: error.clone(),
        });
    }

    fn task_assigned(&self, task_id: &str, staff_id: &str) {
        self.push(ScheduleEvent::Assigned {
            task_id: task_id.to_string(),
            staff_id: staff_id.to_string(),
        });
    }

    fn task_left_open(&self, task_id: &str) {
        self.push(ScheduleEvent::LeftOpen {
            task_id: task_id.to_string(),
        });
    }

    fn run_finished(&self, scheduled: usize, open: usize) {
        self.push(ScheduleEvent::RunFinished { scheduled, open });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_order() {
        let rec = RecordingObserver::new();
        rec.run_started(2, 1);
        rec.candidate_rejected("t1", "s1", &Rejection::OutsideWindow);
        rec.task_left_open("t1");
        rec.task_assigned("t2", "s1");
        rec.run_finished(1, 1);

        assert_eq!(
            rec.events(),
            vec![
                ScheduleEvent::RunStarted { tasks: 2, staff: 1 },
                ScheduleEvent::Rejected {
                    task_id: "t1".into(),
                    staff_id: "s1".into(),
                    reason: Rejection::OutsideWindow,
                },
                ScheduleEvent::LeftOpen { task_id: "t1".into() },
                ScheduleEvent::Assigned {
                    task_id: "t2".into(),
                    staff_id: "s1".into(),
                },
                ScheduleEvent::RunFinished { scheduled: 1, open: 1 },
            ]
        );
    }

    #[test]
    fn test_tracing_observer_is_silent_without_subscriber() {
        let obs = TracingObserver;
        obs.run_started(0, 0);
        obs.candidate_failed("t", "s", &TravelError::UnknownLocation("x".into()));
        obs.run_finished(0, 0);
    }
}
