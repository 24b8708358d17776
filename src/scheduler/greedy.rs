//! First-fit greedy task scheduler.
//!
//! # Algorithm
//!
//! 1. Visit tasks in input order (no re-sorting).
//! 2. For each task, visit staff in input order.
//! 3. Resolve the staff member's state on the task's day from the tasks
//!    scheduled so far, then evaluate containment, reachability, capacity.
//! 4. Assign the task to the first feasible staff member; otherwise it
//!    stays open.
//!
//! The input tasks are consumed once. Open and scheduled collections are
//! built fresh, so each task lands in exactly one of them. Assignments are
//! never revisited.
//!
//! # Complexity
//! O(n * m * k) where n=tasks, m=staff, k=tasks scheduled so far.

use std::sync::Arc;

use tracing::warn;

use super::{Feasibility, FeasibilityEvaluator, ScheduleObserver, StaffState, TracingObserver};
use crate::config::SchedulerConfig;
use crate::error::ScheduleResult;
use crate::models::{Location, ScheduleOutcome, ScheduleResponse, Staff, Task};
use crate::travel::TravelEstimator;
use crate::validation::validate_input;

/// Input container for one scheduling pass.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Pass parameters.
    pub config: SchedulerConfig,
    /// Location pool.
    pub locations: Vec<Location>,
    /// Open tasks, in processing order.
    pub tasks: Vec<Task>,
    /// Staff pool, in candidate order.
    pub staff: Vec<Staff>,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(
        config: SchedulerConfig,
        locations: Vec<Location>,
        tasks: Vec<Task>,
        staff: Vec<Staff>,
    ) -> Self {
        Self {
            config,
            locations,
            tasks,
            staff,
        }
    }
}

/// First-fit greedy scheduler.
///
/// Deterministic: identical inputs produce identical assignments.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use task_schedule::config::{SchedulerConfig, TaskLimit};
/// use task_schedule::models::{Location, Slot, Staff, Task};
/// use task_schedule::scheduler::TaskScheduler;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let locations = vec![Location::new("loc1", 10.0, 20.0)];
/// let staff = vec![Staff::new("staff1", "loc1").with_shift(Slot::new(day, 8, 18))];
/// let tasks = vec![Task::new("task1", "loc1", Slot::new(day, 10, 12))];
///
/// let scheduler = TaskScheduler::new(SchedulerConfig::new(TaskLimit::Unlimited, 60.0));
/// let outcome = scheduler.schedule(&locations, tasks, &staff).unwrap();
/// assert_eq!(outcome.assignee_of("task1"), Some("staff1"));
/// ```
#[derive(Debug, Clone)]
pub struct TaskScheduler {
    config: SchedulerConfig,
    observer: Arc<dyn ScheduleObserver>,
}

impl TaskScheduler {
    /// Creates a scheduler that reports through `tracing`.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Sets the event observer.
    pub fn with_observer(mut self, observer: Arc<dyn ScheduleObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Assigns open tasks to staff.
    ///
    /// # Errors
    /// - [`ScheduleError::Travel`](crate::error::ScheduleError::Travel) if
    ///   the configured velocity is unusable.
    /// - [`ScheduleError::InvalidInput`](crate::error::ScheduleError::InvalidInput)
    ///   if validation fails. Nothing is assigned in either case.
    ///
    /// A task nobody can take is not an error: it is returned as open.
    pub fn schedule(
        &self,
        locations: &[Location],
        tasks: Vec<Task>,
        staff: &[Staff],
    ) -> ScheduleResult<ScheduleOutcome> {
        let estimator = TravelEstimator::new(self.config.transition_velocity)?;
        if let Err(errors) = validate_input(locations, &tasks, staff) {
            warn!(errors = errors.len(), "rejecting scheduling input");
            return Err(errors.into());
        }

        let evaluator =
            FeasibilityEvaluator::new(locations, estimator, self.config.assign_max_num_tasks);
        self.observer.run_started(tasks.len(), staff.len());

        let mut outcome = ScheduleOutcome::new();
        for task in tasks {
            match self.find_eligible_staff(&task, staff, &outcome.scheduled, &evaluator) {
                Some(staff_id) => {
                    self.observer.task_assigned(&task.task_id, staff_id);
                    outcome.scheduled.push(task.assign_to(staff_id));
                }
                None => {
                    self.observer.task_left_open(&task.task_id);
                    outcome.open.push(task);
                }
            }
        }

        self.observer
            .run_finished(outcome.scheduled_count(), outcome.open_count());
        Ok(outcome)
    }

    /// Runs a request and wraps the outcome in the service response.
    ///
    /// Uses the request's parameters and this scheduler's observer.
    pub fn schedule_request(&self, request: ScheduleRequest) -> ScheduleResult<ScheduleResponse> {
        let scheduler = Self {
            config: request.config,
            observer: Arc::clone(&self.observer),
        };
        let outcome = scheduler.schedule(&request.locations, request.tasks, &request.staff)?;
        Ok(outcome.into_response(request.locations, request.staff))
    }

    /// First staff member, in input order, for whom every predicate holds.
    fn find_eligible_staff<'s>(
        &self,
        task: &Task,
        staff: &'s [Staff],
        scheduled: &[Task],
        evaluator: &FeasibilityEvaluator<'_>,
    ) -> Option<&'s str> {
        let date = task.date();
        staff.iter().find_map(|member| {
            let state = StaffState::resolve(member, scheduled, date);
            match evaluator.evaluate(&state, task) {
                Feasibility::Feasible => Some(member.staff_id.as_str()),
                Feasibility::Infeasible(reason) => {
                    self.observer
                        .candidate_rejected(&task.task_id, &member.staff_id, &reason);
                    None
                }
                Feasibility::Error(err) => {
                    self.observer
                        .candidate_failed(&task.task_id, &member.staff_id, &err);
                    None
                }
            }
        })
    }
}
