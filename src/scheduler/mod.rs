//! Greedy task-to-staff scheduling and KPI evaluation.
//!
//! # Pipeline
//!
//! For each open task, in input order:
//!
//! 1. [`StaffState::resolve`] derives each candidate's location and
//!    remaining window on the task's day.
//! 2. [`FeasibilityEvaluator`] checks containment, reachability, capacity.
//! 3. [`TaskScheduler`] assigns the task to the first feasible candidate.
//!
//! Decisions are reported through a [`ScheduleObserver`].
//!
//! # KPI
//!
//! [`ScheduleKpi`] summarizes a pass: scheduled rate and staff utilization.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Solomon (1987), "Algorithms for the Vehicle Routing and Scheduling
//!   Problems with Time Window Constraints", Operations Research 35(2)

mod events;
mod feasibility;
mod greedy;
mod kpi;
mod state;

pub use events::{RecordingObserver, ScheduleEvent, ScheduleObserver, TracingObserver};
pub use feasibility::{Feasibility, FeasibilityEvaluator, LocationIndex, Rejection};
pub use greedy::{ScheduleRequest, TaskScheduler};
pub use kpi::ScheduleKpi;
pub use state::StaffState;
