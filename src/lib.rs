//! Spatiotemporal task-to-staff scheduling.
//!
//! Assigns open, time-windowed tasks at geographic locations to staff
//! members with daily shifts. A single greedy first-fit pass checks that
//! the task fits the staff member's remaining window, that they can travel
//! there in time, and that they are under their daily task limit.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Location`, `Slot`, `Task`, `Staff`,
//!   `ScheduleOutcome`
//! - **`travel`**: Great-circle travel-time estimation
//! - **`scheduler`**: Staff state, feasibility predicates, the greedy pass, KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, location refs, slots)
//! - **`config`**: Service configuration (TOML) and scheduler parameters
//! - **`generator`**: Synthetic problems drawn from a configuration
//! - **`error`**: Crate-level error type
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use task_schedule::config::{SchedulerConfig, TaskLimit};
//! use task_schedule::models::{Location, Slot, Staff, Task};
//! use task_schedule::scheduler::{ScheduleKpi, TaskScheduler};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let locations = vec![
//!     Location::new("depot", 10.0, 20.0),
//!     Location::new("site", 10.0, 20.1),
//! ];
//! let staff = vec![Staff::new("ana", "depot").with_shift(Slot::new(day, 480, 1020))];
//! let tasks = vec![
//!     Task::new("visit-1", "site", Slot::new(day, 540, 600)),
//!     Task::new("visit-2", "depot", Slot::new(day, 540, 600)),
//! ];
//!
//! let scheduler = TaskScheduler::new(SchedulerConfig::new(TaskLimit::Limit(3), 60.0));
//! let outcome = scheduler.schedule(&locations, tasks, &staff).unwrap();
//!
//! assert_eq!(outcome.assignee_of("visit-1"), Some("ana"));
//! assert_eq!(outcome.open_count(), 1);
//!
//! let kpi = ScheduleKpi::calculate(&outcome, &staff);
//! assert_eq!(kpi.scheduled_count, 1);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Solomon (1987), "Algorithms for the Vehicle Routing and Scheduling
//!   Problems with Time Window Constraints"

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod travel;
pub mod validation;

pub use error::{ScheduleError, ScheduleResult};
