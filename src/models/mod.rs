//! Scheduling domain models.
//!
//! Provides the data types for the task-to-staff assignment problem and
//! its results.
//!
//! # Domain Mappings
//!
//! | task-schedule | Field service | Home care | Delivery |
//! |---------------|---------------|-----------|----------|
//! | Task | Work order | Visit | Drop-off |
//! | Staff | Technician | Caregiver | Courier |
//! | Slot | Appointment window | Visit window | Delivery window |
//! | Location | Customer site | Patient home | Address |

mod location;
mod schedule;
mod slot;
mod staff;
mod task;

pub use location::{Location, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use schedule::{GenerateResponse, ScheduleOutcome, ScheduleResponse};
pub use slot::{Availability, Slot, MINUTES_PER_DAY};
pub use staff::Staff;
pub use task::{Task, TaskStatus};
