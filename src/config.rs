//! Service and scheduler configuration.
//!
//! [`ServiceConfig`] is the full configuration file: the planning horizon,
//! the ranges synthetic data is drawn from, and the two scheduler
//! parameters. [`SchedulerConfig`] is the part the scheduler itself reads.
//!
//! # File format
//!
//! ```toml
//! start_end_date = ["2024-01-01", "2024-01-07"]
//!
//! [location]
//! random_range = [5, 10]
//!
//! [new_task]
//! random_range = [50, 100]
//! slot_start_range = [480, 1020]
//! slot_duration = 60
//!
//! [staffs]
//! random_range = [10, 20]
//! shift_choice = [[480, 720], [780, 1020]]
//! transition_velocity = 60
//!
//! [current_task]
//! assign_max_num_tasks = 3
//! ```

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::MINUTES_PER_DAY;

/// Longest planning horizon accepted, in days between start and end date.
pub const MAX_DATE_RANGE_DAYS: i64 = 90;

/// Wire value meaning "no task limit".
pub const UNLIMITED_TASKS: i64 = -1;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field}: first value must be less than or equal to the second, got [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("start_end_date: start date {start} must not be after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("start_end_date: range of {days} days exceeds the {}-day limit", MAX_DATE_RANGE_DAYS)]
    DateRangeTooLong { days: i64 },

    #[error("slot_start_range must lie within 0-{} minutes, got [{min}, {max}]", MINUTES_PER_DAY)]
    SlotStartOutOfDay { min: u32, max: u32 },

    #[error("slot_duration must be within 1-{} minutes, got {duration}", MINUTES_PER_DAY)]
    InvalidSlotDuration { duration: u32 },

    /// Latest task start plus duration passes minute 1440.
    ///
    /// Stricter than a plain range check on `slot_start_range`: a generated
    /// task must end on the day it starts to be valid scheduler input.
    #[error("tasks starting at minute {start} with a {duration}-minute slot run past midnight")]
    SlotPastMidnight { start: u32, duration: u32 },

    /// Shift is inverted or ends after minute 1440.
    ///
    /// The upper bound is stricter than `start < end` alone: shifts never
    /// span midnight.
    #[error("shift_choice: each shift needs start < end <= {}, got [{start}, {end}]", MINUTES_PER_DAY)]
    InvalidShift { start: u32, end: u32 },

    #[error("shift_choice must contain at least one shift")]
    EmptyShiftChoice,

    #[error("transition_velocity must be positive, got {0}")]
    InvalidVelocity(f64),

    #[error("assign_max_num_tasks must be -1 or a non-negative integer, got {0}")]
    InvalidTaskLimit(i64),
}

/// Per-staff, per-day task limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TaskLimit {
    /// No limit.
    #[default]
    Unlimited,
    /// At most this many tasks per staff member per day.
    Limit(usize),
}

impl TaskLimit {
    /// Whether a staff member holding `current` tasks may take another.
    #[inline]
    pub fn admits(&self, current: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limit(max) => current < *max,
        }
    }
}

impl TryFrom<i64> for TaskLimit {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            UNLIMITED_TASKS => Ok(Self::Unlimited),
            n if n >= 0 => usize::try_from(n)
                .map(Self::Limit)
                .map_err(|_| ConfigError::InvalidTaskLimit(n)),
            n => Err(ConfigError::InvalidTaskLimit(n)),
        }
    }
}

impl From<TaskLimit> for i64 {
    fn from(limit: TaskLimit) -> Self {
        match limit {
            TaskLimit::Unlimited => UNLIMITED_TASKS,
            TaskLimit::Limit(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for TaskLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::Limit(n) => write!(f, "{n}"),
        }
    }
}

/// Parameters of a scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum tasks per staff member per day.
    pub assign_max_num_tasks: TaskLimit,
    /// Staff travel speed (km/h).
    pub transition_velocity: f64,
}

impl SchedulerConfig {
    /// Creates a scheduler configuration.
    pub fn new(assign_max_num_tasks: TaskLimit, transition_velocity: f64) -> Self {
        Self {
            assign_max_num_tasks,
            transition_velocity,
        }
    }
}

/// `[location]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Range the number of locations is drawn from.
    pub random_range: [u32; 2],
}

/// `[new_task]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaskConfig {
    /// Range the number of tasks per day is drawn from.
    pub random_range: [u32; 2],
    /// Range task start minutes are drawn from.
    pub slot_start_range: [u32; 2],
    /// Task length in minutes.
    pub slot_duration: u32,
}

/// `[staffs]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffConfig {
    /// Range the number of staff members is drawn from.
    pub random_range: [u32; 2],
    /// Candidate daily shifts as `[start, end]` minutes.
    pub shift_choice: Vec<[u32; 2]>,
    /// Travel speed (km/h).
    pub transition_velocity: f64,
}

/// `[current_task]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTaskConfig {
    /// Per-staff daily limit, `-1` for unlimited.
    pub assign_max_num_tasks: TaskLimit,
}

/// Full service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Planning horizon `[start, end]`, inclusive.
    pub start_end_date: [NaiveDate; 2],
    pub location: LocationConfig,
    pub new_task: NewTaskConfig,
    pub staffs: StaffConfig,
    pub current_task: CurrentTaskConfig,
}

impl ServiceConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks every section, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [start, end] = self.start_end_date;
        if start > end {
            return Err(ConfigError::InvalidDateRange { start, end });
        }
        let days = (end - start).num_days();
        if days > MAX_DATE_RANGE_DAYS {
            return Err(ConfigError::DateRangeTooLong { days });
        }

        check_range("location.random_range", self.location.random_range)?;
        check_range("new_task.random_range", self.new_task.random_range)?;
        check_range("new_task.slot_start_range", self.new_task.slot_start_range)?;
        check_range("staffs.random_range", self.staffs.random_range)?;

        let [s_min, s_max] = self.new_task.slot_start_range;
        if s_max > MINUTES_PER_DAY {
            return Err(ConfigError::SlotStartOutOfDay {
                min: s_min,
                max: s_max,
            });
        }
        let duration = self.new_task.slot_duration;
        if duration == 0 || duration > MINUTES_PER_DAY {
            return Err(ConfigError::InvalidSlotDuration { duration });
        }
        if s_max + duration > MINUTES_PER_DAY {
            return Err(ConfigError::SlotPastMidnight {
                start: s_max,
                duration,
            });
        }

        if self.staffs.shift_choice.is_empty() {
            return Err(ConfigError::EmptyShiftChoice);
        }
        for &[start, end] in &self.staffs.shift_choice {
            if start >= end || end > MINUTES_PER_DAY {
                return Err(ConfigError::InvalidShift { start, end });
            }
        }

        let velocity = self.staffs.transition_velocity;
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(ConfigError::InvalidVelocity(velocity));
        }

        Ok(())
    }

    /// First day of the horizon.
    pub fn start_date(&self) -> NaiveDate {
        self.start_end_date[0]
    }

    /// Last day of the horizon.
    pub fn end_date(&self) -> NaiveDate {
        self.start_end_date[1]
    }

    /// Every day of the horizon, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date()
            .iter_days()
            .take_while(move |d| *d <= self.end_date())
    }

    /// The scheduler's parameters.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::new(
            self.current_task.assign_max_num_tasks,
            self.staffs.transition_velocity,
        )
    }
}

fn check_range(field: &'static str, [min, max]: [u32; 2]) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidRange { field, min, max });
    }
    Ok(())
}
