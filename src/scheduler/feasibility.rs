//! Feasibility predicates for staff-task matches.
//!
//! Three independent checks gate a match, evaluated in order with
//! short-circuit:
//!
//! | Predicate | Holds when |
//! |-----------|-----------|
//! | Containment | task window lies inside the staff's remaining window |
//! | Reachability | travel time + window start <= task start |
//! | Capacity | tasks committed that day < limit (or no limit) |
//!
//! A predicate that cannot be computed yields [`Feasibility::Error`],
//! which callers must treat as infeasible.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::StaffState;
use crate::config::TaskLimit;
use crate::models::{Location, Task};
use crate::travel::{TravelError, TravelEstimator};

/// Why a feasible-looking candidate was turned down.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// No shift on the task's day.
    Unavailable,
    /// Task window falls outside the remaining window.
    OutsideWindow,
    /// Cannot arrive before the task starts.
    Unreachable {
        /// Travel time from the effective location (minutes).
        travel_minutes: f64,
        /// Earliest arrival (window start + travel, minute of day).
        arrival: f64,
    },
    /// Daily task limit reached.
    CapacityReached {
        /// Tasks committed on the day.
        current: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no shift on the task's day"),
            Self::OutsideWindow => write!(f, "task window outside remaining availability"),
            Self::Unreachable { arrival, .. } => {
                write!(f, "earliest arrival at minute {arrival:.1} is too late")
            }
            Self::CapacityReached { current, limit } => {
                write!(f, "{current} of {limit} daily tasks already committed")
            }
        }
    }
}

/// Outcome of checking one staff member against one task.
#[derive(Debug, Clone, PartialEq)]
pub enum Feasibility {
    /// Every predicate holds.
    Feasible,
    /// A predicate does not hold.
    Infeasible(Rejection),
    /// A predicate could not be computed.
    Error(TravelError),
}

impl Feasibility {
    /// Whether the candidate may take the task.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible)
    }
}

/// Location lookup by identifier.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex<'a> {
    by_id: HashMap<&'a str, &'a Location>,
}

impl<'a> LocationIndex<'a> {
    /// Indexes a location pool. Later duplicates shadow earlier ones.
    pub fn new(locations: &'a [Location]) -> Self {
        Self {
            by_id: locations
                .iter()
                .map(|l| (l.location_id.as_str(), l))
                .collect(),
        }
    }

    /// Looks up a location.
    pub fn get(&self, location_id: &str) -> Result<&'a Location, TravelError> {
        self.by_id
            .get(location_id)
            .copied()
            .ok_or_else(|| TravelError::UnknownLocation(location_id.to_string()))
    }
}

/// Evaluates the three predicates for one scheduling pass.
#[derive(Debug, Clone)]
pub struct FeasibilityEvaluator<'a> {
    locations: LocationIndex<'a>,
    estimator: TravelEstimator,
    limit: TaskLimit,
}

impl<'a> FeasibilityEvaluator<'a> {
    /// Creates an evaluator over a location pool.
    pub fn new(locations: &'a [Location], estimator: TravelEstimator, limit: TaskLimit) -> Self {
        Self {
            locations: LocationIndex::new(locations),
            estimator,
            limit,
        }
    }

    /// Runs containment, reachability, then capacity; stops at the first
    /// predicate that does not hold.
    pub fn evaluate(&self, state: &StaffState<'_>, task: &Task) -> Feasibility {
        let contained = self.containment(state, task);
        if !contained.is_feasible() {
            return contained;
        }
        let reachable = self.reachability(state, task);
        if !reachable.is_feasible() {
            return reachable;
        }
        self.capacity(state)
    }

    /// Task window inside the staff's remaining window, on the same day.
    pub fn containment(&self, state: &StaffState<'_>, task: &Task) -> Feasibility {
        match state.availability.window() {
            None => Feasibility::Infeasible(Rejection::Unavailable),
            Some(_) if state.availability.contains(&task.slot) => Feasibility::Feasible,
            Some(_) => Feasibility::Infeasible(Rejection::OutsideWindow),
        }
    }

    /// Travel from the effective location finishes before the task starts,
    /// counting from the start of the remaining window.
    pub fn reachability(&self, state: &StaffState<'_>, task: &Task) -> Feasibility {
        let Some(window) = state.availability.window() else {
            return Feasibility::Infeasible(Rejection::Unavailable);
        };
        let travel = self
            .locations
            .get(state.location_id)
            .and_then(|from| {
                let to = self.locations.get(&task.location_id)?;
                self.estimator.travel_minutes(from, to)
            });

        match travel {
            Err(err) => Feasibility::Error(err),
            Ok(travel_minutes) => {
                let arrival = travel_minutes + f64::from(window.slot_start);
                if arrival <= f64::from(task.slot.slot_start) {
                    Feasibility::Feasible
                } else {
                    Feasibility::Infeasible(Rejection::Unreachable {
                        travel_minutes,
                        arrival,
                    })
                }
            }
        }
    }

    /// Fewer tasks committed on the day than the limit.
    pub fn capacity(&self, state: &StaffState<'_>) -> Feasibility {
        match self.limit {
            TaskLimit::Limit(limit) if !self.limit.admits(state.committed_count()) => {
                Feasibility::Infeasible(Rejection::CapacityReached {
                    current: state.committed_count(),
                    limit,
                })
            }
            _ => Feasibility::Feasible,
        }
    }
}
