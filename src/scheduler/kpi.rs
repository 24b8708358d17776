//! Schedule quality metrics (KPIs).
//!
//! Summarizes a scheduling pass against the staff pool it ran on.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled Rate | scheduled / (scheduled + open) |
//! | Tasks by Staff | Scheduled tasks per staff member |
//! | Utilization | Task minutes / shift minutes, per staff member |
//! | Avg Utilization | Mean of per-staff utilization |
//!
//! Travel time is not counted as busy time.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{ScheduleOutcome, ScheduleResponse, Staff, Task};

/// Scheduling pass indicators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleKpi {
    /// Tasks assigned during the pass.
    pub scheduled_count: usize,
    /// Tasks left open.
    pub open_count: usize,
    /// Fraction of tasks scheduled (0.0..1.0).
    pub scheduled_rate: f64,
    /// Scheduled tasks per staff member (every staff member present).
    pub tasks_by_staff: HashMap<String, usize>,
    /// Per-staff utilization (0.0..1.0).
    pub utilization_by_staff: HashMap<String, f64>,
    /// Average staff utilization (0.0..1.0).
    pub avg_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from an outcome and its staff pool.
    ///
    /// Staff with no shift minutes have utilization 0.
    pub fn calculate(outcome: &ScheduleOutcome, staff: &[Staff]) -> Self {
        Self::from_tasks(&outcome.scheduled, outcome.open_count(), staff)
    }

    /// Computes KPIs from a service response.
    pub fn for_response(response: &ScheduleResponse) -> Self {
        Self::from_tasks(
            &response.current_tasks,
            response.new_tasks.len(),
            &response.staffs,
        )
    }

    fn from_tasks(scheduled: &[Task], open_count: usize, staff: &[Staff]) -> Self {
        let mut tasks_by_staff = HashMap::with_capacity(staff.len());
        let mut utilization_by_staff = HashMap::with_capacity(staff.len());

        for member in staff {
            let (count, busy) = scheduled
                .iter()
                .filter(|t| t.is_assigned_to(&member.staff_id))
                .fold((0usize, 0u32), |(n, minutes), t| {
                    (n + 1, minutes + t.slot.duration_minutes())
                });
            let available = member.total_shift_minutes();
            let utilization = if available == 0 {
                0.0
            } else {
                f64::from(busy) / f64::from(available)
            };

            tasks_by_staff.insert(member.staff_id.clone(), count);
            utilization_by_staff.insert(member.staff_id.clone(), utilization);
        }

        let avg_utilization = if utilization_by_staff.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_staff.values().sum();
            sum / utilization_by_staff.len() as f64
        };

        let total = scheduled.len() + open_count;
        let scheduled_rate = if total == 0 {
            0.0
        } else {
            scheduled.len() as f64 / total as f64
        };

        Self {
            scheduled_count: scheduled.len(),
            open_count,
            scheduled_rate,
            tasks_by_staff,
            utilization_by_staff,
            avg_utilization,
        }
    }
}
