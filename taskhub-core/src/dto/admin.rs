//! Admin DTOs

use serde::{Deserialize, Serialize};

/// Organization-wide counters shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_departments: u64,
    pub total_managers: u64,
    pub total_employees: u64,
    pub total_tasks: u64,
    #[serde(default)]
    pub pending_tasks: u64,
    #[serde(default)]
    pub in_progress_tasks: u64,
    #[serde(default)]
    pub completed_tasks: u64,
}

impl DashboardStats {
    /// Share of tasks completed, in percent
    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 * 100.0 / self.total_tasks as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_rate() {
        let stats = DashboardStats {
            total_tasks: 8,
            completed_tasks: 2,
            ..Default::default()
        };
        assert_eq!(stats.completion_rate(), 25.0);
        assert_eq!(DashboardStats::default().completion_rate(), 0.0);
    }
}
