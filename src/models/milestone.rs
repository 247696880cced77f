//! Milestone model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    /// Not yet started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Delivered.
    Completed,
    /// Past its expected schedule.
    Delayed,
}

/// A discrete deliverable owned by a grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier for the milestone.
    pub id: String,
    /// Short description of the deliverable.
    pub title: String,
    /// The date the milestone is due.
    pub due_date: NaiveDate,
    /// The date the milestone was completed, if recorded.
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    /// Current lifecycle state.
    pub status: MilestoneStatus,
    /// Identifiers of milestones this one depends on.
    ///
    /// Informational only: dependencies are neither validated nor used to
    /// gate completion.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Milestone {
    /// Returns true if the milestone is completed.
    ///
    /// Completion is decided by status alone; `completion_date` is not consulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use grant_metrics::models::{Milestone, MilestoneStatus};
    /// use chrono::NaiveDate;
    ///
    /// let milestone = Milestone {
    ///     id: "ms_001".to_string(),
    ///     title: "Baseline survey".to_string(),
    ///     due_date: NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
    ///     completion_date: None,
    ///     status: MilestoneStatus::Completed,
    ///     dependencies: vec![],
    /// };
    /// assert!(milestone.is_completed());
    /// ```
    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }

    /// Returns true if the milestone is not completed and its due date is before `as_of`.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.is_completed() && self.due_date < as_of
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_milestone(status: MilestoneStatus) -> Milestone {
        Milestone {
            id: "ms_001".to_string(),
            title: "Baseline survey".to_string(),
            due_date: date(2023, 3, 31),
            completion_date: None,
            status,
            dependencies: vec![],
        }
    }

    #[test]
    fn test_completion_ignores_completion_date() {
        let mut milestone = create_milestone(MilestoneStatus::InProgress);
        milestone.completion_date = Some(date(2023, 3, 1));
        assert!(!milestone.is_completed());

        let milestone = create_milestone(MilestoneStatus::Completed);
        assert!(milestone.is_completed());
    }

    #[test]
    fn test_is_overdue() {
        let milestone = create_milestone(MilestoneStatus::Pending);
        assert!(milestone.is_overdue(date(2023, 4, 1)));
        assert!(!milestone.is_overdue(date(2023, 3, 31)));

        let milestone = create_milestone(MilestoneStatus::Completed);
        assert!(!milestone.is_overdue(date(2024, 1, 1)));
    }

    #[test]
    fn test_deserialize_milestone_with_defaults() {
        let json = r#"{
            "id": "ms_002",
            "title": "Interim evaluation",
            "due_date": "2023-06-30",
            "status": "in_progress"
        }"#;

        let milestone: Milestone = serde_json::from_str(json).unwrap();
        assert_eq!(milestone.status, MilestoneStatus::InProgress);
        assert!(milestone.completion_date.is_none());
        assert!(milestone.dependencies.is_empty());
    }
}
