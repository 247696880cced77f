//! Timeline progress.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Grant;

/// How far through its funded period a grant is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineProgress {
    /// Whole days since the start date, clamped to `[0, total_days]`.
    pub elapsed_days: i64,
    /// Length of the period counting both the start and end date.
    pub total_days: i64,
    /// `elapsed_days / total_days`.
    pub progress: Decimal,
}

/// Computes timeline progress for a grant at `as_of`.
///
/// Both period boundaries are inclusive, so 2023-01-01..2023-12-31 spans
/// 365 days. Evaluation dates before the start give 0 progress; dates after
/// the end give 1.
///
/// Returns [`EngineError::InvalidGrant`] when the end date is not after the
/// start date.
///
/// # Examples
///
/// ```
/// use grant_metrics::calculation::calculate_timeline;
/// use grant_metrics::models::Grant;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let grant = Grant::new(
///     "grant_001",
///     "Community Literacy",
///     Decimal::new(100_000, 0),
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
/// );
/// let timeline = calculate_timeline(&grant, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()).unwrap();
/// assert_eq!(timeline.total_days, 365);
/// assert_eq!(timeline.elapsed_days, 180);
/// ```
pub fn calculate_timeline(grant: &Grant, as_of: NaiveDate) -> EngineResult<TimelineProgress> {
    if grant.end_date() <= grant.start_date() {
        return Err(EngineError::InvalidGrant {
            grant_id: grant.id().to_string(),
            message: format!(
                "end date {} must be after start date {}",
                grant.end_date(),
                grant.start_date()
            ),
        });
    }

    let total_days = (grant.end_date() - grant.start_date()).num_days() + 1;
    let elapsed_days = (as_of - grant.start_date())
        .num_days()
        .clamp(0, total_days);
    let progress = Decimal::from(elapsed_days) / Decimal::from(total_days);

    Ok(TimelineProgress {
        elapsed_days,
        total_days,
        progress,
    })
}
