//! Read-only aggregate views derived from the entity repositories.
//!
//! These are recomputed from the current data set on every call; nothing is
//! cached or incrementally maintained.

use serde::Serialize;
use utoipa::ToSchema;

/// Gender head-count for the students of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenderDistribution {
    pub male: i64,
    pub female: i64,
    pub other: i64,
}

/// School-wide financial totals.
///
/// `total_fees` is the sum over classes of `student_fees × enrolled student
/// count`; `net_balance = total_fees − total_salaries`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FinancialSummary {
    pub total_salaries: f64,
    pub total_fees: f64,
    pub net_balance: f64,
}
