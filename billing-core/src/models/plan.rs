//! Tuition plan model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tuition plan.
///
/// Cycle length is a fixed number of days, not a calendar month: a 30-day
/// plan drifts through month boundaries on purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuitionPlan {
    pub plan_id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    /// Length of one billing cycle in days.
    pub period_days: i64,
    /// When true the first cycle starts on the enrollment date itself;
    /// otherwise the first cycle starts one period after enrollment.
    pub charge_at_enrollment: bool,
    pub price: Decimal,
    pub metadata: Option<serde_json::Value>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl TuitionPlan {
    /// Only a positive cycle length can produce cycles.
    pub fn has_valid_period(&self) -> bool {
        self.period_days > 0
    }
}
