//! Projected payment entry model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PaymentStatus;

/// One billing cycle of one student, as projected for a month view.
///
/// Entries are derived on every read and never persisted. The pair
/// `(student_id, cycle_start)` identifies a cycle uniquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub student_id: Uuid,
    pub student_name: String,
    pub plan_id: Uuid,
    pub cycle_start: NaiveDate,
    /// End of the cycle, which is the day the next cycle falls due.
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub status: PaymentStatus,
    /// Date the cycle was settled, when one is known.
    pub settled_on: Option<NaiveDate>,
}
