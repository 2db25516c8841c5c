//! Student billing state model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Settlement status of a billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            "overdue" => PaymentStatus::Overdue,
            _ => PaymentStatus::Pending,
        }
    }
}

/// Roster status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Inactive => "inactive",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "inactive" => EnrollmentStatus::Inactive,
            _ => EnrollmentStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentStatus::Active)
    }
}

/// Student billing state.
///
/// The store keeps exactly one due-date/status pointer per student; past
/// cycles are reconstructed from it at read time rather than persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentBilling {
    pub student_id: Uuid,
    pub tenant_id: Uuid,
    pub display_name: String,
    pub plan_id: Uuid,
    /// Anchor for cycle enumeration; never moves after creation.
    pub enrollment_date: NaiveDate,
    /// Due date of the cycle the stored status describes.
    pub overall_due_date: NaiveDate,
    pub overall_status: PaymentStatus,
    pub last_payment_date: Option<NaiveDate>,
    pub enrollment: EnrollmentStatus,
    /// Optimistic-concurrency token, bumped by the store on every write.
    pub revision: u64,
    pub metadata: Option<serde_json::Value>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

/// Billing-state update produced by settling one cycle.
///
/// The three pointer fields travel together; a partial update is not
/// expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAdvance {
    pub last_payment_date: NaiveDate,
    pub overall_due_date: NaiveDate,
    pub overall_status: PaymentStatus,
    /// True when the plan period was unusable and the due date came from
    /// the next-calendar-month fallback.
    pub period_fallback: bool,
}
