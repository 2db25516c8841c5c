//! Storage collaborators.
//!
//! The platform keeps billing records in a hosted document store that this
//! crate only ever sees through the traits below; any backend that can
//! apply the billing-state patch atomically can stand in. Every operation
//! is tenant-scoped.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use coach_core::error::AppError;
use uuid::Uuid;

use crate::models::{BillingAdvance, Expense, StudentBilling, TuitionPlan};
use crate::projection::MonthWindow;

/// Read side of the roster: enrolled students and the plans they reference.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Students currently enrolled for `tenant_id`. Eventually consistent
    /// reads are acceptable here.
    async fn list_active_students(&self, tenant_id: Uuid)
        -> Result<Vec<StudentBilling>, AppError>;

    /// Every plan defined for `tenant_id`.
    async fn list_plans(&self, tenant_id: Uuid) -> Result<Vec<TuitionPlan>, AppError>;
}

/// Write side of the per-student billing state.
#[async_trait]
pub trait BillingStateSink: Send + Sync {
    /// Current billing state of one student.
    async fn fetch_student(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
    ) -> Result<StudentBilling, AppError>;

    /// Apply `advance` to the student's record if and only if its revision
    /// still equals `expected_revision`, returning the updated record. A
    /// revision mismatch is a [`AppError::Conflict`]; the pointer fields
    /// are applied together or not at all.
    async fn update_billing_state(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
        expected_revision: u64,
        advance: &BillingAdvance,
    ) -> Result<StudentBilling, AppError>;
}

/// Read side of the expense book.
#[async_trait]
pub trait ExpenseSource: Send + Sync {
    /// Expenses dated inside `window` for `tenant_id`.
    async fn list_expenses(
        &self,
        tenant_id: Uuid,
        window: MonthWindow,
    ) -> Result<Vec<Expense>, AppError>;
}
