//! Domain models for billing-core.

mod entry;
mod expense;
mod plan;
mod student;

pub use entry::PaymentEntry;
pub use expense::Expense;
pub use plan::TuitionPlan;
pub use student::{BillingAdvance, EnrollmentStatus, PaymentStatus, StudentBilling};
