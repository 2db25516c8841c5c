//! Test helper module for billing-core integration tests.
//!
//! Provides model builders and an in-memory store harness; no external
//! services are required.

#![allow(dead_code)]

use std::sync::Arc;

use billing_core::models::{
    EnrollmentStatus, Expense, PaymentEntry, PaymentStatus, StudentBilling, TuitionPlan,
};
use billing_core::projection::first_cycle_start;
use billing_core::services::{init_metrics, Projector};
use billing_core::store::InMemoryStore;
use chrono::{Days, NaiveDate, Utc};
use coach_core::retry::RetryConfig;
use rust_decimal::Decimal;
use uuid::Uuid;

// Test constants for tenant context
pub const TEST_TENANT_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const OTHER_TENANT_ID: &str = "22222222-2222-2222-2222-222222222222";

pub fn tenant_id() -> Uuid {
    TEST_TENANT_ID.parse().unwrap()
}

pub fn other_tenant_id() -> Uuid {
    OTHER_TENANT_ID.parse().unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Build a plan for the test tenant.
pub fn plan(period_days: i64, charge_at_enrollment: bool, price: i64) -> TuitionPlan {
    TuitionPlan {
        plan_id: Uuid::new_v4(),
        tenant_id: tenant_id(),
        name: format!("{period_days}-day plan"),
        period_days,
        charge_at_enrollment,
        price: Decimal::from(price),
        metadata: None,
        created_utc: Utc::now(),
        updated_utc: Utc::now(),
    }
}

/// Build a student with explicit billing-pointer state.
pub fn student(
    plan: &TuitionPlan,
    enrollment_date: NaiveDate,
    overall_due_date: NaiveDate,
    overall_status: PaymentStatus,
    last_payment_date: Option<NaiveDate>,
) -> StudentBilling {
    StudentBilling {
        student_id: Uuid::new_v4(),
        tenant_id: plan.tenant_id,
        display_name: "Jamie Park".to_string(),
        plan_id: plan.plan_id,
        enrollment_date,
        overall_due_date,
        overall_status,
        last_payment_date,
        enrollment: EnrollmentStatus::Active,
        revision: 0,
        metadata: None,
        created_utc: Utc::now(),
        updated_utc: Utc::now(),
    }
}

/// Build a student that has never been billed: the pointer sits on the
/// first cycle's due date as pending.
pub fn fresh_student(plan: &TuitionPlan, enrollment_date: NaiveDate) -> StudentBilling {
    let first_start =
        first_cycle_start(enrollment_date, plan).expect("plan must have a valid period");
    let first_due = first_start + Days::new(plan.period_days as u64);
    student(
        plan,
        enrollment_date,
        first_due,
        PaymentStatus::Pending,
        None,
    )
}

/// Build a projected entry with the given amount and status.
pub fn entry(amount: i64, status: PaymentStatus) -> PaymentEntry {
    let cycle_start = date(2024, 3, 1);
    PaymentEntry {
        student_id: Uuid::new_v4(),
        student_name: "Jamie Park".to_string(),
        plan_id: Uuid::new_v4(),
        cycle_start,
        due_date: cycle_start + Days::new(30),
        amount: Decimal::from(amount),
        status,
        settled_on: None,
    }
}

/// Build an expense for the test tenant.
pub fn expense(amount: i64, date: NaiveDate) -> Expense {
    Expense {
        expense_id: Uuid::new_v4(),
        tenant_id: tenant_id(),
        description: "Court rental".to_string(),
        amount: Decimal::from(amount),
        date,
        category: "facilities".to_string(),
        created_utc: Utc::now(),
    }
}

/// Seed an in-memory store and wire a projector to it.
pub async fn seeded_projector(
    plans: Vec<TuitionPlan>,
    students: Vec<StudentBilling>,
    expenses: Vec<Expense>,
) -> (Projector, Arc<InMemoryStore>) {
    // Initialize metrics (idempotent across tests in one binary)
    init_metrics();

    let store = Arc::new(InMemoryStore::new());
    for plan in plans {
        store.upsert_plan(plan).await;
    }
    for student in students {
        store.upsert_student(student).await;
    }
    for expense in expenses {
        store.add_expense(expense).await;
    }

    let projector = Projector::with_store(store.clone(), RetryConfig::quick());
    (projector, store)
}
