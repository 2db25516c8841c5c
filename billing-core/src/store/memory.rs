//! In-memory reference store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use coach_core::error::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{BillingAdvance, Expense, StudentBilling, TuitionPlan};
use crate::projection::MonthWindow;

use super::{BillingStateSink, ExpenseSource, RosterSource};

/// In-memory store with the same contract a production adapter must honor:
/// tenant scoping on every operation and a compare-and-swap write on the
/// billing state. Backs the integration tests and local tooling.
#[derive(Default)]
pub struct InMemoryStore {
    students: RwLock<HashMap<Uuid, StudentBilling>>,
    plans: RwLock<HashMap<Uuid, TuitionPlan>>,
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a plan.
    pub async fn upsert_plan(&self, plan: TuitionPlan) {
        self.plans.write().await.insert(plan.plan_id, plan);
    }

    /// Seed or replace a student record.
    pub async fn upsert_student(&self, student: StudentBilling) {
        self.students
            .write()
            .await
            .insert(student.student_id, student);
    }

    /// Seed an expense record.
    pub async fn add_expense(&self, expense: Expense) {
        self.expenses.write().await.push(expense);
    }
}

#[async_trait]
impl RosterSource for InMemoryStore {
    async fn list_active_students(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<StudentBilling>, AppError> {
        let students = self.students.read().await;
        let mut active: Vec<StudentBilling> = students
            .values()
            .filter(|student| student.tenant_id == tenant_id && student.enrollment.is_active())
            .cloned()
            .collect();
        // Map iteration order is arbitrary; listings stay deterministic.
        active.sort_by_key(|student| student.student_id);
        Ok(active)
    }

    async fn list_plans(&self, tenant_id: Uuid) -> Result<Vec<TuitionPlan>, AppError> {
        let plans = self.plans.read().await;
        let mut listed: Vec<TuitionPlan> = plans
            .values()
            .filter(|plan| plan.tenant_id == tenant_id)
            .cloned()
            .collect();
        listed.sort_by_key(|plan| plan.plan_id);
        Ok(listed)
    }
}

#[async_trait]
impl BillingStateSink for InMemoryStore {
    async fn fetch_student(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
    ) -> Result<StudentBilling, AppError> {
        let students = self.students.read().await;
        students
            .get(&student_id)
            .filter(|student| student.tenant_id == tenant_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Student {student_id} not found")))
    }

    async fn update_billing_state(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
        expected_revision: u64,
        advance: &BillingAdvance,
    ) -> Result<StudentBilling, AppError> {
        let mut students = self.students.write().await;
        let student = students
            .get_mut(&student_id)
            .filter(|student| student.tenant_id == tenant_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Student {student_id} not found")))?;

        if student.revision != expected_revision {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Billing state of student {student_id} changed underneath the update \
                 (revision {} != expected {expected_revision})",
                student.revision
            )));
        }

        student.last_payment_date = Some(advance.last_payment_date);
        student.overall_due_date = advance.overall_due_date;
        student.overall_status = advance.overall_status;
        student.revision += 1;
        student.updated_utc = Utc::now();

        Ok(student.clone())
    }
}

#[async_trait]
impl ExpenseSource for InMemoryStore {
    async fn list_expenses(
        &self,
        tenant_id: Uuid,
        window: MonthWindow,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .iter()
            .filter(|expense| expense.tenant_id == tenant_id && window.contains(expense.date))
            .cloned()
            .collect())
    }
}
