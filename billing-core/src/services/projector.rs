//! Projection and settlement service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::error::AppError;
use coach_core::retry::{retry_store_call, RetryConfig};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::{BillingAdvance, Expense, PaymentEntry, StudentBilling, TuitionPlan};
use crate::projection::{advance, project_student, summarize, MonthSummary, MonthWindow};
use crate::services::metrics::{
    record_advance_conflict, record_cycle_resolved, record_error, record_period_fallback,
    record_student_skipped, PROJECTION_DURATION,
};
use crate::store::{BillingStateSink, ExpenseSource, RosterSource};

/// Skip accounting for one projection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionSkips {
    /// Students omitted entirely (missing or unusable plan).
    pub students: u32,
    /// Individual cycles dropped for unresolvable dates.
    pub cycles: u32,
}

/// Everything the reporting surface needs for one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthProjection {
    pub window: MonthWindow,
    pub entries: Vec<PaymentEntry>,
    pub expenses: Vec<Expense>,
    pub summary: MonthSummary,
    pub skipped: ProjectionSkips,
}

/// Orchestrates projection reads and settlement writes against the store
/// collaborators.
#[derive(Clone)]
pub struct Projector {
    roster: Arc<dyn RosterSource>,
    billing: Arc<dyn BillingStateSink>,
    expenses: Arc<dyn ExpenseSource>,
    retry: RetryConfig,
}

impl Projector {
    pub fn new(
        roster: Arc<dyn RosterSource>,
        billing: Arc<dyn BillingStateSink>,
        expenses: Arc<dyn ExpenseSource>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            roster,
            billing,
            expenses,
            retry,
        }
    }

    /// Wire all three collaborator roles to one backing store.
    pub fn with_store<S>(store: Arc<S>, retry: RetryConfig) -> Self
    where
        S: RosterSource + BillingStateSink + ExpenseSource + 'static,
    {
        Self::new(store.clone(), store.clone(), store, retry)
    }

    // =========================================================================
    // Projection Operations
    // =========================================================================

    /// Project every active student's cycles for `window`.
    ///
    /// Students whose plan is missing or unusable are omitted and counted,
    /// never reported with a guessed status. `today` comes from the caller
    /// so historical months replay deterministically.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, month = %window.label()))]
    pub async fn project_month(
        &self,
        tenant_id: Uuid,
        window: MonthWindow,
        today: NaiveDate,
    ) -> Result<MonthProjection, AppError> {
        require_tenant(tenant_id)?;
        let timer = PROJECTION_DURATION
            .with_label_values(&["project_month"])
            .start_timer();

        let result = self.project_month_inner(tenant_id, window, today).await;

        timer.observe_duration();
        if let Err(error) = &result {
            record_error(error.kind(), "project_month");
        }
        result
    }

    async fn project_month_inner(
        &self,
        tenant_id: Uuid,
        window: MonthWindow,
        today: NaiveDate,
    ) -> Result<MonthProjection, AppError> {
        let students = self.roster.list_active_students(tenant_id).await?;
        let plans: HashMap<Uuid, TuitionPlan> = self
            .roster
            .list_plans(tenant_id)
            .await?
            .into_iter()
            .map(|plan| (plan.plan_id, plan))
            .collect();

        let tenant_label = tenant_id.to_string();
        let mut entries = Vec::new();
        let mut skipped = ProjectionSkips::default();

        for student in &students {
            let Some(plan) = plans.get(&student.plan_id) else {
                warn!(
                    student_id = %student.student_id,
                    plan_id = %student.plan_id,
                    "Student references a missing plan, omitted from projection"
                );
                record_student_skipped(&tenant_label, "missing_plan");
                skipped.students += 1;
                continue;
            };
            if !plan.has_valid_period() {
                warn!(
                    student_id = %student.student_id,
                    plan_id = %plan.plan_id,
                    period_days = plan.period_days,
                    "Plan period is not positive, student omitted from projection"
                );
                record_student_skipped(&tenant_label, "invalid_period");
                skipped.students += 1;
                continue;
            }

            let projection = project_student(student, plan, window, today);
            if projection.dropped_cycles > 0 {
                warn!(
                    student_id = %student.student_id,
                    dropped = projection.dropped_cycles,
                    "Dropped cycles with unresolvable dates"
                );
                skipped.cycles += projection.dropped_cycles;
            }
            for entry in &projection.entries {
                record_cycle_resolved(&tenant_label, entry.status.as_str());
            }
            entries.extend(projection.entries);
        }

        let expenses = self.expenses.list_expenses(tenant_id, window).await?;
        let summary = summarize(&entries, &expenses);

        info!(
            students = students.len(),
            entries = entries.len(),
            expenses = expenses.len(),
            skipped_students = skipped.students,
            skipped_cycles = skipped.cycles,
            "Month projected"
        );

        Ok(MonthProjection {
            window,
            entries,
            expenses,
            summary,
            skipped,
        })
    }

    /// Active students whose stored due date falls on or before `date`.
    /// This is the roster slice behind the payment-reminder screen.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, due_by = %date))]
    pub async fn students_due_by(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<StudentBilling>, AppError> {
        require_tenant(tenant_id)?;

        let students = self.roster.list_active_students(tenant_id).await?;
        Ok(students
            .into_iter()
            .filter(|student| student.overall_due_date <= date)
            .collect())
    }

    // =========================================================================
    // Settlement Operations
    // =========================================================================

    /// Record the cycle starting at `cycle_start` as paid and roll the
    /// student's due-date pointer forward one period.
    ///
    /// Runs as fetch, compute, compare-and-swap. Losing the swap re-reads
    /// and retries under the configured policy; re-marking an already
    /// settled cycle returns the current state without writing.
    #[instrument(skip(self), fields(tenant_id = %tenant_id, student_id = %student_id, cycle_start = %cycle_start))]
    pub async fn mark_cycle_paid(
        &self,
        tenant_id: Uuid,
        student_id: Uuid,
        cycle_start: NaiveDate,
    ) -> Result<StudentBilling, AppError> {
        require_tenant(tenant_id)?;
        let timer = PROJECTION_DURATION
            .with_label_values(&["mark_cycle_paid"])
            .start_timer();
        let tenant_label = tenant_id.to_string();

        let result = retry_store_call(&self.retry, "mark_cycle_paid", || async {
            let student = self.billing.fetch_student(tenant_id, student_id).await?;
            let plan = self.plan_for(tenant_id, student.plan_id).await?;

            let patch = advance(&plan, cycle_start)?;
            if patch.period_fallback {
                warn!(
                    plan_id = %plan.plan_id,
                    period_days = plan.period_days,
                    "Plan period is unusable, due date fell back to next calendar month"
                );
                record_period_fallback(&tenant_label);
            }

            if already_applied(&student, &patch) {
                info!("Cycle already settled, nothing to write");
                return Ok(student);
            }

            match self
                .billing
                .update_billing_state(tenant_id, student_id, student.revision, &patch)
                .await
            {
                Err(error @ AppError::Conflict(_)) => {
                    record_advance_conflict(&tenant_label);
                    Err(error)
                }
                other => other,
            }
        })
        .await;

        timer.observe_duration();
        match &result {
            Ok(student) => {
                info!(
                    due_date = %student.overall_due_date,
                    revision = student.revision,
                    "Cycle settled"
                );
            }
            Err(error) => record_error(error.kind(), "mark_cycle_paid"),
        }
        result
    }

    async fn plan_for(&self, tenant_id: Uuid, plan_id: Uuid) -> Result<TuitionPlan, AppError> {
        self.roster
            .list_plans(tenant_id)
            .await?
            .into_iter()
            .find(|plan| plan.plan_id == plan_id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Plan {plan_id} not found")))
    }
}

fn require_tenant(tenant_id: Uuid) -> Result<(), AppError> {
    if tenant_id.is_nil() {
        return Err(AppError::InvalidInput(anyhow::anyhow!(
            "Tenant id must not be nil"
        )));
    }
    Ok(())
}

/// True when the stored pointer already reflects `patch`, meaning the same
/// cycle was settled by an earlier write.
fn already_applied(student: &StudentBilling, patch: &BillingAdvance) -> bool {
    student.overall_status == patch.overall_status
        && student.overall_due_date == patch.overall_due_date
        && student.last_payment_date == Some(patch.last_payment_date)
}
