//! Metrics module for billing-core.
//! Provides Prometheus metrics for projection and settlement operations.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Projection and settlement operation duration histogram
pub static PROJECTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!(
            "billing_projection_duration_seconds",
            "Projection and settlement operation duration"
        ),
        &["operation"]
    )
    .expect("Failed to register PROJECTION_DURATION")
});

/// Students omitted from projection (per-tenant)
pub static STUDENTS_SKIPPED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Cycles projected, by resolved status (per-tenant)
pub static CYCLES_RESOLVED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Billing-state writes lost to a concurrent update (per-tenant)
pub static ADVANCE_CONFLICTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Due dates produced by the calendar-month fallback (per-tenant)
pub static PERIOD_FALLBACKS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Error counter for alerting
pub static ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    // Students skipped during projection
    STUDENTS_SKIPPED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "billing_students_skipped_total",
                "Students omitted from projection by tenant and reason"
            ),
            &["tenant_id", "reason"]
        )
        .expect("Failed to register STUDENTS_SKIPPED_TOTAL")
    });

    // Cycles resolved
    CYCLES_RESOLVED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "billing_cycles_resolved_total",
                "Cycles projected by tenant and resolved status"
            ),
            &["tenant_id", "status"]
        )
        .expect("Failed to register CYCLES_RESOLVED_TOTAL")
    });

    // Lost compare-and-swap writes
    ADVANCE_CONFLICTS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "billing_advance_conflicts_total",
                "Billing-state writes rejected because the revision moved"
            ),
            &["tenant_id"]
        )
        .expect("Failed to register ADVANCE_CONFLICTS_TOTAL")
    });

    // Calendar-month fallback due dates
    PERIOD_FALLBACKS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "billing_period_fallbacks_total",
                "Due dates computed via the calendar-month fallback"
            ),
            &["tenant_id"]
        )
        .expect("Failed to register PERIOD_FALLBACKS_TOTAL")
    });

    // Error counter for alerting
    ERRORS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!("billing_errors_total", "Total errors by type for alerting"),
            &["error_type", "operation"]
        )
        .expect("Failed to register ERRORS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*PROJECTION_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record a student omitted from projection.
pub fn record_student_skipped(tenant_id: &str, reason: &str) {
    if let Some(counter) = STUDENTS_SKIPPED_TOTAL.get() {
        counter.with_label_values(&[tenant_id, reason]).inc();
    }
}

/// Record a projected cycle by resolved status.
pub fn record_cycle_resolved(tenant_id: &str, status: &str) {
    if let Some(counter) = CYCLES_RESOLVED_TOTAL.get() {
        counter.with_label_values(&[tenant_id, status]).inc();
    }
}

/// Record a billing-state write lost to a concurrent update.
pub fn record_advance_conflict(tenant_id: &str) {
    if let Some(counter) = ADVANCE_CONFLICTS_TOTAL.get() {
        counter.with_label_values(&[tenant_id]).inc();
    }
}

/// Record a due date produced by the calendar-month fallback.
pub fn record_period_fallback(tenant_id: &str) {
    if let Some(counter) = PERIOD_FALLBACKS_TOTAL.get() {
        counter.with_label_values(&[tenant_id]).inc();
    }
}

/// Record an error for alerting.
pub fn record_error(error_type: &str, operation: &str) {
    if let Some(counter) = ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type, operation]).inc();
    }
}
