//! Services module for billing-core.

pub mod metrics;
pub mod projector;

pub use metrics::{
    get_metrics, init_metrics, record_advance_conflict, record_cycle_resolved, record_error,
    record_period_fallback, record_student_skipped,
};
pub use projector::{MonthProjection, ProjectionSkips, Projector};
