//! Cycle enumeration and projection tests for billing-core.

mod common;

use billing_core::models::PaymentStatus;
use billing_core::projection::{
    cycle_starts_in_window, first_cycle_start, project_student, MonthWindow,
};
use common::{date, fresh_student, plan, student};
use rust_decimal::Decimal;

#[test]
fn first_cycle_is_enrollment_day_when_charged_at_enrollment() {
    let plan = plan(30, true, 100);
    assert_eq!(
        first_cycle_start(date(2024, 3, 15), &plan),
        Some(date(2024, 3, 15))
    );
}

#[test]
fn first_cycle_starts_one_period_after_enrollment_otherwise() {
    let plan = plan(30, false, 100);
    assert_eq!(
        first_cycle_start(date(2024, 3, 15), &plan),
        Some(date(2024, 4, 14))
    );
}

#[test]
fn thirty_day_cycles_drift_across_months() {
    // Enrollment on Jan 1 without an enrollment charge puts the first
    // cycle on Jan 31; 30-day steps then skip February entirely in a
    // leap year and land twice in March.
    let plan = plan(30, false, 100);
    let enrollment = date(2024, 1, 1);

    let january = MonthWindow::new(2024, 1).unwrap();
    assert_eq!(
        cycle_starts_in_window(enrollment, &plan, january),
        vec![date(2024, 1, 31)]
    );

    let february = MonthWindow::new(2024, 2).unwrap();
    assert!(cycle_starts_in_window(enrollment, &plan, february).is_empty());

    let march = MonthWindow::new(2024, 3).unwrap();
    assert_eq!(
        cycle_starts_in_window(enrollment, &plan, march),
        vec![date(2024, 3, 1), date(2024, 3, 31)]
    );
}

#[test]
fn weekly_plan_enumerates_every_cycle_in_order() {
    let plan = plan(7, true, 25);
    let march = MonthWindow::new(2024, 3).unwrap();

    let starts = cycle_starts_in_window(date(2024, 3, 4), &plan, march);
    assert_eq!(
        starts,
        vec![
            date(2024, 3, 4),
            date(2024, 3, 11),
            date(2024, 3, 18),
            date(2024, 3, 25),
        ]
    );
}

#[test]
fn zero_or_negative_period_yields_no_cycles() {
    let zero = plan(0, true, 100);
    let negative = plan(-7, true, 100);
    let march = MonthWindow::new(2024, 3).unwrap();

    assert_eq!(first_cycle_start(date(2024, 1, 1), &zero), None);
    assert!(cycle_starts_in_window(date(2024, 1, 1), &zero, march).is_empty());
    assert!(cycle_starts_in_window(date(2024, 1, 1), &negative, march).is_empty());
}

#[test]
fn enrollment_after_window_yields_no_cycles() {
    let plan = plan(30, true, 100);
    let march = MonthWindow::new(2024, 3).unwrap();
    assert!(cycle_starts_in_window(date(2024, 4, 15), &plan, march).is_empty());
}

#[test]
fn projected_entries_carry_price_and_due_date() {
    let plan = plan(30, false, 150);
    let student = fresh_student(&plan, date(2024, 1, 1));
    let january = MonthWindow::new(2024, 1).unwrap();

    let projection = project_student(&student, &plan, january, date(2024, 1, 15));
    assert_eq!(projection.dropped_cycles, 0);
    assert_eq!(projection.entries.len(), 1);

    let entry = &projection.entries[0];
    assert_eq!(entry.student_id, student.student_id);
    assert_eq!(entry.cycle_start, date(2024, 1, 31));
    assert_eq!(entry.due_date, date(2024, 3, 1));
    assert_eq!(entry.amount, Decimal::from(150));
    assert_eq!(entry.status, PaymentStatus::Pending);
}

#[test]
fn cycle_end_past_calendar_range_is_dropped() {
    // The cycle start fits the window, but 10000 more days is past the
    // last date the calendar can represent.
    let plan = plan(10000, true, 100);
    let student = student(
        &plan,
        date(262142, 11, 15),
        date(262142, 11, 30),
        PaymentStatus::Pending,
        None,
    );
    let window = MonthWindow::new(262142, 11).unwrap();

    let projection = project_student(&student, &plan, window, date(262142, 11, 20));
    assert!(projection.entries.is_empty());
    assert_eq!(projection.dropped_cycles, 1);
}

#[test]
fn projection_is_deterministic() {
    let plan = plan(14, true, 80);
    let student = student(
        &plan,
        date(2024, 2, 5),
        date(2024, 3, 4),
        PaymentStatus::Pending,
        Some(date(2024, 2, 19)),
    );
    let march = MonthWindow::new(2024, 3).unwrap();
    let today = date(2024, 3, 20);

    let first = project_student(&student, &plan, march, today);
    let second = project_student(&student, &plan, march, today);
    assert_eq!(
        serde_json::to_value(&first.entries).unwrap(),
        serde_json::to_value(&second.entries).unwrap()
    );
}

#[test]
fn no_duplicate_cycles_for_a_student() {
    let plan = plan(7, true, 25);
    let student = fresh_student(&plan, date(2024, 3, 4));
    let march = MonthWindow::new(2024, 3).unwrap();

    let projection = project_student(&student, &plan, march, date(2024, 3, 20));
    let mut starts: Vec<_> = projection
        .entries
        .iter()
        .map(|entry| entry.cycle_start)
        .collect();
    let count = starts.len();
    starts.dedup();
    assert_eq!(starts.len(), count);
}
