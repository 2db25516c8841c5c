//! Expense record model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense booked against a tenant's month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub expense_id: Uuid,
    pub tenant_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub created_utc: DateTime<Utc>,
}
