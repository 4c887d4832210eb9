use chrono::NaiveDate;
use thiserror::Error;

/// Custom error type for budget-related operations
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Budget not found: {0}")]
    NotFound(String),

    #[error("Budget {0} belongs to another user")]
    NotOwner(String),

    #[error("Budget window starts {start} after it ends {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Budget window overlaps an existing '{0}' budget")]
    OverlappingWindow(String),
}
