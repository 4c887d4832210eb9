use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Expense not found: {0}")]
    NotFound(String),

    #[error("Expense {0} does not belong to the requesting user")]
    NotOwner(String),

    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}
