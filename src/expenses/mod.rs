pub mod expenses_errors;
pub mod expenses_model;
pub mod expenses_repository;
pub mod expenses_service;
pub mod expenses_traits;

pub use expenses_errors::ExpenseError;
pub use expenses_model::{
    consumption_ratio, days_left_in_month, weekday_name, CategoryAmount, DailyExpensePlan,
    Expense, ExpenseDraft, ExpenseFilters, ExpenseSummary, ExpenseUpdate, NewExpense,
    SpendingReview,
};
pub use expenses_repository::ExpenseRepository;
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
