use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::categories::Category;
use crate::constants::INQUIRY_MAXIMUM_AMOUNT;
use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::expenses::expenses_errors::ExpenseError;
use crate::expenses::expenses_model::{CategoryAmount, Expense, ExpenseFilters, ExpenseUpdate, NewExpense};
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::schema::expenses;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }

    /// Matching rows with the excluded ones dropped, for totalling.
    fn countable_expenses(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Vec<Expense>> {
        Ok(self
            .search_expenses(user_id, filters)?
            .into_iter()
            .filter(|expense| !expense.excluding)
            .collect())
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn get_expense_by_id(&self, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        let expense = expenses::table
            .find(expense_id)
            .first::<Expense>(&mut conn)
            .optional()?
            .ok_or_else(|| ExpenseError::NotFound(expense_id.to_string()))?;
        Ok(expense)
    }

    fn search_expenses(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .into_boxed();
        if let Some(start) = filters.start_date {
            query = query.filter(expenses::expense_date.ge(start));
        }
        if let Some(end) = filters.end_date {
            query = query.filter(expenses::expense_date.le(end));
        }
        if let Some(category) = filters.category {
            query = query.filter(expenses::category.eq(category.as_str()));
        }
        let rows = query
            .order(expenses::expense_date.desc())
            .load::<Expense>(&mut conn)?;

        // Amounts live in TEXT columns, so the range check runs in memory.
        let min = filters.min_amount.unwrap_or(Decimal::ZERO);
        let max = filters
            .max_amount
            .unwrap_or_else(|| Decimal::from(INQUIRY_MAXIMUM_AMOUNT));
        Ok(rows
            .into_iter()
            .filter(|expense| {
                let amount = expense.amount_decimal();
                min <= amount && amount <= max
            })
            .collect())
    }

    fn sum_expenses(&self, user_id: &str, filters: &ExpenseFilters) -> Result<Decimal> {
        Ok(self
            .countable_expenses(user_id, filters)?
            .iter()
            .map(|expense| expense.amount_decimal())
            .sum())
    }

    fn sum_expenses_per_category(
        &self,
        user_id: &str,
        filters: &ExpenseFilters,
    ) -> Result<Vec<CategoryAmount>> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for expense in self.countable_expenses(user_id, filters)? {
            *totals.entry(expense.category.clone()).or_insert(Decimal::ZERO) +=
                expense.amount_decimal();
        }
        // Canonical category order; categories without rows are omitted.
        Ok(Category::ALL
            .iter()
            .filter_map(|category| {
                totals.get(category.as_str()).map(|amount| CategoryAmount {
                    category: *category,
                    amount: *amount,
                })
            })
            .collect())
    }

    fn get_expenses_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::user_id.eq(user_id))
            .filter(expenses::expense_date.ge(start))
            .filter(expenses::expense_date.le(end))
            .filter(expenses::excluding.eq(false))
            .order(expenses::expense_date.asc())
            .load::<Expense>(&mut conn)?)
    }

    fn get_weekday_expenses_through(
        &self,
        user_id: &str,
        date: NaiveDate,
        weekday: &str,
    ) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::user_id.eq(user_id))
            .filter(expenses::expense_date.le(date))
            .filter(expenses::day_of_week.eq(weekday))
            .filter(expenses::excluding.eq(false))
            .order(expenses::expense_date.asc())
            .load::<Expense>(&mut conn)?)
    }

    fn get_expenses_on_date(&self, date: NaiveDate) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .filter(expenses::expense_date.eq(date))
            .filter(expenses::excluding.eq(false))
            .load::<Expense>(&mut conn)?)
    }

    async fn insert_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = Utc::now().to_rfc3339();
                let mut new_expense = new_expense;
                let id = new_expense
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                new_expense.id = Some(id.clone());
                new_expense.created_at.get_or_insert_with(|| now.clone());
                new_expense.updated_at.get_or_insert(now);

                diesel::insert_into(expenses::table)
                    .values(&new_expense)
                    .execute(conn)?;
                Ok(expenses::table.find(&id).first::<Expense>(conn)?)
            })
            .await
    }

    async fn update_expense(&self, expense_id: String, update: ExpenseUpdate) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let current = expenses::table
                    .find(&expense_id)
                    .first::<Expense>(conn)
                    .optional()?
                    .ok_or_else(|| ExpenseError::NotFound(expense_id.clone()))?;

                // The budget snapshot and ratio stay as captured at creation.
                let amount = update
                    .amount
                    .map(|amount| amount.to_string())
                    .unwrap_or(current.amount);
                let description = update.description.or(current.description);
                let excluding = update.excluding.unwrap_or(current.excluding);

                diesel::update(expenses::table.find(&expense_id))
                    .set((
                        expenses::amount.eq(amount),
                        expenses::description.eq(description),
                        expenses::excluding.eq(excluding),
                        expenses::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;
                Ok(expenses::table.find(&expense_id).first::<Expense>(conn)?)
            })
            .await
    }

    async fn delete_expense(&self, expense_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(expenses::table.find(&expense_id)).execute(conn)?)
            })
            .await
    }
}
