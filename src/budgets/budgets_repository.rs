use crate::budgets::budgets_errors::BudgetError;
use crate::budgets::budgets_model::{Budget, BudgetPlan, NewBudget};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::schema::budgets;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let budget = budgets::table
            .find(budget_id)
            .first::<Budget>(&mut conn)
            .optional()?
            .ok_or_else(|| BudgetError::NotFound(budget_id.to_string()))?;
        Ok(budget)
    }

    fn get_budgets_by_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets::table
            .filter(budgets::user_id.eq(user_id))
            .order(budgets::category.asc())
            .load::<Budget>(&mut conn)?)
    }

    fn get_budgets_active_on(&self, user_id: &str, date: NaiveDate) -> Result<Vec<Budget>> {
        // Window bounds are nullable, so the open-ended comparison is done
        // in memory rather than in SQL. Budget rows per user stay small.
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .load::<Budget>(&mut conn)?;
        Ok(rows
            .into_iter()
            .filter(|budget| budget.window_contains(date))
            .collect())
    }

    async fn insert_budgets(&self, user_id: String, plans: Vec<BudgetPlan>) -> Result<Vec<Budget>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Budget>> {
                let existing = budgets::table
                    .filter(budgets::user_id.eq(&user_id))
                    .load::<Budget>(conn)?;

                let now = Utc::now().to_rfc3339();
                let mut inserted: Vec<Budget> = Vec::with_capacity(plans.len());
                for plan in plans {
                    let conflict = existing.iter().chain(inserted.iter()).any(|budget| {
                        budget.category == plan.category.as_str()
                            && budget.window_overlaps(plan.start_date, plan.end_date)
                    });
                    if conflict {
                        return Err(
                            BudgetError::OverlappingWindow(plan.category.to_string()).into()
                        );
                    }

                    let id = Uuid::new_v4().to_string();
                    let new_budget = NewBudget {
                        id: Some(id.clone()),
                        user_id: user_id.clone(),
                        category: plan.category.as_str().to_string(),
                        amount: plan.amount.to_string(),
                        start_date: plan.start_date,
                        end_date: plan.end_date,
                        created_at: Some(now.clone()),
                        updated_at: Some(now.clone()),
                    };
                    diesel::insert_into(budgets::table)
                        .values(&new_budget)
                        .execute(conn)?;
                    inserted.push(budgets::table.find(&id).first::<Budget>(conn)?);
                }
                Ok(inserted)
            })
            .await
    }

    async fn update_amount(&self, budget_id: String, amount: Decimal) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let updated = diesel::update(budgets::table.find(&budget_id))
                    .set((
                        budgets::amount.eq(amount.to_string()),
                        budgets::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(BudgetError::NotFound(budget_id).into());
                }
                Ok(budgets::table.find(&budget_id).first::<Budget>(conn)?)
            })
            .await
    }

    async fn delete_budget(&self, budget_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(budgets::table.find(&budget_id)).execute(conn)?)
            })
            .await
    }
}
