use crate::budgets::{Budget, NewBudget};
use crate::categories::Category;
use crate::db::WriteHandle;
use crate::errors::Result;
use crate::ratios::CategoryRatio;
use crate::recommendation::allocation::{allocate_by_ratio, equal_shares};
use crate::recommendation::recommendation_model::BudgetAllocation;
use crate::recommendation::recommendation_traits::RecommendationRepositoryTrait;
use crate::schema::{budgets, category_ratios};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

/// Runs the whole allocate-then-persist sequence as one writer job, so a
/// recommendation is never partially visible.
pub struct RecommendationRepository {
    writer: WriteHandle,
}

impl RecommendationRepository {
    pub fn new(writer: WriteHandle) -> Self {
        RecommendationRepository { writer }
    }
}

#[async_trait]
impl RecommendationRepositoryTrait for RecommendationRepository {
    async fn allocate_for_user(
        &self,
        user_id: String,
        total_amount: Decimal,
    ) -> Result<Vec<BudgetAllocation>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<BudgetAllocation>> {
                let mut ratios: HashMap<Category, f64> = HashMap::new();
                for row in category_ratios::table.load::<CategoryRatio>(conn)? {
                    if let Ok(category) = row.category.parse::<Category>() {
                        ratios.insert(category, row.ratio);
                    }
                }

                // Oldest budget row per category is the upsert target when a
                // category has several windowed rows.
                let mut existing: HashMap<Category, Budget> = HashMap::new();
                let rows = budgets::table
                    .filter(budgets::user_id.eq(&user_id))
                    .order(budgets::created_at.asc())
                    .load::<Budget>(conn)?;
                for budget in rows {
                    if let Ok(category) = budget.category.parse::<Category>() {
                        existing.entry(category).or_insert(budget);
                    }
                }

                let mut results = allocate_by_ratio(total_amount, &ratios);
                let allocated: Decimal = results.iter().map(|allocation| allocation.amount).sum();
                let remaining = total_amount - allocated;

                if remaining > Decimal::ZERO {
                    let share_targets: Vec<Category> = Category::ALL
                        .iter()
                        .copied()
                        .filter(|category| existing.contains_key(category))
                        .collect();
                    if share_targets.is_empty() {
                        warn!(
                            "User {} has no budget categories to absorb the remaining {}; dropping it",
                            user_id, remaining
                        );
                    } else {
                        let shares = equal_shares(remaining, share_targets.len());
                        for (category, share) in share_targets.into_iter().zip(shares) {
                            match results
                                .iter_mut()
                                .find(|allocation| allocation.category == category)
                            {
                                Some(allocation) => allocation.amount += share,
                                None => results.push(BudgetAllocation {
                                    category,
                                    amount: existing[&category].amount_decimal() + share,
                                }),
                            }
                        }
                        results.sort_by_key(|allocation| {
                            Category::ALL
                                .iter()
                                .position(|category| *category == allocation.category)
                        });
                    }
                }

                let now = Utc::now().to_rfc3339();
                for allocation in &results {
                    match existing.get(&allocation.category) {
                        Some(budget) => {
                            diesel::update(budgets::table.find(&budget.id))
                                .set((
                                    budgets::amount.eq(allocation.amount.to_string()),
                                    budgets::updated_at.eq(now.clone()),
                                ))
                                .execute(conn)?;
                        }
                        None => {
                            let new_budget = NewBudget {
                                id: Some(Uuid::new_v4().to_string()),
                                user_id: user_id.clone(),
                                category: allocation.category.as_str().to_string(),
                                amount: allocation.amount.to_string(),
                                start_date: None,
                                end_date: None,
                                created_at: Some(now.clone()),
                                updated_at: Some(now.clone()),
                            };
                            diesel::insert_into(budgets::table)
                                .values(&new_budget)
                                .execute(conn)?;
                        }
                    }
                }

                Ok(results)
            })
            .await
    }
}
