use crate::categories::Category;
use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::ratios::ratios_model::{compute_global_ratios, running_mean, CategoryRatio};
use crate::ratios::ratios_traits::RatioRepositoryTrait;
use crate::schema::{budgets, category_ratios};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

pub struct RatioRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RatioRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RatioRepository { pool, writer }
    }
}

#[async_trait]
impl RatioRepositoryTrait for RatioRepository {
    fn get_ratios(&self) -> Result<Vec<CategoryRatio>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(category_ratios::table
            .order(category_ratios::category.asc())
            .load::<CategoryRatio>(&mut conn)?)
    }

    async fn merge_observation(&self, category: Category, percentage: Decimal) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let observation = percentage.to_f64().unwrap_or(0.0);
                let existing: Option<CategoryRatio> = category_ratios::table
                    .find(category.as_str())
                    .first::<CategoryRatio>(conn)
                    .optional()?;

                let now = Utc::now().to_rfc3339();
                match existing {
                    Some(current) => {
                        diesel::update(category_ratios::table.find(category.as_str()))
                            .set((
                                category_ratios::ratio
                                    .eq(running_mean(current.ratio, current.count, observation)),
                                category_ratios::count.eq(current.count + 1),
                                category_ratios::updated_at.eq(now),
                            ))
                            .execute(conn)?;
                    }
                    None => {
                        let new_ratio = CategoryRatio {
                            category: category.as_str().to_string(),
                            ratio: observation,
                            count: 1,
                            updated_at: now,
                        };
                        diesel::insert_into(category_ratios::table)
                            .values(&new_ratio)
                            .execute(conn)?;
                    }
                }
                Ok(())
            })
            .await
    }

    async fn recompute_from_budgets(&self) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let rows: Vec<(String, String)> = budgets::table
                    .select((budgets::category, budgets::amount))
                    .load::<(String, String)>(conn)?;

                let mut category_totals: HashMap<Category, Decimal> = HashMap::new();
                let mut total = Decimal::ZERO;
                for (category, amount) in &rows {
                    let amount: Decimal = amount.parse().unwrap_or(Decimal::ZERO);
                    total += amount;
                    if let Ok(category) = Category::from_str(category) {
                        *category_totals.entry(category).or_insert(Decimal::ZERO) += amount;
                    }
                }

                let shares = compute_global_ratios(&category_totals, total)?;
                let now = Utc::now().to_rfc3339();
                for (category, share) in shares {
                    let existing: Option<CategoryRatio> = category_ratios::table
                        .find(category.as_str())
                        .first::<CategoryRatio>(conn)
                        .optional()?;
                    match existing {
                        // Full replace of the ratio; the observation count is
                        // not reset.
                        Some(_) => {
                            diesel::update(category_ratios::table.find(category.as_str()))
                                .set((
                                    category_ratios::ratio.eq(share),
                                    category_ratios::updated_at.eq(now.clone()),
                                ))
                                .execute(conn)?;
                        }
                        None => {
                            let new_ratio = CategoryRatio {
                                category: category.as_str().to_string(),
                                ratio: share,
                                count: 0,
                                updated_at: now.clone(),
                            };
                            diesel::insert_into(category_ratios::table)
                                .values(&new_ratio)
                                .execute(conn)?;
                        }
                    }
                }
                Ok(())
            })
            .await
    }
}
