use chrono::NaiveDate;

use crate::errors::Result;
use crate::statistics::statistics_model::CategoryPeriodRatio;

/// Trait for statistics service operations. All reads, no writes; `today`
/// anchors the comparison windows.
pub trait StatisticsServiceTrait: Send + Sync {
    fn category_ratios(&self, user_id: &str, today: NaiveDate) -> Result<Vec<CategoryPeriodRatio>>;
    fn period_total_ratio(&self, user_id: &str, today: NaiveDate) -> Result<f64>;
    fn weekday_ratio(&self, user_id: &str, today: NaiveDate) -> Result<f64>;
    fn peer_ratio(&self, user_id: &str, today: NaiveDate) -> Result<f64>;
}
