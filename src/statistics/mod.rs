pub mod statistics_model;
pub mod statistics_service;
pub mod statistics_traits;

pub use statistics_model::{
    average_or_one, category_totals, comparison_ratio, peer_comparison, period_ratios,
    ratio_average_or_one, total_or_one, CategoryPeriodRatio,
};
pub use statistics_service::StatisticsService;
pub use statistics_traits::StatisticsServiceTrait;
