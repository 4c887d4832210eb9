//! Scheduled background work.
//!
//! Two jobs run daily on the local clock:
//! - the ratio refresh at midnight, recomputing the global category ratios
//!   from every stored budget
//! - the spending review at 20:00, logging each user's day against their
//!   expected daily budget

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use log::{error, info};
use tokio::task::JoinHandle;

use crate::constants::{RATIO_REFRESH_HOUR, SPENDING_REVIEW_HOUR};
use crate::expenses::ExpenseServiceTrait;
use crate::ratios::RatioServiceTrait;

/// Time remaining until the next occurrence of `hour` o'clock local time.
/// When that hour has already passed today (or is exactly now), the next
/// occurrence is tomorrow's.
pub fn delay_until_hour(now: DateTime<Local>, hour: u32) -> Duration {
    let today_at_hour = now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .unwrap_or(now);
    let target = if today_at_hour <= now {
        today_at_hour + chrono::Duration::days(1)
    } else {
        today_at_hour
    };
    (target - now).to_std().unwrap_or(Duration::ZERO)
}

/// Spawns the two daily jobs. The returned handles let a host abort them on
/// shutdown; the tasks themselves loop forever.
pub fn spawn_jobs(
    ratio_service: Arc<dyn RatioServiceTrait>,
    expense_service: Arc<dyn ExpenseServiceTrait>,
) -> Vec<JoinHandle<()>> {
    let ratio_refresh = tokio::spawn(async move {
        loop {
            tokio::time::sleep(delay_until_hour(Local::now(), RATIO_REFRESH_HOUR)).await;
            info!("Running the nightly category ratio refresh");
            if let Err(e) = ratio_service.recompute_ratios().await {
                error!("Nightly ratio refresh failed: {:?}", e);
            }
        }
    });

    let spending_review = tokio::spawn(async move {
        loop {
            tokio::time::sleep(delay_until_hour(Local::now(), SPENDING_REVIEW_HOUR)).await;
            let today = Local::now().date_naive();
            info!("Running the daily spending review for {}", today);
            if let Err(e) = expense_service.daily_spending_review(today) {
                error!("Daily spending review failed: {:?}", e);
            }
        }
    });

    vec![ratio_refresh, spending_review]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn delay_counts_down_to_the_same_day_when_the_hour_is_ahead() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 18, 30, 0).unwrap();
        assert_eq!(delay_until_hour(now, 20), Duration::from_secs(90 * 60));
    }

    #[test]
    fn delay_rolls_over_to_tomorrow_when_the_hour_has_passed() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 21, 0, 0).unwrap();
        assert_eq!(delay_until_hour(now, 20), Duration::from_secs(23 * 60 * 60));
    }

    #[test]
    fn delay_at_the_exact_hour_waits_a_full_day() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(delay_until_hour(now, 0), Duration::from_secs(24 * 60 * 60));
    }
}
