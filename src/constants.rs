/// Minimum total amount the budget recommendation accepts
pub const RECOMMENDATION_MINIMUM_AMOUNT: i64 = 1000;

/// Floor applied to the remaining budget in the daily expense recommendation
pub const DAILY_RECOMMENDATION_FLOOR: i64 = 1000;

/// Decimal precision for stored amounts and ratios
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for the peer comparison divide
pub const PEER_RATIO_PRECISION: u32 = 3;

/// Upper bound substituted when an expense search omits a maximum amount
pub const INQUIRY_MAXIMUM_AMOUNT: i64 = 1_000_000_000;

/// Days assumed per month when projecting an expected daily spend
pub const BUDGET_DAYS_PER_MONTH: i64 = 30;

/// Hour of day (local time) for the nightly ratio refresh
pub const RATIO_REFRESH_HOUR: u32 = 0;

/// Hour of day (local time) for the daily spending review
pub const SPENDING_REVIEW_HOUR: u32 = 20;
