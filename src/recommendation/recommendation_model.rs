use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::Category;

/// One recommended budget line.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    pub category: Category,
    pub amount: Decimal,
}
