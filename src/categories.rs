use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of spending categories. Declaration order is the canonical
/// ordering used for allocation and statistics output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Food,
    Housing,
    Transportation,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Housing,
        Category::Transportation,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Housing => "HOUSING",
            Category::Transportation => "TRANSPORTATION",
            Category::Education => "EDUCATION",
            Category::Other => "OTHER",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOOD" => Ok(Category::Food),
            "HOUSING" => Ok(Category::Housing),
            "TRANSPORTATION" => Ok(Category::Transportation),
            "EDUCATION" => Ok(Category::Education),
            "OTHER" => Ok(Category::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
