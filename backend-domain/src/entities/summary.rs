use serde::{Deserialize, Serialize};

use crate::entities::ItemRecord;
use crate::value_objects::Category;

/// Purchase-year filter for the insights view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    #[default]
    All,
    ThisYear,
    LastYear,
}

impl TimeFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" => Some(TimeFilter::All),
            "this_year" => Some(TimeFilter::ThisYear),
            "last_year" => Some(TimeFilter::LastYear),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: Category,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub item_count: usize,
    pub total_value: f64,
    pub spending_by_category: Vec<CategorySpend>,
    /// Records whose warranty expires within the next 60 days, soonest first.
    pub upcoming_expirations: Vec<ItemRecord>,
    pub upcoming_value: f64,
}
