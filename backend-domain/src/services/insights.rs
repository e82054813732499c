use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::entities::{CategorySpend, InsightsSummary, ItemRecord, TimeFilter};
use crate::value_objects::Category;

/// Warranties this many days out still count as "upcoming" on the
/// insights view (a wider horizon than the per-card expiring-soon badge).
pub const UPCOMING_WINDOW_DAYS: i64 = 60;

/// Aggregates a user's records for the insights view. Spend figures honor
/// the purchase-year filter; the upcoming-expirations list always spans the
/// whole collection.
pub fn insights_summary(
    items: &[ItemRecord],
    today: NaiveDate,
    filter: TimeFilter,
) -> InsightsSummary {
    let filtered: Vec<&ItemRecord> = items
        .iter()
        .filter(|item| matches_filter(item, today, filter))
        .collect();

    let total_value: f64 = filtered
        .iter()
        .map(|item| item.total_price.unwrap_or(0.0))
        .sum();

    let mut by_category: HashMap<Category, f64> = HashMap::new();
    for item in &filtered {
        *by_category.entry(item.category).or_insert(0.0) +=
            item.total_price.unwrap_or(0.0);
    }
    let mut spending_by_category: Vec<CategorySpend> = by_category
        .into_iter()
        .map(|(category, total)| CategorySpend { category, total })
        .collect();
    spending_by_category.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    let mut upcoming_expirations: Vec<ItemRecord> = items
        .iter()
        .filter(|item| {
            item.warranty_expiration_date.is_some_and(|expiration| {
                let days_left = (expiration - today).num_days();
                (0..=UPCOMING_WINDOW_DAYS).contains(&days_left)
            })
        })
        .cloned()
        .collect();
    upcoming_expirations.sort_by_key(|item| item.warranty_expiration_date);
    let upcoming_value = upcoming_expirations
        .iter()
        .map(|item| item.total_price.unwrap_or(0.0))
        .sum();

    InsightsSummary {
        item_count: filtered.len(),
        total_value,
        spending_by_category,
        upcoming_expirations,
        upcoming_value,
    }
}

fn matches_filter(item: &ItemRecord, today: NaiveDate, filter: TimeFilter) -> bool {
    match filter {
        TimeFilter::All => true,
        TimeFilter::ThisYear => purchase_year(item) == Some(today.year()),
        TimeFilter::LastYear => purchase_year(item) == Some(today.year() - 1),
    }
}

fn purchase_year(item: &ItemRecord) -> Option<i32> {
    item.purchase_date.map(|date| date.year())
}
