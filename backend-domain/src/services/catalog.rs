use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::entities::ItemRecord;
use crate::value_objects::{Category, SortKey, WarrantyStatus};

/// Warranties within this many days of expiring are flagged for display.
pub const EXPIRING_SOON_DAYS: i64 = 30;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn far_future() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Case-insensitive substring filter over product name, store name, and
/// category label, plus an optional exact category filter (`None` means
/// the "all" sentinel). An empty search term matches everything.
pub fn filter_items(
    items: Vec<ItemRecord>,
    search: &str,
    category: Option<Category>,
) -> Vec<ItemRecord> {
    let needle = search.trim().to_lowercase();
    items
        .into_iter()
        .filter(|item| {
            let matches_search = needle.is_empty()
                || item.product_name.to_lowercase().contains(&needle)
                || item
                    .store_name
                    .as_deref()
                    .is_some_and(|store| store.to_lowercase().contains(&needle))
                || item.category.as_str().to_lowercase().contains(&needle);
            let matches_category = category.map_or(true, |wanted| item.category == wanted);
            matches_search && matches_category
        })
        .collect()
}

/// Stable in-place sort by the given key. Missing values follow fixed
/// tie-breaks: absent purchase dates count as the epoch, absent warranty
/// expirations as 9999-12-31, absent prices as zero.
pub fn sort_items(items: &mut [ItemRecord], key: SortKey) {
    items.sort_by(|a, b| compare_items(a, b, key));
}

pub fn compare_items(a: &ItemRecord, b: &ItemRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::PurchaseDateDesc => purchase_date(b).cmp(&purchase_date(a)),
        SortKey::PurchaseDateAsc => purchase_date(a).cmp(&purchase_date(b)),
        SortKey::WarrantyExpirationAsc => expiration_date(a).cmp(&expiration_date(b)),
        SortKey::PriceDesc => price(b).total_cmp(&price(a)),
        SortKey::PriceAsc => price(a).total_cmp(&price(b)),
    }
}

fn purchase_date(item: &ItemRecord) -> NaiveDate {
    item.purchase_date.unwrap_or_else(epoch)
}

fn expiration_date(item: &ItemRecord) -> NaiveDate {
    item.warranty_expiration_date.unwrap_or_else(far_future)
}

fn price(item: &ItemRecord) -> f64 {
    item.total_price.unwrap_or(0.0)
}

/// Classifies a warranty relative to `today`. A record without an
/// expiration date gets no classification at all.
pub fn classify_warranty(
    today: NaiveDate,
    expiration: Option<NaiveDate>,
) -> Option<WarrantyStatus> {
    let expiration = expiration?;
    let days_left = (expiration - today).num_days();
    if days_left < 0 {
        Some(WarrantyStatus::Expired)
    } else if days_left <= EXPIRING_SOON_DAYS {
        Some(WarrantyStatus::ExpiringSoon { days_left })
    } else {
        Some(WarrantyStatus::Active)
    }
}
