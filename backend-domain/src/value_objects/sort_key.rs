// Sort key value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    PurchaseDateDesc,
    PurchaseDateAsc,
    WarrantyExpirationAsc,
    PriceDesc,
    PriceAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PurchaseDateDesc => "purchase_date_desc",
            SortKey::PurchaseDateAsc => "purchase_date_asc",
            SortKey::WarrantyExpirationAsc => "warranty_expiration_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::PriceAsc => "price_asc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "purchase_date_desc" => Some(SortKey::PurchaseDateDesc),
            "purchase_date_asc" => Some(SortKey::PurchaseDateAsc),
            "warranty_expiration_asc" => Some(SortKey::WarrantyExpirationAsc),
            "price_desc" => Some(SortKey::PriceDesc),
            "price_asc" => Some(SortKey::PriceAsc),
            _ => None,
        }
    }
}
