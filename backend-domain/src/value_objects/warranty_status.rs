// Warranty status value object

use serde::{Deserialize, Serialize};

/// Display classification of a record's warranty relative to today.
/// Records without an expiration date carry no classification at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WarrantyStatus {
    Expired,
    ExpiringSoon { days_left: i64 },
    Active,
}

impl WarrantyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyStatus::Expired => "expired",
            WarrantyStatus::ExpiringSoon { .. } => "expiring_soon",
            WarrantyStatus::Active => "active",
        }
    }
}
