use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Category, ItemId, ProcessingStatus};

/// One tracked belonging and its receipt-derived metadata, scoped to a
/// single owning user. `id` and `created_at` are assigned by the record
/// store on creation and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    #[serde(default)]
    pub processing_status: ProcessingStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller may supply when creating a record. Everything the
/// server assigns (`id`, `created_at`) is absent by construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ItemDraft {
    pub product_name: String,
    #[serde(default)]
    pub product_model: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub warranty_period: Option<String>,
    #[serde(default)]
    pub warranty_expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub receipt_image_url: Option<String>,
    #[serde(default)]
    pub manual_url: Option<String>,
    #[serde(default)]
    pub user_notes: Option<String>,
    #[serde(default)]
    pub processing_status: ProcessingStatus,
}

/// Partial update. `None` means "leave the stored value untouched"; there
/// is deliberately no way to clear a field back to unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ItemPatch {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_model: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub warranty_period: Option<String>,
    #[serde(default)]
    pub warranty_expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub manual_url: Option<String>,
    #[serde(default)]
    pub user_notes: Option<String>,
    #[serde(default)]
    pub processing_status: Option<ProcessingStatus>,
}

impl ItemPatch {
    pub fn apply(self, record: &mut ItemRecord) {
        if let Some(value) = self.product_name {
            record.product_name = value;
        }
        if let Some(value) = self.product_model {
            record.product_model = Some(value);
        }
        if let Some(value) = self.store_name {
            record.store_name = Some(value);
        }
        if let Some(value) = self.category {
            record.category = value;
        }
        if let Some(value) = self.total_price {
            record.total_price = Some(value);
        }
        if let Some(value) = self.currency {
            record.currency = Some(value);
        }
        if let Some(value) = self.purchase_date {
            record.purchase_date = Some(value);
        }
        if let Some(value) = self.warranty_period {
            record.warranty_period = Some(value);
        }
        if let Some(value) = self.warranty_expiration_date {
            record.warranty_expiration_date = Some(value);
        }
        if let Some(value) = self.manual_url {
            record.manual_url = Some(value);
        }
        if let Some(value) = self.user_notes {
            record.user_notes = Some(value);
        }
        if let Some(value) = self.processing_status {
            record.processing_status = value;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.product_model.is_none()
            && self.store_name.is_none()
            && self.category.is_none()
            && self.total_price.is_none()
            && self.currency.is_none()
            && self.purchase_date.is_none()
            && self.warranty_period.is_none()
            && self.warranty_expiration_date.is_none()
            && self.manual_url.is_none()
            && self.user_notes.is_none()
            && self.processing_status.is_none()
    }
}
