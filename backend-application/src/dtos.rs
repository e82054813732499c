use serde::{Deserialize, Serialize};

use backend_domain::{ItemRecord, WarrantyStatus};

/// A receipt image as received from the caller, before it has a storage
/// reference.
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// An item record decorated with its display-only warranty classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: ItemRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_status: Option<WarrantyStatus>,
}
