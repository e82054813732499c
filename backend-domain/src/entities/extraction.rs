use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Payload for the extraction endpoint: a stored file reference plus the
/// JSON-schema-like description of the fields the caller wants back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    #[serde(default, alias = "fileUrl")]
    pub file_url: String,
    #[serde(default)]
    pub schema: Value,
}

/// Structured fields the extraction provider returns for a receipt image.
/// The provider emits `null` for anything it could not read, which lands
/// here as `None`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractedFields {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_model: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub warranty_period: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// The schema sent for receipt ingestion. Dates come back as strings in
/// `YYYY-MM-DD`; the category is constrained to the fixed enum labels.
pub fn receipt_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "product_name": { "type": "string", "description": "The primary product name from the receipt" },
            "product_model": { "type": "string", "description": "Product model or SKU if available" },
            "store_name": { "type": "string", "description": "Name of the store or merchant" },
            "purchase_date": { "type": "string", "description": "Date of purchase in YYYY-MM-DD format" },
            "total_price": { "type": "number", "description": "Total amount paid" },
            "currency": { "type": "string", "description": "Currency symbol or code (e.g., ILS, $, EUR)" },
            "warranty_period": { "type": "string", "description": "Warranty duration if mentioned (e.g., '1 year', '24 months')" },
            "category": { "type": "string", "enum": ["Electronics", "Appliances", "Furniture", "Clothing", "Tools", "Other"] }
        }
    })
}
