// Item category value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Electronics,
    Appliances,
    Furniture,
    Clothing,
    Tools,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Appliances,
        Category::Furniture,
        Category::Clothing,
        Category::Tools,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Appliances => "Appliances",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
            Category::Tools => "Tools",
            Category::Other => "Other",
        }
    }

    /// Parses a category label; unrecognized input falls back to `Other`,
    /// matching the extraction-result merge behavior.
    pub fn parse_lossy(value: &str) -> Self {
        Category::parse_strict(value).unwrap_or(Category::Other)
    }

    pub fn parse_strict(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "electronics" => Some(Category::Electronics),
            "appliances" => Some(Category::Appliances),
            "furniture" => Some(Category::Furniture),
            "clothing" => Some(Category::Clothing),
            "tools" => Some(Category::Tools),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}
