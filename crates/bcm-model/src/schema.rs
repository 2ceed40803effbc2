//! Target schema registry.
//!
//! The registry is a static, grouped catalog of the fields a product record
//! can be migrated into. It is built once at startup and never mutated; the
//! ordering of categories and of fields within a category is the display
//! order and is stable across runs.

use serde::{Deserialize, Serialize};

use crate::ids::FieldId;

/// A field in the target product schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetField {
    /// Identity, unique within the schema.
    pub id: FieldId,
    /// Human-readable label.
    pub label: String,
    /// Whether a migration must supply this field.
    pub required: bool,
}

/// A named group of target fields, kept only for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCategory {
    /// Category display name.
    pub name: String,
    /// Fields in display order.
    pub fields: Vec<TargetField>,
}

/// The immutable catalog of target fields, grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSchema {
    categories: Vec<FieldCategory>,
}

impl TargetSchema {
    /// Build a schema from categories. Field ids are assumed unique; the
    /// built-in catalogs guarantee this by construction.
    pub fn new(categories: Vec<FieldCategory>) -> Self {
        Self { categories }
    }

    /// Ordered categories with their ordered fields.
    pub fn categories(&self) -> &[FieldCategory] {
        &self.categories
    }

    /// Total number of target fields across all categories.
    pub fn total_field_count(&self) -> usize {
        self.categories.iter().map(|c| c.fields.len()).sum()
    }

    /// All fields in display order, flattened across categories.
    pub fn fields(&self) -> impl Iterator<Item = &TargetField> {
        self.categories.iter().flat_map(|c| c.fields.iter())
    }

    /// Look up a field by id.
    pub fn field(&self, id: &FieldId) -> Option<&TargetField> {
        self.fields().find(|f| &f.id == id)
    }

    /// True if the schema contains a field with this id.
    pub fn contains(&self, id: &FieldId) -> bool {
        self.field(id).is_some()
    }

    /// Ids of all required fields.
    pub fn required_field_ids(&self) -> Vec<FieldId> {
        self.fields()
            .filter(|f| f.required)
            .map(|f| f.id.clone())
            .collect()
    }

    /// The built-in BigCommerce product schema.
    pub fn bigcommerce() -> Self {
        fn field(id: &str, label: &str, required: bool) -> TargetField {
            TargetField {
                // Built-in ids are non-blank literals.
                id: FieldId::new(id).expect("builtin field id"),
                label: label.to_string(),
                required,
            }
        }

        Self::new(vec![
            FieldCategory {
                name: "Product Information".to_string(),
                fields: vec![
                    field("name", "Product Name", true),
                    field("sku", "SKU", true),
                    field("price", "Price", true),
                    field("description", "Description", false),
                    field("brand_name", "Brand", false),
                ],
            },
            FieldCategory {
                name: "Inventory & Shipping".to_string(),
                fields: vec![
                    field("inventory_level", "Stock Quantity", false),
                    field("weight", "Weight", false),
                    field("width", "Width", false),
                    field("height", "Height", false),
                    field("depth", "Depth", false),
                ],
            },
            FieldCategory {
                name: "Categories & Images".to_string(),
                fields: vec![
                    field("categories", "Categories", false),
                    field("images", "Images", false),
                ],
            },
        ])
    }
}
