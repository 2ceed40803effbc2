//! Source platform selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The e-commerce platform the catalog export comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Shopify,
    WooCommerce,
    Magento,
    Wix,
    Squarespace,
    /// Free-text platform name for anything not in the list.
    Other(String),
}

impl Platform {
    /// Display name for the platform.
    pub fn name(&self) -> &str {
        match self {
            Self::Shopify => "Shopify",
            Self::WooCommerce => "WooCommerce",
            Self::Magento => "Magento",
            Self::Wix => "Wix",
            Self::Squarespace => "Squarespace",
            Self::Other(name) => name,
        }
    }

    /// A selection is valid when it names a platform; free text must be
    /// non-blank after trimming.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Other(name) => !name.trim().is_empty(),
            _ => true,
        }
    }

    /// Parse a platform from user input. Known names map to their variant,
    /// anything else becomes `Other`.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "shopify" => Self::Shopify,
            "woocommerce" => Self::WooCommerce,
            "magento" => Self::Magento,
            "wix" => Self::Wix,
            "squarespace" => Self::Squarespace,
            _ => Self::Other(input.trim().to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
