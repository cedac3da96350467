//! # Domain Types
//!
//! Core domain types for the Cardfolio catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                │
//! │  │      Product        │ 1    N │    ProductAlias     │                │
//! │  │  ─────────────────  │───────►│  ─────────────────  │                │
//! │  │  id (UUID string)   │        │  id (UUID string)   │                │
//! │  │  name, game, ...    │        │  product_id (FK)    │                │
//! │  │  prices (cents)     │        │  alias, alias_type  │                │
//! │  │  aliases: Vec<_>    │        │  search_weight      │                │
//! │  └─────────────────────┘        └─────────────────────┘                │
//! │                                                                         │
//! │  ┌─────────────────────┐                                               │
//! │  │     ProductPage     │  One page of search results plus the          │
//! │  │  products, total,   │  pagination metadata clients need to          │
//! │  │  has_next, has_prev │  render next/previous controls                │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product exclusively owns its aliases: deleting the product cascades to
//! them, and an alias never outlives its product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::price::Price;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry for a single card or collectible variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4), assigned once at creation.
    pub id: String,

    /// Display name ("Charizard").
    pub name: String,

    /// Game or franchise the product belongs to ("Pokemon").
    pub game: String,

    /// Set or collection name ("Base Set").
    pub set_name: Option<String>,

    /// Card number within the set ("4/102").
    pub card_number: Option<String>,

    /// Rarity level ("Holo Rare").
    pub rarity: Option<String>,

    /// Grading condition abbreviation. Defaults to "NM" (Near Mint).
    pub condition: String,

    /// Variant label ("Holo", "1st Edition").
    pub variant: Option<String>,

    /// Product category ("Card").
    pub category: String,

    /// Product subcategory.
    pub subcategory: Option<String>,

    /// Release date of the product.
    pub release_date: Option<DateTime<Utc>>,

    /// URL of the product image.
    pub image_url: Option<String>,

    /// Free-text description.
    pub description: Option<String>,

    /// Current market price.
    pub market_price: Option<Price>,

    /// Historical low price.
    pub low_price: Option<Price>,

    /// Historical high price.
    pub high_price: Option<Price>,

    /// When the product was created (server-assigned).
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (refreshed on every mutation).
    pub updated_at: DateTime<Utc>,

    /// Search aliases owned by this product, eagerly attached on reads.
    #[serde(default)]
    pub aliases: Vec<ProductAlias>,
}

// =============================================================================
// Product Alias
// =============================================================================

/// An alternate search term for a product (nickname, abbreviation).
///
/// Aliases widen search recall beyond the canonical name: "Zard" finds
/// Charizard even though the product name never contains that token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAlias {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Identifier of the owning product.
    pub product_id: String,

    /// The alias text itself.
    pub alias: String,

    /// Kind of alias ("nickname", "abbreviation", ...). Free text.
    pub alias_type: String,

    /// Relevance weight (1-10). Stored and validated but not consulted by
    /// result ordering.
    pub search_weight: i64,

    /// When the alias was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product Page
// =============================================================================

/// One page of search results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// The products on this page, each with aliases attached.
    pub products: Vec<Product>,

    /// Total number of matches before pagination.
    pub total: i64,

    /// The requested page number (1-based).
    pub page: i64,

    /// The requested page size.
    pub per_page: i64,

    /// Whether another page of results exists after this one.
    pub has_next: bool,

    /// Whether a page of results exists before this one.
    pub has_prev: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            name: "Charizard".to_string(),
            game: "Pokemon".to_string(),
            set_name: Some("Base Set".to_string()),
            card_number: Some("4/102".to_string()),
            rarity: Some("Holo Rare".to_string()),
            condition: "NM".to_string(),
            variant: None,
            category: "Card".to_string(),
            subcategory: None,
            release_date: None,
            image_url: None,
            description: None,
            market_price: Some(Price::from_cents(35000)),
            low_price: None,
            high_price: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            aliases: Vec::new(),
        }
    }

    #[test]
    fn test_product_serializes_prices_as_decimals() {
        let value = serde_json::to_value(sample_product()).unwrap();

        assert_eq!(value["name"], "Charizard");
        assert_eq!(value["market_price"].as_f64(), Some(350.0));
        assert!(value["low_price"].is_null());
        assert_eq!(value["aliases"], serde_json::json!([]));
    }

    #[test]
    fn test_product_deserializes_without_aliases_field() {
        let mut value = serde_json::to_value(sample_product()).unwrap();
        value.as_object_mut().unwrap().remove("aliases");

        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.aliases.is_empty());
    }
}
