//! # Request Schemas
//!
//! Wire shapes for create and update operations, decoupled from the domain
//! types so that partial updates are representable: every field of
//! [`ProductUpdate`] is optional, and a field that is absent from the request
//! leaves the stored value untouched.
//!
//! Each shape validates itself with the rules in [`crate::validation`],
//! collecting every failing field so the client sees the full picture in one
//! round trip.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{
    validate_optional_text, validate_price, validate_required_text, validate_search_weight,
};
use crate::DEFAULT_CONDITION;

// =============================================================================
// Field Length Limits
// =============================================================================
// These mirror the column widths in the products / product_aliases tables.

const NAME_MAX: usize = 255;
const GAME_MAX: usize = 100;
const SET_NAME_MAX: usize = 255;
const CARD_NUMBER_MAX: usize = 50;
const RARITY_MAX: usize = 50;
const CONDITION_MAX: usize = 50;
const VARIANT_MAX: usize = 100;
const CATEGORY_MAX: usize = 100;
const SUBCATEGORY_MAX: usize = 100;
const ALIAS_MAX: usize = 255;
const ALIAS_TYPE_MAX: usize = 50;

fn default_condition() -> String {
    DEFAULT_CONDITION.to_string()
}

fn default_search_weight() -> i64 {
    1
}

// =============================================================================
// Product Create
// =============================================================================

/// Request shape for creating a product.
///
/// Identifier and timestamps are server-assigned; the request never carries
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub game: String,
    pub set_name: Option<String>,
    pub card_number: Option<String>,
    pub rarity: Option<String>,
    #[serde(default = "default_condition")]
    pub condition: String,
    pub variant: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub market_price: Option<Decimal>,
    pub low_price: Option<Decimal>,
    pub high_price: Option<Decimal>,
}

impl ProductCreate {
    /// Validates the full required field set, collecting every failure.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        collect(&mut errors, validate_required_text("name", &self.name, NAME_MAX));
        collect(&mut errors, validate_required_text("game", &self.game, GAME_MAX));
        collect(
            &mut errors,
            validate_required_text("category", &self.category, CATEGORY_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("set_name", self.set_name.as_deref(), SET_NAME_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("card_number", self.card_number.as_deref(), CARD_NUMBER_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("rarity", self.rarity.as_deref(), RARITY_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("condition", Some(self.condition.as_str()), CONDITION_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("variant", self.variant.as_deref(), VARIANT_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("subcategory", self.subcategory.as_deref(), SUBCATEGORY_MAX),
        );
        collect_price(&mut errors, "market_price", self.market_price);
        collect_price(&mut errors, "low_price", self.low_price);
        collect_price(&mut errors, "high_price", self.high_price);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Product Update
// =============================================================================

/// Request shape for a partial product update.
///
/// Only fields present in the request are applied; absent fields retain
/// their stored values (they are not reset to null).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub game: Option<String>,
    pub set_name: Option<String>,
    pub card_number: Option<String>,
    pub rarity: Option<String>,
    pub condition: Option<String>,
    pub variant: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub market_price: Option<Decimal>,
    pub low_price: Option<Decimal>,
    pub high_price: Option<Decimal>,
}

impl ProductUpdate {
    /// Validates the fields that are present, collecting every failure.
    ///
    /// Fields that must be non-empty on create must also be non-empty when
    /// supplied here: an update cannot blank out a product's name.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            collect(&mut errors, validate_required_text("name", name, NAME_MAX));
        }
        if let Some(game) = &self.game {
            collect(&mut errors, validate_required_text("game", game, GAME_MAX));
        }
        if let Some(category) = &self.category {
            collect(
                &mut errors,
                validate_required_text("category", category, CATEGORY_MAX),
            );
        }
        collect(
            &mut errors,
            validate_optional_text("set_name", self.set_name.as_deref(), SET_NAME_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("card_number", self.card_number.as_deref(), CARD_NUMBER_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("rarity", self.rarity.as_deref(), RARITY_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("condition", self.condition.as_deref(), CONDITION_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("variant", self.variant.as_deref(), VARIANT_MAX),
        );
        collect(
            &mut errors,
            validate_optional_text("subcategory", self.subcategory.as_deref(), SUBCATEGORY_MAX),
        );
        collect_price(&mut errors, "market_price", self.market_price);
        collect_price(&mut errors, "low_price", self.low_price);
        collect_price(&mut errors, "high_price", self.high_price);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Alias Create
// =============================================================================

/// Request shape for attaching a search alias to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasCreate {
    pub alias: String,
    pub alias_type: String,
    #[serde(default = "default_search_weight")]
    pub search_weight: i64,
}

impl AliasCreate {
    /// Validates the alias fields, collecting every failure.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        collect(&mut errors, validate_required_text("alias", &self.alias, ALIAS_MAX));
        collect(
            &mut errors,
            validate_required_text("alias_type", &self.alias_type, ALIAS_TYPE_MAX),
        );
        collect(&mut errors, validate_search_weight(self.search_weight));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn collect(errors: &mut Vec<ValidationError>, result: Result<(), ValidationError>) {
    if let Err(err) = result {
        errors.push(err);
    }
}

fn collect_price(errors: &mut Vec<ValidationError>, field: &str, value: Option<Decimal>) {
    if let Some(price) = value {
        collect(errors, validate_price(field, price));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> ProductCreate {
        serde_json::from_value(serde_json::json!({
            "name": "Charizard",
            "game": "Pokemon",
            "category": "Card"
        }))
        .unwrap()
    }

    #[test]
    fn test_create_minimal_request_is_valid() {
        let request = create_request();
        assert!(request.validate().is_ok());
        // Condition falls back to the Near Mint abbreviation
        assert_eq!(request.condition, "NM");
    }

    #[test]
    fn test_create_collects_all_failures() {
        let request: ProductCreate = serde_json::from_value(serde_json::json!({
            "name": "",
            "game": "",
            "category": "Card",
            "market_price": -3.0
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "game", "market_price"]);
    }

    #[test]
    fn test_create_rejects_overlong_optional_field() {
        let mut request = create_request();
        request.card_number = Some("9".repeat(51));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_empty_request_is_valid() {
        let update = ProductUpdate::default();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_required_field() {
        let update = ProductUpdate {
            name: Some(String::new()),
            ..ProductUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_rejects_bad_price_precision() {
        let update = ProductUpdate {
            market_price: Some("9.999".parse().unwrap()),
            ..ProductUpdate::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors[0].field(), "market_price");
    }

    #[test]
    fn test_alias_create_defaults_and_bounds() {
        let alias: AliasCreate = serde_json::from_value(serde_json::json!({
            "alias": "Zard",
            "alias_type": "nickname"
        }))
        .unwrap();
        assert_eq!(alias.search_weight, 1);
        assert!(alias.validate().is_ok());

        let alias = AliasCreate {
            alias: "Zard".to_string(),
            alias_type: "nickname".to_string(),
            search_weight: 11,
        };
        assert!(alias.validate().is_err());
    }
}
