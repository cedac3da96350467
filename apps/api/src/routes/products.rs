//! Product and alias route handlers.
//!
//! The transport layer stays thin: parse and validate the request, hand the
//! validated inputs to a repository, map the outcome to a status code.
//! Validation failures are rejected before the store is touched, and
//! not-found checks happen before any mutation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use cardfolio_core::validation::{validate_page, validate_per_page, validate_search_query};
use cardfolio_core::{
    AliasCreate, Price, Product, ProductAlias, ProductCreate, ProductPage, ProductUpdate,
    DEFAULT_PER_PAGE,
};
use cardfolio_db::{generate_id, NewAlias, ProductList, ProductPatch, ProductSearch};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

/// Product routes, mounted under the version prefix.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/search", get(search_products))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/aliases", post(create_alias))
        .route("/products/{id}/aliases/{alias_id}", delete(delete_alias))
}

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub game: Option<String>,
    pub category: Option<String>,
    pub set_name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub game: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// =============================================================================
// Search
// =============================================================================

/// GET /products/search?q=zard&game=pokemon&page=1&per_page=20
///
/// Full-text search with pagination. A product matches when its own text or
/// any of its aliases matches the query.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<ProductPage>, ApiError> {
    let query = params.q.unwrap_or_default();
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);

    let mut errors = Vec::new();
    if let Err(err) = validate_search_query(&query) {
        errors.push(err);
    }
    if let Err(err) = validate_page(page) {
        errors.push(err);
    }
    if let Err(err) = validate_per_page(per_page) {
        errors.push(err);
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let result = state
        .db
        .products()
        .search(&ProductSearch {
            query,
            game: params.game,
            category: params.category,
            set_name: params.set_name,
            page,
            per_page,
        })
        .await?;

    Ok(Json(result))
}

// =============================================================================
// CRUD
// =============================================================================

/// GET /products?game=pokemon&page=1&per_page=20
///
/// Paginated listing with optional filters; no total count.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);

    let mut errors = Vec::new();
    if let Err(err) = validate_page(page) {
        errors.push(err);
    }
    if let Err(err) = validate_per_page(per_page) {
        errors.push(err);
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let products = state
        .db
        .products()
        .list(&ProductList {
            game: params.game,
            category: params.category,
            page,
            per_page,
        })
        .await?;

    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {id}")))?;

    Ok(Json(product))
}

/// POST /products
///
/// Creates a product. Identifier and timestamps are server-assigned; the
/// created record owns no aliases yet.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ProductCreate>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    payload.validate()?;

    let now = Utc::now();
    let product = Product {
        id: generate_id(),
        name: payload.name,
        game: payload.game,
        set_name: payload.set_name,
        card_number: payload.card_number,
        rarity: payload.rarity,
        condition: payload.condition,
        variant: payload.variant,
        category: payload.category,
        subcategory: payload.subcategory,
        release_date: payload.release_date,
        image_url: payload.image_url,
        description: payload.description,
        market_price: price_field(payload.market_price),
        low_price: price_field(payload.low_price),
        high_price: price_field(payload.high_price),
        created_at: now,
        updated_at: now,
        aliases: Vec::new(),
    };

    let created = state.db.products().insert(&product).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /products/{id}
///
/// Partial update: only fields present in the request change; absent fields
/// keep their stored values. Refreshes `updated_at`.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    payload.validate()?;

    let patch = ProductPatch {
        name: payload.name,
        game: payload.game,
        set_name: payload.set_name,
        card_number: payload.card_number,
        rarity: payload.rarity,
        condition: payload.condition,
        variant: payload.variant,
        category: payload.category,
        subcategory: payload.subcategory,
        release_date: payload.release_date,
        image_url: payload.image_url,
        description: payload.description,
        market_price: price_field(payload.market_price),
        low_price: price_field(payload.low_price),
        high_price: price_field(payload.high_price),
    };

    let updated = state.db.products().update(&id, &patch).await?;

    Ok(Json(updated))
}

/// DELETE /products/{id}
///
/// Deletes the product; the cascade removes exactly its aliases.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.products().delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Aliases
// =============================================================================

/// POST /products/{id}/aliases
pub async fn create_alias(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<AliasCreate>,
) -> Result<(StatusCode, Json<ProductAlias>), ApiError> {
    payload.validate()?;

    let alias = state
        .db
        .aliases()
        .insert(
            &id,
            &NewAlias {
                alias: payload.alias,
                alias_type: payload.alias_type,
                search_weight: payload.search_weight,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(alias)))
}

/// DELETE /products/{id}/aliases/{alias_id}
pub async fn delete_alias(
    State(state): State<Arc<AppState>>,
    Path((id, alias_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.db.aliases().delete(&id, &alias_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// Converts a validated wire decimal into the domain price type.
///
/// Callers run `validate()` first, so the conversion cannot fail here.
fn price_field(value: Option<Decimal>) -> Option<Price> {
    value.and_then(|decimal| Price::try_from_decimal(decimal).ok())
}
