//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - Full-text search using FTS5 (products OR their aliases)
//! - CRUD operations with aliases eagerly attached
//!
//! ## FTS5 Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  User types: "zard"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products_fts MATCH ........ name, set_name, variant                    │
//! │  product_aliases_fts MATCH . alias text ("Zard" → Charizard)            │
//! │       │                                                                 │
//! │       ▼  combined with OR                                               │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │ Charizard | Base Set | Holo             │ ← alias MATCH!             │
//! │  │ Blastoise | Base Set | Holo             │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼  AND-apply game/category/set_name filters, then paginate        │
//! │  Results ordered by (name, id) with total count                         │
//! │                                                                         │
//! │  Performance: single-digit ms (FTS5 MATCH, not LIKE scans)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use cardfolio_core::{Price, Product, ProductAlias, ProductPage};

use crate::error::{DbError, DbResult};
use crate::repository::alias::fetch_aliases_for;

/// Column list shared by every product SELECT.
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.game, p.set_name, p.card_number, p.rarity, \
     p.condition, p.variant, p.category, p.subcategory, p.release_date, p.image_url, \
     p.description, p.market_price_cents, p.low_price_cents, p.high_price_cents, \
     p.created_at, p.updated_at";

// =============================================================================
// Query Inputs
// =============================================================================

/// Validated inputs for a full-text search.
#[derive(Debug, Clone)]
pub struct ProductSearch {
    /// Free-text query (validated non-empty upstream).
    pub query: String,

    /// Case-insensitive substring filter on game.
    pub game: Option<String>,

    /// Case-insensitive substring filter on category.
    pub category: Option<String>,

    /// Case-insensitive substring filter on set name.
    pub set_name: Option<String>,

    /// Page number (1-based).
    pub page: i64,

    /// Page size.
    pub per_page: i64,
}

/// Validated inputs for a paginated listing.
#[derive(Debug, Clone)]
pub struct ProductList {
    pub game: Option<String>,
    pub category: Option<String>,
    pub page: i64,
    pub per_page: i64,
}

/// A partial update: only `Some` fields are applied, everything else keeps
/// its stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
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
    pub market_price: Option<Price>,
    pub low_price: Option<Price>,
    pub high_price: Option<Price>,
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Flat row shape for the products table.
///
/// Prices live in storage as integer cents; `into_product` converts them to
/// the domain [`Price`] type and attaches the eagerly-loaded aliases.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    game: String,
    set_name: Option<String>,
    card_number: Option<String>,
    rarity: Option<String>,
    condition: String,
    variant: Option<String>,
    category: String,
    subcategory: Option<String>,
    release_date: Option<DateTime<Utc>>,
    image_url: Option<String>,
    description: Option<String>,
    market_price_cents: Option<i64>,
    low_price_cents: Option<i64>,
    high_price_cents: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, aliases: Vec<ProductAlias>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            game: self.game,
            set_name: self.set_name,
            card_number: self.card_number,
            rarity: self.rarity,
            condition: self.condition,
            variant: self.variant,
            category: self.category,
            subcategory: self.subcategory,
            release_date: self.release_date,
            image_url: self.image_url,
            description: self.description,
            market_price: self.market_price_cents.map(Price::from_cents),
            low_price: self.low_price_cents.map(Price::from_cents),
            high_price: self.high_price_cents.map(Price::from_cents),
            created_at: self.created_at,
            updated_at: self.updated_at,
            aliases,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let page = repo.search(&params).await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches products using full-text search.
    ///
    /// ## Matching Policy
    /// A product matches when EITHER its own indexed text (name, set_name,
    /// variant) matches the query OR any of its aliases does. Supplied
    /// game/category/set_name filters are then AND-applied as
    /// case-insensitive substring matches.
    ///
    /// ## Pagination
    /// `total` is counted over the same condition in a separate query before
    /// the page itself is fetched, so it reflects all matches rather than
    /// the limited result set.
    ///
    /// Ordering is `name ASC, id ASC` - the id tie-break keeps pages stable
    /// when many products share a name.
    pub async fn search(&self, params: &ProductSearch) -> DbResult<ProductPage> {
        debug!(
            query = %params.query,
            page = params.page,
            per_page = params.per_page,
            "Searching products"
        );

        let offset = (params.page - 1) * params.per_page;

        // A query with no indexable tokens (e.g. only punctuation) cannot
        // match anything; skip the store entirely.
        let Some(match_expr) = fts_match_expression(&params.query) else {
            return Ok(ProductPage {
                products: Vec::new(),
                total: 0,
                page: params.page,
                per_page: params.per_page,
                has_next: false,
                has_prev: params.page > 1,
            });
        };

        let mut where_sql = String::from(
            "(p.rowid IN (SELECT rowid FROM products_fts WHERE products_fts MATCH ?) \
             OR p.id IN (SELECT product_id FROM product_aliases_fts WHERE product_aliases_fts MATCH ?))",
        );

        let filters = [
            ("p.game", params.game.as_deref()),
            ("p.category", params.category.as_deref()),
            ("p.set_name", params.set_name.as_deref()),
        ];
        for (column, value) in filters {
            if value.is_some() {
                where_sql.push_str(&format!(
                    " AND lower({column}) LIKE '%' || lower(?) || '%'"
                ));
            }
        }

        // Count all matches before pagination is applied
        let count_sql = format!("SELECT COUNT(*) FROM products p WHERE {where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&match_expr)
            .bind(&match_expr);
        for (_, value) in filters {
            if let Some(filter) = value {
                count_query = count_query.bind(filter);
            }
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let page_sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE {where_sql} \
             ORDER BY p.name ASC, p.id ASC LIMIT ? OFFSET ?"
        );
        let mut page_query = sqlx::query_as::<_, ProductRow>(&page_sql)
            .bind(&match_expr)
            .bind(&match_expr);
        for (_, value) in filters {
            if let Some(filter) = value {
                page_query = page_query.bind(filter);
            }
        }
        let rows = page_query
            .bind(params.per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        debug!(total, returned = rows.len(), "Search complete");

        let products = self.attach_aliases(rows).await?;

        Ok(ProductPage {
            products,
            total,
            page: params.page,
            per_page: params.per_page,
            has_next: offset + params.per_page < total,
            has_prev: params.page > 1,
        })
    }

    /// Lists products with pagination and optional game/category filters.
    ///
    /// Unlike [`search`](Self::search), no total count is computed.
    pub async fn list(&self, params: &ProductList) -> DbResult<Vec<Product>> {
        debug!(page = params.page, per_page = params.per_page, "Listing products");

        let offset = (params.page - 1) * params.per_page;

        let filters = [
            ("p.game", params.game.as_deref()),
            ("p.category", params.category.as_deref()),
        ];
        let mut clauses = Vec::new();
        for (column, value) in filters {
            if value.is_some() {
                clauses.push(format!("lower({column}) LIKE '%' || lower(?) || '%'"));
            }
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p {where_sql}\
             ORDER BY p.name ASC, p.id ASC LIMIT ? OFFSET ?"
        );
        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for (_, value) in filters {
            if let Some(filter) = value {
                query = query.bind(filter);
            }
        }
        let rows = query
            .bind(params.per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        self.attach_aliases(rows).await
    }

    /// Gets a product by its ID, aliases attached.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ?");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let mut products = self.attach_aliases(vec![row]).await?;
                Ok(products.pop())
            }
            None => Ok(None),
        }
    }

    /// Inserts a new product.
    ///
    /// The caller supplies a fully-built product (id and timestamps already
    /// assigned); a freshly created product owns no aliases yet.
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, game, set_name, card_number, rarity, condition, variant,
                category, subcategory, release_date, image_url, description,
                market_price_cents, low_price_cents, high_price_cents,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.game)
        .bind(&product.set_name)
        .bind(&product.card_number)
        .bind(&product.rarity)
        .bind(&product.condition)
        .bind(&product.variant)
        .bind(&product.category)
        .bind(&product.subcategory)
        .bind(product.release_date)
        .bind(&product.image_url)
        .bind(&product.description)
        .bind(product.market_price.map(|p| p.cents()))
        .bind(product.low_price.map(|p| p.cents()))
        .bind(product.high_price.map(|p| p.cents()))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Applies a partial update to an existing product.
    ///
    /// Fields absent from the patch keep their stored values. Refreshes
    /// `updated_at`. The not-found check runs before any mutation.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated product, aliases attached
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let mut product = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        apply_patch(&mut product, patch);
        product.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?, game = ?, set_name = ?, card_number = ?, rarity = ?,
                condition = ?, variant = ?, category = ?, subcategory = ?,
                release_date = ?, image_url = ?, description = ?,
                market_price_cents = ?, low_price_cents = ?, high_price_cents = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.game)
        .bind(&product.set_name)
        .bind(&product.card_number)
        .bind(&product.rarity)
        .bind(&product.condition)
        .bind(&product.variant)
        .bind(&product.category)
        .bind(&product.subcategory)
        .bind(product.release_date)
        .bind(&product.image_url)
        .bind(&product.description)
        .bind(product.market_price.map(|p| p.cents()))
        .bind(product.low_price.map(|p| p.cents()))
        .bind(product.high_price.map(|p| p.cents()))
        .bind(product.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(product)
    }

    /// Deletes a product.
    ///
    /// The foreign key on product_aliases cascades, removing exactly the
    /// aliases owned by this product.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Loads aliases for a batch of product rows in one query and zips them
    /// back onto the products.
    async fn attach_aliases(&self, rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut aliases = fetch_aliases_for(&self.pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let owned = aliases.remove(&row.id).unwrap_or_default();
                row.into_product(owned)
            })
            .collect())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn apply_patch(product: &mut Product, patch: &ProductPatch) {
    if let Some(name) = &patch.name {
        product.name = name.clone();
    }
    if let Some(game) = &patch.game {
        product.game = game.clone();
    }
    if let Some(set_name) = &patch.set_name {
        product.set_name = Some(set_name.clone());
    }
    if let Some(card_number) = &patch.card_number {
        product.card_number = Some(card_number.clone());
    }
    if let Some(rarity) = &patch.rarity {
        product.rarity = Some(rarity.clone());
    }
    if let Some(condition) = &patch.condition {
        product.condition = condition.clone();
    }
    if let Some(variant) = &patch.variant {
        product.variant = Some(variant.clone());
    }
    if let Some(category) = &patch.category {
        product.category = category.clone();
    }
    if let Some(subcategory) = &patch.subcategory {
        product.subcategory = Some(subcategory.clone());
    }
    if let Some(release_date) = patch.release_date {
        product.release_date = Some(release_date);
    }
    if let Some(image_url) = &patch.image_url {
        product.image_url = Some(image_url.clone());
    }
    if let Some(description) = &patch.description {
        product.description = Some(description.clone());
    }
    if let Some(market_price) = patch.market_price {
        product.market_price = Some(market_price);
    }
    if let Some(low_price) = patch.low_price {
        product.low_price = Some(low_price);
    }
    if let Some(high_price) = patch.high_price {
        product.high_price = Some(high_price);
    }
}

/// Builds an FTS5 MATCH expression from free text.
///
/// Each alphanumeric token is double-quoted so user input can never inject
/// FTS5 query syntax; multiple tokens combine with the implicit AND. Returns
/// `None` when the text contains no indexable tokens.
fn fts_match_expression(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| format!("\"{token}\""))
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::alias::NewAlias;
    use crate::repository::generate_id;
    use std::time::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_product(name: &str, game: &str, category: &str) -> Product {
        let now = Utc::now();
        Product {
            id: generate_id(),
            name: name.to_string(),
            game: game.to_string(),
            set_name: None,
            card_number: None,
            rarity: None,
            condition: "NM".to_string(),
            variant: None,
            category: category.to_string(),
            subcategory: None,
            release_date: None,
            image_url: None,
            description: None,
            market_price: None,
            low_price: None,
            high_price: None,
            created_at: now,
            updated_at: now,
            aliases: Vec::new(),
        }
    }

    fn search_params(query: &str) -> ProductSearch {
        ProductSearch {
            query: query.to_string(),
            game: None,
            category: None,
            set_name: None,
            page: 1,
            per_page: 20,
        }
    }

    #[test]
    fn test_fts_match_expression() {
        assert_eq!(fts_match_expression("zard"), Some("\"zard\"".to_string()));
        assert_eq!(
            fts_match_expression("base set"),
            Some("\"base\" \"set\"".to_string())
        );
        // FTS5 operators are neutralized by quoting
        assert_eq!(
            fts_match_expression("zard OR *"),
            Some("\"zard\" \"OR\"".to_string())
        );
        assert_eq!(fts_match_expression("!!!"), None);
        assert_eq!(fts_match_expression(""), None);
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;
        let repo = db.products();

        let mut product = sample_product("Charizard", "Pokemon", "Card");
        product.market_price = Some(Price::from_cents(35000));
        product.set_name = Some("Base Set".to_string());

        repo.insert(&product).await.unwrap();
        let fetched = repo.get_by_id(&product.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Charizard");
        assert_eq!(fetched.game, "Pokemon");
        assert_eq!(fetched.set_name.as_deref(), Some("Base Set"));
        assert_eq!(fetched.market_price, Some(Price::from_cents(35000)));
        assert!(fetched.aliases.is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let db = test_db().await;
        let repo = db.products();

        assert!(repo.get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_matches_by_name() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&sample_product("Charizard", "Pokemon", "Card"))
            .await
            .unwrap();
        repo.insert(&sample_product("Blastoise", "Pokemon", "Card"))
            .await
            .unwrap();

        let page = repo.search(&search_params("charizard")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].name, "Charizard");
    }

    #[tokio::test]
    async fn test_search_matches_by_alias_only() {
        let db = test_db().await;
        let repo = db.products();
        let aliases = db.aliases();

        let product = sample_product("Charizard", "Pokemon", "Card");
        repo.insert(&product).await.unwrap();
        aliases
            .insert(
                &product.id,
                &NewAlias {
                    alias: "Zard".to_string(),
                    alias_type: "nickname".to_string(),
                    search_weight: 1,
                },
            )
            .await
            .unwrap();

        // "Zard" appears nowhere in the product's own fields
        let page = repo.search(&search_params("Zard")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].id, product.id);
        assert_eq!(page.products[0].aliases.len(), 1);
    }

    #[tokio::test]
    async fn test_search_nonexistent_term_is_empty() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&sample_product("Charizard", "Pokemon", "Card"))
            .await
            .unwrap();

        let page = repo
            .search(&search_params("nonexistent-term-xyz"))
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.products.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[tokio::test]
    async fn test_search_punctuation_only_query_is_empty() {
        let db = test_db().await;
        let repo = db.products();

        let page = repo.search(&search_params("!!!")).await.unwrap();
        assert_eq!(page.total, 0);
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn test_search_filter_narrows_results() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&sample_product("Dark Magician", "Yugioh", "Card"))
            .await
            .unwrap();
        repo.insert(&sample_product("Dark Charizard", "Pokemon", "Card"))
            .await
            .unwrap();

        let unfiltered = repo.search(&search_params("dark")).await.unwrap();
        assert_eq!(unfiltered.total, 2);

        let mut filtered_params = search_params("dark");
        filtered_params.game = Some("poke".to_string());
        let filtered = repo.search(&filtered_params).await.unwrap();
        assert_eq!(filtered.total, 1);
        assert_eq!(filtered.products[0].game, "Pokemon");
    }

    #[tokio::test]
    async fn test_search_pagination_invariants() {
        let db = test_db().await;
        let repo = db.products();

        for i in 0..25 {
            repo.insert(&sample_product(
                &format!("Pikachu {i:02}"),
                "Pokemon",
                "Card",
            ))
            .await
            .unwrap();
        }

        let mut params = search_params("pikachu");
        params.per_page = 20;

        let first = repo.search(&params).await.unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.products.len(), 20);
        assert!(first.has_next);
        assert!(!first.has_prev);

        params.page = 2;
        let second = repo.search(&params).await.unwrap();
        assert_eq!(second.total, 25);
        assert_eq!(second.products.len(), 5);
        assert!(!second.has_next);
        assert!(second.has_prev);

        // Ordered by name: page 2 continues where page 1 left off
        assert_eq!(second.products[0].name, "Pikachu 20");
    }

    #[tokio::test]
    async fn test_search_reflects_updated_name() {
        let db = test_db().await;
        let repo = db.products();

        let product = sample_product("Charizard", "Pokemon", "Card");
        repo.insert(&product).await.unwrap();

        let patch = ProductPatch {
            name: Some("Venusaur".to_string()),
            ..ProductPatch::default()
        };
        repo.update(&product.id, &patch).await.unwrap();

        assert_eq!(repo.search(&search_params("charizard")).await.unwrap().total, 0);
        assert_eq!(repo.search(&search_params("venusaur")).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&sample_product("Charizard", "Pokemon", "Card"))
            .await
            .unwrap();
        repo.insert(&sample_product("Dark Magician", "Yugioh", "Card"))
            .await
            .unwrap();

        let all = repo
            .list(&ProductList {
                game: None,
                category: None,
                page: 1,
                per_page: 20,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        // Ordered by name
        assert_eq!(all[0].name, "Charizard");

        let filtered = repo
            .list(&ProductList {
                game: Some("yugi".to_string()),
                category: None,
                page: 1,
                per_page: 20,
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Dark Magician");
    }

    #[tokio::test]
    async fn test_partial_update_retains_absent_fields() {
        let db = test_db().await;
        let repo = db.products();

        let mut product = sample_product("Charizard", "Pokemon", "Card");
        product.rarity = Some("Holo Rare".to_string());
        repo.insert(&product).await.unwrap();

        // Give the clock room so updated_at strictly increases
        tokio::time::sleep(Duration::from_millis(5)).await;

        let patch = ProductPatch {
            market_price: Some(Price::from_cents(1250)),
            ..ProductPatch::default()
        };
        let updated = repo.update(&product.id, &patch).await.unwrap();

        assert_eq!(updated.market_price, Some(Price::from_cents(1250)));
        assert_eq!(updated.name, "Charizard");
        assert_eq!(updated.rarity.as_deref(), Some("Holo Rare"));
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at > product.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let db = test_db().await;
        let repo = db.products();

        let err = repo
            .update("no-such-id", &ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_owned_aliases_only() {
        let db = test_db().await;
        let repo = db.products();
        let aliases = db.aliases();

        let doomed = sample_product("Charizard", "Pokemon", "Card");
        let survivor = sample_product("Blastoise", "Pokemon", "Card");
        repo.insert(&doomed).await.unwrap();
        repo.insert(&survivor).await.unwrap();

        for (product, alias) in [(&doomed, "Zard"), (&survivor, "Toise")] {
            aliases
                .insert(
                    &product.id,
                    &NewAlias {
                        alias: alias.to_string(),
                        alias_type: "nickname".to_string(),
                        search_weight: 1,
                    },
                )
                .await
                .unwrap();
        }

        repo.delete(&doomed.id).await.unwrap();

        assert!(repo.get_by_id(&doomed.id).await.unwrap().is_none());

        // The survivor keeps exactly its own alias, and the deleted
        // product's alias no longer matches anything
        let remaining = repo.get_by_id(&survivor.id).await.unwrap().unwrap();
        assert_eq!(remaining.aliases.len(), 1);
        assert_eq!(remaining.aliases[0].alias, "Toise");

        assert_eq!(repo.search(&search_params("Zard")).await.unwrap().total, 0);
        assert_eq!(repo.search(&search_params("Toise")).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let db = test_db().await;
        let repo = db.products();

        let err = repo.delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
