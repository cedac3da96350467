//! # Alias Repository
//!
//! Database operations for product search aliases.
//!
//! Aliases have no independent lifecycle: they are created against an
//! existing product, deleted through it, and removed automatically when the
//! product itself is deleted (FK cascade). The alias FTS index follows along
//! via triggers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use cardfolio_core::ProductAlias;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;

/// Column list shared by every alias SELECT.
const ALIAS_COLUMNS: &str = "id, product_id, alias, alias_type, search_weight, created_at";

/// Input for creating a new alias (validated upstream).
#[derive(Debug, Clone)]
pub struct NewAlias {
    pub alias: String,
    pub alias_type: String,
    pub search_weight: i64,
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
struct AliasRow {
    id: String,
    product_id: String,
    alias: String,
    alias_type: String,
    search_weight: i64,
    created_at: DateTime<Utc>,
}

impl AliasRow {
    fn into_alias(self) -> ProductAlias {
        ProductAlias {
            id: self.id,
            product_id: self.product_id,
            alias: self.alias,
            alias_type: self.alias_type,
            search_weight: self.search_weight,
            created_at: self.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product alias operations.
#[derive(Debug, Clone)]
pub struct AliasRepository {
    pool: SqlitePool,
}

impl AliasRepository {
    /// Creates a new AliasRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AliasRepository { pool }
    }

    /// Attaches a new alias to an existing product.
    ///
    /// The product existence check runs before the insert so a missing
    /// product surfaces as NotFound rather than a foreign key error.
    ///
    /// ## Returns
    /// * `Ok(ProductAlias)` - The stored alias with generated id/timestamp
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn insert(&self, product_id: &str, new: &NewAlias) -> DbResult<ProductAlias> {
        debug!(product_id = %product_id, alias = %new.alias, "Inserting alias");

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("Product", product_id));
        }

        let alias = ProductAlias {
            id: generate_id(),
            product_id: product_id.to_string(),
            alias: new.alias.clone(),
            alias_type: new.alias_type.clone(),
            search_weight: new.search_weight,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO product_aliases (id, product_id, alias, alias_type, search_weight, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&alias.id)
        .bind(&alias.product_id)
        .bind(&alias.alias)
        .bind(&alias.alias_type)
        .bind(alias.search_weight)
        .bind(alias.created_at)
        .execute(&self.pool)
        .await?;

        Ok(alias)
    }

    /// Deletes an alias scoped to its owning product.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - No such alias under that product
    pub async fn delete(&self, product_id: &str, alias_id: &str) -> DbResult<()> {
        debug!(product_id = %product_id, alias_id = %alias_id, "Deleting alias");

        let result = sqlx::query("DELETE FROM product_aliases WHERE id = ? AND product_id = ?")
            .bind(alias_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ProductAlias", alias_id));
        }

        Ok(())
    }
}

// =============================================================================
// Eager Loading
// =============================================================================

/// Fetches the aliases for a batch of products in one query, grouped by
/// owning product id. Used by the product repository to attach aliases to
/// every read.
pub(crate) async fn fetch_aliases_for(
    pool: &SqlitePool,
    product_ids: &[String],
) -> DbResult<HashMap<String, Vec<ProductAlias>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; product_ids.len()].join(", ");
    let sql = format!(
        "SELECT {ALIAS_COLUMNS} FROM product_aliases \
         WHERE product_id IN ({placeholders}) \
         ORDER BY created_at ASC, id ASC"
    );

    let mut query = sqlx::query_as::<_, AliasRow>(&sql);
    for id in product_ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;

    let mut grouped: HashMap<String, Vec<ProductAlias>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.product_id.clone())
            .or_default()
            .push(row.into_alias());
    }

    Ok(grouped)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use cardfolio_core::Product;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seeded_product(db: &Database) -> Product {
        let now = Utc::now();
        let product = Product {
            id: generate_id(),
            name: "Charizard".to_string(),
            game: "Pokemon".to_string(),
            set_name: None,
            card_number: None,
            rarity: None,
            condition: "NM".to_string(),
            variant: None,
            category: "Card".to_string(),
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
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    fn nickname(alias: &str) -> NewAlias {
        NewAlias {
            alias: alias.to_string(),
            alias_type: "nickname".to_string(),
            search_weight: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_and_eager_load() {
        let db = test_db().await;
        let product = seeded_product(&db).await;

        let stored = db
            .aliases()
            .insert(&product.id, &nickname("Zard"))
            .await
            .unwrap();
        assert_eq!(stored.product_id, product.id);
        assert_eq!(stored.alias, "Zard");
        assert_eq!(stored.search_weight, 1);

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.aliases.len(), 1);
        assert_eq!(fetched.aliases[0].id, stored.id);
    }

    #[tokio::test]
    async fn test_insert_for_unknown_product_is_not_found() {
        let db = test_db().await;

        let err = db
            .aliases()
            .insert("no-such-product", &nickname("Zard"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_alias() {
        let db = test_db().await;
        let product = seeded_product(&db).await;

        let stored = db
            .aliases()
            .insert(&product.id, &nickname("Zard"))
            .await
            .unwrap();

        db.aliases().delete(&product.id, &stored.id).await.unwrap();

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert!(fetched.aliases.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_alias_is_not_found() {
        let db = test_db().await;
        let product = seeded_product(&db).await;

        let err = db
            .aliases()
            .delete(&product.id, "no-such-alias")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_aliases_groups_by_product() {
        let db = test_db().await;
        let first = seeded_product(&db).await;
        let second = seeded_product(&db).await;

        db.aliases().insert(&first.id, &nickname("Zard")).await.unwrap();
        db.aliases().insert(&first.id, &nickname("Char")).await.unwrap();
        db.aliases().insert(&second.id, &nickname("Toise")).await.unwrap();

        let grouped = fetch_aliases_for(
            db.pool(),
            &[first.id.clone(), second.id.clone()],
        )
        .await
        .unwrap();

        assert_eq!(grouped[&first.id].len(), 2);
        assert_eq!(grouped[&second.id].len(), 1);
    }
}
