//! # Ingredient Repository
//!
//! The ingredient catalog and the on-hand ledger.
//!
//! ## Ledger Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     On-Hand Ledger Rules                                │
//! │                                                                         │
//! │  apply(deltas)    ── decrement on_hand, all-or-nothing                 │
//! │                      each decrement is ONE conditional UPDATE:         │
//! │                                                                         │
//! │        UPDATE ingredients                                               │
//! │        SET on_hand = on_hand - ?                                        │
//! │        WHERE id = ? AND on_hand >= ?                                    │
//! │                                                                         │
//! │                      read-modify-write and the non-negative floor      │
//! │                      are a single atomic statement; SQLite serializes  │
//! │                      writers, so no lost updates                       │
//! │                                                                         │
//! │  reverse(deltas)  ── increment on_hand, unconditional                  │
//! │                      (restocking never violates the floor)             │
//! │                                                                         │
//! │  0 rows affected on apply?                                             │
//! │        ingredient exists  → InsufficientStock (rolls everything back)  │
//! │        ingredient missing → UnknownIngredient (rolls everything back)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order workflows in [`crate::repository::transaction`] run these same
//! statements inside their own enclosing SQL transaction, so a whole order's
//! deductions commit or roll back as one unit.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use revpos_core::validation::{validate_item_name, validate_stock_quantity};
use revpos_core::{CoreError, Ingredient, IngredientDelta, IngredientIndex};

/// Repository for the ingredient catalog and on-hand ledger.
#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    /// Creates a new IngredientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IngredientRepository { pool }
    }

    // =========================================================================
    // Catalog Reads
    // =========================================================================

    /// Gets an ingredient by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Ingredient>> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, on_hand, unit, restock_level, created_at, updated_at
            FROM ingredients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ingredient)
    }

    /// Gets an ingredient by name (case-insensitive).
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Ingredient>> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, on_hand, unit, restock_level, created_at, updated_at
            FROM ingredients
            WHERE name = ?1 COLLATE NOCASE
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ingredient)
    }

    /// Lists the whole catalog, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Ingredient>> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, on_hand, unit, restock_level, created_at, updated_at
            FROM ingredients
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ingredients)
    }

    /// Builds the case-insensitive name index the resolver matches
    /// modifications against.
    pub async fn name_index(&self) -> DbResult<IngredientIndex> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT id, name FROM ingredients")
                .fetch_all(&self.pool)
                .await?;

        let mut index = IngredientIndex::new();
        for (id, name) in &rows {
            index.insert(id, name);
        }

        Ok(index)
    }

    // =========================================================================
    // Catalog Writes
    // =========================================================================

    /// Inserts a new ingredient.
    ///
    /// ## Returns
    /// The created ingredient with generated ID and timestamps.
    pub async fn insert(
        &self,
        name: &str,
        on_hand: i64,
        unit: &str,
        restock_level: i64,
    ) -> DbResult<Ingredient> {
        validate_item_name(name).map_err(CoreError::from)?;
        validate_stock_quantity(on_hand).map_err(CoreError::from)?;
        validate_stock_quantity(restock_level).map_err(CoreError::from)?;

        let now = Utc::now();
        let ingredient = Ingredient {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            on_hand,
            unit: unit.to_string(),
            restock_level,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %ingredient.id, name = %ingredient.name, "Inserting ingredient");

        sqlx::query(
            r#"
            INSERT INTO ingredients (id, name, on_hand, unit, restock_level, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&ingredient.id)
        .bind(&ingredient.name)
        .bind(ingredient.on_hand)
        .bind(&ingredient.unit)
        .bind(ingredient.restock_level)
        .bind(ingredient.created_at)
        .bind(ingredient.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(ingredient)
    }

    /// Sets an ingredient's on-hand quantity to an absolute value.
    ///
    /// ## When To Use
    /// Manual stock corrections and deliveries. Order flows never call this;
    /// they go through `apply`/`reverse`.
    pub async fn set_on_hand(&self, id: &str, on_hand: i64) -> DbResult<()> {
        validate_stock_quantity(on_hand).map_err(CoreError::from)?;

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE ingredients SET on_hand = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(on_hand)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ingredient", id));
        }

        debug!(id = %id, on_hand = on_hand, "Set ingredient stock");
        Ok(())
    }

    /// Sets an ingredient's restock threshold.
    pub async fn set_restock_level(&self, id: &str, restock_level: i64) -> DbResult<()> {
        validate_stock_quantity(restock_level).map_err(CoreError::from)?;

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE ingredients SET restock_level = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(restock_level)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ingredient", id));
        }

        Ok(())
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Applies a batch of deductions in one SQL transaction.
    ///
    /// All-or-nothing: the first failed floor check or unknown ingredient
    /// rolls back every earlier decrement in the batch.
    pub async fn apply(&self, deltas: &[IngredientDelta]) -> DbResult<()> {
        debug!(count = deltas.len(), "Applying ledger deductions");

        let mut tx = self.pool.begin().await?;
        Self::apply_tx(&mut tx, deltas).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Reverses a batch of deductions in one SQL transaction.
    pub async fn reverse(&self, deltas: &[IngredientDelta]) -> DbResult<()> {
        debug!(count = deltas.len(), "Reversing ledger deductions");

        let mut tx = self.pool.begin().await?;
        Self::reverse_tx(&mut tx, deltas).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Applies deductions inside a caller-owned transaction.
    ///
    /// Each decrement is one conditional UPDATE: the floor check and the
    /// read-modify-write cannot be separated by a concurrent writer. Zero
    /// rows affected means the floor check failed or the id is unknown;
    /// a follow-up SELECT (inside the same transaction) tells which.
    pub(crate) async fn apply_tx(
        tx: &mut Transaction<'_, Sqlite>,
        deltas: &[IngredientDelta],
    ) -> DbResult<()> {
        for delta in deltas {
            let now = Utc::now();
            let result = sqlx::query(
                r#"
                UPDATE ingredients
                SET on_hand = on_hand - ?2, updated_at = ?3
                WHERE id = ?1 AND on_hand >= ?2
                "#,
            )
            .bind(&delta.ingredient_id)
            .bind(delta.quantity)
            .bind(now)
            .execute(&mut **tx)
            .await?;

            if result.rows_affected() == 0 {
                let row: Option<(String, i64)> =
                    sqlx::query_as("SELECT name, on_hand FROM ingredients WHERE id = ?1")
                        .bind(&delta.ingredient_id)
                        .fetch_optional(&mut **tx)
                        .await?;

                return Err(match row {
                    Some((name, available)) => CoreError::InsufficientStock {
                        name,
                        available,
                        requested: delta.quantity,
                    }
                    .into(),
                    None => CoreError::UnknownIngredient {
                        ingredient_id: delta.ingredient_id.clone(),
                    }
                    .into(),
                });
            }
        }

        Ok(())
    }

    /// Reverses deductions inside a caller-owned transaction.
    ///
    /// Unconditional increments; only an unknown ingredient id fails.
    pub(crate) async fn reverse_tx(
        tx: &mut Transaction<'_, Sqlite>,
        deltas: &[IngredientDelta],
    ) -> DbResult<()> {
        for delta in deltas {
            let now = Utc::now();
            let result = sqlx::query(
                r#"
                UPDATE ingredients
                SET on_hand = on_hand + ?2, updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&delta.ingredient_id)
            .bind(delta.quantity)
            .bind(now)
            .execute(&mut **tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(CoreError::UnknownIngredient {
                    ingredient_id: delta.ingredient_id.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_ingredient(db: &Database, name: &str, on_hand: i64) -> Ingredient {
        db.ingredients()
            .insert(name, on_hand, "count", 10)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let by_id = db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Bun");
        assert_eq!(by_id.on_hand, 100);

        // Name lookup is case-insensitive.
        let by_name = db.ingredients().get_by_name("bun").await.unwrap().unwrap();
        assert_eq!(by_name.id, bun.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        seed_ingredient(&db, "Bun", 100).await;

        let err = db
            .ingredients()
            .insert("Bun", 50, "count", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_apply_then_reverse_round_trip() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        let patty = seed_ingredient(&db, "Beef Patty", 40).await;

        let deltas = vec![
            IngredientDelta::new(&bun.id, 2),
            IngredientDelta::new(&patty.id, 2),
        ];

        db.ingredients().apply(&deltas).await.unwrap();
        assert_eq!(
            db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap().on_hand,
            98
        );
        assert_eq!(
            db.ingredients().get_by_id(&patty.id).await.unwrap().unwrap().on_hand,
            38
        );

        db.ingredients().reverse(&deltas).await.unwrap();
        assert_eq!(
            db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap().on_hand,
            100
        );
        assert_eq!(
            db.ingredients().get_by_id(&patty.id).await.unwrap().unwrap().on_hand,
            40
        );
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back_whole_batch() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        let cheese = seed_ingredient(&db, "Cheese Slice", 1).await;

        // Bun would succeed, cheese fails; the bun decrement must roll back.
        let deltas = vec![
            IngredientDelta::new(&bun.id, 5),
            IngredientDelta::new(&cheese.id, 2),
        ];

        let err = db.ingredients().apply(&deltas).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { available: 1, requested: 2, .. })
        ));

        assert_eq!(
            db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap().on_hand,
            100
        );
        assert_eq!(
            db.ingredients().get_by_id(&cheese.id).await.unwrap().unwrap().on_hand,
            1
        );
    }

    #[tokio::test]
    async fn test_unknown_ingredient_rolls_back_whole_batch() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let deltas = vec![
            IngredientDelta::new(&bun.id, 1),
            IngredientDelta::new("999", 1),
        ];

        let err = db.ingredients().apply(&deltas).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::UnknownIngredient { .. })
        ));

        assert_eq!(
            db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap().on_hand,
            100
        );
    }

    #[tokio::test]
    async fn test_exact_stock_drains_to_zero() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 3).await;

        db.ingredients()
            .apply(&[IngredientDelta::new(&bun.id, 3)])
            .await
            .unwrap();

        assert_eq!(
            db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap().on_hand,
            0
        );

        // One more fails with the zero balance reported.
        let err = db
            .ingredients()
            .apply(&[IngredientDelta::new(&bun.id, 1)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_applies_have_no_lost_updates() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = db.ingredients();
            let id = bun.id.clone();
            handles.push(tokio::spawn(async move {
                repo.apply(&[IngredientDelta::new(&id, 3)]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(
            db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap().on_hand,
            100 - 10 * 3
        );
    }

    #[tokio::test]
    async fn test_set_on_hand_and_restock_level() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        db.ingredients().set_on_hand(&bun.id, 250).await.unwrap();
        db.ingredients().set_restock_level(&bun.id, 40).await.unwrap();

        let bun = db.ingredients().get_by_id(&bun.id).await.unwrap().unwrap();
        assert_eq!(bun.on_hand, 250);
        assert_eq!(bun.restock_level, 40);

        let err = db.ingredients().set_on_hand("missing", 5).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_name_index() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        seed_ingredient(&db, "Onion", 50).await;

        let index = db.ingredients().name_index().await.unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.id_for_name("BUN"), Some(bun.id.as_str()));
        assert!(index.contains_id(&bun.id));
    }
}
