//! # Menu Repository
//!
//! Menu items and the recipes linking them to ingredients.
//!
//! ## Recipe Linkage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              menu_items ──< menu_item_ingredients                       │
//! │                                                                         │
//! │  "Classic Hamburger" ($6.89)                                            │
//! │        ├── 1 × Bun                                                      │
//! │        ├── 1 × Beef Patty                                               │
//! │        ├── 1 × Cheese Slice                                             │
//! │        ├── 1 × Lettuce                                                  │
//! │        ├── 1 × Tomato Slice                                             │
//! │        └── 1 × Onion                                                    │
//! │                                                                         │
//! │  `requirements_for` joins the ingredient names in; a recipe row whose  │
//! │  ingredient no longer exists still comes back (empty name) so the      │
//! │  resolver can reject it with UnknownIngredient instead of it silently  │
//! │  vanishing from the recipe.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use revpos_core::validation::{validate_item_name, validate_price_cents, validate_quantity};
use revpos_core::{CoreError, IngredientRequirement, MenuItem};

/// Repository for menu item and recipe operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    // =========================================================================
    // Menu Item Reads
    // =========================================================================

    /// Gets a menu item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_cents, category, created_at, updated_at
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets a menu item by name (case-insensitive).
    ///
    /// The order surface addresses items by display name, matching how the
    /// kitchen and the terminal UI talk about them.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_cents, category, created_at, updated_at
            FROM menu_items
            WHERE name = ?1 COLLATE NOCASE
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists the whole menu, grouped by category then name.
    pub async fn list_all(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_cents, category, created_at, updated_at
            FROM menu_items
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists menu items in one category.
    pub async fn list_by_category(&self, category: &str) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_cents, category, created_at, updated_at
            FROM menu_items
            WHERE category = ?1 COLLATE NOCASE
            ORDER BY name
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the distinct categories, in display order.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM menu_items ORDER BY category")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    // =========================================================================
    // Menu Item Writes
    // =========================================================================

    /// Inserts a new menu item.
    ///
    /// ## Returns
    /// The created item with generated ID and timestamps.
    pub async fn insert(
        &self,
        name: &str,
        price_cents: i64,
        category: &str,
    ) -> DbResult<MenuItem> {
        validate_item_name(name).map_err(CoreError::from)?;
        validate_price_cents(price_cents).map_err(CoreError::from)?;

        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            price_cents,
            category: category.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price_cents, category, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(&item.category)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Updates a menu item's price.
    ///
    /// Does not touch existing transactions: components carry their own
    /// price snapshot.
    pub async fn set_price(&self, id: &str, price_cents: i64) -> DbResult<()> {
        validate_price_cents(price_cents).map_err(CoreError::from)?;

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE menu_items SET price_cents = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        Ok(())
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    /// Sets a recipe line: this menu item consumes `quantity` of the
    /// ingredient per unit sold.
    ///
    /// Upserts on (menu_item_id, ingredient_id) so re-running a recipe
    /// definition adjusts the quantity instead of failing.
    pub async fn set_requirement(
        &self,
        menu_item_id: &str,
        ingredient_id: &str,
        quantity: i64,
    ) -> DbResult<()> {
        validate_quantity(quantity).map_err(CoreError::from)?;

        sqlx::query(
            r#"
            INSERT INTO menu_item_ingredients (menu_item_id, ingredient_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (menu_item_id, ingredient_id)
            DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(menu_item_id)
        .bind(ingredient_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a recipe line.
    pub async fn remove_requirement(
        &self,
        menu_item_id: &str,
        ingredient_id: &str,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM menu_item_ingredients
            WHERE menu_item_id = ?1 AND ingredient_id = ?2
            "#,
        )
        .bind(menu_item_id)
        .bind(ingredient_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Recipe line", ingredient_id));
        }

        Ok(())
    }

    /// Gets a menu item's per-unit recipe, ingredient names joined in.
    ///
    /// LEFT JOIN on purpose: a recipe row pointing at a missing ingredient
    /// comes back with an empty name so the resolver rejects it with
    /// `UnknownIngredient` rather than the row disappearing.
    pub async fn requirements_for(&self, menu_item_id: &str) -> DbResult<Vec<IngredientRequirement>> {
        let requirements = sqlx::query_as::<_, IngredientRequirement>(
            r#"
            SELECT
                mii.ingredient_id,
                COALESCE(i.name, '') AS name,
                mii.quantity
            FROM menu_item_ingredients mii
            LEFT JOIN ingredients i ON i.id = mii.ingredient_id
            WHERE mii.menu_item_id = ?1
            ORDER BY mii.rowid
            "#,
        )
        .bind(menu_item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requirements)
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

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = test_db().await;
        let burger = db
            .menu()
            .insert("Classic Hamburger", 689, "Burgers")
            .await
            .unwrap();

        let by_id = db.menu().get_by_id(&burger.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Classic Hamburger");
        assert_eq!(by_id.price_cents, 689);

        let by_name = db
            .menu()
            .get_by_name("classic hamburger")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, burger.id);
    }

    #[tokio::test]
    async fn test_list_and_categories() {
        let db = test_db().await;
        db.menu().insert("Classic Hamburger", 689, "Burgers").await.unwrap();
        db.menu().insert("Cheese Dog", 449, "Dogs").await.unwrap();
        db.menu().insert("Double Burger", 899, "Burgers").await.unwrap();

        let all = db.menu().list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        // Grouped by category, then name.
        assert_eq!(all[0].name, "Classic Hamburger");
        assert_eq!(all[1].name, "Double Burger");
        assert_eq!(all[2].name, "Cheese Dog");

        let burgers = db.menu().list_by_category("burgers").await.unwrap();
        assert_eq!(burgers.len(), 2);

        let categories = db.menu().categories().await.unwrap();
        assert_eq!(categories, vec!["Burgers".to_string(), "Dogs".to_string()]);
    }

    #[tokio::test]
    async fn test_recipe_round_trip() {
        let db = test_db().await;
        let burger = db
            .menu()
            .insert("Classic Hamburger", 689, "Burgers")
            .await
            .unwrap();
        let bun = db.ingredients().insert("Bun", 100, "count", 10).await.unwrap();
        let patty = db
            .ingredients()
            .insert("Beef Patty", 40, "count", 10)
            .await
            .unwrap();

        db.menu().set_requirement(&burger.id, &bun.id, 1).await.unwrap();
        db.menu().set_requirement(&burger.id, &patty.id, 1).await.unwrap();

        let recipe = db.menu().requirements_for(&burger.id).await.unwrap();
        assert_eq!(recipe.len(), 2);
        assert_eq!(recipe[0].ingredient_id, bun.id);
        assert_eq!(recipe[0].name, "Bun");
        assert_eq!(recipe[0].quantity, 1);

        // Upsert adjusts quantity in place.
        db.menu().set_requirement(&burger.id, &patty.id, 2).await.unwrap();
        let recipe = db.menu().requirements_for(&burger.id).await.unwrap();
        assert_eq!(recipe.len(), 2);
        assert_eq!(recipe[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_dangling_recipe_line_survives_with_empty_name() {
        let db = test_db().await;
        let burger = db
            .menu()
            .insert("Mystery Burger", 500, "Burgers")
            .await
            .unwrap();

        db.menu().set_requirement(&burger.id, "999", 1).await.unwrap();

        let recipe = db.menu().requirements_for(&burger.id).await.unwrap();
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].ingredient_id, "999");
        assert_eq!(recipe[0].name, "");
    }

    #[tokio::test]
    async fn test_remove_requirement() {
        let db = test_db().await;
        let burger = db
            .menu()
            .insert("Classic Hamburger", 689, "Burgers")
            .await
            .unwrap();
        let onion = db.ingredients().insert("Onion", 50, "count", 10).await.unwrap();

        db.menu().set_requirement(&burger.id, &onion.id, 1).await.unwrap();
        db.menu().remove_requirement(&burger.id, &onion.id).await.unwrap();

        assert!(db.menu().requirements_for(&burger.id).await.unwrap().is_empty());

        let err = db
            .menu()
            .remove_requirement(&burger.id, &onion.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_price_leaves_history_alone() {
        let db = test_db().await;
        let burger = db
            .menu()
            .insert("Classic Hamburger", 689, "Burgers")
            .await
            .unwrap();

        db.menu().set_price(&burger.id, 729).await.unwrap();
        let burger = db.menu().get_by_id(&burger.id).await.unwrap().unwrap();
        assert_eq!(burger.price_cents, 729);
    }
}
