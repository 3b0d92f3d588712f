//! # Menu Commands
//!
//! Catalog reads for the register grid and the recipe preview.
//!
//! ## Recipe Preview Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Register Screen                                                │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │ Classic Hamburger        $6.89          [what's in it?] │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  ingredients_for_menu_item("Classic Hamburger")                │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  menu item (by name) ──► requirements ──► IngredientLine[]     │
//! │                                                                 │
//! │  Hamburger Bun      1                                          │
//! │  Beef Patty         1                                          │
//! │  American Cheese    1                                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::dto::{IngredientLine, IngredientView, MenuItemView};
use crate::error::ApiError;
use revpos_db::Database;

/// Lists the whole menu, grouped for the register grid.
///
/// ## Returns
/// All menu items ordered by category, then name.
pub async fn list_menu_items(db: &Database) -> Result<Vec<MenuItemView>, ApiError> {
    debug!("list_menu_items command");
    let items = db.menu().list_all().await?;
    Ok(items.into_iter().map(MenuItemView::from).collect())
}

/// Lists the menu items in one category.
///
/// ## Arguments
/// * `category` - Category label, e.g. "Burgers" or "Shakes"
pub async fn menu_items_by_category(
    db: &Database,
    category: &str,
) -> Result<Vec<MenuItemView>, ApiError> {
    debug!(category = %category, "menu_items_by_category command");
    let items = db.menu().list_by_category(category).await?;
    Ok(items.into_iter().map(MenuItemView::from).collect())
}

/// Lists the distinct menu categories (register tab strip).
pub async fn menu_categories(db: &Database) -> Result<Vec<String>, ApiError> {
    debug!("menu_categories command");
    Ok(db.menu().categories().await?)
}

/// Lists what goes into one menu item, per unit sold.
///
/// ## When To Use
/// - "What's in it?" preview on the register
/// - Verifying a recipe after a menu change
///
/// ## Arguments
/// * `item_name` - Menu item name (matched case-insensitively)
///
/// ## Returns
/// One line per required ingredient, or ApiError::NotFound for an
/// unknown item. An item with no recipe returns an empty list.
pub async fn ingredients_for_menu_item(
    db: &Database,
    item_name: &str,
) -> Result<Vec<IngredientLine>, ApiError> {
    debug!(item = %item_name, "ingredients_for_menu_item command");

    let item = db
        .menu()
        .get_by_name(item_name)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", item_name))?;

    let requirements = db.menu().requirements_for(&item.id).await?;

    Ok(requirements.into_iter().map(IngredientLine::from).collect())
}

/// Lists every ledger ingredient (back-office stock screen).
pub async fn list_ingredients(db: &Database) -> Result<Vec<IngredientView>, ApiError> {
    debug!("list_ingredients command");
    let ingredients = db.ingredients().list_all().await?;
    Ok(ingredients.into_iter().map(IngredientView::from).collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use revpos_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_catalog_reads() {
        let db = test_db().await;
        db.menu().insert("Classic Hamburger", 689, "Burgers").await.unwrap();
        db.menu().insert("Cheese Dog", 479, "Dogs").await.unwrap();
        db.menu().insert("Chili Dog", 529, "Dogs").await.unwrap();

        let all = list_menu_items(&db).await.unwrap();
        assert_eq!(all.len(), 3);

        let dogs = menu_items_by_category(&db, "Dogs").await.unwrap();
        assert_eq!(dogs.len(), 2);
        assert!(dogs.iter().all(|item| item.category == "Dogs"));

        let categories = menu_categories(&db).await.unwrap();
        assert_eq!(categories, vec!["Burgers".to_string(), "Dogs".to_string()]);
    }

    #[tokio::test]
    async fn test_recipe_preview() {
        let db = test_db().await;
        let bun = db.ingredients().insert("Hamburger Bun", 100, "count", 10).await.unwrap();
        let patty = db.ingredients().insert("Beef Patty", 80, "count", 10).await.unwrap();
        let burger = db.menu().insert("Classic Hamburger", 689, "Burgers").await.unwrap();
        db.menu().set_requirement(&burger.id, &bun.id, 1).await.unwrap();
        db.menu().set_requirement(&burger.id, &patty.id, 2).await.unwrap();

        // Name match ignores case.
        let lines = ingredients_for_menu_item(&db, "classic hamburger").await.unwrap();
        assert_eq!(lines.len(), 2);
        let patty_line = lines.iter().find(|l| l.name == "Beef Patty").unwrap();
        assert_eq!(patty_line.quantity, 2);
        assert_eq!(patty_line.ingredient_id, patty.id);
    }

    #[tokio::test]
    async fn test_recipe_preview_unknown_item() {
        let db = test_db().await;
        let err = ingredients_for_menu_item(&db, "Lobster Roll").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_item_without_recipe_is_empty() {
        let db = test_db().await;
        db.menu().insert("Bottled Water", 199, "Beverages").await.unwrap();

        let lines = ingredients_for_menu_item(&db, "Bottled Water").await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_stock_screen_lists_ingredients() {
        let db = test_db().await;
        db.ingredients().insert("Hamburger Bun", 100, "count", 10).await.unwrap();
        db.ingredients().insert("Coffee Grounds", 500, "ounce", 100).await.unwrap();

        let ingredients = list_ingredients(&db).await.unwrap();
        assert_eq!(ingredients.len(), 2);
    }
}
