//! # Boundary Records
//!
//! Request and response records shared across the command modules.
//!
//! ## Wire Naming
//! Everything serializes camelCase, matching the JSON the web UI consumes:
//! ```json
//! {
//!   "components": [
//!     { "itemName": "Classic Hamburger", "quantity": 2, "modifications": "no onion" }
//!   ]
//! }
//! ```
//!
//! One-off responses that belong to a single command (e.g. the order view)
//! live next to that command, the way the rest of the command layer does it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use revpos_core::{
    Ingredient, IngredientRequirement, MenuItem, Transaction, TransactionComponent,
    TransactionStatus,
};

// =============================================================================
// Requests
// =============================================================================

/// One line of an order submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequest {
    /// Menu item name as shown on the terminal (matched case-insensitively).
    pub item_name: String,

    /// Units ordered.
    pub quantity: i64,

    /// Raw modification string, e.g. `"no onion, add cheese"`.
    #[serde(default)]
    pub modifications: String,
}

/// Payload for `create_transaction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub components: Vec<ComponentRequest>,
}

// =============================================================================
// Responses
// =============================================================================

/// Transaction header returned by every workflow operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: String,
    pub ordered_at: DateTime<Utc>,
    pub cost_cents: i64,
    pub status: TransactionStatus,
}

impl From<Transaction> for TransactionSummary {
    fn from(transaction: Transaction) -> Self {
        TransactionSummary {
            id: transaction.id,
            ordered_at: transaction.ordered_at,
            cost_cents: transaction.cost_cents,
            status: transaction.status,
        }
    }
}

/// One component line as displayed on tickets and the kitchen screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentView {
    pub id: String,
    pub item_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub modifications: String,
    pub line_total_cents: i64,
}

impl From<TransactionComponent> for ComponentView {
    fn from(component: TransactionComponent) -> Self {
        let line_total_cents = component.line_total().cents();
        ComponentView {
            id: component.id,
            item_name: component.item_name,
            unit_price_cents: component.unit_price_cents,
            quantity: component.quantity,
            modifications: component.modifications,
            line_total_cents,
        }
    }
}

/// Full transaction view for display/polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub id: String,
    pub ordered_at: DateTime<Utc>,
    pub cost_cents: i64,
    pub status: TransactionStatus,
    pub components: Vec<ComponentView>,
}

impl TransactionDetail {
    /// Assembles a detail view from a transaction and its loaded components.
    pub fn new(transaction: Transaction, components: Vec<TransactionComponent>) -> Self {
        TransactionDetail {
            id: transaction.id,
            ordered_at: transaction.ordered_at,
            cost_cents: transaction.cost_cents,
            status: transaction.status,
            components: components.into_iter().map(ComponentView::from).collect(),
        }
    }
}

/// One recipe line for the "what's in it" lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub ingredient_id: String,
    pub name: String,
    pub quantity: i64,
}

impl From<IngredientRequirement> for IngredientLine {
    fn from(requirement: IngredientRequirement) -> Self {
        IngredientLine {
            ingredient_id: requirement.ingredient_id,
            name: requirement.name,
            quantity: requirement.quantity,
        }
    }
}

/// Menu item as shown on the register grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub category: String,
}

impl From<MenuItem> for MenuItemView {
    fn from(item: MenuItem) -> Self {
        MenuItemView {
            id: item.id,
            name: item.name,
            price_cents: item.price_cents,
            category: item.category,
        }
    }
}

/// Ingredient as shown on the back-office stock screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientView {
    pub id: String,
    pub name: String,
    pub on_hand: i64,
    pub unit: String,
    pub restock_level: i64,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        IngredientView {
            id: ingredient.id,
            name: ingredient.name,
            on_hand: ingredient.on_hand,
            unit: ingredient.unit,
            restock_level: ingredient.restock_level,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_summary_from_transaction() {
        let now = Utc::now();
        let transaction = Transaction {
            id: "t-1".to_string(),
            ordered_at: now,
            cost_cents: 1378,
            status: TransactionStatus::InProgress,
            created_at: now,
            updated_at: now,
        };

        let summary = TransactionSummary::from(transaction);
        assert_eq!(summary.id, "t-1");
        assert_eq!(summary.cost_cents, 1378);
        assert_eq!(summary.status, TransactionStatus::InProgress);
    }

    #[test]
    fn test_component_request_defaults_modifications() {
        let request: ComponentRequest =
            serde_json::from_str(r#"{ "itemName": "Classic Hamburger", "quantity": 2 }"#)
                .unwrap();

        assert_eq!(request.item_name, "Classic Hamburger");
        assert_eq!(request.quantity, 2);
        assert_eq!(request.modifications, "");
    }

    #[test]
    fn test_catalog_views_wire_shape() {
        let item = MenuItem {
            id: "m-1".to_string(),
            name: "Classic Hamburger".to_string(),
            price_cents: 689,
            category: "Burgers".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(MenuItemView::from(item)).unwrap();
        assert_eq!(json["priceCents"], 689);
        assert_eq!(json["category"], "Burgers");

        let ingredient = Ingredient {
            id: "i-1".to_string(),
            name: "Bun".to_string(),
            on_hand: 100,
            unit: "count".to_string(),
            restock_level: 50,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(IngredientView::from(ingredient)).unwrap();
        assert_eq!(json["onHand"], 100);
        assert_eq!(json["restockLevel"], 50);
    }

    #[test]
    fn test_summary_wire_shape() {
        let now = Utc::now();
        let summary = TransactionSummary {
            id: "t-1".to_string(),
            ordered_at: now,
            cost_cents: 689,
            status: TransactionStatus::InProgress,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["costCents"], 689);
        assert_eq!(json["status"], "in progress");
    }
}
