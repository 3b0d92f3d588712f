//! # Domain Types
//!
//! Core domain types for the order lifecycle and the ingredient ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   Ingredient    │   │    MenuItem     │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)          │   │
//! │  │  name           │   │  name           │   │  ordered_at         │   │
//! │  │  on_hand        │   │  price_cents    │   │  cost_cents         │   │
//! │  │  unit           │   │  category       │   │  status             │   │
//! │  │  restock_level  │   └────────┬────────┘   └──────────┬──────────┘   │
//! │  └────────▲────────┘            │                       │              │
//! │           │          IngredientRequirement   TransactionComponent      │
//! │           │          (recipe line, per unit) (line item + snapshot)    │
//! │           │                     │                       │              │
//! │           └──────── IngredientDelta ◄───────────────────┘              │
//! │                     (the unit of exchange between resolver,            │
//! │                      ledger, and deduction snapshot)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A component freezes the menu item's name and unit price, and stores the
//! resolved per-unit deduction list, at order time. Cancellation reverses the
//! stored snapshot, never the live recipe, so later menu edits cannot
//! change what gets restored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Transaction Status
// =============================================================================

/// The status of an order transaction.
///
/// ## State Machine
/// ```text
///              create
///                │
///                ▼
///          ┌───────────┐   fulfill    ┌───────────┐
///          │in progress│ ───────────► │ fulfilled │ (terminal)
///          └─────┬─────┘              └───────────┘
///                │ cancel
///                ▼
///          ┌───────────┐
///          │ cancelled │ (terminal)
///          └───────────┘
/// ```
/// `update` keeps the transaction `in progress`. No operation ever leaves a
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Order has been placed; the kitchen is working on it.
    /// The wire and database representation is `"in progress"` (with the
    /// space), matching what the UI displays and filters on.
    #[serde(rename = "in progress")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "in progress"))]
    InProgress,
    /// Order was completed and handed to the customer.
    Fulfilled,
    /// Order was cancelled; its ledger deductions have been reversed.
    Cancelled,
}

impl TransactionStatus {
    /// Returns the canonical string form (also the stored form).
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::InProgress => "in progress",
            TransactionStatus::Fulfilled => "fulfilled",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    /// Checks whether this status is terminal (immutable from here on).
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Fulfilled | TransactionStatus::Cancelled
        )
    }

    /// Checks whether the transition `self → next` is legal.
    ///
    /// Only `in progress → fulfilled` and `in progress → cancelled` exist;
    /// everything else (including anything out of a terminal state) is
    /// rejected with `InvalidTransition` by the callers.
    pub const fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (
                TransactionStatus::InProgress,
                TransactionStatus::Fulfilled
            ) | (
                TransactionStatus::InProgress,
                TransactionStatus::Cancelled
            )
        )
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::InProgress
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// An ingredient tracked by the on-hand ledger.
///
/// `on_hand` is mutated exclusively through the ledger's apply/reverse
/// operations; it can never go negative as the result of a committed
/// deduction.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Ingredient {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across the catalog ("Bun", "Beef Patty").
    pub name: String,

    /// Current on-hand quantity, in this ingredient's own unit.
    pub on_hand: i64,

    /// Unit the quantity is counted in ("count", "oz", "slice").
    /// No implicit conversion: a recipe needing fractional amounts
    /// declares a finer unit instead.
    pub unit: String,

    /// Threshold below which the restock report flags this ingredient.
    pub restock_level: i64,

    /// When the ingredient was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the on-hand quantity last changed.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Checks if the ingredient is below its restock threshold.
    #[inline]
    pub fn needs_restock(&self) -> bool {
        self.on_hand < self.restock_level
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A menu item available for ordering.
///
/// Immutable reference data from the order lifecycle's point of view;
/// mutated only by menu administration (and the seed tool).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across the menu ("Classic Hamburger").
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Menu category ("Burgers", "Shakes", "Seasonal").
    pub category: String,

    /// When the menu item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the menu item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Ingredient Requirement (recipe line)
// =============================================================================

/// One line of a menu item's recipe: the per-unit ingredient requirement.
///
/// The `name` is joined in from the catalog so the resolver can match
/// "no onion"-style removals against it; when the referenced ingredient is
/// missing the name is empty and the resolver rejects the recipe with
/// `UnknownIngredient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct IngredientRequirement {
    /// Ingredient this recipe line consumes.
    pub ingredient_id: String,

    /// Ingredient display name at lookup time.
    pub name: String,

    /// Quantity consumed per unit of the menu item sold.
    pub quantity: i64,
}

// =============================================================================
// Ingredient Delta
// =============================================================================

/// A quantity change to charge against one ingredient's on-hand stock.
///
/// This is the unit of exchange between the resolver (which produces them),
/// the ledger (which applies/reverses them), and the deduction snapshot
/// (which stores them per unit of the component).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct IngredientDelta {
    /// Ingredient to charge.
    pub ingredient_id: String,

    /// Per-unit quantity, in the ingredient's own unit. Always positive;
    /// direction comes from the operation (apply decrements, reverse
    /// increments).
    pub quantity: i64,
}

impl IngredientDelta {
    /// Creates a new delta.
    pub fn new(ingredient_id: impl Into<String>, quantity: i64) -> Self {
        IngredientDelta {
            ingredient_id: ingredient_id.into(),
            quantity,
        }
    }

    /// Returns this delta scaled by a component quantity.
    ///
    /// The snapshot stores per-unit deductions; the actual ledger charge for
    /// a component is `delta.quantity × component.quantity`.
    pub fn scaled(&self, factor: i64) -> IngredientDelta {
        IngredientDelta {
            ingredient_id: self.ingredient_id.clone(),
            quantity: self.quantity * factor,
        }
    }
}

/// Scales a per-unit snapshot by a component quantity.
pub fn scale_deltas(deltas: &[IngredientDelta], factor: i64) -> Vec<IngredientDelta> {
    deltas.iter().map(|d| d.scaled(factor)).collect()
}

// =============================================================================
// Transaction
// =============================================================================

/// An order transaction.
///
/// Never deleted: cancellation is a status change, not a row removal, so
/// sales and inventory reports keep their history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the order was placed.
    #[ts(as = "String")]
    pub ordered_at: DateTime<Utc>,

    /// Total cost in cents: Σ(component unit price × quantity).
    pub cost_cents: i64,

    /// Current lifecycle status.
    pub status: TransactionStatus,

    /// When the row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the row was last updated (status change or component replace).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the total cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Transaction Component
// =============================================================================

/// A line item in a transaction.
///
/// Uses the snapshot pattern twice over: `item_name`/`unit_price_cents`
/// freeze the menu item at order time, and `deductions` freezes the resolved
/// per-unit ledger charge so cancellation reverses exactly what was deducted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionComponent {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Transaction this component belongs to.
    pub transaction_id: String,

    /// Menu item that was ordered (reference only; see snapshots below).
    pub menu_item_id: String,

    /// Menu item name at order time (frozen).
    pub item_name: String,

    /// Unit price in cents at order time (frozen).
    pub unit_price_cents: i64,

    /// Quantity ordered.
    pub quantity: i64,

    /// Raw comma-separated modification list as entered ("no onion, add bacon").
    pub modifications: String,

    /// Position within the transaction (display order).
    pub position: i64,

    /// Per-unit deduction snapshot charged against the ledger at order time.
    /// Loaded from the `component_deductions` table, not this row.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub deductions: Vec<IngredientDelta>,
}

impl TransactionComponent {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Component Draft
// =============================================================================

/// A fully-resolved component, ready to be persisted and charged.
///
/// Built by the operation layer (menu lookup + resolver) and handed to the
/// transaction workflow, which persists it and applies the scaled deductions
/// inside one database transaction.
#[derive(Debug, Clone)]
pub struct ComponentDraft {
    /// Menu item being ordered.
    pub menu_item_id: String,

    /// Menu item name to freeze on the component.
    pub item_name: String,

    /// Unit price in cents to freeze on the component.
    pub unit_price_cents: i64,

    /// Quantity ordered.
    pub quantity: i64,

    /// Raw modification string as entered.
    pub modifications: String,

    /// Resolved per-unit deduction snapshot.
    pub deductions: Vec<IngredientDelta>,
}

impl ComponentDraft {
    /// Returns the line total as Money (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
