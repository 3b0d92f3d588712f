//! # Order Builder
//!
//! In-memory draft order being assembled at a terminal, before submission.
//!
//! ## Order Builder Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Builder Operations                             │
//! │                                                                         │
//! │  Cashier Action           Operation               Order State Change    │
//! │  ──────────────           ─────────               ──────────────────    │
//! │                                                                         │
//! │  Tap menu item ─────────► add_item() ───────────► merge or push line   │
//! │                                                                         │
//! │  Change quantity ───────► update_quantity() ────► line.quantity = n    │
//! │                           (n = 0 removes)                               │
//! │                                                                         │
//! │  Remove line ───────────► remove_line() ────────► lines.retain(..)     │
//! │                                                                         │
//! │  Void order ────────────► clear() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Pay ───────────────────► take_lines() ─────────► drain into submit    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Identity
//! Lines merge on (menu item, normalized modification string): two plain
//! Classic Hamburgers are one line with quantity 2, but "no onion" opens a
//! separate line because it deducts differently. Each line also carries a
//! synthetic `line_id` so the UI can address a specific line without
//! re-sending the whole modification string.
//!
//! The builder never touches the ledger; nothing is deducted until the order
//! is submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation::{validate_modifications, validate_quantity};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Order Line
// =============================================================================

/// One line of a draft order.
///
/// ## Design Notes
/// - `menu_item_id`: Reference to the menu item (for resolution at submit)
/// - `item_name` / `unit_price_cents`: Frozen copies from the menu at the
///   moment the line was added, so the draft displays consistent data even
///   if the menu changes underneath it
/// - `modifications`: Raw string as entered; parsing happens at submit
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    /// Synthetic line identifier (UUID), stable for the life of the draft.
    pub line_id: String,

    /// Menu item ID (UUID)
    pub menu_item_id: String,

    /// Menu item name at time of adding (frozen)
    pub item_name: String,

    /// Price in cents at time of adding (frozen)
    pub unit_price_cents: i64,

    /// Quantity of this line
    pub quantity: i64,

    /// Raw comma-separated modification string as entered
    pub modifications: String,

    /// When this line was added
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl OrderLine {
    /// Creates a new line from a menu item, freezing name and price.
    fn from_item(item: &MenuItem, quantity: i64, modifications: &str) -> Self {
        OrderLine {
            line_id: Uuid::new_v4().to_string(),
            menu_item_id: item.id.clone(),
            item_name: item.name.clone(),
            unit_price_cents: item.price_cents,
            quantity,
            modifications: modifications.trim().to_string(),
            added_at: Utc::now(),
        }
    }

    /// Returns the unit price as Money.
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Normalized form of the modification string, used as part of the merge
    /// key. Token order is preserved: "no onion, add bacon" and
    /// "add bacon, no onion" resolve identically today, but keeping them as
    /// separate lines matches what the cashier typed.
    fn modification_key(modifications: &str) -> String {
        modifications
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

// =============================================================================
// Order Builder
// =============================================================================

/// The draft order.
///
/// ## Invariants
/// - Lines are unique by (menu_item_id, normalized modifications)
/// - Quantity is always 1..=MAX_LINE_QUANTITY (0 removes the line)
/// - At most MAX_ORDER_LINES lines
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderBuilder {
    /// Lines in the draft, in the order they were first added.
    lines: Vec<OrderLine>,

    /// When the draft was opened or last cleared.
    #[ts(as = "String")]
    opened_at: DateTime<Utc>,
}

impl OrderBuilder {
    /// Creates a new empty draft order.
    pub fn new() -> Self {
        OrderBuilder {
            lines: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    /// Adds a menu item to the draft, merging into an existing line when the
    /// item and modifications match.
    ///
    /// ## Returns
    /// The `line_id` of the created or merged line.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        quantity: i64,
        modifications: &str,
    ) -> CoreResult<String> {
        validate_quantity(quantity)?;
        validate_modifications(modifications)?;

        let key = OrderLine::modification_key(modifications);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.menu_item_id == item.id && OrderLine::modification_key(&l.modifications) == key)
        {
            let merged = line.quantity + quantity;
            if merged > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = merged;
            return Ok(line.line_id.clone());
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        let line = OrderLine::from_item(item, quantity, modifications);
        let line_id = line.line_id.clone();
        self.lines.push(line);
        Ok(line_id)
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Negative quantities are rejected
    /// - Unknown line ids are rejected
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_line(line_id);
        }
        if quantity < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|l| l.line_id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::UnknownOrderLine {
                line_id: line_id.to_string(),
            }),
        }
    }

    /// Removes a line from the draft.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);

        if self.lines.len() == initial_len {
            Err(CoreError::UnknownOrderLine {
                line_id: line_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears the draft (void).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.opened_at = Utc::now();
    }

    /// Drains the lines for submission, leaving an empty draft behind.
    pub fn take_lines(&mut self) -> Vec<OrderLine> {
        self.opened_at = Utc::now();
        std::mem::take(&mut self.lines)
    }

    /// Returns the lines in display order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Looks up a line by id.
    pub fn line(&self, line_id: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the draft total.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Draft totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&OrderBuilder> for OrderTotals {
    fn from(order: &OrderBuilder) -> Self {
        OrderTotals {
            line_count: order.line_count(),
            total_quantity: order.total_quantity(),
            total_cents: order.total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> MenuItem {
        MenuItem {
            id: "item-burger".to_string(),
            name: "Classic Hamburger".to_string(),
            price_cents: 689,
            category: "Burgers".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn shake() -> MenuItem {
        MenuItem {
            id: "item-shake".to_string(),
            name: "Chocolate Shake".to_string(),
            price_cents: 429,
            category: "Shakes".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_merges_same_item_and_modifications() {
        let mut order = OrderBuilder::new();
        let id1 = order.add_item(&burger(), 1, "").unwrap();
        let id2 = order.add_item(&burger(), 1, "").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(order.line_count(), 1);
        assert_eq!(order.lines()[0].quantity, 2);
        assert_eq!(order.total().cents(), 1378);
    }

    #[test]
    fn test_different_modifications_open_separate_lines() {
        let mut order = OrderBuilder::new();
        order.add_item(&burger(), 1, "").unwrap();
        order.add_item(&burger(), 1, "no onion").unwrap();

        assert_eq!(order.line_count(), 2);
    }

    #[test]
    fn test_modification_key_normalizes_case_and_spacing() {
        let mut order = OrderBuilder::new();
        let id1 = order.add_item(&burger(), 1, "No Onion, Add Bacon").unwrap();
        let id2 = order.add_item(&burger(), 1, " no onion ,add bacon ").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(order.line_count(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut order = OrderBuilder::new();
        let line_id = order.add_item(&burger(), 1, "").unwrap();

        order.update_quantity(&line_id, 5).unwrap();
        assert_eq!(order.lines()[0].quantity, 5);
        assert_eq!(order.total().cents(), 5 * 689);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut order = OrderBuilder::new();
        let line_id = order.add_item(&burger(), 2, "").unwrap();

        order.update_quantity(&line_id, 0).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn test_update_quantity_rejects_negative() {
        let mut order = OrderBuilder::new();
        let line_id = order.add_item(&burger(), 1, "").unwrap();

        let err = order.update_quantity(&line_id, -1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_unknown_line_id_is_rejected() {
        let mut order = OrderBuilder::new();
        order.add_item(&burger(), 1, "").unwrap();

        let err = order.update_quantity("no-such-line", 3).unwrap_err();
        assert!(matches!(err, CoreError::UnknownOrderLine { .. }));

        let err = order.remove_line("no-such-line").unwrap_err();
        assert!(matches!(err, CoreError::UnknownOrderLine { .. }));
    }

    #[test]
    fn test_remove_line() {
        let mut order = OrderBuilder::new();
        let keep = order.add_item(&burger(), 1, "").unwrap();
        let drop = order.add_item(&shake(), 1, "").unwrap();

        order.remove_line(&drop).unwrap();
        assert_eq!(order.line_count(), 1);
        assert!(order.line(&keep).is_some());
    }

    #[test]
    fn test_clear_and_totals() {
        let mut order = OrderBuilder::new();
        order.add_item(&burger(), 2, "").unwrap();
        order.add_item(&shake(), 1, "").unwrap();

        assert_eq!(order.total_quantity(), 3);
        assert_eq!(order.total().cents(), 2 * 689 + 429);

        let totals = OrderTotals::from(&order);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_cents, 1807);

        order.clear();
        assert!(order.is_empty());
        assert_eq!(order.total().cents(), 0);
    }

    #[test]
    fn test_merge_cannot_exceed_max_quantity() {
        let mut order = OrderBuilder::new();
        order.add_item(&burger(), MAX_LINE_QUANTITY, "").unwrap();

        let err = order.add_item(&burger(), 1, "").unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        // Failed merge leaves the existing line untouched.
        assert_eq!(order.lines()[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_order_line_cap() {
        let mut order = OrderBuilder::new();
        for i in 0..MAX_ORDER_LINES {
            let item = MenuItem {
                id: format!("item-{i}"),
                name: format!("Item {i}"),
                price_cents: 100,
                category: "Test".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            order.add_item(&item, 1, "").unwrap();
        }

        let err = order.add_item(&shake(), 1, "").unwrap_err();
        assert!(matches!(err, CoreError::OrderTooLarge { .. }));
    }

    #[test]
    fn test_take_lines_drains_the_draft() {
        let mut order = OrderBuilder::new();
        order.add_item(&burger(), 2, "no onion").unwrap();

        let lines = order.take_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert!(order.is_empty());
    }
}
