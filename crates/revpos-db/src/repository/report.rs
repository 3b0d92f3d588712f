//! # Reporting Repository
//!
//! Read-only aggregations over persisted transactions for the back office.
//!
//! ## Reports
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ what_sells_together(start, end)                                    │
//! │   item pairs that appear in the same order, by frequency           │
//! │                                                                    │
//! │ restock_report()                                                   │
//! │   ingredients below their restock level, most urgent first         │
//! │                                                                    │
//! │ excess_report(since)                                               │
//! │   ingredients that moved less than 10% of current stock            │
//! │                                                                    │
//! │ sales_by_item(start, end)                                          │
//! │   units and revenue per menu item over the window                  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancelled transactions never count: their deductions were reversed, so
//! counting them would report food that was never served. Sales figures come
//! from the component snapshots (`item_name`, `unit_price_cents`), so menu
//! renames and reprices after the fact do not rewrite history. Window bounds
//! are inclusive on both ends.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Report Rows
// =============================================================================

/// Two menu items and how many orders contained both.
///
/// `item_a` sorts lexicographically before `item_b`, so each unordered pair
/// appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PairSales {
    pub item_a: String,
    pub item_b: String,
    pub times_together: i64,
}

/// An ingredient that has fallen below its restock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestockLine {
    pub id: String,
    pub name: String,
    pub on_hand: i64,
    pub restock_level: i64,
}

/// An ingredient whose consumption since the cutoff is under 10% of its
/// current stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExcessLine {
    pub name: String,
    pub on_hand: i64,
    pub consumed: i64,
}

/// Units sold and revenue for one menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ItemSales {
    pub item_name: String,
    pub units_sold: i64,
    pub revenue_cents: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for back-office reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Pairs of distinct menu items ordered together, most frequent first.
    ///
    /// ## Example
    /// Three orders of {burger, fries} and one of {burger, shake} yield
    /// `("Classic Hamburger", "French Fries", 3)` ahead of
    /// `("Chocolate Shake", "Classic Hamburger", 1)`.
    pub async fn what_sells_together(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<PairSales>> {
        debug!(%start, %end, "Running what-sells-together report");

        // COUNT(DISTINCT transaction_id) so an order with two component
        // lines of the same item (different modifications) counts once.
        let pairs = sqlx::query_as::<_, PairSales>(
            r#"
            SELECT a.item_name AS item_a,
                   b.item_name AS item_b,
                   COUNT(DISTINCT a.transaction_id) AS times_together
            FROM transaction_components a
            JOIN transaction_components b
              ON b.transaction_id = a.transaction_id
             AND a.item_name < b.item_name
            JOIN transactions t ON t.id = a.transaction_id
            WHERE t.status != 'cancelled'
              AND t.ordered_at >= ?1
              AND t.ordered_at <= ?2
            GROUP BY a.item_name, b.item_name
            ORDER BY times_together DESC, item_a, item_b
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(pairs)
    }

    /// Ingredients below their restock level, largest deficit first.
    pub async fn restock_report(&self) -> DbResult<Vec<RestockLine>> {
        debug!("Running restock report");

        let lines = sqlx::query_as::<_, RestockLine>(
            r#"
            SELECT id, name, on_hand, restock_level
            FROM ingredients
            WHERE on_hand < restock_level
            ORDER BY (restock_level - on_hand) DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Ingredients whose consumption since `since` is under 10% of their
    /// current stock.
    ///
    /// ## Rules
    /// - Consumption sums deduction snapshots × component quantity over
    ///   non-cancelled transactions with `ordered_at >= since`
    /// - The threshold compares in integers: `consumed * 10 < on_hand`
    /// - Untouched ingredients qualify (consumed 0); empty ones never do
    pub async fn excess_report(&self, since: DateTime<Utc>) -> DbResult<Vec<ExcessLine>> {
        debug!(%since, "Running excess report");

        let lines = sqlx::query_as::<_, ExcessLine>(
            r#"
            SELECT i.name,
                   i.on_hand,
                   COALESCE(u.consumed, 0) AS consumed
            FROM ingredients i
            LEFT JOIN (
                SELECT cd.ingredient_id,
                       SUM(cd.quantity * tc.quantity) AS consumed
                FROM component_deductions cd
                JOIN transaction_components tc ON tc.id = cd.component_id
                JOIN transactions t ON t.id = tc.transaction_id
                WHERE t.status != 'cancelled'
                  AND t.ordered_at >= ?1
                GROUP BY cd.ingredient_id
            ) u ON u.ingredient_id = i.id
            WHERE COALESCE(u.consumed, 0) * 10 < i.on_hand
            ORDER BY i.name
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Units sold and revenue per menu item over the window, highest revenue
    /// first. Figures come from component snapshots, so later price changes
    /// do not alter them.
    pub async fn sales_by_item(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<ItemSales>> {
        debug!(%start, %end, "Running sales-by-item report");

        let sales = sqlx::query_as::<_, ItemSales>(
            r#"
            SELECT tc.item_name,
                   SUM(tc.quantity) AS units_sold,
                   SUM(tc.quantity * tc.unit_price_cents) AS revenue_cents
            FROM transaction_components tc
            JOIN transactions t ON t.id = tc.transaction_id
            WHERE t.status != 'cancelled'
              AND t.ordered_at >= ?1
              AND t.ordered_at <= ?2
            GROUP BY tc.item_name
            ORDER BY revenue_cents DESC, tc.item_name
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
