//! # Transaction Repository
//!
//! Database workflows for the order lifecycle.
//!
//! ## Transaction Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Transaction Lifecycle                               │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create(drafts) → Transaction { status: in progress }           │
//! │         • insert transaction + components + deduction snapshots        │
//! │         • charge the ledger (deductions × component quantity)          │
//! │         • cost = Σ(unit price × quantity)                              │
//! │                                                                         │
//! │  2. (OPTIONAL) UPDATE                                                  │
//! │     └── update(id, drafts) → full component replace                    │
//! │         • reverse old snapshots, charge new ones, recompute cost       │
//! │                                                                         │
//! │  3a. FULFILL                              3b. CANCEL                   │
//! │      └── fulfill(id)                          └── cancel(id)           │
//! │          • status only,                           • reverse stored     │
//! │            no ledger effect                         snapshots          │
//! │                                                   • status → cancelled │
//! │                                                                         │
//! │  EVERY workflow is ONE SQL transaction: the status row, the component  │
//! │  rows, and every ledger decrement commit together or not at all.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why reverse from snapshots?
//! Cancellation restores what was actually deducted at order time, read from
//! `component_deductions`, never from the live recipe. A menu edit between
//! create and cancel therefore cannot skew the reversal.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction as SqlxTransaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::ingredient::IngredientRepository;
use revpos_core::types::scale_deltas;
use revpos_core::{
    ComponentDraft, CoreError, IngredientDelta, Transaction, TransactionComponent,
    TransactionStatus, ValidationError,
};

/// Repository for order transaction workflows.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Workflows (each is one SQL transaction)
    // =========================================================================

    /// Creates a transaction from fully-resolved component drafts.
    ///
    /// ## What This Does (one SQL transaction)
    /// 1. Inserts the transaction row (`in progress`)
    /// 2. Inserts every component with its per-unit deduction snapshot
    /// 3. Charges the ledger: snapshot × component quantity per component
    ///
    /// Any failure (insufficient stock, unknown ingredient) rolls the whole
    /// order back; the ledger and the transaction table are left untouched.
    pub async fn create(&self, drafts: &[ComponentDraft]) -> DbResult<Transaction> {
        if drafts.is_empty() {
            return Err(CoreError::Validation(ValidationError::Required {
                field: "components".to_string(),
            })
            .into());
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let cost_cents: i64 = drafts.iter().map(|d| d.line_total().cents()).sum();

        debug!(id = %id, components = drafts.len(), cost_cents, "Creating transaction");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (id, ordered_at, cost_cents, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(now)
        .bind(cost_cents)
        .bind(TransactionStatus::InProgress)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        Self::insert_components_tx(&mut tx, &id, drafts).await?;

        tx.commit().await?;

        info!(id = %id, cost_cents, "Transaction created");

        Ok(Transaction {
            id,
            ordered_at: now,
            cost_cents,
            status: TransactionStatus::InProgress,
            created_at: now,
            updated_at: now,
        })
    }

    /// Cancels an `in progress` transaction, reversing its stored deduction
    /// snapshots.
    ///
    /// ## Errors
    /// - `NotFound` when the id does not exist
    /// - `InvalidTransition` when the transaction is already terminal
    pub async fn cancel(&self, id: &str) -> DbResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        let status = Self::status_tx(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))?;
        if status != TransactionStatus::InProgress {
            return Err(CoreError::invalid_transition(id, status, "cancel").into());
        }

        let deltas = Self::stored_deductions_tx(&mut tx, id).await?;
        IngredientRepository::reverse_tx(&mut tx, &deltas).await?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE transactions SET status = 'cancelled', updated_at = ?2
            WHERE id = ?1 AND status = 'in progress'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // The status guard on the UPDATE backs up the read above; zero rows
        // means another writer won the race and nothing here commits.
        if result.rows_affected() == 0 {
            let fresh = Self::status_tx(&mut tx, id).await?.unwrap_or(status);
            return Err(CoreError::invalid_transition(id, fresh, "cancel").into());
        }

        tx.commit().await?;

        info!(id = %id, reversed = deltas.len(), "Transaction cancelled");

        self.require(id).await
    }

    /// Fulfills an `in progress` transaction. Status change only; the ledger
    /// deductions stand.
    pub async fn fulfill(&self, id: &str) -> DbResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        let status = Self::status_tx(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))?;
        if status != TransactionStatus::InProgress {
            return Err(CoreError::invalid_transition(id, status, "fulfill").into());
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE transactions SET status = 'fulfilled', updated_at = ?2
            WHERE id = ?1 AND status = 'in progress'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let fresh = Self::status_tx(&mut tx, id).await?.unwrap_or(status);
            return Err(CoreError::invalid_transition(id, fresh, "fulfill").into());
        }

        tx.commit().await?;

        info!(id = %id, "Transaction fulfilled");

        self.require(id).await
    }

    /// Replaces an `in progress` transaction's components wholesale.
    ///
    /// ## What This Does (one SQL transaction)
    /// 1. Reverses the old deduction snapshots
    /// 2. Deletes the old components (cascades to their snapshots)
    /// 3. Inserts the new components and charges their deductions
    /// 4. Recomputes the cost
    ///
    /// Full replace, not incremental: the caller sends the complete new
    /// component list, mirroring how the terminal edits an open order.
    pub async fn update(&self, id: &str, drafts: &[ComponentDraft]) -> DbResult<Transaction> {
        if drafts.is_empty() {
            return Err(CoreError::Validation(ValidationError::Required {
                field: "components".to_string(),
            })
            .into());
        }

        let mut tx = self.pool.begin().await?;

        let status = Self::status_tx(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))?;
        if status != TransactionStatus::InProgress {
            return Err(CoreError::invalid_transition(id, status, "update").into());
        }

        let old_deltas = Self::stored_deductions_tx(&mut tx, id).await?;
        IngredientRepository::reverse_tx(&mut tx, &old_deltas).await?;

        sqlx::query("DELETE FROM transaction_components WHERE transaction_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_components_tx(&mut tx, id, drafts).await?;

        let cost_cents: i64 = drafts.iter().map(|d| d.line_total().cents()).sum();
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE transactions SET cost_cents = ?2, updated_at = ?3
            WHERE id = ?1 AND status = 'in progress'
            "#,
        )
        .bind(id)
        .bind(cost_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let fresh = Self::status_tx(&mut tx, id).await?.unwrap_or(status);
            return Err(CoreError::invalid_transition(id, fresh, "update").into());
        }

        tx.commit().await?;

        info!(id = %id, components = drafts.len(), cost_cents, "Transaction updated");

        self.require(id).await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a transaction by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, ordered_at, cost_cents, status, created_at, updated_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Gets a transaction's components with their deduction snapshots loaded.
    pub async fn get_components(&self, transaction_id: &str) -> DbResult<Vec<TransactionComponent>> {
        let mut components = sqlx::query_as::<_, TransactionComponent>(
            r#"
            SELECT id, transaction_id, menu_item_id, item_name,
                   unit_price_cents, quantity, modifications, position
            FROM transaction_components
            WHERE transaction_id = ?1
            ORDER BY position
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        // Orders are small (a handful of components); one query per
        // component is fine here.
        for component in &mut components {
            component.deductions = sqlx::query_as::<_, IngredientDelta>(
                r#"
                SELECT ingredient_id, quantity
                FROM component_deductions
                WHERE component_id = ?1
                ORDER BY ingredient_id
                "#,
            )
            .bind(&component.id)
            .fetch_all(&self.pool)
            .await?;
        }

        Ok(components)
    }

    /// Lists the most recent transactions, newest first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, ordered_at, cost_cents, status, created_at, updated_at
            FROM transactions
            ORDER BY ordered_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Lists transactions in a given status, oldest first (kitchen queue
    /// order).
    pub async fn list_by_status(&self, status: TransactionStatus) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, ordered_at, cost_cents, status, created_at, updated_at
            FROM transactions
            WHERE status = ?1
            ORDER BY ordered_at
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Gets a transaction that must exist (post-workflow re-read).
    async fn require(&self, id: &str) -> DbResult<Transaction> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))
    }

    // =========================================================================
    // Workflow Internals
    // =========================================================================

    /// Reads a transaction's status inside a workflow transaction.
    async fn status_tx(
        tx: &mut SqlxTransaction<'_, Sqlite>,
        id: &str,
    ) -> DbResult<Option<TransactionStatus>> {
        let status = sqlx::query_scalar::<_, TransactionStatus>(
            "SELECT status FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(status)
    }

    /// Inserts components + deduction snapshots and charges the ledger.
    async fn insert_components_tx(
        tx: &mut SqlxTransaction<'_, Sqlite>,
        transaction_id: &str,
        drafts: &[ComponentDraft],
    ) -> DbResult<()> {
        for (position, draft) in drafts.iter().enumerate() {
            let component_id = Uuid::new_v4().to_string();

            sqlx::query(
                r#"
                INSERT INTO transaction_components
                    (id, transaction_id, menu_item_id, item_name,
                     unit_price_cents, quantity, modifications, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&component_id)
            .bind(transaction_id)
            .bind(&draft.menu_item_id)
            .bind(&draft.item_name)
            .bind(draft.unit_price_cents)
            .bind(draft.quantity)
            .bind(&draft.modifications)
            .bind(position as i64)
            .execute(&mut **tx)
            .await?;

            for delta in &draft.deductions {
                sqlx::query(
                    r#"
                    INSERT INTO component_deductions (component_id, ingredient_id, quantity)
                    VALUES (?1, ?2, ?3)
                    "#,
                )
                .bind(&component_id)
                .bind(&delta.ingredient_id)
                .bind(delta.quantity)
                .execute(&mut **tx)
                .await?;
            }

            // The snapshot stores per-unit deltas; the ledger charge is
            // per-unit × quantity.
            IngredientRepository::apply_tx(tx, &scale_deltas(&draft.deductions, draft.quantity))
                .await?;
        }

        Ok(())
    }

    /// Sums a transaction's stored snapshots (scaled by component quantity)
    /// into one delta per ingredient, for reversal.
    async fn stored_deductions_tx(
        tx: &mut SqlxTransaction<'_, Sqlite>,
        transaction_id: &str,
    ) -> DbResult<Vec<IngredientDelta>> {
        let deltas = sqlx::query_as::<_, IngredientDelta>(
            r#"
            SELECT cd.ingredient_id, SUM(cd.quantity * tc.quantity) AS quantity
            FROM component_deductions cd
            JOIN transaction_components tc ON tc.id = cd.component_id
            WHERE tc.transaction_id = ?1
            GROUP BY cd.ingredient_id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(deltas)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use revpos_core::Ingredient;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_ingredient(db: &Database, name: &str, on_hand: i64) -> Ingredient {
        db.ingredients()
            .insert(name, on_hand, "count", 10)
            .await
            .unwrap()
    }

    fn burger_draft(bun_id: &str, quantity: i64) -> ComponentDraft {
        ComponentDraft {
            menu_item_id: "item-burger".to_string(),
            item_name: "Classic Hamburger".to_string(),
            unit_price_cents: 689,
            quantity,
            modifications: String::new(),
            deductions: vec![IngredientDelta::new(bun_id, 1)],
        }
    }

    async fn on_hand(db: &Database, id: &str) -> i64 {
        db.ingredients().get_by_id(id).await.unwrap().unwrap().on_hand
    }

    #[tokio::test]
    async fn test_create_charges_ledger_and_persists() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        // 2 × Classic Hamburger at $6.89, one bun each.
        let created = db
            .transactions()
            .create(&[burger_draft(&bun.id, 2)])
            .await
            .unwrap();

        assert_eq!(created.status, TransactionStatus::InProgress);
        assert_eq!(created.cost_cents, 1378);
        assert_eq!(on_hand(&db, &bun.id).await, 98);

        let components = db.transactions().get_components(&created.id).await.unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].item_name, "Classic Hamburger");
        assert_eq!(components[0].quantity, 2);
        assert_eq!(components[0].deductions, vec![IngredientDelta::new(&bun.id, 1)]);
    }

    #[tokio::test]
    async fn test_cancel_restores_ledger() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let created = db
            .transactions()
            .create(&[burger_draft(&bun.id, 2)])
            .await
            .unwrap();
        assert_eq!(on_hand(&db, &bun.id).await, 98);

        let cancelled = db.transactions().cancel(&created.id).await.unwrap();
        assert_eq!(cancelled.status, TransactionStatus::Cancelled);
        assert_eq!(on_hand(&db, &bun.id).await, 100);
    }

    #[tokio::test]
    async fn test_terminal_states_reject_everything() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let created = db
            .transactions()
            .create(&[burger_draft(&bun.id, 1)])
            .await
            .unwrap();
        db.transactions().cancel(&created.id).await.unwrap();

        // Cancel a cancelled transaction: rejected, no double reversal.
        let err = db.transactions().cancel(&created.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(on_hand(&db, &bun.id).await, 100);

        let err = db.transactions().fulfill(&created.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidTransition { .. })
        ));

        let err = db
            .transactions()
            .update(&created.id, &[burger_draft(&bun.id, 1)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_fulfill_keeps_deductions() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let created = db
            .transactions()
            .create(&[burger_draft(&bun.id, 3)])
            .await
            .unwrap();

        let fulfilled = db.transactions().fulfill(&created.id).await.unwrap();
        assert_eq!(fulfilled.status, TransactionStatus::Fulfilled);
        // Fulfillment is a status change only; the stock stays consumed.
        assert_eq!(on_hand(&db, &bun.id).await, 97);

        // Fulfilled is terminal too.
        let err = db.transactions().cancel(&created.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_insufficient_stock_rejects_whole_order() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        let cheese = seed_ingredient(&db, "Cheese Slice", 1).await;

        let drafts = vec![
            burger_draft(&bun.id, 2),
            ComponentDraft {
                menu_item_id: "item-cheeseburger".to_string(),
                item_name: "Cheeseburger".to_string(),
                unit_price_cents: 749,
                quantity: 2,
                modifications: String::new(),
                deductions: vec![IngredientDelta::new(&cheese.id, 1)],
            },
        ];

        let err = db.transactions().create(&drafts).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        // Everything rolled back: the earlier bun charge and the row itself.
        assert_eq!(on_hand(&db, &bun.id).await, 100);
        assert_eq!(on_hand(&db, &cheese.id).await, 1);
        assert!(db.transactions().list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ingredient_rejects_whole_order() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let drafts = vec![ComponentDraft {
            menu_item_id: "item-burger".to_string(),
            item_name: "Classic Hamburger".to_string(),
            unit_price_cents: 689,
            quantity: 1,
            modifications: String::new(),
            deductions: vec![
                IngredientDelta::new(&bun.id, 1),
                IngredientDelta::new("999", 1),
            ],
        }];

        let err = db.transactions().create(&drafts).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::UnknownIngredient { .. })
        ));
        assert_eq!(on_hand(&db, &bun.id).await, 100);
        assert!(db.transactions().list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_components_and_recomputes_cost() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        let cup = seed_ingredient(&db, "Shake Cup", 50).await;

        let created = db
            .transactions()
            .create(&[burger_draft(&bun.id, 2)])
            .await
            .unwrap();
        assert_eq!(on_hand(&db, &bun.id).await, 98);

        let new_drafts = vec![ComponentDraft {
            menu_item_id: "item-shake".to_string(),
            item_name: "Chocolate Shake".to_string(),
            unit_price_cents: 429,
            quantity: 1,
            modifications: String::new(),
            deductions: vec![IngredientDelta::new(&cup.id, 1)],
        }];

        let updated = db.transactions().update(&created.id, &new_drafts).await.unwrap();
        assert_eq!(updated.status, TransactionStatus::InProgress);
        assert_eq!(updated.cost_cents, 429);

        // Old charge reversed, new charge applied.
        assert_eq!(on_hand(&db, &bun.id).await, 100);
        assert_eq!(on_hand(&db, &cup.id).await, 49);

        let components = db.transactions().get_components(&created.id).await.unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].item_name, "Chocolate Shake");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_original_order_intact() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        let cheese = seed_ingredient(&db, "Cheese Slice", 1).await;

        let created = db
            .transactions()
            .create(&[burger_draft(&bun.id, 2)])
            .await
            .unwrap();

        let bad_drafts = vec![ComponentDraft {
            menu_item_id: "item-cheeseburger".to_string(),
            item_name: "Cheeseburger".to_string(),
            unit_price_cents: 749,
            quantity: 5,
            modifications: String::new(),
            deductions: vec![IngredientDelta::new(&cheese.id, 1)],
        }];

        let err = db.transactions().update(&created.id, &bad_drafts).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        // The rollback undoes the reversal and the replace: the original
        // order still stands, stock still charged for it.
        assert_eq!(on_hand(&db, &bun.id).await, 98);
        assert_eq!(on_hand(&db, &cheese.id).await, 1);

        let components = db.transactions().get_components(&created.id).await.unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].item_name, "Classic Hamburger");

        let transaction = db.transactions().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(transaction.cost_cents, 1378);
    }

    #[tokio::test]
    async fn test_cancel_reverses_snapshot_not_live_recipe() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;
        let burger = db
            .menu()
            .insert("Classic Hamburger", 689, "Burgers")
            .await
            .unwrap();
        db.menu().set_requirement(&burger.id, &bun.id, 1).await.unwrap();

        let created = db
            .transactions()
            .create(&[ComponentDraft {
                menu_item_id: burger.id.clone(),
                item_name: burger.name.clone(),
                unit_price_cents: burger.price_cents,
                quantity: 2,
                modifications: String::new(),
                deductions: vec![IngredientDelta::new(&bun.id, 1)],
            }])
            .await
            .unwrap();
        assert_eq!(on_hand(&db, &bun.id).await, 98);

        // The recipe changes after the order was placed.
        db.menu().set_requirement(&burger.id, &bun.id, 5).await.unwrap();

        // Reversal still restores exactly what the snapshot recorded.
        db.transactions().cancel(&created.id).await.unwrap();
        assert_eq!(on_hand(&db, &bun.id).await, 100);
    }

    #[tokio::test]
    async fn test_missing_transaction_is_not_found() {
        let db = test_db().await;

        let err = db.transactions().cancel("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = db.transactions().fulfill("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        assert!(db.transactions().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_order_rejected() {
        let db = test_db().await;

        let err = db.transactions().create(&[]).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_listing_views() {
        let db = test_db().await;
        let bun = seed_ingredient(&db, "Bun", 100).await;

        let first = db.transactions().create(&[burger_draft(&bun.id, 1)]).await.unwrap();
        let second = db.transactions().create(&[burger_draft(&bun.id, 1)]).await.unwrap();
        db.transactions().fulfill(&first.id).await.unwrap();

        let recent = db.transactions().list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);

        let open = db
            .transactions()
            .list_by_status(TransactionStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);

        let done = db
            .transactions()
            .list_by_status(TransactionStatus::Fulfilled)
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, first.id);
    }
}
