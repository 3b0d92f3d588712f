//! # Order Commands
//!
//! The transaction workflows and the session-scoped draft order.
//!
//! ## Submission Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Submission                                     │
//! │                                                                         │
//! │  ComponentRequest[]   (item names + quantities + modification text)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_components                                                     │
//! │    1. menu.get_by_name      → price + recipe (frozen into the draft)   │
//! │    2. ingredients.name_index → catalog for "add X" lookups             │
//! │    3. core resolve()         → per-unit deduction deltas + warnings    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ComponentDraft[] ──► transactions.create ── one SQL transaction ──►   │
//! │                        (row + snapshots + ledger charge)                │
//! │       │                                                                 │
//! │       └── SQLITE_BUSY? retry (bounded), then CONCURRENCY_CONFLICT      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Draft Lifecycle
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌─────────────┐     ┌──────────────┐
//! │  Empty   │────►│ Drafting │────►│ submit_order│────►│ in progress  │
//! │  Order   │     │          │     │             │     │ transaction  │
//! └──────────┘     └──────────┘     └─────────────┘     └──────────────┘
//!                       │                  │
//!                  add_to_order       failure keeps the draft;
//!                  update_order_line  success clears it
//!                  remove_order_line
//!                  clear_order
//! ```

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dto::{
    ComponentRequest, CreateTransactionRequest, TransactionDetail, TransactionSummary,
};
use crate::error::ApiError;
use crate::state::{OrderSession, ServiceConfig};
use revpos_core::validation::{validate_modifications, validate_quantity};
use revpos_core::{
    resolve, ComponentDraft, CoreError, OrderBuilder, OrderLine, OrderTotals, TransactionStatus,
};
use revpos_db::{Database, DbError, DbResult};

/// Draft order response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
}

impl From<&OrderBuilder> for OrderView {
    fn from(order: &OrderBuilder) -> Self {
        OrderView {
            lines: order.lines().to_vec(),
            totals: OrderTotals::from(order),
        }
    }
}

// =============================================================================
// Transaction Workflows
// =============================================================================

/// Creates a transaction from submitted components.
///
/// ## What This Does
/// 1. Resolves every component (menu lookup, modification parsing, recipe →
///    deduction deltas)
/// 2. Persists the transaction and charges the ledger in one SQL transaction
/// 3. Retries a busy ledger a bounded number of times
///
/// ## Returns
/// The created transaction header (`in progress`).
pub async fn create_transaction(
    db: &Database,
    config: &ServiceConfig,
    request: CreateTransactionRequest,
) -> Result<TransactionSummary, ApiError> {
    debug!(components = request.components.len(), "create_transaction command");

    let drafts = resolve_components(db, &request.components).await?;

    let transactions = db.transactions();
    let created =
        with_busy_retry(config.ledger_retry_attempts, || transactions.create(&drafts)).await?;

    info!(id = %created.id, cost_cents = created.cost_cents, "Transaction created");

    Ok(TransactionSummary::from(created))
}

/// Cancels an `in progress` transaction and restores its ingredients.
pub async fn cancel_transaction(
    db: &Database,
    config: &ServiceConfig,
    id: &str,
) -> Result<TransactionSummary, ApiError> {
    debug!(id = %id, "cancel_transaction command");

    let transactions = db.transactions();
    let cancelled =
        with_busy_retry(config.ledger_retry_attempts, || transactions.cancel(id)).await?;

    info!(id = %id, "Transaction cancelled");

    Ok(TransactionSummary::from(cancelled))
}

/// Marks an `in progress` transaction fulfilled. The deductions stand.
pub async fn fulfill_transaction(
    db: &Database,
    config: &ServiceConfig,
    id: &str,
) -> Result<TransactionSummary, ApiError> {
    debug!(id = %id, "fulfill_transaction command");

    let transactions = db.transactions();
    let fulfilled =
        with_busy_retry(config.ledger_retry_attempts, || transactions.fulfill(id)).await?;

    info!(id = %id, "Transaction fulfilled");

    Ok(TransactionSummary::from(fulfilled))
}

/// Replaces an `in progress` transaction's components (full replace).
///
/// The old deduction snapshots are reversed and the new components resolved
/// and charged, all inside one SQL transaction.
pub async fn update_transaction(
    db: &Database,
    config: &ServiceConfig,
    id: &str,
    components: Vec<ComponentRequest>,
) -> Result<TransactionSummary, ApiError> {
    debug!(id = %id, components = components.len(), "update_transaction command");

    let drafts = resolve_components(db, &components).await?;

    let transactions = db.transactions();
    let updated =
        with_busy_retry(config.ledger_retry_attempts, || transactions.update(id, &drafts))
            .await?;

    info!(id = %id, cost_cents = updated.cost_cents, "Transaction updated");

    Ok(TransactionSummary::from(updated))
}

// =============================================================================
// Transaction Reads
// =============================================================================

/// Gets a transaction with its components (ticket/kitchen display).
pub async fn get_transaction(db: &Database, id: &str) -> Result<TransactionDetail, ApiError> {
    debug!(id = %id, "get_transaction command");

    let transaction = db
        .transactions()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction", id))?;
    let components = db.transactions().get_components(id).await?;

    Ok(TransactionDetail::new(transaction, components))
}

/// Lists recent transactions, newest first.
///
/// ## Arguments
/// * `limit` - Maximum rows (default 50, capped at 500)
pub async fn list_transactions(
    db: &Database,
    limit: Option<i64>,
) -> Result<Vec<TransactionSummary>, ApiError> {
    let limit = limit.unwrap_or(50).clamp(1, 500);
    debug!(limit, "list_transactions command");

    let transactions = db.transactions().list_recent(limit).await?;

    Ok(transactions.into_iter().map(TransactionSummary::from).collect())
}

/// Lists open transactions in kitchen-queue order (oldest first).
pub async fn list_in_progress(db: &Database) -> Result<Vec<TransactionSummary>, ApiError> {
    debug!("list_in_progress command");

    let transactions = db
        .transactions()
        .list_by_status(TransactionStatus::InProgress)
        .await?;

    Ok(transactions.into_iter().map(TransactionSummary::from).collect())
}

// =============================================================================
// Draft Order (session state)
// =============================================================================

/// Adds a menu item to the session's draft order.
///
/// ## Behavior
/// - Same item with the same modifications already drafted: quantity merges
/// - Name and price are frozen into the line at add time
///
/// ## Arguments
/// * `item_name` - Menu item name (matched case-insensitively)
/// * `quantity` - Units to add (default: 1)
/// * `modifications` - Raw modification string (default: none)
pub async fn add_to_order(
    db: &Database,
    session: &OrderSession,
    item_name: &str,
    quantity: Option<i64>,
    modifications: Option<String>,
) -> Result<OrderView, ApiError> {
    let quantity = quantity.unwrap_or(1);
    let modifications = modifications.unwrap_or_default();
    debug!(item = %item_name, quantity, "add_to_order command");

    let item = db
        .menu()
        .get_by_name(item_name)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", item_name))?;

    let view = session.with_order_mut(|order| {
        order.add_item(&item, quantity, &modifications)?;
        Ok::<OrderView, CoreError>(OrderView::from(&*order))
    })?;

    Ok(view)
}

/// Updates the quantity of a draft line (0 removes it).
pub fn update_order_line(
    session: &OrderSession,
    line_id: &str,
    quantity: i64,
) -> Result<OrderView, ApiError> {
    debug!(line_id = %line_id, quantity, "update_order_line command");

    let view = session.with_order_mut(|order| {
        order.update_quantity(line_id, quantity)?;
        Ok::<OrderView, CoreError>(OrderView::from(&*order))
    })?;

    Ok(view)
}

/// Removes a draft line.
pub fn remove_order_line(session: &OrderSession, line_id: &str) -> Result<OrderView, ApiError> {
    debug!(line_id = %line_id, "remove_order_line command");

    let view = session.with_order_mut(|order| {
        order.remove_line(line_id)?;
        Ok::<OrderView, CoreError>(OrderView::from(&*order))
    })?;

    Ok(view)
}

/// Clears the draft order.
pub fn clear_order(session: &OrderSession) -> OrderView {
    debug!("clear_order command");

    session.with_order_mut(|order| {
        order.clear();
        OrderView::from(&*order)
    })
}

/// Gets the current draft order.
pub fn get_order(session: &OrderSession) -> OrderView {
    debug!("get_order command");

    session.with_order(|order| OrderView::from(order))
}

/// Submits the session's draft order as a new transaction.
///
/// ## Behavior
/// The draft survives a failed submit (insufficient stock, busy ledger), so
/// the cashier can adjust and retry; only a successful creation clears it.
pub async fn submit_order(
    db: &Database,
    config: &ServiceConfig,
    session: &OrderSession,
) -> Result<TransactionSummary, ApiError> {
    debug!("submit_order command");

    let components: Vec<ComponentRequest> = session.with_order(|order| {
        order
            .lines()
            .iter()
            .map(|line| ComponentRequest {
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                modifications: line.modifications.clone(),
            })
            .collect()
    });

    if components.is_empty() {
        return Err(ApiError::validation("Order is empty"));
    }

    let drafts = resolve_components(db, &components).await?;

    let transactions = db.transactions();
    let created =
        with_busy_retry(config.ledger_retry_attempts, || transactions.create(&drafts)).await?;

    session.with_order_mut(|order| order.clear());

    info!(
        id = %created.id,
        cost_cents = created.cost_cents,
        lines = components.len(),
        "Order submitted"
    );

    Ok(TransactionSummary::from(created))
}

// =============================================================================
// Internals
// =============================================================================

/// Resolves component requests into fully-priced drafts with deduction
/// deltas.
///
/// ## Rules
/// - Menu items are looked up by name; a miss is `NotFound`
/// - The whole submission shares one catalog index snapshot
/// - Resolver warnings (unrecognized tokens, unknown additions) are logged
///   and dropped, never fatal
async fn resolve_components(
    db: &Database,
    components: &[ComponentRequest],
) -> Result<Vec<ComponentDraft>, ApiError> {
    if components.is_empty() {
        return Err(ApiError::validation("Order has no components"));
    }

    let index = db.ingredients().name_index().await?;
    let menu = db.menu();

    let mut drafts = Vec::with_capacity(components.len());
    for request in components {
        validate_quantity(request.quantity).map_err(CoreError::from)?;
        validate_modifications(&request.modifications).map_err(CoreError::from)?;

        let item = menu
            .get_by_name(&request.item_name)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", &request.item_name))?;

        let requirements = menu.requirements_for(&item.id).await?;
        let resolution = resolve(&requirements, &index, &request.modifications)?;

        for warning in &resolution.warnings {
            warn!(item = %item.name, %warning, "Ignoring modification token");
        }

        drafts.push(ComponentDraft {
            menu_item_id: item.id,
            item_name: item.name,
            unit_price_cents: item.price_cents,
            quantity: request.quantity,
            modifications: request.modifications.trim().to_string(),
            deductions: resolution.deltas,
        });
    }

    Ok(drafts)
}

/// Runs a ledger-touching operation, retrying `SQLITE_BUSY` a bounded number
/// of times with a short backoff.
///
/// Safe because a busy workflow rolled back completely; re-running it starts
/// from scratch.
async fn with_busy_retry<T, F, Fut>(attempts: u32, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DbResult<T>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Err(DbError::Busy(message)) => {
                attempt += 1;
                if attempt >= attempts {
                    warn!(attempts, "Ledger still busy, giving up");
                    return Err(ApiError::from(DbError::Busy(message)));
                }
                debug!(attempt, "Ledger busy, retrying");
                tokio::time::sleep(Duration::from_millis(25 * u64::from(attempt))).await;
            }
            result => return result.map_err(ApiError::from),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use revpos_core::Ingredient;
    use revpos_db::DbConfig;

    struct Fixture {
        bun: Ingredient,
        patty: Ingredient,
        cheese: Ingredient,
        onion: Ingredient,
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Bun 100, Beef Patty 80, Cheese 60, Onion 40; Classic Hamburger $6.89
    /// takes one of each.
    async fn seed_grill(db: &Database) -> Fixture {
        let bun = db.ingredients().insert("Bun", 100, "count", 10).await.unwrap();
        let patty = db.ingredients().insert("Beef Patty", 80, "count", 10).await.unwrap();
        let cheese = db.ingredients().insert("Cheese", 60, "slice", 10).await.unwrap();
        let onion = db.ingredients().insert("Onion", 40, "ounce", 5).await.unwrap();

        let burger = db.menu().insert("Classic Hamburger", 689, "Burgers").await.unwrap();
        for ingredient in [&bun, &patty, &cheese, &onion] {
            db.menu()
                .set_requirement(&burger.id, &ingredient.id, 1)
                .await
                .unwrap();
        }

        Fixture {
            bun,
            patty,
            cheese,
            onion,
        }
    }

    async fn on_hand(db: &Database, id: &str) -> i64 {
        db.ingredients().get_by_id(id).await.unwrap().unwrap().on_hand
    }

    fn request(item_name: &str, quantity: i64, modifications: &str) -> CreateTransactionRequest {
        CreateTransactionRequest {
            components: vec![ComponentRequest {
                item_name: item_name.to_string(),
                quantity,
                modifications: modifications.to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_create_transaction_charges_and_prices() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();

        let summary =
            create_transaction(&db, &config, request("Classic Hamburger", 2, ""))
                .await
                .unwrap();

        assert_eq!(summary.cost_cents, 1378);
        assert_eq!(summary.status, TransactionStatus::InProgress);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 98);
        assert_eq!(on_hand(&db, &fixture.patty.id).await, 78);
        assert_eq!(on_hand(&db, &fixture.onion.id).await, 38);
    }

    #[tokio::test]
    async fn test_removal_modification_spares_the_ingredient() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();

        create_transaction(&db, &config, request("Classic Hamburger", 1, "no onion"))
            .await
            .unwrap();

        assert_eq!(on_hand(&db, &fixture.onion.id).await, 40);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 99);
    }

    #[tokio::test]
    async fn test_addition_modification_charges_extra() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();

        create_transaction(&db, &config, request("Classic Hamburger", 1, "add cheese"))
            .await
            .unwrap();

        // Base slice plus the extra one.
        assert_eq!(on_hand(&db, &fixture.cheese.id).await, 58);
    }

    #[tokio::test]
    async fn test_unknown_menu_item() {
        let db = test_db().await;
        seed_grill(&db).await;
        let config = ServiceConfig::default();

        let err = create_transaction(&db, &config, request("Lobster Roll", 1, ""))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rejects_and_preserves_ledger() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();
        db.ingredients().set_on_hand(&fixture.bun.id, 1).await.unwrap();

        let err = create_transaction(&db, &config, request("Classic Hamburger", 2, ""))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 1);
        assert_eq!(on_hand(&db, &fixture.patty.id).await, 80);
        assert!(list_transactions(&db, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_restores_and_terminal_states_reject() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();

        let summary =
            create_transaction(&db, &config, request("Classic Hamburger", 2, ""))
                .await
                .unwrap();
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 98);

        let cancelled = cancel_transaction(&db, &config, &summary.id).await.unwrap();
        assert_eq!(cancelled.status, TransactionStatus::Cancelled);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 100);

        let err = cancel_transaction(&db, &config, &summary.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 100);

        let err = fulfill_transaction(&db, &config, &summary.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn test_fulfill_keeps_the_charge() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();

        let summary =
            create_transaction(&db, &config, request("Classic Hamburger", 1, ""))
                .await
                .unwrap();

        let fulfilled = fulfill_transaction(&db, &config, &summary.id).await.unwrap();
        assert_eq!(fulfilled.status, TransactionStatus::Fulfilled);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 99);
    }

    #[tokio::test]
    async fn test_update_transaction_reprices_and_rebalances() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();

        let summary =
            create_transaction(&db, &config, request("Classic Hamburger", 1, ""))
                .await
                .unwrap();
        assert_eq!(on_hand(&db, &fixture.onion.id).await, 39);

        let updated = update_transaction(
            &db,
            &config,
            &summary.id,
            vec![ComponentRequest {
                item_name: "Classic Hamburger".to_string(),
                quantity: 2,
                modifications: "no onion".to_string(),
            }],
        )
        .await
        .unwrap();

        assert_eq!(updated.cost_cents, 1378);
        // Old onion charge reversed, none charged by the new components.
        assert_eq!(on_hand(&db, &fixture.onion.id).await, 40);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 98);
    }

    #[tokio::test]
    async fn test_get_transaction_detail() {
        let db = test_db().await;
        seed_grill(&db).await;
        let config = ServiceConfig::default();

        let summary =
            create_transaction(&db, &config, request("Classic Hamburger", 2, "no onion"))
                .await
                .unwrap();

        let detail = get_transaction(&db, &summary.id).await.unwrap();
        assert_eq!(detail.components.len(), 1);
        assert_eq!(detail.components[0].item_name, "Classic Hamburger");
        assert_eq!(detail.components[0].quantity, 2);
        assert_eq!(detail.components[0].modifications, "no onion");
        assert_eq!(detail.components[0].line_total_cents, 1378);

        let err = get_transaction(&db, "missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_in_progress_is_the_kitchen_queue() {
        let db = test_db().await;
        seed_grill(&db).await;
        let config = ServiceConfig::default();

        let first = create_transaction(&db, &config, request("Classic Hamburger", 1, ""))
            .await
            .unwrap();
        let second = create_transaction(&db, &config, request("Classic Hamburger", 1, ""))
            .await
            .unwrap();
        fulfill_transaction(&db, &config, &first.id).await.unwrap();

        let open = list_in_progress(&db).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);

        let all = list_transactions(&db, Some(10)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_session_flow_merges_and_submits() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();
        let session = OrderSession::new();

        add_to_order(&db, &session, "Classic Hamburger", None, None)
            .await
            .unwrap();
        let view = add_to_order(&db, &session, "Classic Hamburger", Some(1), None)
            .await
            .unwrap();

        // Same item, same (empty) modifications: one merged line.
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.totals.total_cents, 1378);

        let summary = submit_order(&db, &config, &session).await.unwrap();
        assert_eq!(summary.cost_cents, 1378);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 98);

        // Success clears the draft.
        assert!(get_order(&session).lines.is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_the_draft() {
        let db = test_db().await;
        let fixture = seed_grill(&db).await;
        let config = ServiceConfig::default();
        let session = OrderSession::new();
        db.ingredients().set_on_hand(&fixture.bun.id, 1).await.unwrap();

        add_to_order(&db, &session, "Classic Hamburger", Some(2), None)
            .await
            .unwrap();

        let err = submit_order(&db, &config, &session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        // The cashier can fix the order and retry.
        assert_eq!(get_order(&session).lines.len(), 1);
        assert_eq!(on_hand(&db, &fixture.bun.id).await, 1);
    }

    #[tokio::test]
    async fn test_submit_empty_order_rejected() {
        let db = test_db().await;
        let config = ServiceConfig::default();
        let session = OrderSession::new();

        let err = submit_order(&db, &config, &session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_draft_line_edits() {
        let db = test_db().await;
        seed_grill(&db).await;
        let session = OrderSession::new();

        let view = add_to_order(&db, &session, "Classic Hamburger", Some(1), Some("no onion".to_string()))
            .await
            .unwrap();
        let line_id = view.lines[0].line_id.clone();

        let view = update_order_line(&session, &line_id, 3).unwrap();
        assert_eq!(view.lines[0].quantity, 3);

        // Quantity 0 removes the line.
        let view = update_order_line(&session, &line_id, 0).unwrap();
        assert!(view.lines.is_empty());

        let err = remove_order_line(&session, &line_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
