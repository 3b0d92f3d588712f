//! # Report Commands
//!
//! Morning-manager reads over the transaction history and the ledger.
//! Cancelled transactions never count; window bounds are inclusive.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::ApiError;
use revpos_db::{Database, ExcessLine, ItemSales, PairSales, RestockLine};

/// Pairs of menu items sold in the same transaction, most frequent first.
///
/// ## Arguments
/// * `start`, `end` - Window bounds (both inclusive)
pub async fn what_sells_together(
    db: &Database,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<PairSales>, ApiError> {
    debug!(%start, %end, "what_sells_together command");
    validate_window(start, end)?;
    Ok(db.reports().what_sells_together(start, end).await?)
}

/// Ingredients below their restock level, worst deficit first.
pub async fn restock_report(db: &Database) -> Result<Vec<RestockLine>, ApiError> {
    debug!("restock_report command");
    Ok(db.reports().restock_report().await?)
}

/// Ingredients whose recent consumption does not justify their stock.
///
/// ## Arguments
/// * `since` - Start of the consumption window (inclusive)
pub async fn excess_report(
    db: &Database,
    since: DateTime<Utc>,
) -> Result<Vec<ExcessLine>, ApiError> {
    debug!(%since, "excess_report command");
    Ok(db.reports().excess_report(since).await?)
}

/// Units sold and revenue per menu item, highest revenue first.
pub async fn sales_by_item(
    db: &Database,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<ItemSales>, ApiError> {
    debug!(%start, %end, "sales_by_item command");
    validate_window(start, end)?;
    Ok(db.reports().sales_by_item(start, end).await?)
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ApiError> {
    if start > end {
        return Err(ApiError::validation("Report window start is after its end"));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
