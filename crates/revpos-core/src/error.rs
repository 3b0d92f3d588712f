//! # Error Types
//!
//! Domain-specific error types for revpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  revpos-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  revpos-db errors (separate crate)                                     │
//! │  └── DbError          - Database failures; wraps CoreError when a      │
//! │                         workflow hits a business rule mid-transaction  │
//! │                                                                         │
//! │  revpos-service errors (separate crate)                                │
//! │  └── ApiError         - What the UI layer sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ingredient name, transaction id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::TransactionStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations in the order lifecycle.
/// Every one of them aborts the enclosing operation with no partial mutation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A recipe references an ingredient that does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - A `menu_item_ingredients` row points at a deleted/missing ingredient
    /// - Seed data and menu administration got out of sync
    ///
    /// Resolution for the affected component is aborted before any ledger
    /// mutation, so the on-hand quantities stay untouched.
    #[error("Recipe references unknown ingredient: {ingredient_id}")]
    UnknownIngredient { ingredient_id: String },

    /// Not enough on-hand quantity to cover a deduction.
    ///
    /// ## When This Occurs
    /// - An order would drive an ingredient's on-hand quantity negative
    ///
    /// ## User Workflow
    /// ```text
    /// Submit order (2 × Classic Hamburger)
    ///      │
    ///      ▼
    /// Ledger decrement: Bun needs 2, on hand 1
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Bun", available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// UI shows: "Not enough Bun in stock"; whole order rejected
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// The transaction is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Cancelling a fulfilled or already-cancelled transaction
    /// - Fulfilling or updating anything that is no longer `in progress`
    ///
    /// `fulfilled` and `cancelled` are terminal; no operation leaves them.
    #[error("Transaction {transaction_id} is {current_status}, cannot {operation}")]
    InvalidTransition {
        transaction_id: String,
        current_status: TransactionStatus,
        operation: String,
    },

    /// Order has exceeded the maximum allowed number of lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// An order-builder operation referenced a line that is not in the order.
    ///
    /// Happens when two terminals race on the same draft order, or the UI
    /// holds a stale line id after a clear.
    #[error("Order line not found: {line_id}")]
    UnknownOrderLine { line_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidTransition error for the given operation.
    pub fn invalid_transition(
        transaction_id: impl Into<String>,
        current_status: TransactionStatus,
        operation: impl Into<String>,
    ) -> Self {
        CoreError::InvalidTransition {
            transaction_id: transaction_id.into(),
            current_status,
            operation: operation.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
