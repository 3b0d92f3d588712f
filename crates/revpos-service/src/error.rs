//! # API Error Type
//!
//! Unified error type for service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in RevPOS                                 │
//! │                                                                         │
//! │  UI Layer                     Service + Storage                         │
//! │  ────────                     ─────────────────                         │
//! │                                                                         │
//! │  createTransaction(...)                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Operation: Result<T, ApiError>                                  │  │
//! │  │                                                                  │  │
//! │  │  CoreError::InsufficientStock ──┐                                │  │
//! │  │  (rolled back in SQL)           │                                │  │
//! │  │                                 ├──► ApiError { code, message }  │  │
//! │  │  DbError::Busy ── retried ──────┤    (serializable)              │  │
//! │  │  (3 attempts, then conflict)    │                                │  │
//! │  │                                 │                                │  │
//! │  │  DbError::QueryFailed ──────────┘                                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──────────────────────────────────────────────────────────────────── │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INSUFFICIENT_STOCK"                                     │
//! │    // e.message = "Insufficient stock for Bun: available 1, ..."        │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The UI receives both a machine-readable `code` and a human-readable
//! `message`, so the terminal can branch on the code and display the message.

use serde::Serialize;
use revpos_core::CoreError;
use revpos_db::DbError;

/// API error returned from service operations.
///
/// ## Serialization
/// This is what the UI receives when an operation fails:
/// ```json
/// {
///   "code": "INVALID_TRANSITION",
///   "message": "Transaction 42f1... is cancelled, cannot fulfill"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await createTransaction(request);
/// } catch (e) {
///   switch (e.code) {
///     case 'INSUFFICIENT_STOCK':
///       showNotification(e.message);      // "...Bun: available 1..."
///       break;
///     case 'CONCURRENCY_CONFLICT':
///       retryBanner();                    // another terminal got there first
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (transaction, menu item, ingredient, order line)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Business rule violation not covered by a specific code
    BusinessLogic,

    /// Internal error
    Internal,

    /// Draft order manipulation failed (size/quantity caps)
    OrderError,

    /// An ingredient deduction would drive stock below zero
    InsufficientStock,

    /// A recipe references an ingredient missing from the catalog
    UnknownIngredient,

    /// The transaction is not in a state that allows the operation
    InvalidTransition,

    /// The ledger stayed busy through the bounded retries
    ConcurrencyConflict,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a concurrency conflict error (busy retries exhausted).
    pub fn conflict() -> Self {
        ApiError::new(
            ErrorCode::ConcurrencyConflict,
            "The store is busy; please try again",
        )
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            // Business failures surfaced through the SQL rollback path keep
            // their domain code.
            DbError::Domain(core) => ApiError::from(core),
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            // Commands retry Busy before converting; reaching here means the
            // retries ran out.
            DbError::Busy(message) => {
                tracing::warn!("Ledger busy after retries: {}", message);
                ApiError::conflict()
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownIngredient { ref ingredient_id } => ApiError::new(
                ErrorCode::UnknownIngredient,
                format!("Recipe references unknown ingredient: {}", ingredient_id),
            ),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::InvalidTransition, err.to_string())
            }
            CoreError::OrderTooLarge { max } => ApiError::new(
                ErrorCode::OrderError,
                format!("Order cannot have more than {} lines", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => ApiError::new(
                ErrorCode::ValidationError,
                format!("Quantity {} exceeds maximum allowed ({})", requested, max),
            ),
            CoreError::UnknownOrderLine { line_id } => {
                ApiError::not_found("Order line", &line_id)
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use revpos_core::TransactionStatus;

    #[test]
    fn test_domain_errors_keep_their_code() {
        let err = ApiError::from(DbError::Domain(CoreError::InsufficientStock {
            name: "Bun".to_string(),
            available: 1,
            requested: 2,
        }));
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Bun"));

        let err = ApiError::from(DbError::Domain(CoreError::invalid_transition(
            "t-1",
            TransactionStatus::Cancelled,
            "fulfill",
        )));
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert!(err.message.contains("cancelled"));
    }

    #[test]
    fn test_busy_maps_to_conflict() {
        let err = ApiError::from(DbError::Busy("database is locked".to_string()));
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    }

    #[test]
    fn test_not_found_carries_entity_and_id() {
        let err = ApiError::from(DbError::not_found("Transaction", "abc"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Transaction not found: abc");
    }

    #[test]
    fn test_wire_shape() {
        let err = ApiError::new(ErrorCode::InsufficientStock, "out of buns");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "INSUFFICIENT_STOCK");
        assert_eq!(json["message"], "out of buns");
    }
}
