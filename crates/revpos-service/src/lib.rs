//! # RevPOS Service
//!
//! The operation layer of the RevPOS point-of-sale: every workflow a shell
//! (desktop app, HTTP handler, admin script) invokes lives here. Commands
//! take their state explicitly, so any async caller can drive them.
//!
//! ## Module Organization
//! ```text
//! revpos_service/
//! ├── lib.rs          ◄─── You are here (bootstrap & exports)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Draft order shared across clones
//! │   └── config.rs   ◄─── Service configuration (env overrides)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── order.rs    ◄─── Draft order + transaction workflows
//! │   ├── menu.rs     ◄─── Catalog reads, recipe preview
//! │   └── report.rs   ◄─── Manager reports
//! ├── dto.rs          ◄─── Request/response wire types
//! ├── error.rs        ◄─── ApiError + error codes
//! └── telemetry.rs    ◄─── tracing subscriber setup
//! ```
//!
//! ## State Management
//! Commands never share a god object. Each declares exactly what it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Service State                                      │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │    Database      │ │   OrderSession   │ │    ServiceConfig     │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • SQLite pool   │ │  • Draft order   │ │  • Store name        │   │
//! │  │  • Repositories  │ │  • Arc<Mutex<>>  │ │  • Database path     │   │
//! │  │                  │ │  • Totals        │ │  • Retry budget      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  All three are cheap to clone and safe to share across tasks.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod dto;
pub mod error;
pub mod state;
pub mod telemetry;

use tracing::info;

use revpos_db::{Database, DbConfig};

pub use dto::{
    ComponentRequest, ComponentView, CreateTransactionRequest, IngredientLine, IngredientView,
    MenuItemView, TransactionDetail, TransactionSummary,
};
pub use error::{ApiError, ErrorCode};
pub use state::{OrderSession, ServiceConfig};

/// Boots the service: telemetry, then the database.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Service Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info, revpos=debug; override with RUST_LOG               │
/// │                                                                         │
/// │  2. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode at config.database_path                      │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Hand the Database back ───────────────────────────────────────────► │
/// │     • Caller constructs OrderSession per terminal                       │
/// │     • Caller passes &Database + &ServiceConfig into commands            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust,ignore
/// let config = ServiceConfig::from_env();
/// let db = revpos_service::start(&config).await?;
/// let session = OrderSession::new();
/// ```
pub async fn start(config: &ServiceConfig) -> Result<Database, ApiError> {
    telemetry::init();

    info!(store = %config.store_name, path = %config.database_path, "Starting RevPOS service");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    if !db.health_check().await {
        return Err(ApiError::internal("Database failed its startup health check"));
    }

    info!("Service ready");

    Ok(db)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_boots_against_a_fresh_file() {
        let path = std::env::temp_dir().join(format!("revpos-start-{}.db", uuid::Uuid::new_v4()));
        let config = ServiceConfig {
            database_path: path.display().to_string(),
            ..ServiceConfig::default()
        };

        let db = start(&config).await.unwrap();

        // Migrations ran, so the catalog is queryable (and empty).
        assert!(db.menu().list_all().await.unwrap().is_empty());

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
