//! # revpos-db: Database Layer for Rev's Grill POS
//!
//! This crate provides database access for the Rev's Grill point-of-sale
//! system. It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rev's Grill Data Flow                             │
//! │                                                                         │
//! │  Service Command (create_transaction)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     revpos-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ IngredientRepo │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ MenuRepo       │    │ 001_init.sql │  │   │
//! │  │   │ WAL + FKs     │    │ TransactionRepo│    │ 002_idx.sql  │  │   │
//! │  │   │               │    │ ReportRepo     │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./revpos_dev.db (WAL journal, foreign keys ON)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (ingredient, menu,
//!   transaction, report)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use revpos_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/revpos.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let open = db.transactions().list_by_status(TransactionStatus::InProgress).await?;
//! let low = db.reports().restock_report().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::ingredient::IngredientRepository;
pub use repository::menu::MenuRepository;
pub use repository::report::{
    ExcessLine, ItemSales, PairSales, ReportRepository, RestockLine,
};
pub use repository::transaction::TransactionRepository;
