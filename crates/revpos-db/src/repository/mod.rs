//! # Repository Module
//!
//! Database repository implementations for RevPOS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service Command                                                       │
//! │       │                                                                 │
//! │       │  db.transactions().create(&drafts)                             │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── create(&self, drafts)                                             │
//! │  ├── cancel(&self, id)                                                 │
//! │  ├── fulfill(&self, id)                                                │
//! │  └── update(&self, id, drafts)                                         │
//! │       │                                                                 │
//! │       │  SQL (one transaction per workflow)                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Workflows compose the ledger inside their own transaction           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ingredient::IngredientRepository`] - Ingredient catalog + on-hand ledger
//! - [`menu::MenuRepository`] - Menu items and recipes
//! - [`transaction::TransactionRepository`] - Order lifecycle workflows
//! - [`report::ReportRepository`] - Read-only reporting queries

pub mod ingredient;
pub mod menu;
pub mod report;
pub mod transaction;
