//! # Command Module
//!
//! Every operation the service exposes, grouped by concern.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs     ◄─── You are here (exports)
//! ├── order.rs   ◄─── Draft order + transaction workflows
//! ├── menu.rs    ◄─── Catalog reads, recipe preview
//! └── report.rs  ◄─── Manager reports
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Caller (desktop shell, HTTP handler, test)                             │
//! │  ───────────────────────────────────────────                            │
//! │  let summary = commands::order::create_transaction(                     │
//! │      &db,          ◄── shared Database handle                           │
//! │      &config,      ◄── ServiceConfig (retry budget)                     │
//! │      request,      ◄── deserialized CreateTransactionRequest            │
//! │  ).await?;                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command validates, resolves, calls the repositories,                   │
//! │  and maps every failure to a wire-shaped ApiError.                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Caller serializes the DTO (serde, camelCase)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the database
//! async fn list_menu_items(db: &Database, ...)
//!
//! // Needs the session draft
//! fn get_order(session: &OrderSession)
//!
//! // Workflow: database + retry budget
//! async fn create_transaction(db: &Database, config: &ServiceConfig, ...)
//! ```

pub mod menu;
pub mod order;
pub mod report;
