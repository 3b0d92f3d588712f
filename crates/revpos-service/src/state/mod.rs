//! # State Module
//!
//! State handed to service operations by the embedding host.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each
//! operation takes exactly the state it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Host (Tauri app, HTTP server, test harness)                           │
//! │       │                                                                 │
//! │       │ constructs once, passes by reference                            │
//! │       ▼                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   Database   │  │ OrderSession │  │  ServiceConfig   │              │
//! │  │  (revpos-db, │  │              │  │                  │              │
//! │  │  pool inside,│  │  Arc<Mutex<  │  │  store_name      │              │
//! │  │  thread-safe)│  │   OrderBuilder│ │  database_path   │              │
//! │  │              │  │  >>          │  │  retry attempts  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool (thread-safe)                    │
//! │  • OrderSession: Arc<Mutex<T>> for exclusive draft access              │
//! │  • ServiceConfig: read-only after initialization                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::ServiceConfig;
pub use session::OrderSession;
