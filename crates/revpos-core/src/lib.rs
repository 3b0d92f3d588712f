//! # revpos-core: Pure Business Logic for RevPOS
//!
//! This crate is the **heart** of RevPOS. It contains the order lifecycle
//! rules, the menu item resolver, and the money arithmetic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RevPOS Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │    Menu UI ──► Order UI ──► Transactions UI ──► Reports UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ IPC / JSON                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 revpos-service (Commands)                       │   │
//! │  │    submit_order, cancel_transaction, restock_report, etc.      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ revpos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │  │  types  │ │  money  │ │ resolver │ │  order  │ │validation│ │   │
//! │  │  │ Txn     │ │  Money  │ │ recipe + │ │ Order   │ │  rules  │ │   │
//! │  │  │ Ledger  │ │ (cents) │ │ mods →   │ │ Builder │ │  checks │ │   │
//! │  │  │ types   │ │         │ │ deltas   │ │         │ │         │ │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 revpos-db (Database Layer)                      │   │
//! │  │     SQLite queries, migrations, ledger + workflow repos         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ingredient, MenuItem, Transaction, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`modifications`] - Parser for the "no onion, add bacon" grammar
//! - [`resolver`] - Recipe + modifications → per-unit ingredient deltas
//! - [`order`] - Draft order assembly (the order builder)
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use revpos_core::money::Money;
//! use revpos_core::resolver::{resolve, IngredientIndex};
//! use revpos_core::types::IngredientRequirement;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(689); // $6.89
//! assert_eq!(price.to_string(), "$6.89");
//!
//! // Resolve a one-line recipe with a removal
//! let mut catalog = IngredientIndex::new();
//! catalog.insert("ing-bun", "Bun");
//! catalog.insert("ing-onion", "Onion");
//!
//! let recipe = vec![
//!     IngredientRequirement {
//!         ingredient_id: "ing-bun".to_string(),
//!         name: "Bun".to_string(),
//!         quantity: 1,
//!     },
//!     IngredientRequirement {
//!         ingredient_id: "ing-onion".to_string(),
//!         name: "Onion".to_string(),
//!         quantity: 1,
//!     },
//! ];
//!
//! let resolution = resolve(&recipe, &catalog, "no onion").unwrap();
//! assert_eq!(resolution.deltas.len(), 1); // just the bun
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod modifications;
pub mod money;
pub mod order;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use revpos_core::Money` instead of
// `use revpos_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderBuilder, OrderLine, OrderTotals};
pub use resolver::{resolve, IngredientIndex, Resolution, ResolutionWarning};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single draft order
///
/// ## Why a constant?
/// Prevents runaway drafts and keeps a submitted order's ledger work bounded.
/// Can be made configurable per store in future versions.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single order line
///
/// ## Why a constant?
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per store in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of a raw modification string
///
/// ## Why a constant?
/// The modification list is free text from the terminal; anything past a few
/// hundred characters is a paste accident, not an order.
pub const MAX_MODIFICATIONS_LEN: usize = 500;
